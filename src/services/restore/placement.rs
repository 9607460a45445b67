use crate::model::{SessionRecord, WindowGeometry, WindowId};
use crate::services::desktop::{Desktop, Directive};
use tracing::{debug, warn};

/// Сдвиг, вычитаемый из сохранённых координат перед размещением.
/// Сессии хранят абсолютные координаты; сдвиг равен началу рабочей области
/// в момент восстановления и считается один раз на весь вызов restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Correction {
    pub dx: i32,
    pub dy: i32,
}

impl Correction {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn apply(&self, geometry: WindowGeometry) -> WindowGeometry {
        geometry.shifted_back(self.dx, self.dy)
    }
}

pub async fn work_area_correction(desktop: &dyn Desktop, enabled: bool) -> Correction {
    if !enabled {
        return Correction::default();
    }

    match desktop.work_area_origin().await {
        Some((dx, dy)) => {
            debug!("Начало рабочей области: {},{}", dx, dy);
            Correction::new(dx, dy)
        }
        None => {
            warn!("Не удалось определить рабочую область, координаты не корректируются");
            Correction::default()
        }
    }
}

/// Команды в фиксированном порядке: снять развёрнутость, перенести на стол, задать геометрию
pub fn directives_for(record: &SessionRecord, correction: Correction, move_to_workspace: bool) -> Vec<Directive> {
    let mut directives = vec![Directive::RemoveMaximizedHorz, Directive::RemoveMaximizedVert];
    if move_to_workspace {
        directives.push(Directive::MoveToWorkspace(record.workspace));
    }
    directives.push(Directive::MoveResize(correction.apply(record.geometry)));
    directives
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub failed: Vec<Directive>,
}

impl PlacementReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Выполнить все команды; неудача одной не прерывает остальные
pub async fn place(desktop: &dyn Desktop, id: &WindowId, directives: &[Directive]) -> PlacementReport {
    let mut report = PlacementReport::default();
    for directive in directives {
        if !desktop.apply(id, directive).await {
            warn!("Окно {}: не удалось выполнить '{}'", id, directive);
            report.failed.push(*directive);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::desktop::fake::FakeDesktop;

    fn record() -> SessionRecord {
        SessionRecord::new("term", 2, WindowGeometry::new(100, 80, 800, 600))
    }

    #[test]
    fn test_directive_order() {
        let directives = directives_for(&record(), Correction::default(), true);
        assert_eq!(
            directives,
            vec![
                Directive::RemoveMaximizedHorz,
                Directive::RemoveMaximizedVert,
                Directive::MoveToWorkspace(2),
                Directive::MoveResize(WindowGeometry::new(100, 80, 800, 600)),
            ]
        );

        let without_workspace = directives_for(&record(), Correction::default(), false);
        assert_eq!(without_workspace.len(), 3);
        assert!(!without_workspace.contains(&Directive::MoveToWorkspace(2)));
    }

    #[test]
    fn test_correction_applied_to_geometry() {
        let directives = directives_for(&record(), Correction::new(64, 32), true);
        assert_eq!(
            directives.last(),
            Some(&Directive::MoveResize(WindowGeometry::new(36, 48, 800, 600)))
        );
    }

    #[tokio::test]
    async fn test_work_area_correction_only_when_enabled() {
        let desktop = FakeDesktop::new().with_work_area((0, 32));

        assert!(work_area_correction(&desktop, false).await.is_zero());
        assert_eq!(work_area_correction(&desktop, true).await, Correction::new(0, 32));
        assert!(work_area_correction(&FakeDesktop::new(), true).await.is_zero());
    }

    #[tokio::test]
    async fn test_place_attempts_every_directive() {
        let desktop = FakeDesktop::new().with_failing_directive(Directive::RemoveMaximizedVert);
        let id = WindowId::new("0x01");
        let directives = directives_for(&record(), Correction::default(), true);

        let report = place(&desktop, &id, &directives).await;

        assert_eq!(report.failed, vec![Directive::RemoveMaximizedVert]);
        assert!(!report.is_complete());
        let applied: Vec<Directive> = desktop.applied().into_iter().map(|(_, d)| d).collect();
        assert_eq!(applied, directives);
    }
}
