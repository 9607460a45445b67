use crate::error::Result;
use crate::model::{Session, SessionRecord};
use crate::services::desktop::Desktop;
use crate::services::enumerator::WindowEnumerator;
use crate::services::fingerprint::{current_fingerprint, Fingerprint};
use crate::services::session_store::SessionStore;
use crate::debug_if_enabled;
use std::path::PathBuf;
use tracing::warn;

/// Результат сохранения сессии
#[derive(Debug)]
pub struct CaptureSummary {
    pub fingerprint: Fingerprint,
    pub path: PathBuf,
    pub windows: usize,
}

/// Снимок текущих обычных окон в порядке перечисления
pub async fn snapshot(desktop: &dyn Desktop) -> Session {
    let enumerator = WindowEnumerator::new(desktop);
    let mut session = Session::default();

    for window in enumerator.list_windows().await {
        let window = enumerator.describe(window).await;
        if !window.is_normal() {
            debug_if_enabled!("Пропускаем служебное окно {}", window);
            continue;
        }

        if !SessionRecord::is_valid_application_name(&window.application_name) {
            warn!(
                "Окно {} пропущено: имя приложения {:?} нельзя сохранить",
                window, window.application_name
            );
            continue;
        }

        session.push(SessionRecord::from_window(&window));
    }

    session
}

/// Сохранить текущую раскладку для текущей конфигурации мониторов
pub async fn capture(desktop: &dyn Desktop, store: &SessionStore) -> Result<CaptureSummary> {
    let fingerprint = current_fingerprint(desktop).await;
    let session = snapshot(desktop).await;
    if session.is_empty() {
        warn!("Не найдено ни одного обычного окна, сохраняется пустая сессия");
    }
    let path = store.save(&fingerprint, session.records())?;

    Ok(CaptureSummary {
        fingerprint,
        path,
        windows: session.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WindowGeometry;
    use crate::services::desktop::fake::{normal_flags, FakeDesktop};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn desktop() -> FakeDesktop {
        let dock: BTreeSet<String> = ["_NET_WM_WINDOW_TYPE_DOCK".to_string()].into_iter().collect();
        FakeDesktop::new()
            .with_monitors("Monitors: 1\n")
            .with_window("0x01", 0, 100, WindowGeometry::new(10, 10, 800, 600), "term", normal_flags())
            .with_window("0x02", -1, 200, WindowGeometry::new(0, 0, 1920, 32), "panel", dock)
            .with_window("0x03", 1, 300, WindowGeometry::new(0, 0, 1920, 1040), "browser", normal_flags())
            .with_window("0x04", 1, 400, WindowGeometry::new(5, 5, 100, 100), "Web Content", normal_flags())
            .with_window("0x05", 2, 0, WindowGeometry::new(5, 5, 100, 100), "", normal_flags())
    }

    #[tokio::test]
    async fn test_snapshot_keeps_only_normal_windows() {
        let session = snapshot(&desktop()).await;

        assert_eq!(
            session.records(),
            &[
                SessionRecord::new("term", 0, WindowGeometry::new(10, 10, 800, 600)),
                SessionRecord::new("browser", 1, WindowGeometry::new(0, 0, 1920, 1040)),
            ]
        );
    }

    #[tokio::test]
    async fn test_capture_writes_session_for_fingerprint() {
        let temp = TempDir::new().unwrap();
        let store = SessionStore::new(temp.path());
        let desktop = desktop();

        let summary = capture(&desktop, &store).await.unwrap();

        assert_eq!(summary.windows, 2);
        assert_eq!(summary.fingerprint, Fingerprint::from_listing("Monitors: 1\n"));
        let loaded = store.load(&summary.fingerprint).unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.records().iter().all(|r| r.application_name != "panel"));
    }
}
