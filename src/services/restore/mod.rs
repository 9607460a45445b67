//! RestoreEngine: responsibility and boundaries
//!
//! Records are restored strictly one at a time: launch, poll for the new
//! window, place it, and only then move to the next record. Concurrent
//! launches would make "new since baseline" differencing ambiguous.

pub mod launch;
pub mod matcher;
pub mod placement;

use crate::config::RestoreConfig;
use crate::error::Result;
use crate::model::{Session, SessionRecord, WindowId};
use crate::services::desktop::{Desktop, Directive, LaunchOutcome};
use crate::services::enumerator::WindowEnumerator;
use crate::services::fingerprint::current_fingerprint;
use crate::services::session_store::SessionStore;
use std::collections::HashSet;
use tracing::{info, warn};

use self::launch::{is_already_running, LaunchTable};
use self::matcher::{Attribution, MatchOutcome, WindowMatcher};
use self::placement::{directives_for, place, work_area_correction, Correction};

/// Чем закончилось восстановление одной записи
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Placed {
        window: WindowId,
        failed_directives: Vec<Directive>,
    },
    /// Приложение уже запущено, запись считается выполненной без перемещения
    AlreadyRunning,
    TimedOut {
        attempts: u32,
    },
    LaunchFailed(String),
    Simulated,
}

#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    pub entries: Vec<(SessionRecord, RecordOutcome)>,
}

impl RestoreReport {
    pub fn placed(&self) -> usize {
        self.count(|outcome| matches!(outcome, RecordOutcome::Placed { .. }))
    }

    pub fn timed_out(&self) -> Vec<&SessionRecord> {
        self.entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, RecordOutcome::TimedOut { .. }))
            .map(|(record, _)| record)
            .collect()
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, outcome)| predicate(outcome)).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "Восстановлено {} из {} окон (уже запущено: {}, не дождались окна: {}, ошибок запуска: {})",
            self.placed(),
            self.entries.len(),
            self.count(|outcome| matches!(outcome, RecordOutcome::AlreadyRunning)),
            self.timed_out().len(),
            self.count(|outcome| matches!(outcome, RecordOutcome::LaunchFailed(_))),
        )
    }

    pub fn log_summary(&self) {
        let mut problems = Vec::new();
        for (record, outcome) in &self.entries {
            let name = &record.application_name;
            match outcome {
                RecordOutcome::Placed {
                    window,
                    failed_directives,
                } if !failed_directives.is_empty() => problems.push(format!(
                    "{} (окно {}: не выполнено команд {})",
                    name,
                    window,
                    failed_directives.len()
                )),
                RecordOutcome::TimedOut { attempts } => {
                    problems.push(format!("{} (нет окна после {} попыток)", name, attempts))
                }
                RecordOutcome::LaunchFailed(reason) => problems.push(format!("{} ({})", name, reason)),
                _ => {}
            }
        }

        if problems.is_empty() {
            info!("{}", self.summary());
        } else {
            warn!("{}; проблемы: {}", self.summary(), problems.join(", "));
        }
    }
}

pub struct RestoreEngine<'a> {
    desktop: &'a dyn Desktop,
    launch_table: &'a LaunchTable,
    settings: &'a RestoreConfig,
}

impl<'a> RestoreEngine<'a> {
    pub fn new(desktop: &'a dyn Desktop, launch_table: &'a LaunchTable, settings: &'a RestoreConfig) -> Self {
        Self {
            desktop,
            launch_table,
            settings,
        }
    }

    /// Восстановить все записи по очереди. Сбой одной записи не прерывает остальные.
    pub async fn restore(&self, session: &Session) -> RestoreReport {
        let correction = work_area_correction(self.desktop, self.settings.apply_work_area_correction).await;
        if !correction.is_zero() {
            info!("Координаты окон сдвигаются на ({}, {})", -correction.dx, -correction.dy);
        }

        let mut report = RestoreReport::default();
        for record in session.records() {
            let outcome = self.restore_record(record, correction).await;
            report.entries.push((record.clone(), outcome));
        }
        report
    }

    pub async fn restore_record(&self, record: &SessionRecord, correction: Correction) -> RecordOutcome {
        let name = record.application_name.as_str();

        if self.settings.skip_running {
            let processes = self.desktop.process_table().await;
            if is_already_running(&processes, name, std::process::id()) {
                info!("'{}' уже запущено, пропускаем", name);
                return RecordOutcome::AlreadyRunning;
            }
        }

        let baseline: HashSet<WindowId> = WindowEnumerator::new(self.desktop)
            .list_windows()
            .await
            .into_iter()
            .map(|window| window.id)
            .collect();

        let command = self.launch_table.resolve(name);
        let spawned_pid = match self.desktop.launch(&command).await {
            LaunchOutcome::Spawned { pid } => Some(pid),
            LaunchOutcome::Simulated => return RecordOutcome::Simulated,
            LaunchOutcome::Failed(reason) => {
                warn!("'{}' не запущено: {}", name, reason);
                return RecordOutcome::LaunchFailed(reason);
            }
        };
        info!("Запущено '{}' для записи '{}'", command, name);

        let matcher = WindowMatcher::new(
            self.desktop,
            baseline,
            Attribution::new(name, &command, spawned_pid),
            self.settings.max_attempts,
            self.settings.poll_interval(),
        );

        match matcher.run().await {
            MatchOutcome::Matched(window) => {
                let directives = directives_for(record, correction, self.settings.move_to_workspace);
                let placement = place(self.desktop, &window, &directives).await;
                if placement.is_complete() {
                    info!("Окно {} приложения '{}' размещено", window, name);
                }
                RecordOutcome::Placed {
                    window,
                    failed_directives: placement.failed,
                }
            }
            MatchOutcome::TimedOut { attempts } => {
                warn!(
                    "Окно приложения '{}' не появилось за {} попыток, запись пропущена",
                    name, attempts
                );
                RecordOutcome::TimedOut { attempts }
            }
        }
    }
}

/// Загрузить сессию для текущей конфигурации мониторов и восстановить её.
/// `Ok(None)`, если для этой конфигурации ничего не сохранено.
pub async fn restore_session(
    desktop: &dyn Desktop,
    store: &SessionStore,
    launch_table: &LaunchTable,
    settings: &RestoreConfig,
) -> Result<Option<RestoreReport>> {
    let fingerprint = current_fingerprint(desktop).await;
    let Some(session) = store.load(&fingerprint)? else {
        return Ok(None);
    };

    info!("Восстанавливаем {} окон для раскладки {}", session.len(), fingerprint);
    let engine = RestoreEngine::new(desktop, launch_table, settings);
    Ok(Some(engine.restore(&session).await))
}
