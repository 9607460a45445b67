//! Attribution of freshly created windows to a launched application.
//!
//! No window-manager API links "the process I spawned" to "the window that
//! appeared", so matching is a bounded heuristic search: only windows that are
//! new since the baseline snapshot are considered, a candidate must be
//! attributable to the application by pid or process name, and the first
//! plausible candidate in enumeration order wins.

use crate::debug_if_enabled;
use crate::model::{WindowId, WindowRecord};
use crate::services::desktop::{Desktop, LaunchCommand};
use crate::services::enumerator::WindowEnumerator;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

/// Ядро обрезает имя команды процесса до 15 байт
const COMM_MAX_LEN: usize = 15;

/// Совпадает ли имя команды процесса с ожидаемым именем или программой
pub fn comm_matches(expected: &str, comm: &str) -> bool {
    if expected.is_empty() || comm.is_empty() {
        return false;
    }

    let expected = Path::new(expected)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(expected);

    comm == expected || (comm.len() == COMM_MAX_LEN && expected.starts_with(comm))
}

/// Признаки, по которым новое окно приписывается запущенному приложению
#[derive(Debug, Clone)]
pub struct Attribution {
    names: Vec<String>,
    spawned_pid: Option<u32>,
}

impl Attribution {
    pub fn new(application_name: &str, command: &LaunchCommand, spawned_pid: Option<u32>) -> Self {
        let mut names = vec![application_name.to_string()];
        if command.program != application_name {
            names.push(command.program.clone());
        }
        Self { names, spawned_pid }
    }

    pub fn matches_pid(&self, pid: u32) -> bool {
        pid != 0 && self.spawned_pid == Some(pid)
    }

    pub fn matches_name(&self, comm: &str) -> bool {
        self.names.iter().any(|name| comm_matches(name, comm))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchState {
    Launching,
    Matching { attempt: u32 },
    Matched(WindowId),
    TimedOut { attempts: u32 },
}

/// Итог опроса
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(WindowId),
    TimedOut { attempts: u32 },
}

/// Опрос окон с ограниченным числом попыток
pub struct WindowMatcher<'a> {
    enumerator: WindowEnumerator<'a>,
    baseline: HashSet<WindowId>,
    attribution: Attribution,
    max_attempts: u32,
    poll_interval: Duration,
    state: MatchState,
}

impl<'a> WindowMatcher<'a> {
    pub fn new(
        desktop: &'a dyn Desktop,
        baseline: HashSet<WindowId>,
        attribution: Attribution,
        max_attempts: u32,
        poll_interval: Duration,
    ) -> Self {
        Self {
            enumerator: WindowEnumerator::new(desktop),
            baseline,
            attribution,
            max_attempts,
            poll_interval,
            state: MatchState::Launching,
        }
    }

    /// Одна попытка: перечислить окна и поискать кандидата среди новых
    pub async fn step(&mut self) -> &MatchState {
        let attempt = match self.state {
            MatchState::Launching => 0,
            MatchState::Matching { attempt } => attempt,
            MatchState::Matched(_) | MatchState::TimedOut { .. } => return &self.state,
        };

        if attempt >= self.max_attempts {
            self.state = MatchState::TimedOut { attempts: attempt };
            return &self.state;
        }

        let attempt = attempt + 1;
        self.state = match self.find_candidate().await {
            Some(id) => MatchState::Matched(id),
            None if attempt >= self.max_attempts => MatchState::TimedOut { attempts: attempt },
            None => MatchState::Matching { attempt },
        };

        debug_if_enabled!("Попытка {}/{}: {:?}", attempt, self.max_attempts, self.state);
        &self.state
    }

    /// Опрашивать до совпадения или исчерпания попыток.
    /// Между попытками ровно одна пауза, после последней паузы нет.
    pub async fn run(mut self) -> MatchOutcome {
        loop {
            match self.step().await {
                MatchState::Matched(id) => return MatchOutcome::Matched(id.clone()),
                MatchState::TimedOut { attempts } => {
                    return MatchOutcome::TimedOut { attempts: *attempts }
                }
                MatchState::Launching | MatchState::Matching { .. } => {}
            }
            sleep(self.poll_interval).await;
        }
    }

    async fn find_candidate(&self) -> Option<WindowId> {
        for window in self.enumerator.list_windows().await {
            if self.baseline.contains(&window.id) {
                continue;
            }

            if !self.is_attributable(&window).await {
                debug_if_enabled!("Новое окно {} не относится к запущенному приложению", window);
                continue;
            }

            if !self.enumerator.is_normal_window(&window.id).await {
                debug_if_enabled!("Новое окно {} пока не является обычным окном", window);
                continue;
            }

            return Some(window.id);
        }
        None
    }

    async fn is_attributable(&self, window: &WindowRecord) -> bool {
        if self.attribution.matches_pid(window.pid) {
            return true;
        }
        let comm = self.enumerator.resolve_application_name(window.pid).await;
        self.attribution.matches_name(&comm)
    }
}
