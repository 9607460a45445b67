//! Scripted desktop used by the capture and restore tests.

use super::r#trait::{Desktop, Directive, LaunchCommand, LaunchOutcome, ProcessEntry};
use crate::model::window::NORMAL_WINDOW_TYPE;
use crate::model::{WindowGeometry, WindowId, WindowRecord};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Окно, которое появится после запуска программы
struct ScriptedWindow {
    program: String,
    /// Сколько вызовов list_windows после запуска окно ещё не видно
    delay: usize,
    window: WindowRecord,
}

#[derive(Default)]
struct FakeState {
    windows: Vec<WindowRecord>,
    pending: Vec<(usize, WindowRecord)>,
    scripted: Vec<ScriptedWindow>,
    type_flags: HashMap<WindowId, BTreeSet<String>>,
    process_names: HashMap<u32, String>,
    processes: Vec<ProcessEntry>,
    monitors: String,
    work_area: Option<(i32, i32)>,
    failing_directives: HashSet<Directive>,
    failing_programs: HashSet<String>,
    launches: Vec<LaunchCommand>,
    applied: Vec<(WindowId, Directive)>,
    list_calls: usize,
    work_area_calls: usize,
    next_pid: u32,
}

pub struct FakeDesktop {
    state: Mutex<FakeState>,
}

pub fn normal_flags() -> BTreeSet<String> {
    [NORMAL_WINDOW_TYPE.to_string()].into_iter().collect()
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_pid: 10_000,
                ..FakeState::default()
            }),
        }
    }

    /// Уже открытое окно
    pub fn with_window(
        self,
        id: &str,
        workspace: i32,
        pid: u32,
        geometry: WindowGeometry,
        name: &str,
        flags: BTreeSet<String>,
    ) -> Self {
        {
            let mut state = self.state.lock();
            let id = WindowId::new(id);
            state.type_flags.insert(id.clone(), flags);
            state.process_names.insert(pid, name.to_string());
            state.windows.push(WindowRecord::new(id, workspace, pid, geometry));
        }
        self
    }

    /// Окно с заданным pid и именем процесса появится через `delay` опросов после запуска `program`
    pub fn with_launch_window(self, program: &str, id: &str, pid: u32, name: &str, delay: usize) -> Self {
        {
            let mut state = self.state.lock();
            let id = WindowId::new(id);
            state.type_flags.insert(id.clone(), normal_flags());
            state.process_names.insert(pid, name.to_string());
            state.scripted.push(ScriptedWindow {
                program: program.to_string(),
                delay,
                window: WindowRecord::new(id, 0, pid, WindowGeometry::new(0, 0, 300, 200)),
            });
        }
        self
    }

    pub fn with_process(self, pid: u32, command_line: &str) -> Self {
        self.state.lock().processes.push(ProcessEntry {
            pid,
            command_line: command_line.to_string(),
        });
        self
    }

    pub fn with_monitors(self, listing: &str) -> Self {
        self.state.lock().monitors = listing.to_string();
        self
    }

    pub fn with_work_area(self, origin: (i32, i32)) -> Self {
        self.state.lock().work_area = Some(origin);
        self
    }

    pub fn with_failing_directive(self, directive: Directive) -> Self {
        self.state.lock().failing_directives.insert(directive);
        self
    }

    pub fn with_failing_launch(self, program: &str) -> Self {
        self.state.lock().failing_programs.insert(program.to_string());
        self
    }

    pub fn launches(&self) -> Vec<LaunchCommand> {
        self.state.lock().launches.clone()
    }

    pub fn applied(&self) -> Vec<(WindowId, Directive)> {
        self.state.lock().applied.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().list_calls
    }

    pub fn work_area_calls(&self) -> usize {
        self.state.lock().work_area_calls
    }
}

#[async_trait::async_trait]
impl Desktop for FakeDesktop {
    async fn list_windows(&self) -> Vec<WindowRecord> {
        let mut state = self.state.lock();
        state.list_calls += 1;

        let mut still_pending = Vec::new();
        for (delay, window) in std::mem::take(&mut state.pending) {
            if delay == 0 {
                state.windows.push(window);
            } else {
                still_pending.push((delay - 1, window));
            }
        }
        state.pending = still_pending;

        state.windows.clone()
    }

    async fn window_type_flags(&self, id: &WindowId) -> BTreeSet<String> {
        self.state.lock().type_flags.get(id).cloned().unwrap_or_default()
    }

    async fn process_name(&self, pid: u32) -> String {
        self.state.lock().process_names.get(&pid).cloned().unwrap_or_default()
    }

    async fn process_table(&self) -> Vec<ProcessEntry> {
        self.state.lock().processes.clone()
    }

    async fn monitor_listing(&self) -> String {
        self.state.lock().monitors.clone()
    }

    async fn work_area_origin(&self) -> Option<(i32, i32)> {
        let mut state = self.state.lock();
        state.work_area_calls += 1;
        state.work_area
    }

    async fn launch(&self, command: &LaunchCommand) -> LaunchOutcome {
        let mut state = self.state.lock();
        state.launches.push(command.clone());
        if state.failing_programs.contains(&command.program) {
            return LaunchOutcome::Failed(format!("{}: not found", command.program));
        }

        let scheduled: Vec<(usize, WindowRecord)> = state
            .scripted
            .iter()
            .filter(|scripted| scripted.program == command.program)
            .map(|scripted| (scripted.delay, scripted.window.clone()))
            .collect();
        state.pending.extend(scheduled);

        state.next_pid += 1;
        LaunchOutcome::Spawned { pid: state.next_pid }
    }

    async fn apply(&self, id: &WindowId, directive: &Directive) -> bool {
        let mut state = self.state.lock();
        state.applied.push((id.clone(), *directive));
        !state.failing_directives.contains(directive)
    }
}
