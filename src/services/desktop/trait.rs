use crate::model::{WindowGeometry, WindowId, WindowRecord};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// Строка таблицы процессов
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub command_line: String,
}

/// Команда запуска приложения: программа и отдельные аргументы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Spawned { pid: u32 },
    /// Запуск только залогирован (dry-run)
    Simulated,
    Failed(String),
}

/// Команда оконному менеджеру
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    RemoveMaximizedHorz,
    RemoveMaximizedVert,
    MoveToWorkspace(u32),
    MoveResize(WindowGeometry),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::RemoveMaximizedHorz => f.write_str("remove maximized_horz"),
            Directive::RemoveMaximizedVert => f.write_str("remove maximized_vert"),
            Directive::MoveToWorkspace(workspace) => write!(f, "move to workspace {}", workspace),
            Directive::MoveResize(geometry) => write!(f, "move/resize {}", geometry),
        }
    }
}

/// Trait for the desktop collaborators consumed by capture and restore
#[async_trait::async_trait]
pub trait Desktop: Send + Sync {
    /// Снимок всех окон: id, pid, рабочий стол, геометрия
    async fn list_windows(&self) -> Vec<WindowRecord>;

    /// Атомы `_NET_WM_WINDOW_TYPE` окна; пусто, если окно пропало
    async fn window_type_flags(&self, id: &WindowId) -> BTreeSet<String>;

    /// Имя команды процесса; пустая строка, если процесс недоступен
    async fn process_name(&self, pid: u32) -> String;

    async fn process_table(&self) -> Vec<ProcessEntry>;

    /// Текстовый список активных мониторов
    async fn monitor_listing(&self) -> String;

    /// Начало рабочей области текущего рабочего стола
    async fn work_area_origin(&self) -> Option<(i32, i32)>;

    /// Запустить процесс отвязанно от вызывающего, не дожидаясь завершения
    async fn launch(&self, command: &LaunchCommand) -> LaunchOutcome;

    /// Выполнить одну команду оконному менеджеру; false при неудаче
    async fn apply(&self, id: &WindowId, directive: &Directive) -> bool;
}

/// Factory function to create an appropriate desktop based on the dry_run flag
pub fn create_desktop(dry_run: bool) -> Box<dyn Desktop> {
    let desktop = super::x11::X11Desktop::new();
    if let Err(e) = desktop.test() {
        warn!("Утилиты оконного менеджера недоступны, данные будут пустыми: {}", e);
    }

    if dry_run {
        Box::new(super::dry_run::DryRunDesktop::new(desktop))
    } else {
        Box::new(desktop)
    }
}
