use super::r#trait::{Desktop, Directive, LaunchCommand, LaunchOutcome, ProcessEntry};
use super::x11::X11Desktop;
use crate::model::{WindowId, WindowRecord};
use std::collections::BTreeSet;
use tracing::info;

/// Читает реальное состояние рабочего стола, но ничего не запускает и не двигает
pub struct DryRunDesktop {
    inner: X11Desktop,
}

impl DryRunDesktop {
    pub fn new(inner: X11Desktop) -> Self {
        info!("Dry-run режим - запуск приложений и перемещение окон отключены");
        Self { inner }
    }
}

#[async_trait::async_trait]
impl Desktop for DryRunDesktop {
    async fn list_windows(&self) -> Vec<WindowRecord> {
        self.inner.list_windows().await
    }

    async fn window_type_flags(&self, id: &WindowId) -> BTreeSet<String> {
        self.inner.window_type_flags(id).await
    }

    async fn process_name(&self, pid: u32) -> String {
        self.inner.process_name(pid).await
    }

    async fn process_table(&self) -> Vec<ProcessEntry> {
        self.inner.process_table().await
    }

    async fn monitor_listing(&self) -> String {
        self.inner.monitor_listing().await
    }

    async fn work_area_origin(&self) -> Option<(i32, i32)> {
        self.inner.work_area_origin().await
    }

    async fn launch(&self, command: &LaunchCommand) -> LaunchOutcome {
        info!("Dry-run: эмулируем запуск '{}'", command);
        LaunchOutcome::Simulated
    }

    async fn apply(&self, id: &WindowId, directive: &Directive) -> bool {
        info!("Dry-run: окно {}: {}", id, directive);
        true
    }
}
