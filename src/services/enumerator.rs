use crate::model::window::NORMAL_WINDOW_TYPE;
use crate::model::{WindowId, WindowRecord};
use crate::services::desktop::Desktop;

/// Нормализованный доступ к окнам поверх внешних утилит.
/// Каждый вызов делает новый снимок, ничего не кэшируется.
pub struct WindowEnumerator<'a> {
    desktop: &'a dyn Desktop,
}

impl<'a> WindowEnumerator<'a> {
    pub fn new(desktop: &'a dyn Desktop) -> Self {
        Self { desktop }
    }

    pub async fn list_windows(&self) -> Vec<WindowRecord> {
        self.desktop.list_windows().await
    }

    pub async fn is_normal_window(&self, id: &WindowId) -> bool {
        self.desktop
            .window_type_flags(id)
            .await
            .contains(NORMAL_WINDOW_TYPE)
    }

    /// Пустая строка, если процесс завершился или недоступен
    pub async fn resolve_application_name(&self, pid: u32) -> String {
        self.desktop.process_name(pid).await
    }

    /// Дополнить окно типами; имя приложения ищется только для обычных окон
    pub async fn describe(&self, window: WindowRecord) -> WindowRecord {
        let type_flags = self.desktop.window_type_flags(&window.id).await;
        let window = window.with_type_flags(type_flags);
        if !window.is_normal() {
            return window;
        }

        let application_name = self.resolve_application_name(window.pid).await;
        window.with_application_name(application_name)
    }
}
