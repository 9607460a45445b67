use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Тип окна, который считается обычным окном приложения
pub const NORMAL_WINDOW_TYPE: &str = "_NET_WM_WINDOW_TYPE_NORMAL";

/// Идентификатор окна в том виде, в каком его выдаёт оконный менеджер ("0x03a00003")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Геометрия окна
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Сдвинуть начало координат на (dx, dy); координаты не уходят в минус
    pub fn shifted_back(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_sub(dx).max(0),
            y: self.y.saturating_sub(dy).max(0),
            ..self
        }
    }

    /// Привести координаты к неотрицательному виду, пригодному для сохранения
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
            ..self
        }
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Окно, полученное при очередном перечислении. Живёт только в рамках одного вызова.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    /// Рабочий стол; -1 у "липких" окон, видимых на всех столах
    pub workspace: i32,
    /// 0, если оконный менеджер не знает владельца окна
    pub pid: u32,
    pub geometry: WindowGeometry,
    pub type_flags: BTreeSet<String>,
    pub application_name: String,
}

impl WindowRecord {
    pub fn new(id: WindowId, workspace: i32, pid: u32, geometry: WindowGeometry) -> Self {
        Self {
            id,
            workspace,
            pid,
            geometry,
            type_flags: BTreeSet::new(),
            application_name: String::new(),
        }
    }

    pub fn with_type_flags(mut self, type_flags: BTreeSet<String>) -> Self {
        self.type_flags = type_flags;
        self
    }

    pub fn with_application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = application_name.into();
        self
    }

    pub fn is_normal(&self) -> bool {
        self.type_flags.contains(NORMAL_WINDOW_TYPE)
    }

    pub fn is_sticky(&self) -> bool {
        self.workspace < 0
    }
}

impl fmt::Display for WindowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.application_name.is_empty() {
            write!(f, "{} (pid {})", self.id, self.pid)
        } else {
            write!(f, "{} \"{}\" (pid {})", self.id, self.application_name, self.pid)
        }
    }
}
