use super::window::{WindowGeometry, WindowRecord};
use std::fmt;

const FIELD_COUNT: usize = 6;

/// Одна строка сохранённой сессии: `имя рабочий_стол x y ширина высота`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub application_name: String,
    pub workspace: u32,
    pub geometry: WindowGeometry,
}

impl SessionRecord {
    pub fn new(application_name: impl Into<String>, workspace: u32, geometry: WindowGeometry) -> Self {
        Self {
            application_name: application_name.into(),
            workspace,
            geometry,
        }
    }

    /// Построить запись из перечисленного окна. Липкие окна (-1) и отрицательные
    /// координаты приводятся к 0: формат хранит только неотрицательные числа.
    pub fn from_window(window: &WindowRecord) -> Self {
        let workspace = if window.is_sticky() {
            0
        } else {
            u32::try_from(window.workspace).unwrap_or(0)
        };
        Self::new(window.application_name.clone(), workspace, window.geometry.clamped())
    }

    /// Формат строки не экранирует пробелы, поэтому такие имена запрещены
    pub fn is_valid_application_name(name: &str) -> bool {
        !name.is_empty() && !name.chars().any(char::is_whitespace)
    }

    pub fn parse_line(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(format!(
                "ожидалось {} полей, найдено {}",
                FIELD_COUNT,
                fields.len()
            ));
        }

        let number = |index: usize, field: &str| -> std::result::Result<u32, String> {
            fields[index]
                .parse::<u32>()
                .map_err(|e| format!("поле '{}' = {:?}: {}", field, fields[index], e))
        };
        let coordinate = |index: usize, field: &str| -> std::result::Result<i32, String> {
            let value = number(index, field)?;
            i32::try_from(value).map_err(|e| format!("поле '{}' = {}: {}", field, value, e))
        };

        Ok(Self::new(
            fields[0],
            number(1, "workspace")?,
            WindowGeometry::new(
                coordinate(2, "x")?,
                coordinate(3, "y")?,
                number(4, "width")?,
                number(5, "height")?,
            ),
        ))
    }
}

impl fmt::Display for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.application_name,
            self.workspace,
            self.geometry.x,
            self.geometry.y,
            self.geometry.width,
            self.geometry.height
        )
    }
}

/// Упорядоченный набор записей; порядок совпадает с порядком захвата
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    records: Vec<SessionRecord>,
}

impl Session {
    pub fn new(records: Vec<SessionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn push(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Текстовое представление файла сессии, по строке на запись
    pub fn to_text(&self) -> String {
        self.records
            .iter()
            .map(|record| format!("{}\n", record))
            .collect()
    }
}
