use crate::config::LaunchSpec;
use crate::services::desktop::{LaunchCommand, ProcessEntry};
use std::collections::BTreeMap;

/// Таблица "имя приложения -> команда запуска".
/// Неизвестные имена запускаются как есть, без опций.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    entries: BTreeMap<String, LaunchSpec>,
}

impl LaunchTable {
    pub fn new(entries: BTreeMap<String, LaunchSpec>) -> Self {
        Self { entries }
    }

    #[allow(dead_code)]
    pub fn insert(&mut self, application_name: impl Into<String>, spec: LaunchSpec) {
        self.entries.insert(application_name.into(), spec);
    }

    pub fn resolve(&self, application_name: &str) -> LaunchCommand {
        match self.entries.get(application_name) {
            Some(spec) => LaunchCommand {
                program: spec.command.clone(),
                args: spec.options.clone(),
            },
            None => LaunchCommand {
                program: application_name.to_string(),
                args: Vec::new(),
            },
        }
    }
}

/// Есть ли в таблице процессов чужой процесс, в командной строке которого встречается имя.
/// Эвристика: совпадение подстроки не гарантирует, что это то же приложение.
pub fn is_already_running(processes: &[ProcessEntry], application_name: &str, own_pid: u32) -> bool {
    processes
        .iter()
        .filter(|process| process.pid != own_pid)
        .any(|process| process.command_line.contains(application_name))
}
