//! Persistent storage for captured sessions.
//!
//! One plain-text file per monitor fingerprint, one line per window:
//! `application workspace x y width height`.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::model::{Session, SessionRecord};
use crate::services::fingerprint::Fingerprint;

#[derive(Debug, Clone)]
pub struct SessionStore {
    base_dir: PathBuf,
}

impl SessionStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn session_path(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.base_dir.join(format!("session_{}.txt", fingerprint))
    }

    /// Перезаписать сессию для отпечатка. Запись идёт через временный файл.
    pub fn save(&self, fingerprint: &Fingerprint, records: &[SessionRecord]) -> Result<PathBuf> {
        if let Some(record) = records
            .iter()
            .find(|record| !SessionRecord::is_valid_application_name(&record.application_name))
        {
            return Err(SessionError::InvalidApplicationName(
                record.application_name.clone(),
            ));
        }

        fs::create_dir_all(&self.base_dir)?;

        let path = self.session_path(fingerprint);
        let tmp_path = path.with_extension("txt.tmp");
        if let Err(e) = write_records(&tmp_path, records).and_then(|()| fs::rename(&tmp_path, &path)) {
            fs::remove_file(&tmp_path).ok();
            return Err(e.into());
        }

        debug!("Сессия из {} окон сохранена в {:?}", records.len(), path);
        Ok(path)
    }

    /// `Ok(None)`, если для отпечатка ещё ничего не сохранено.
    /// Любая повреждённая строка делает файл непригодным целиком.
    pub fn load(&self, fingerprint: &Fingerprint) -> Result<Option<Session>> {
        let path = self.session_path(fingerprint);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Файл сессии {:?} отсутствует", path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in data.lines().enumerate() {
            // Пустые строки (например, завершающая) не считаются записями
            if line.trim().is_empty() {
                continue;
            }
            match SessionRecord::parse_line(line) {
                Ok(record) => records.push(record),
                Err(reason) => return SessionError::malformed(&path, index + 1, reason),
            }
        }

        debug!("Загружено {} записей из {:?}", records.len(), path);
        Ok(Some(Session::new(records)))
    }
}

/// Координаты вне экрана приводятся к 0: формат хранит только неотрицательные числа
fn write_records(path: &Path, records: &[SessionRecord]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    for record in records {
        let record = SessionRecord {
            geometry: record.geometry.clamped(),
            ..record.clone()
        };
        writeln!(file, "{}", record)?;
    }
    file.sync_all()
}
