use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Повреждённый файл сессии {path:?}, строка {line}: {reason}")]
    MalformedSession {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Недопустимое имя приложения {0:?}: имя не может быть пустым или содержать пробелы")]
    InvalidApplicationName(String),
}

impl SessionError {
    pub fn malformed<T>(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Result<T> {
        Err(SessionError::MalformedSession {
            path: path.into(),
            line,
            reason: reason.into(),
        })
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
