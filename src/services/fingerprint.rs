use crate::services::desktop::Desktop;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::warn;

/// Ключ конфигурации мониторов: sha256 от вывода списка мониторов.
/// Используется только как ключ поиска, содержимое не интерпретируется.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[allow(dead_code)]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn from_listing(listing: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(listing.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub async fn current_fingerprint(desktop: &dyn Desktop) -> Fingerprint {
    let listing = desktop.monitor_listing().await;
    if listing.trim().is_empty() {
        warn!("Список мониторов пуст, отпечаток будет построен по пустому выводу");
    }
    Fingerprint::from_listing(&listing)
}
