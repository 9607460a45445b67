use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::SessionRecord;

/// Имя каталога приложения внутри пользовательского каталога конфигурации
pub const APP_DIR_NAME: &str = "session-manager";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub restore: RestoreConfig,
    /// Таблица запуска: имя приложения из сессии -> команда и её опции
    #[serde(default)]
    pub apps: BTreeMap<String, LaunchSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Каталог для файлов сессий; по умолчанию `<config_dir>/session-manager`
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestoreConfig {
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
    pub move_to_workspace: bool,
    /// Не запускать приложение, если процесс с таким именем уже работает
    pub skip_running: bool,
    /// Вычитать начало рабочей области (панели, доки) из сохранённых координат.
    /// Вычитается всё начало рабочей области на момент восстановления, а не разница
    /// с моментом сохранения: если панель была и при сохранении, окна сместятся на её
    /// высоту. Включать, только когда сохранённые координаты не учитывают панели.
    pub apply_work_area_correction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchSpec {
    pub command: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl LaunchSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

impl RestoreConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_attempts: 30,
            move_to_workspace: true,
            skip_running: true,
            apply_work_area_correction: false,
        }
    }
}

fn default_apps() -> BTreeMap<String, LaunchSpec> {
    let mut apps = BTreeMap::new();
    apps.insert("gnome-terminal".to_string(), LaunchSpec::new("gnome-terminal"));
    apps.insert("chrome".to_string(), LaunchSpec::new("/usr/bin/google-chrome-stable"));
    apps.insert("mattermost-desk".to_string(), LaunchSpec::new("mattermost-desktop"));
    apps.insert("gedit".to_string(), LaunchSpec::new("gedit").with_options(["--new-window"]));
    apps
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            storage: StorageConfig::default(),
            restore: RestoreConfig::default(),
            apps: default_apps(),
        }
    }
}

impl Config {
    /// Путь к файлу конфигурации по умолчанию
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join("config.toml")
    }

    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SESSION_MANAGER_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        if self.restore.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms должно быть больше 0");
        }

        if self.restore.max_attempts == 0 {
            anyhow::bail!("max_attempts должно быть больше 0");
        }

        for (name, spec) in &self.apps {
            if !SessionRecord::is_valid_application_name(name) {
                anyhow::bail!("Недопустимое имя приложения в таблице запуска: {:?}", name);
            }
            if spec.command.trim().is_empty() {
                anyhow::bail!("Пустая команда запуска для приложения '{}'", name);
            }
        }

        Ok(())
    }

    /// Каталог для файлов сессий
    pub fn session_dir(&self) -> PathBuf {
        self.storage.base_dir.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
        })
    }
}
