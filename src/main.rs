use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
mod config;
mod error;
mod model;
mod services;
mod utils;

use config::Config;
use services::{
    capture,
    create_desktop,
    desktop::Desktop,
    fingerprint::current_fingerprint,
    restore::restore_session,
    LaunchTable,
    SessionStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Сохранить текущую сессию
    Save,
    /// Восстановить сессию, сохранённую для текущей конфигурации мониторов
    Restore,
}

#[derive(Parser, Debug)]
#[command(name = "session-manager")]
#[command(about = "Сохранение и восстановление раскладки окон для текущей конфигурации мониторов")]
struct Args {
    /// Действие
    #[arg(value_enum)]
    action: Action,

    /// Путь к файлу конфигурации
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;

    // Инициализация системы логирования
    init_tracing(args.log_level.as_deref().unwrap_or(&config.logging.level))?;

    info!("Запуск session-manager v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {:?}", config_path);

    let desktop = create_desktop(args.dry_run);
    let store = SessionStore::new(config.session_dir());

    match args.action {
        Action::Save => save(desktop.as_ref(), &store, args.dry_run).await?,
        Action::Restore => restore(desktop.as_ref(), &store, &config).await?,
    }

    Ok(())
}

async fn save(desktop: &dyn Desktop, store: &SessionStore, dry_run: bool) -> Result<()> {
    if dry_run {
        let fingerprint = current_fingerprint(desktop).await;
        let session = capture::snapshot(desktop).await;
        println!("# {}", store.session_path(&fingerprint).display());
        print!("{}", session.to_text());
        return Ok(());
    }

    let summary = capture::capture(desktop, store).await?;
    info!(
        "Сохранено {} окон для раскладки {} в {:?}",
        summary.windows, summary.fingerprint, summary.path
    );
    Ok(())
}

async fn restore(desktop: &dyn Desktop, store: &SessionStore, config: &Config) -> Result<()> {
    let launch_table = LaunchTable::new(config.apps.clone());

    match restore_session(desktop, store, &launch_table, &config.restore).await? {
        Some(report) => report.log_summary(),
        None => println!("Для текущей конфигурации мониторов сохранённая сессия не найдена."),
    }

    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();

    Ok(())
}
