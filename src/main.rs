use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use boomer::app::{App, AppEvent};
use boomer::config::Config;
use boomer::notify::TerminalNotifier;
use boomer::platform::{Services, SystemBrowser, TerminalBell};
use boomer::storage::{Database, DatabaseError};
use boomer::theme::ThemeVariant;
use boomer::trends::{build_http_client, RemoteSource};
use boomer::ui;

/// Get the config directory path (~/.config/boomer/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("boomer");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "boomer", about = "Plain-English internet trends in your terminal")]
struct Args {
    /// Config file to use instead of ~/.config/boomer/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip the startup fetch and show the bundled trends
    #[arg(long)]
    offline: bool,

    /// Forget onboarding, favorites and the digest setting
    #[arg(long)]
    reset_state: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land on the TUI's alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access to the config directory
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let db_path = config_dir.join("state.db");

    // Handle --reset-state flag
    if args.reset_state && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete state database")?;
        println!("State reset.");
    }

    // Open database
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of boomer appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    let state = db.load_user_state().await;

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = build_http_client(timeout).context("Failed to create HTTP client")?;
    let source = RemoteSource::new(client, config.source_url.clone(), config.max_retries, timeout);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    let services = Services::new(
        Arc::new(TerminalNotifier::new(
            config.notification_permission,
            event_tx.clone(),
        )),
        Arc::new(TerminalBell::new(config.haptics)),
        Arc::new(SystemBrowser),
    );

    let mut app = App::new(db, state, source, services);

    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme, using dark"),
    }

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    // The digest timer lives in this process, so re-arm it on every start
    app.resume_digest();

    if args.offline || !config.fetch_on_startup {
        tracing::info!("Skipping startup fetch, showing bundled trends");
    } else {
        ui::spawn_refresh(&mut app, &event_tx);
    }

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
