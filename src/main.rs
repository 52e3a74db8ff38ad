//! Tabpad - a multi-tab terminal notepad
//!
//! Run with `tabpad` or `tabpad --help` for usage.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tabpad::{
    APP_NAME, VERSION,
    config::Config,
    session::{SessionManager, SessionStore, Theme},
    tui::App,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "A multi-tab terminal notepad with per-tab color themes and session restore")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Override the data directory (session, theme preference, tab files)
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive editor (default)
    Edit,

    /// List the tabs in the saved session
    List,

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(config: &Config, debug: bool, to_file: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if to_file {
        // Log to file when running the TUI (so logs don't interfere with display)
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_file_path()?)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = Some(dir);
    }

    // Ensure required directories exist
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    match cli.command {
        None | Some(Commands::Edit) => {
            setup_logging(&config, cli.debug || config.debug, true)?;

            info!("Starting tabpad v{}", VERSION);

            let store = SessionStore::new(config.data_dir()?);
            let mut manager = SessionManager::new(store);
            manager.load_session()?;

            let mut app = App::new(config, manager);
            app.run().await?;

            info!("Session saved, exiting");
        }

        Some(Commands::List) => {
            setup_logging(&config, cli.debug || config.debug, false)?;

            let store = SessionStore::new(config.data_dir()?);
            match store.load_manifest()? {
                Some(entries) if !entries.is_empty() => {
                    println!("Saved session ({} tabs):", entries.len());
                    println!();
                    for entry in &entries {
                        let theme =
                            Theme::resolve(entry.theme.as_deref().unwrap_or_default());
                        let path = entry
                            .resolved_path(store.data_dir())
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "(no file)".to_string());
                        println!("  {} [{}] {}", entry.title, theme.name(), path);
                    }
                }
                _ => {
                    println!("No saved session. Run 'tabpad' to start one.");
                }
            }
        }

        Some(Commands::Config { init }) => {
            setup_logging(&config, cli.debug || config.debug, false)?;

            if init {
                config.save()?;
                println!(
                    "Configuration initialized at {:?}",
                    Config::config_file_path()?
                );
            } else {
                println!("Configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
                println!("Config file: {:?}", Config::config_file_path()?);
                println!("Data dir: {:?}", config.data_dir()?);
            }
        }
    }

    Ok(())
}
