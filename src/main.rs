//! sshgo - A keyboard-driven selector for SSH host profiles
//!
//! Pick a host from a filterable list and connect to it; the TUI comes back
//! when the session ends.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sshgo::config::{ApplicationState, Settings};
use sshgo::ssh::{CommandBuilder, SshCommandBuilder, SystemExecutor};
use sshgo::storage::{self, HostStorage, YamlStorage};
use sshgo::App;

/// Log file inside the application home
const LOG_FILE: &str = "sshgo.log";

/// A keyboard-driven selector for SSH host profiles
#[derive(Parser, Debug)]
#[command(name = "sshgo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Directory holding hosts, state and logs
    #[arg(short, long, value_name = "DIR")]
    pub app_home: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all hosts with their connect command
    List,

    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config) = cli.command {
        print!("{}", Settings::generate_default_config());
        return Ok(());
    }

    // Load configuration
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.app_home {
        settings.storage.app_home = Some(dir);
    }

    let app_home = settings.app_home();
    std::fs::create_dir_all(&app_home)
        .context(format!("Failed to create app home: {:?}", app_home))?;

    init_logging(&app_home, cli.debug)?;
    info!("Starting sshgo with app home {:?}", app_home);

    let hosts = YamlStorage::in_dir(&app_home)?;

    match cli.command {
        Some(Commands::List) => cmd_list(&settings, &hosts),
        Some(Commands::Config) => Ok(()),
        None => {
            // Launch TUI
            run_tui(settings, hosts, &app_home)
        }
    }
}

/// Send logs to a file so they never mix with the TUI
fn init_logging(app_home: &Path, debug: bool) -> Result<()> {
    let path = app_home.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {:?}", path))?;

    let default = if debug { "sshgo=debug" } else { "sshgo=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

/// Run the interactive TUI
fn run_tui(settings: Settings, hosts: YamlStorage, app_home: &Path) -> Result<()> {
    let state_path = ApplicationState::path_in(app_home);
    let state = ApplicationState::load(&state_path)?;

    let mut app = App::new(
        settings,
        storage::shared(hosts),
        state.into_shared(),
        state_path,
        Box::new(SystemExecutor::new()),
    )?;
    app.run()
}

/// List hosts command
fn cmd_list(settings: &Settings, hosts: &YamlStorage) -> Result<()> {
    let mut hosts = hosts.get_all()?;
    hosts.sort_by(|a, b| a.title.cmp(&b.title));

    if hosts.is_empty() {
        println!("No hosts found.");
        return Ok(());
    }

    let builder = SshCommandBuilder::from_settings(&settings.ssh);
    println!("{:<5} {:<24} {:<50}", "ID", "TITLE", "COMMAND");
    println!("{}", "-".repeat(80));
    for host in hosts {
        println!(
            "{:<5} {:<24} {:<50}",
            host.id,
            host.title,
            builder.build(&host).to_string()
        );
    }
    Ok(())
}
