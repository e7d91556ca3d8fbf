mod backend;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod control;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod model;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::backend::BackendClient;
use crate::config::{Config, Settings, SettingsOverrides, get_config_path};
use crate::control::ControlModel;
use crate::environment::Environment;
use crate::model::{ManualCommand, TargetMode};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Backend selection shared by every command that talks to the server
#[derive(clap::Args, Debug, Clone, Default)]
struct ServerArgs {
    /// Backend base URL, e.g. http://192.168.1.20:5000 (`local` for http://127.0.0.1:5000)
    #[arg(long, value_name = "URL")]
    server_url: Option<String>,

    /// Control surface exposed by the backend: tri-state or binary
    #[arg(long, value_name = "MODEL")]
    control_model: Option<ControlModel>,

    /// Poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Only show history rows recorded while the system was ON
    #[arg(long, default_value_t = false)]
    only_system_on: bool,

    /// Show every history row, undoing a saved --only-system-on
    #[arg(long, default_value_t = false, conflicts_with = "only_system_on")]
    all_history: bool,
}

impl ServerArgs {
    /// History filter picked on the command line, if any.
    fn history_flag(&self) -> Option<bool> {
        if self.only_system_on {
            Some(true)
        } else if self.all_history {
            Some(false)
        } else {
            None
        }
    }
}

impl From<&ServerArgs> for SettingsOverrides {
    fn from(args: &ServerArgs) -> Self {
        SettingsOverrides {
            server_url: args.server_url.clone(),
            control_model: args.control_model,
            poll_interval_ms: args.interval_ms,
            only_system_on: args.history_flag(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the live dashboard
    Start {
        #[command(flatten)]
        server: ServerArgs,

        /// Run without the terminal UI, printing events to the console
        #[arg(long = "headless", action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Enable background colors
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Poll once and print the dashboard summary
    Status {
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Switch the rack between AUTO, MANUAL and OFF
    SetMode {
        /// auto, manual or off
        #[arg(value_name = "MODE")]
        mode: TargetMode,

        #[command(flatten)]
        server: ServerArgs,
    },
    /// Open or close the rack (MANUAL mode only)
    Control {
        /// open or close
        #[arg(value_name = "COMMAND")]
        command: ManualCommand,

        #[command(flatten)]
        server: ServerArgs,
    },
    /// Flip the ON/OFF switch
    Toggle {
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Save dashboard settings to the configuration file
    Configure {
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Clear the dashboard configuration
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            server,
            headless,
            with_background,
        } => {
            let settings = resolve_settings(&config_path, &server)?;
            start(settings, headless, with_background).await
        }
        Command::Status { server } => {
            let settings = resolve_settings(&config_path, &server)?;
            let client = BackendClient::new(settings.environment.clone())?;
            match commands::status(&client, &settings).await {
                Ok(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!(
                        "Failed to reach the backend",
                        "{}: {}",
                        settings.environment.server_url(),
                        e
                    );
                    Err(e.into())
                }
            }
        }
        Command::SetMode { mode, server } => {
            let settings = resolve_settings(&config_path, &server)?;
            let client = BackendClient::new(settings.environment.clone())?;
            match commands::set_mode(&client, mode).await {
                Ok(()) => {
                    print_cmd_success!("Mode set", "{}", mode);
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!("Failed to set mode", "{}", e);
                    Err(e.into())
                }
            }
        }
        Command::Control { command, server } => {
            let settings = resolve_settings(&config_path, &server)?;
            let client = BackendClient::new(settings.environment.clone())?;
            match commands::control(&client, command).await {
                Ok(()) => {
                    print_cmd_success!("Command sent", "{}", command.sent_message());
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!("Failed to send command", "{}", e);
                    Err(e.into())
                }
            }
        }
        Command::Toggle { server } => {
            let settings = resolve_settings(&config_path, &server)?;
            let client = BackendClient::new(settings.environment.clone())?;
            match commands::toggle(&client, &settings).await {
                Ok(target) => {
                    print_cmd_success!("System switched", "{}", target);
                    Ok(())
                }
                Err(e) => {
                    print_cmd_error!("Failed to toggle the system", "{}", e);
                    Err(e.into())
                }
            }
        }
        Command::Configure { server } => configure(&config_path, &server),
        Command::Reset => {
            println!("Clearing dashboard configuration...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Loads the config file and layers flags and the environment on top.
fn resolve_settings(config_path: &Path, server: &ServerArgs) -> Result<Settings, Box<dyn Error>> {
    let config = Config::load_or_default(config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;
    let settings = Settings::resolve(&config, &SettingsOverrides::from(server))?;
    Ok(settings)
}

/// Writes the given flags into the config file, keeping anything not given.
fn configure(config_path: &Path, server: &ServerArgs) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load_or_default(config_path).unwrap_or_else(|e| {
        print_cmd_warn!("Ignoring unreadable config", "{}", e);
        Config::default()
    });

    if let Some(url) = &server.server_url {
        let environment = url.parse::<Environment>()?;
        config.server_url = Some(environment.server_url());
    }
    if let Some(model) = server.control_model {
        config.control_model = model;
    }
    if let Some(interval_ms) = server.interval_ms {
        config.poll_interval_ms = Some(interval_ms);
    }
    if let Some(only_system_on) = server.history_flag() {
        config.only_system_on = only_system_on;
    }

    config
        .save(config_path)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    print_cmd_info!("Configuration saved", "{}", config_path.display());
    Ok(())
}

/// Starts the live dashboard.
///
/// # Arguments
/// * `settings` - Resolved server URL, control model and poll interval.
/// * `headless` - Print events to the console instead of drawing the TUI.
/// * `with_background` - Whether to enable background colors.
async fn start(
    settings: Settings,
    headless: bool,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    let session = setup_session(settings)?;

    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, with_background).await
    }
}
