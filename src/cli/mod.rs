//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod rooms;
pub mod session;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::client::ApiClient;
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::constants::BASE_URL_ENV;
use crate::core::keyring::KeyringStorage;
use crate::core::storage::{MemoryStorage, SessionStorage};
use crate::utils::logging::init_logging;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "roomchat")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Sign in to a chat server and manage its rooms from the terminal")]
#[command(
    long_about = "roomchat talks to a token-authenticated chat room backend. Sign in once with \
'roomchat login'; the session token is kept in your system keyring and reused by later \
commands until you run 'roomchat logout'.\n\n\
Environment Variables:\n\
  ROOMCHAT_BASE_URL     API base URL (overridden by --base-url)\n\
  ROOMCHAT_CONFIG_DIR   Directory holding config.toml\n\
  RUST_LOG              Diagnostic log filter (default: warn)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API base URL, e.g. https://chat.example/api
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sign in and list chat rooms
    Login {
        /// Skip the username prompt
        #[arg(long)]
        username: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the server and session in use
    Status,
    /// List chat rooms (default)
    Rooms,
    /// Show one chat room
    Room { id: u64 },
    /// Create a chat room
    CreateRoom {
        /// Room name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Rename a chat room
    RenameRoom {
        id: u64,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Delete a chat room
    DeleteRoom { id: u64 },
    /// Set a configuration value (base-url, keyring)
    Set { key: String, value: String },
    /// Unset a configuration value
    Unset { key: String },
}

/// How a command ended. `Failure` means the problem was already reported to
/// the user, so there is no error left to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

pub fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async_main(args))?;
    Ok(outcome.into())
}

fn open_storage(config: &Config) -> Arc<dyn SessionStorage> {
    if config.keyring_enabled() {
        Arc::new(KeyringStorage::default())
    } else {
        debug!("Keyring disabled; session will not outlive this command");
        Arc::new(MemoryStorage::new())
    }
}

fn build_client(args: &Args, config: &Config) -> ApiClient {
    let env_base_url = std::env::var(BASE_URL_ENV).ok();
    let base_url = config.resolve_base_url(args.base_url.as_deref(), env_base_url.as_deref());
    debug!(base_url = %base_url, "Using chat server");
    ApiClient::new(&base_url, open_storage(config))
}

/// Applies `set`/`unset` to a config and returns the confirmation message.
pub fn apply_setting(config: &mut Config, key: &str, value: Option<&str>) -> Result<String, String> {
    match (key, value) {
        ("base-url", Some(url)) => {
            let url = crate::utils::url::normalize_base_url(url);
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("base-url must start with http:// or https://, got '{url}'"));
            }
            config.base_url = Some(url.clone());
            Ok(format!("Set base-url to: {url}"))
        }
        ("base-url", None) => {
            config.base_url = None;
            Ok("Unset base-url".to_string())
        }
        ("keyring", Some(raw)) => {
            let enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" => true,
                "false" | "off" | "no" => false,
                _ => return Err(format!("keyring expects true or false, got '{raw}'")),
            };
            config.use_keyring = Some(enabled);
            Ok(format!("Set keyring to: {enabled}"))
        }
        ("keyring", None) => {
            config.use_keyring = None;
            Ok("Unset keyring".to_string())
        }
        _ => Err(format!("Unknown config key: {key}")),
    }
}

fn update_config(
    config_path: &Path,
    key: &str,
    value: Option<&str>,
) -> Result<Outcome, Box<dyn Error>> {
    let mut config = Config::load_from_path(config_path)?;
    match apply_setting(&mut config, key, value) {
        Ok(message) => {
            config.save_to_path(config_path)?;
            println!("✅ {message}");
            println!("   ({})", path_display(config_path));
            Ok(Outcome::Success)
        }
        Err(message) => {
            eprintln!("❌ {message}");
            Ok(Outcome::Failure)
        }
    }
}

async fn async_main(args: Args) -> Result<Outcome, Box<dyn Error>> {
    let config = Config::load()?;
    let command = args.command.clone().unwrap_or(Commands::Rooms);

    match command {
        Commands::Set { key, value } => {
            update_config(&Config::config_path()?, &key, Some(&value))
        }
        Commands::Unset { key } => update_config(&Config::config_path()?, &key, None),
        Commands::Login { username } => {
            session::login(build_client(&args, &config), username).await
        }
        Commands::Logout => {
            session::logout(build_client(&args, &config)).await?;
            Ok(Outcome::Success)
        }
        Commands::Status => {
            println!("{}", session::status(&build_client(&args, &config)));
            Ok(Outcome::Success)
        }
        Commands::Rooms => {
            let client = build_client(&args, &config);
            rooms::list_rooms(&client).await?;
            Ok(Outcome::Success)
        }
        Commands::Room { id } => {
            let client = build_client(&args, &config);
            rooms::show_room(&client, id).await?;
            Ok(Outcome::Success)
        }
        Commands::CreateRoom { name } => {
            let client = build_client(&args, &config);
            rooms::create_room(&client, &name.join(" ")).await?;
            Ok(Outcome::Success)
        }
        Commands::RenameRoom { id, name } => {
            let client = build_client(&args, &config);
            rooms::rename_room(&client, id, &name.join(" ")).await?;
            Ok(Outcome::Success)
        }
        Commands::DeleteRoom { id } => {
            let client = build_client(&args, &config);
            rooms::delete_room(&client, id).await?;
            Ok(Outcome::Success)
        }
    }
}
