use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;

use ladle::api::ApiClient;
use ladle::app::{App, AppEvent};
use ladle::config::Config;
use ladle::session::{self, Credentials};
use ladle::{ui, validate};

/// Get the config directory path (~/.config/ladle/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("ladle");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "ladle", about = "Terminal client for a recipe-sharing board")]
struct Args {
    /// Override the configured server URL
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store session credentials after validating them against the server
    Login {
        /// Session token issued by the server's sign-in flow
        #[arg(long)]
        token: String,
        /// Account email the token belongs to
        #[arg(long)]
        email: String,
    },
    /// Remove stored session credentials
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // Set directory permissions on Unix (user-only access)
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

    let config_path = config_dir.join("config.toml");
    let session_path = config_dir.join("session.toml");

    let mut config = Config::load(&config_path).context("Failed to load configuration")?;
    if let Some(server) = args.server {
        config.server_url = server;
    }
    let base_url = config
        .server_url()
        .context("Invalid server URL in configuration")?;

    match args.command {
        Some(Command::Login { token, email }) => {
            if !validate::is_email_valid(&email) {
                anyhow::bail!("'{}' is not a valid email address", email);
            }

            let credentials = Credentials::new(token, email.clone());
            let api = ApiClient::new(base_url, credentials.clone())
                .context("Failed to build HTTP client")?;

            // Reject a bad token/email pair before persisting anything
            api.validate_session()
                .await
                .context("The server rejected these credentials")?;

            credentials
                .store(&session_path)
                .context("Failed to write session file")?;
            println!("Signed in as {}", email);
            return Ok(());
        }
        Some(Command::Logout) => {
            session::remove(&session_path).context("Failed to remove session file")?;
            println!("Signed out.");
            return Ok(());
        }
        None => {}
    }

    // Load whatever session exists; a missing file means browsing signed out
    let credentials = Credentials::load(&session_path).context("Failed to load session file")?;
    if !credentials.is_signed_in() {
        tracing::info!("No session credentials, likes will be unavailable");
    }

    let api = ApiClient::new(base_url, credentials).context("Failed to build HTTP client")?;
    let mut app = App::new(api, config, session_path);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
