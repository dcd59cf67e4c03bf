//! amitui - Main entry point
//!
//! A TUI wizard that assembles a Cassandra machine-image configuration and
//! submits it to the build service. Also supports a headless mode that
//! submits a saved configuration file directly.

use anyhow::Context;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::Path;

use amitui::app::App;
use amitui::cli::{Cli, Commands};
use amitui::dispatch::BuildClient;
use amitui::error;
use amitui::payload::ImageConfig;

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    info!("amitui starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    match cli.command {
        Some(Commands::Validate { config }) => {
            info!("Validating configuration file: {:?}", config);
            match ImageConfig::load_from_file(&config) {
                Ok(config) => match config.validate() {
                    Ok(_) => {
                        info!("Configuration validation successful");
                        println!("✓ Configuration file is valid: {:?}", config);
                    }
                    Err(e) => {
                        error!("Configuration validation failed: {}", e);
                        eprintln!("✗ Configuration validation failed: {}", e);
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    error!("Failed to load configuration file: {}", e);
                    eprintln!("✗ Failed to load configuration file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Build { config }) => {
            info!("Running headless build with config: {:?}", config);
            run_headless_build(&cli.endpoint, &config)?;
        }
        None => {
            info!("No command specified, launching TUI wizard");
            run_tui_wizard(&cli.endpoint)?;
        }
    }

    Ok(())
}

/// Run the TUI wizard
fn run_tui_wizard(endpoint: &str) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Initializing terminal for TUI mode");

    // Initialize terminal
    enable_raw_mode()
        .map_err(|e| error::general_error(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| error::general_error(format!("Failed to enter alternate screen: {}", e)))?;

    // Create terminal backend
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| error::general_error(format!("Failed to create terminal: {}", e)))?;

    // Create and run application
    let mut app = App::new(endpoint);
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if the app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}

/// Submit a saved configuration file directly (headless mode)
fn run_headless_build(endpoint: &str, config_path: &Path) -> anyhow::Result<()> {
    let config = ImageConfig::load_from_file(config_path)
        .with_context(|| format!("Loading configuration from {:?}", config_path))?;
    config.validate().context("Configuration is not valid")?;

    info!("Configuration validated successfully");
    println!("✓ Configuration loaded and validated");
    println!("🚀 Submitting build request to {endpoint}...");

    let client = BuildClient::new(endpoint);
    let response = client.submit(&config);

    if response.is_success() {
        let ami_id = response.ami_id.as_deref().unwrap_or_default();
        info!("Build succeeded: {ami_id}");
        println!("\n✓ AMI created: {ami_id}");
    } else {
        error!("Build failed: {}", response.diagnostic());
        eprintln!("\n✗ AMI creation failed: {}", response.diagnostic());
        std::process::exit(1);
    }

    Ok(())
}
