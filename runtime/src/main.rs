//! BMI Widget terminal host
//!
//! Reads one command per line from stdin and prints the recalculated
//! report. Field edits are debounced exactly as in the browser widget.

use anyhow::Result;
use bmi_widget_runtime::config::WidgetConfig;
use bmi_widget_runtime::logging::init_tracing;
use bmi_widget_runtime::terminal::{dispatch, Command, FormFields, TerminalRenderer, HELP};
use bmi_widget_runtime::WidgetController;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = WidgetConfig::load()?;

    // Initialize tracing
    init_tracing(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if WidgetConfig::is_production() { "production" } else { "development" },
        debounce_ms = config.debounce.window_ms,
        "Starting BMI widget"
    );

    let renderer = TerminalRenderer {
        json: config.logging.json,
    };
    if !renderer.json {
        println!("{}", HELP);
    }
    let mut controller = WidgetController::from_config(&config, renderer);
    let mut form = FormFields::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    controller.flush()?;
                    break;
                };
                match line.parse::<Command>() {
                    Ok(command) => {
                        if !dispatch(&mut controller, &mut form, command)? {
                            break;
                        }
                    }
                    Err(e) => warn!("{}", e),
                }
            }
            _ = &mut shutdown => break,
        }
    }

    info!("Widget shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
