//! Workbench web development server.
//!
//! Serves the editor shell, its static assets and built-in extensions to a
//! browser, and relays authentication callbacks back to the waiting session.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                 WORKBENCH SERVER                  │
//!                        │                                                   │
//!   Browser Request      │  ┌─────────┐    ┌──────────┐    ┌─────────────┐   │
//!   ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│  handlers   │   │
//!                        │  │ server  │    │  table   │    └──┬───┬───┬──┘   │
//!                        │  └─────────┘    └──────────┘       │   │   │      │
//!                        │                                    ▼   ▼   ▼      │
//!                        │          ┌──────────┐ ┌──────────┐ ┌──────────┐    │
//!                        │          │ document │ │  files   │ │ callback │    │
//!                        │          │assembler │ │  server  │ │  store   │    │
//!                        │          └────┬─────┘ └──────────┘ └──────────┘    │
//!                        │               │                                   │
//!                        │               ▼                                   │
//!                        │          ┌──────────┐                             │
//!                        │          │extension │                             │
//!                        │          │ catalog  │                             │
//!                        │          └──────────┘                             │
//!                        │                                                   │
//!                        │   config · observability · lifecycle              │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use web_workbench_server::config::{load_config, ConfigOverrides};
use web_workbench_server::lifecycle::startup;
use web_workbench_server::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "workbench-server", version, about = "Serve the workbench shell for local development")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on [env: PORT].
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind.
    #[arg(long)]
    host: Option<String>,

    /// Scheme of the public URL, http or https [env: VSCODE_SCHEME].
    #[arg(long)]
    scheme: Option<String>,

    /// Repository root holding resources/, src/ and out/.
    #[arg(long)]
    app_root: Option<PathBuf>,

    /// Extensions directory, relative to the app root unless absolute.
    #[arg(long)]
    extensions_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            scheme: args.scheme,
            app_root: args.app_root,
            extensions_dir: args.extensions_dir,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config_path = args.config.clone();

    let config = match load_config(config_path.as_deref(), &args.into()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("workbench-server: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "workbench-server starting");

    match startup::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}
