//! ADHD Screen CLI - Command-line interface for the screening service
//!
//! Commands:
//! - serve: Run the HTTP service (`POST /predict` plus the frontend)
//! - score: Screen a request file offline through the same pipeline
//! - model: Describe the loaded screening model

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use adhd_screen::model::{LogisticModel, ModelError};
use adhd_screen::pipeline::{parse_request, ScreeningPipeline};
use adhd_screen::server::{self, AppState, ServerConfig};
use adhd_screen::{ScreeningError, SCREEN_VERSION, SERVICE_NAME};

/// ADHD Screen - Behavioral-task screening service
#[derive(Parser)]
#[command(name = "adhd-screen")]
#[command(version = SCREEN_VERSION)]
#[command(about = "Screen behavioral-task answers with a pre-trained model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Host to bind to [default: 0.0.0.0]
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to [default: $PORT or 5000]
        #[arg(long)]
        port: Option<u16>,

        /// Directory served at / and /<path> [default: $FRONTEND_DIR or frontend]
        #[arg(long)]
        frontend_dir: Option<PathBuf>,

        /// Model artifact (JSON); the built-in model when omitted
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Screen a request offline and print the report
    Score {
        /// Request JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Model artifact (JSON); the built-in model when omitted
        #[arg(long)]
        model: Option<PathBuf>,

        /// Print sub-scores, feature record and raw prediction instead of the report
        #[arg(long)]
        explain: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Describe the screening model
    Model {
        /// Model artifact (JSON); the built-in model when omitted
        #[arg(long)]
        model: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("adhd_screen=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), ScreenCliError> {
    match cli.command {
        Commands::Serve {
            host,
            port,
            frontend_dir,
            model,
        } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(frontend_dir) = frontend_dir {
                config.frontend_dir = frontend_dir;
            }
            config.model_path = model;
            cmd_serve(config)
        }

        Commands::Score {
            input,
            model,
            explain,
            pretty,
        } => cmd_score(&input, model.as_deref(), explain, pretty),

        Commands::Model { model, json } => cmd_model(model.as_deref(), json),
    }
}

fn cmd_serve(config: ServerConfig) -> Result<(), ScreenCliError> {
    let model = LogisticModel::load(config.model_path.as_deref())?;
    let info = model.info();

    tracing::info!(
        service = SERVICE_NAME,
        version = SCREEN_VERSION,
        model = %info.name,
        model_version = %info.version,
        "starting"
    );

    let pipeline = ScreeningPipeline::new(Arc::new(model));
    let state = Arc::new(AppState::with_model_info(pipeline, &info));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(&config, state))?;
    Ok(())
}

fn cmd_score(
    input: &Path,
    model: Option<&Path>,
    explain: bool,
    pretty: bool,
) -> Result<(), ScreenCliError> {
    // Read input
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            return Err(ScreenCliError::NoInput);
        }
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        fs::read(input)?
    };

    let pipeline = ScreeningPipeline::new(Arc::new(LogisticModel::load(model)?));
    let request = parse_request(&input_data)?;

    let output = if explain {
        to_json(&pipeline.assess(&request)?, pretty)?
    } else {
        to_json(&pipeline.screen(&request)?, pretty)?
    };

    println!("{}", output);
    Ok(())
}

fn cmd_model(model: Option<&Path>, json: bool) -> Result<(), ScreenCliError> {
    let info = LogisticModel::load(model)?.info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Model: {} v{}", info.name, info.version);
    match info.trained_at {
        Some(at) => println!("Trained: {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Trained: unknown"),
    }
    println!("Threshold: {}", info.threshold);
    println!("Numeric features:");
    for name in &info.numeric_features {
        println!("  - {}", name);
    }
    println!("Categorical features:");
    for name in &info.categorical_features {
        println!("  - {}", name);
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

// Error types

#[derive(Debug)]
enum ScreenCliError {
    Io(io::Error),
    Screening(ScreeningError),
    Json(serde_json::Error),
    NoInput,
}

impl From<io::Error> for ScreenCliError {
    fn from(e: io::Error) -> Self {
        ScreenCliError::Io(e)
    }
}

impl From<ScreeningError> for ScreenCliError {
    fn from(e: ScreeningError) -> Self {
        ScreenCliError::Screening(e)
    }
}

impl From<ModelError> for ScreenCliError {
    fn from(e: ModelError) -> Self {
        ScreenCliError::Screening(ScreeningError::Model(e))
    }
}

impl From<serde_json::Error> for ScreenCliError {
    fn from(e: serde_json::Error) -> Self {
        ScreenCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ScreenCliError> for CliError {
    fn from(e: ScreenCliError) -> Self {
        match e {
            ScreenCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths, permissions and the bind address".to_string()),
            },
            ScreenCliError::Screening(e) => CliError {
                code: e.kind().to_uppercase(),
                message: e.to_string(),
                hint: match &e {
                    ScreeningError::Model(_) => Some(
                        "Run 'adhd-screen model --model <path>' to check the artifact".to_string(),
                    ),
                    ScreeningError::Config(_) => {
                        Some("PORT must be a number between 0 and 65535".to_string())
                    }
                    e if e.is_client_error() => Some(
                        "Input must be a JSON object with optional user, adaptive_pilot, flash_reaction and steady_shield objects".to_string(),
                    ),
                    _ => None,
                },
            },
            ScreenCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            ScreenCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "No request piped on stdin".to_string(),
                hint: Some("Pipe a request JSON or pass --input <file>".to_string()),
            },
        }
    }
}
