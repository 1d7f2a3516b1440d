use aerocoeff::artifacts::ArtifactStore;
use aerocoeff::config::ServerConfig;
use aerocoeff::modes::ModeConfig;
use aerocoeff::predictor::run_prediction;
use aerocoeff::request::PredictionRequest;
use aerocoeff::server::PredictionServer;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// Predict lift and drag coefficients from pre-trained models
#[derive(Parser)]
#[command(name = "aerocoeff", version)]
#[command(about = "Serve lift and drag coefficient predictions over HTTP", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP prediction server (default command)
    Serve(ServeArgs),
    /// Run a single prediction without starting the server
    Predict(PredictArgs),
    /// List supported modes and their inputs
    Modes,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory containing model and scaler artifacts
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Args)]
struct PredictArgs {
    /// Shape whose models should answer (see `aerocoeff modes`)
    #[arg(long)]
    mode: String,

    /// Mach number
    #[arg(long, allow_hyphen_values = true)]
    mach: Option<f64>,

    /// Angle of attack in degrees
    #[arg(long, allow_hyphen_values = true)]
    aoa: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    ln: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    swept: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lln: Option<f64>,

    /// Directory containing model and scaler artifacts
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

impl PredictArgs {
    fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("mode".to_string(), Value::from(self.mode.as_str()));
        let fields = [
            ("mach", self.mach),
            ("aoa", self.aoa),
            ("ln", self.ln),
            ("swept", self.swept),
            ("lln", self.lln),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                body.insert(key.to_string(), Value::from(value));
            }
        }
        Value::Object(body)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ServerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let log_level = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("aerocoeff started with verbosity level: {}", cli.verbose);
    trace!("Effective configuration: {:?}", config);

    let result = match cli.command {
        Some(Commands::Serve(args)) => run_serve(config, args).await,
        Some(Commands::Predict(args)) => run_predict(config, args),
        Some(Commands::Modes) => {
            print_modes();
            Ok(())
        }
        None => run_serve(config, ServeArgs::default()).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(model_dir) = args.model_dir {
        config.model_dir = model_dir;
    }

    PredictionServer::new(config).start().await
}

fn run_predict(config: ServerConfig, args: PredictArgs) -> anyhow::Result<()> {
    let model_dir = args.model_dir.clone().unwrap_or(config.model_dir);
    let request = PredictionRequest::from_value(&args.to_body())?;
    let response = run_prediction(&ArtifactStore::new(model_dir), &request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn print_modes() {
    for mode in ModeConfig::all() {
        let features: Vec<_> = mode.features.iter().map(|f| f.key()).collect();
        let envelope = mode
            .aoa_envelope
            .map(|e| format!(" (aoa {} to {}, caution below {})", e.min, e.max, e.caution_below))
            .unwrap_or_default();
        println!("{}: {}{}", mode.name, features.join(", "), envelope);
    }
}
