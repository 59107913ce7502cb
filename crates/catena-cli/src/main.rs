//! catena command line
//!
//! Compiles one file through the pipeline mapped to its extension and
//! writes the rendered text to stdout or a file.

mod settings;

use anyhow::{Context, Result};
use catena_sdk::Catena;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "catena")]
#[command(about = "Compile documents through chains of transformation stages")]
#[command(version)]
struct Args {
    /// Input file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Compile as this extension instead of the file's own
    #[arg(long, value_name = "EXT")]
    ext: Option<String>,

    /// Map an extension to a chain, e.g. `md=markdown>html`
    #[arg(long = "map", value_name = "EXT=CHAIN", value_parser = settings::parse_key_value)]
    mappings: Vec<(String, String)>,

    /// Compile option passed to every stage
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = settings::parse_key_value)]
    options: Vec<(String, String)>,

    /// Render deferred output handed between stages instead of failing
    #[arg(long)]
    auto_force: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing() {
        eprintln!("{}", e);
    }

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut engine_config = settings::load(args.config.as_deref())?;
    for (ext, chain) in args.mappings {
        engine_config.mappings.insert(ext, chain);
    }
    if args.auto_force {
        engine_config.auto_force = true;
    }
    debug!("Loaded configuration: {:?}", engine_config);

    let engine = Catena::builder()
        .with_config(engine_config)
        .build()
        .await
        .context("Failed to initialize engine")?;

    let options = settings::build_options(&args.options);
    let output = match &args.ext {
        Some(ext) => {
            let text = tokio::fs::read_to_string(&args.input)
                .await
                .with_context(|| format!("Failed to read {}", args.input.display()))?;
            engine.compile(ext, &text, &options).await?
        }
        None => engine.compile_file(&args.input, &options).await?,
    };
    let text = output.force(&options)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &text)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "catena_cli=info,catena_sdk=info,catena_runtime=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
