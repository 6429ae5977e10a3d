mod config;
mod host;
mod upload;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use host::CliHost;
use meetics_core::fields::RawFields;
use meetics_core::pipeline;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use upload::HttpUploader;

#[derive(Parser)]
#[command(name = "meetics")]
#[command(about = "Convert raw meeting-booking fields into an .ics invite and upload it")]
struct Cli {
    /// Path to a JSON object of raw meeting fields, or "-" for stdin
    fields: String,

    /// Override the configured upload endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory to write the local copy of the invite into
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("  Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;

    let endpoint = cli.endpoint.unwrap_or(config.upload_url);
    let output_dir = cli
        .out_dir
        .or(config.output_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let fields = read_fields(&cli.fields)?;

    let uploader = HttpUploader::new(endpoint)?;
    let host = CliHost::new(output_dir);

    // A fatal conversion error has already been surfaced through the host's
    // alert capability; only the exit code is left to map. An upload failure
    // is absorbed by the dispatcher and does not change the exit code.
    match pipeline::run(&fields, &uploader, &host).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn read_fields(source: &str) -> Result<RawFields> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read fields from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))?
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Fields input is not valid JSON")?;
    anyhow::ensure!(value.is_object(), "Fields input must be a JSON object");

    Ok(RawFields::from_json(&value))
}
