use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gapscan_client::controller::AnalysisController;
use gapscan_client::{HttpBackend, SelectedFile, TerminalSurface};

#[derive(Parser)]
#[command(name = "gapscan")]
#[command(about = "Analyze a resume against a job description")]
struct Cli {
    /// Path to the resume file (PDF)
    resume: PathBuf,

    /// Job description text, or @path to read it from a file
    jd: String,

    /// Base URL of the gapscan API server
    #[arg(long, default_value = "http://localhost:8080")]
    server: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=info", env!("CARGO_CRATE_NAME")).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let bytes = std::fs::read(&cli.resume)
        .with_context(|| format!("failed to read resume {}", cli.resume.display()))?;
    let name = cli
        .resume
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());

    let jd_text = match cli.jd.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job description {path}"))?,
        None => cli.jd.clone(),
    };

    let mut controller = AnalysisController::new(
        TerminalSurface::stdout(),
        HttpBackend::new(&cli.server),
    )
    .with_animate_delay(Duration::ZERO);

    controller.pick_file(SelectedFile { name, bytes });
    Ok(controller.submit(&jd_text).await)
}
