use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use polly_pipeline::config::{DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use polly_pipeline::core::aws::load_sdk_config;
use polly_pipeline::{
    ObjectStoreUploader, Pipeline, PipelineConfig, PipelineError, PipelineReport, PollySynthesizer,
};

/// Amazon Polly text-to-speech pipeline
#[derive(Parser, Debug)]
#[command(name = "polly-pipeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Text file to synthesize
    #[arg(short = 'i', long = "input", value_name = "FILE", default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Local MP3 file written before upload
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    info!("{}", "=".repeat(60));
    info!("  AMAZON POLLY TEXT-TO-SPEECH SYNTHESIZER");
    info!("{}", "=".repeat(60));

    // Validate before touching the filesystem or the network
    let config = match PipelineConfig::from_env() {
        Ok(config) => config
            .with_input_path(cli.input)
            .with_output_path(cli.output),
        Err(e) => {
            error!("ERROR: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        input = %config.input_path().display(),
        output = %config.output_path().display(),
        bucket = %config.bucket_name,
        key = %config.object_key(),
        region = %config.aws_region,
        environment = %config.environment,
        "Configuration"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("ERROR: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&config)) {
        Ok(report) => {
            info!(
                url = %report.object_url(),
                characters = report.characters,
                audio_bytes = report.audio_bytes,
                "PIPELINE COMPLETE!"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = e.stage(), "ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let sdk_config = load_sdk_config(&config.aws_region).await;
    let synthesizer = PollySynthesizer::new(&sdk_config);
    let uploader = ObjectStoreUploader::for_s3(&config.bucket_name, &sdk_config)?;

    Pipeline::new(config, &synthesizer, &uploader).run().await
}
