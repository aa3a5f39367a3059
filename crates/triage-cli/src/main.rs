//! Triage CLI - run one credit application through the triage workflow.
//!
//! Fans the application out to the KYC, fraud-risk and income evaluators,
//! waits for all three, and prints the fused decision as one JSON document.
//!
//! Connection settings come from flags or the environment
//! (`AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_DEPLOYMENT_NAME`,
//! `AZURE_OPENAI_API_KEY`); missing required settings abort before the run
//! starts.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::Level;
use triage_workflow::{init_tracing, OpenAiConfig, OpenAiGenerator, Workflow};

const DEMO_APPLICATION: &str = r#"{"amount":50000,"currency":"BRL","cpf":"123.456.789-00"}"#;

#[derive(Parser)]
#[command(name = "triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent credit application triage", long_about = None)]
struct Cli {
    /// Credit application text (JSON with amount, currency and cpf)
    #[arg(default_value = DEMO_APPLICATION)]
    application: String,

    /// Azure OpenAI resource endpoint
    #[arg(long, env = "AZURE_OPENAI_ENDPOINT")]
    endpoint: String,

    /// Deployment (model) name
    #[arg(long, env = "AZURE_OPENAI_DEPLOYMENT_NAME", default_value = "gpt-4.1-mini")]
    deployment: String,

    /// API key for the endpoint
    #[arg(long, env = "AZURE_OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let generator = OpenAiGenerator::new(OpenAiConfig {
        endpoint: cli.endpoint,
        deployment: cli.deployment,
        api_key: cli.api_key,
    })
    .context("Failed to create generation client")?;

    let decision = Workflow::triage(Arc::new(generator))
        .run(cli.application)
        .await
        .context("Triage run produced no decision")?;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
