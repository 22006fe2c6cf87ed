use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chathub::config::Config;
use chathub::credential::Credential;
use chathub::llm::{ModelRegistry, ModelSelection, OpenRouterClient};
use chathub::session::ChatSession;
use chathub::surface::{self, TerminalSurface, format_model_list};

#[derive(Parser)]
#[command(name = "chathub", version)]
#[command(about = "Chat with free OpenRouter models from the terminal")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "chathub.yaml")]
    config: PathBuf,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model to start with: number, name or provider id (see --list-models)
    #[arg(short, long)]
    model: Option<String>,

    /// Print the available models and exit
    #[arg(long)]
    list_models: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let registry = ModelRegistry::builtin();
    let query = cli.model.as_deref().or(config.default_model.as_deref());

    if cli.list_models {
        print!("{}", model_listing(&registry, query));
        return Ok(());
    }

    let model = resolve_model(&registry, query)?;

    let client = reqwest::Client::builder()
        .build()
        .context("building HTTP client")?;
    let gateway = OpenRouterClient::new(
        client,
        config.gateway.base_url.clone(),
        config.gateway.referer.clone(),
    );
    debug!(
        base_url = %config.gateway.base_url,
        timeout_seconds = config.gateway.timeout_seconds,
        model = %model.provider_id,
        "Starting session"
    );

    let api_key = cli.api_key.unwrap_or_default();
    let session = ChatSession::new(Arc::new(gateway), model)
        .with_credential(Credential::new(api_key.clone()))
        .with_timeout(config.gateway.timeout());

    let mut terminal = TerminalSurface::new(registry, model, api_key);
    terminal.print_banner();
    surface::run(session, &mut terminal).await;

    Ok(())
}

/// The model list for `--list-models`. An unknown query marks the default
/// model instead of failing.
fn model_listing(registry: &ModelRegistry, query: Option<&str>) -> String {
    let marked = query
        .and_then(|q| registry.find(q))
        .unwrap_or_else(|| registry.default_model());
    format_model_list(registry, marked)
}

/// Model to start with. An unknown query is an error.
fn resolve_model(registry: &ModelRegistry, query: Option<&str>) -> Result<ModelSelection> {
    match query {
        Some(query) => match registry.find(query) {
            Some(model) => Ok(model),
            None => bail!("unknown model '{query}' (see --list-models)"),
        },
        None => Ok(registry.default_model()),
    }
}
