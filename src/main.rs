use anyhow::Context;
use clap::{Parser, Subcommand};
use reqwest::Url;
use std::sync::Arc;

use forage::api::{AppState, create_router};
use forage::client::HttpQueryClient;
use forage::config::CONFIG;
use forage::controller::SearchController;
use forage::langflow::LangflowClient;

#[derive(Parser)]
#[command(name = "forage", about = "Product and recipe search over a Langflow agent")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the query proxy and serve the static UI.
    Serve {
        /// Address to listen on, defaults to BIND_ADDR.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Submit one query to a running proxy and print the rendered results.
    Search {
        query: String,
        /// Query endpoint, defaults to QUERY_ENDPOINT.
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { bind } => serve(bind).await,
        Command::Search { query, endpoint } => search(&query, endpoint).await,
    }
}

async fn serve(bind: Option<String>) -> anyhow::Result<()> {
    let langflow = LangflowClient::new(&CONFIG.langflow_settings())
        .context("Failed to initialize Langflow client")?;
    let state = Arc::new(AppState {
        langflow,
        query_suffix: CONFIG.query_suffix.clone(),
    });
    let app = create_router(state, &CONFIG.static_dir);

    let addr = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn search(query: &str, endpoint: Option<String>) -> anyhow::Result<()> {
    let endpoint = endpoint.unwrap_or_else(|| CONFIG.query_endpoint.clone());
    let endpoint = Url::parse(&endpoint).with_context(|| format!("Invalid endpoint {endpoint}"))?;

    let mut controller = SearchController::new(HttpQueryClient::new(endpoint));
    match controller.on_submit(query).await {
        Ok(()) => println!("{}", controller.context().results_html()),
        Err(_) => anyhow::bail!("{}", controller.context().error_message()),
    }
    Ok(())
}
