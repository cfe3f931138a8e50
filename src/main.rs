use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mcp_weather_tools::{Config, Weather};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// MCP over standard input/output
    Stdio,
    /// MCP streamable HTTP, mounted at /mcp
    Http,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transport to serve on
    #[arg(short, long, value_enum, default_value = "stdio")]
    transport: Transport,

    /// Bind address for the HTTP transport
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the HTTP transport
    #[arg(short, long, env = "PORT", default_value_t = 9000)]
    port: u16,

    /// OpenWeatherMap API key (overrides OPENWEATHER_API_KEY)
    #[arg(long)]
    openweather_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_weather_tools=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_api_key(cli.openweather_api_key.clone());

    if config.openweather_api_key.is_some() {
        tracing::info!("OpenWeather API key configured");
    } else {
        tracing::warn!("OpenWeather API key not configured, get_forecast will be unavailable");
    }

    let weather = Weather::new(config)?;

    match cli.transport {
        Transport::Stdio => serve_stdio(weather).await?,
        Transport::Http => {
            let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
                .parse()
                .with_context(|| format!("invalid bind address {}:{}", cli.host, cli.port))?;
            serve_http(weather, addr).await?
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn serve_stdio(weather: Weather) -> Result<()> {
    tracing::info!("Starting MCP weather server on stdio");

    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;
    Ok(())
}

async fn serve_http(weather: Weather, addr: SocketAddr) -> Result<()> {
    // Sessions share one client and one cache.
    let service = StreamableHttpService::new(
        move || Ok(weather.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Starting MCP weather server on streamable HTTP at /mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;
    Ok(())
}
