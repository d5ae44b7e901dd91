//! chatrelay entry point.
//!
//! Binary name: `chatrelay`
//!
//! Loads configuration, installs tracing, wires one conversation store and
//! one LLM provider, then runs the Discord gateway, the HTTP API, or both
//! until Ctrl+C / SIGTERM.

mod cli;
mod discord;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use chatrelay_infra::config::{finalize, load_dotenv, read_layered};
use chatrelay_infra::llm::create_provider;
use chatrelay_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use chatrelay_types::config::RelayConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so it can supply CHATRELAY_CONFIG to the parser
    load_dotenv();
    let cli = Cli::parse();

    // Shell completions don't need config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatrelay", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = read_layered(&cli.config).await?;

    init_tracing(&TracingOptions {
        verbosity: cli.verbose,
        quiet: cli.quiet,
        log_file: config.log_file_path(),
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    finalize(&mut config)?;
    let result = run(cli, config).await;

    shutdown_tracing();
    result
}

async fn run(cli: Cli, mut config: RelayConfig) -> anyhow::Result<()> {
    let (with_discord, with_http) = match &cli.command {
        Commands::Run { bind } | Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind.clone();
            }
            (matches!(cli.command, Commands::Run { .. }), true)
        }
        Commands::Bot => (true, false),
        Commands::Completions { .. } => unreachable!("handled in main"),
    };

    let provider_settings = config.provider_settings()?;
    let discord_token = if with_discord {
        Some(config.require_discord_token()?.clone())
    } else {
        None
    };

    let state = AppState::new(
        &config,
        provider_settings.kind,
        create_provider(&provider_settings),
    );
    tracing::info!(
        provider = %state.provider_kind,
        model = state.model(),
        history_limit = config.history_limit,
        "Conversation core ready"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    let http_task = async {
        if !with_http {
            return Ok(());
        }
        let result = serve_http(&config.bind, state.clone(), shutdown.clone(), cli.quiet).await;
        shutdown.cancel();
        result
    };

    let discord_task = async {
        let Some(token) = &discord_token else {
            return Ok(());
        };
        let result = discord::run(token, state.clone(), shutdown.clone()).await;
        shutdown.cancel();
        result
    };

    let (http_result, discord_result) = tokio::join!(http_task, discord_task);
    state.status.set_online(false);

    if !cli.quiet {
        println!("\n  {}", console::style("chatrelay stopped.").dim());
    }
    http_result.and(discord_result)
}

async fn serve_http(
    bind: &str,
    state: AppState,
    shutdown: CancellationToken,
    quiet: bool,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;

    if !quiet {
        println!(
            "  {} chatrelay API listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{bind}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
