//! pc - prompt catalog CLI and stdio tool server

use std::fs;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use promptcatalog::catalog::{Catalog, RandomQuery, SearchQuery};
use promptcatalog::cli::{Cli, Command, OutputFormat, get_log_path};
use promptcatalog::config::Config;
use promptcatalog::render;
use promptcatalog::server::Server;
use promptcatalog::tools::{ToolContext, ToolExecutor};

fn parse_level(level: &str) -> Option<tracing::Level> {
    match level.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // stdout carries protocol output in `serve`, so logs go to a file
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let level = match cli_log_level {
        Some(s) => parse_level(s).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{}", json);
        }
        OutputFormat::Text => println!("{}", text(value)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;
    info!(base_url = %config.api.base_url, ttl_secs = config.cache.ttl_secs, "pc loaded config");

    let catalog = Arc::new(Catalog::from_config(&config).context("Failed to create catalog client")?);
    let format = cli.format;

    debug!(?command, "main: dispatching command");
    match command {
        Command::Serve => cmd_serve(catalog).await,
        Command::Search {
            query,
            tag,
            category,
            persona,
            limit,
        } => {
            let results = catalog
                .search(&SearchQuery {
                    query,
                    tag,
                    category,
                    persona,
                    limit,
                })
                .await?;
            emit(format, &results, render::search_results)
        }
        Command::Get { id } => emit(format, &catalog.get_prompt(id).await?, render::prompt_detail),
        Command::Categories => emit(format, &catalog.list_categories().await?, |c| render::categories(c)),
        Command::Packs { category } => emit(format, &catalog.list_packs(category.as_deref()).await?, |p| {
            render::packs(p)
        }),
        Command::Pack { title } => emit(format, &catalog.get_pack(&title).await?, render::pack_view),
        Command::Tags { limit } => emit(format, &catalog.list_tags(limit).await?, |t| render::tags(t)),
        Command::Personas { limit } => emit(format, &catalog.list_personas(limit).await?, |p| render::personas(p)),
        Command::Random { count, category, tag } => {
            let prompts = catalog.random_prompts(&RandomQuery { count, category, tag }).await?;
            emit(format, &prompts, |p| render::prompt_list(p))
        }
    }
}

async fn cmd_serve(catalog: Arc<Catalog>) -> Result<()> {
    info!("cmd_serve: serving tools on stdio");
    let ctx = ToolContext::new(catalog.clone());
    let server = Arc::new(Server::new(Arc::new(ToolExecutor::standard()), ctx));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    server.serve(stdin, tokio::io::stdout()).await?;

    for slot in catalog.cache().status().await {
        info!(
            endpoint = %slot.endpoint,
            cached = slot.cached,
            records = ?slot.records,
            age_secs = ?slot.age_secs,
            "cmd_serve: cache at shutdown"
        );
    }
    Ok(())
}
