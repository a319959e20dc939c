use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};
use rundoc::commands::App;
use rundoc::config::ExecutionConfig;
use rundoc::documents;
use rundoc::executor::TaskRunner;
use rundoc::service::{FileRepository, Service};

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ExecutionConfig> {
    let mut config = match &cli.config {
        Some(path) => ExecutionConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ExecutionConfig::load().context("failed to load config")?,
    };

    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    Ok(config)
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    tracing::debug!(?config, "execution policy loaded");

    let service = Service::with_defaults(
        Box::new(FileRepository::new()),
        Box::new(TaskRunner::new(config)),
    );

    let mut app = App::new(service);
    for document in documents::all()? {
        app.register(document);
    }

    match cli.command {
        Commands::Render { doc_name, path } => app.render(&doc_name, &path),
        Commands::Compare { doc_name, path } => app.compare(&doc_name, &path),
        Commands::Run { doc_name, section } => app.run(&doc_name, &section).await.map(|_| ()),
        Commands::Plan {
            doc_name,
            section,
            json,
        } => app.plan(&doc_name, &section, json).map(|_| ()),
        Commands::List => {
            app.list();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    dispatch(cli).await
}
