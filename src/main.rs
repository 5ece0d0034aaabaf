mod api;
mod backend;
mod cli;
mod config;
mod error;
mod pipeline;
mod service;
mod store;
mod ui;

use clap::Parser;

use api::AsociadosClient;
use backend::SimulatedBackend;
use cli::{Cli, Command};
use config::CarteraConfig;
use error::CarteraError;
use pipeline::{PipelineStatus, StatusFilter};
use service::AsociadosService;
use ui::UpdateProgress;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CarteraConfig::load()?;
    if let Some(fuente) = cli.fuente {
        config.source_url = fuente;
    }

    match cli.command {
        Command::List { estado } => list(&config, &estado).await?,
        Command::Set { id, estado } => set(&config, id, &estado).await?,
        Command::States => ui::print_estados(),
    }
    Ok(())
}

async fn list(config: &CarteraConfig, estado: &str) -> Result<(), CarteraError> {
    let filtro: StatusFilter = estado.parse()?;

    let client = AsociadosClient::with_source_url(config.source_url.clone());
    let service = AsociadosService::new(SimulatedBackend::from_config(config));
    service.set_filter(filtro);
    service.load(&client).await;

    ui::print_lista(&service.snapshot());
    Ok(())
}

async fn set(config: &CarteraConfig, id: u64, estado: &str) -> Result<(), CarteraError> {
    let next: PipelineStatus = estado.parse()?;

    let client = AsociadosClient::with_source_url(config.source_url.clone());
    let service = AsociadosService::new(SimulatedBackend::from_config(config));
    service.load(&client).await;

    let snapshot = service.snapshot();
    if let Some(error) = &snapshot.error {
        eprintln!("{error}");
        return Ok(());
    }

    // The protocol treats an unknown id as a no-op; the human gets a message.
    let Some(previous) = service.status_of(id) else {
        println!("Asociado {id} no encontrado.");
        return Ok(());
    };

    let progress = UpdateProgress::start(id, previous, next);
    match service.request_status_change(id, next).await {
        Ok(()) => progress.success(next),
        Err(err) => {
            progress.rolled_back(previous);
            return Err(err.into());
        }
    }

    ui::print_lista(&service.snapshot());
    Ok(())
}
