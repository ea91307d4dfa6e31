use crate::cli::Cli;
use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::exit::Exit;
use crate::report::ConsoleReporter;
use crate::tasks;
use crate::upload::SolrClient;
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

/// Run one upload session and map its outcome to an exit code
pub async fn run(cli: Cli) -> Exit {
    let run_id = Uuid::now_v7();
    upload_all(cli)
        .instrument(info_span!("run", %run_id))
        .await
}

async fn upload_all(cli: Cli) -> Exit {
    let settings = match Settings::load(cli.config.as_deref(), cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => {
            debug!(error = %e, "Invalid configuration");
            eprintln!("{e}");
            return Exit::Usage;
        }
    };

    let upload_config = match settings.upload_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Exit::Usage;
        }
    };

    let tasks = match tasks::discover(&settings.src_dir) {
        Ok(tasks) => tasks,
        Err(e) => {
            debug!(error = %e, "Task discovery failed");
            eprintln!("{e}");
            return Exit::TaskSource;
        }
    };

    if tasks.is_empty() {
        eprintln!("No JSON files in {}", settings.src_dir.display());
        return Exit::NoTasks;
    }

    let client = match SolrClient::new(&upload_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return Exit::Usage;
        }
    };

    info!(
        collection = %upload_config.collection,
        files = tasks.len(),
        workers = settings.nqueries,
        commit = upload_config.commit,
        "Starting upload"
    );

    let dispatcher = Dispatcher::new(Arc::new(client), settings.nqueries);
    match dispatcher.run(tasks, ConsoleReporter::console()).await {
        Ok(summary) => Exit::from(&summary),
        Err(e) => {
            debug!(error = %e, "Dispatch failed");
            eprintln!("{e}");
            Exit::UploadFailures
        }
    }
}
