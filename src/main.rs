use std::process::ExitCode;

use clap::Parser;

mod cli;
mod client;
mod config;
mod core;
mod display;
mod error;
mod input;
mod models;
mod store;

use crate::cli::CliArgs;
use crate::client::{HttpSearchClient, SearchApi};
use crate::core::{Controller, UiState};
use crate::store::FilterCriterion;

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::init();
    log::info!("Starting visual product matcher...");

    let args = CliArgs::parse();
    let file = args.file.clone();
    let url = args.url.clone();
    let min_similarity = args.min_similarity;
    let config = config::get_config(args);

    let client = match HttpSearchClient::new(config.api_base_url(), config.request_timeout()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build search client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Startup diagnostic, logged and otherwise ignored.
    match client.list_products().await {
        Ok(products) => log::info!("API reachable, {} products in catalogue", products.len()),
        Err(e) => log::warn!("API diagnostic failed: {}", e),
    }

    let mut controller = Controller::new(Box::new(client));

    let preview = match (&file, &url) {
        (Some(path), None) => controller.on_select_file(path).map(display::preview),
        (None, Some(raw)) => controller
            .on_select_url(raw)
            .map(display::preview)
            .map_err(anyhow::Error::from),
        _ => {
            log::error!("Provide exactly one of --file or --url");
            eprintln!("Provide exactly one of --file or --url");
            return ExitCode::FAILURE;
        }
    };

    let preview = match preview {
        Ok(preview) => preview,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("{}", preview);

    if let Err(e) = controller.load_preview().await {
        log::error!("{}", e);
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let criterion = min_similarity
        .or(config.min_similarity())
        .map(FilterCriterion::MinSimilarity);
    controller.on_filter_change(criterion);

    println!("{}", display::render_state(&UiState::Loading, None));

    if let Err(e) = controller.on_search().await {
        log::error!("{}", e);
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    println!("{}", display::render_state(controller.state(), controller.view()));

    match controller.state() {
        UiState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
