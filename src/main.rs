use itertools::Itertools;
use parisevents::config::env_loader::load_config;
use parisevents::decoration::fetch_decoration;
use parisevents::filter::FilterSpec;
use parisevents::opendata::api::OpenDataParisAPI;
use parisevents::session::Session;
use parisevents::tracing::setup_loki;
use parisevents::views::map::{MapLayer, MapMarkers};
use parisevents::views::table::Column;
use serde_json::json;
use std::process::ExitCode;
use strum::IntoEnumIterator;
use tracing::{error, info};

const UNAVAILABLE_MESSAGE: &str =
    "The Paris events catalog is unavailable right now, please try again later.";

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_loki().await;

    let exit_code = run().await;

    if let Some((controller, handle)) = loki {
        controller.shutdown().await;
        let _ = handle.await;
    }

    exit_code
}

async fn run() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let records = match OpenDataParisAPI::new(&config.catalog) {
        Ok(api) => api.get_records().await,
        Err(err) => Err(err),
    };

    let records = match records {
        Ok(records) => records,
        Err(err) => {
            error!("{err}");
            eprintln!("{UNAVAILABLE_MESSAGE}");
            return ExitCode::FAILURE;
        }
    };

    let session = Session::new(records);

    info!(
        "{} events loaded ({} records discarded), {} categories, {} arrondissements",
        session.events().len(),
        session.discarded(),
        session.category_options().len(),
        session.postcode_options().len()
    );

    let decoration = match &config.decoration_url {
        Some(url) => fetch_decoration(url, config.decoration_timeout).await,
        None => None,
    };

    let spec = FilterSpec::from(&config.filter);
    let selection = session.refine(&spec);

    info!("Columns: {}", Column::iter().join(" | "));

    let map = match &selection.markers {
        MapMarkers::NoEvents => None,
        MapMarkers::Markers(markers) => Some(MapLayer::icons(markers)),
    };

    let output = json!({
        "decoration": decoration,
        "notice": selection.notice(),
        "events": selection.table,
        "map": map,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Failed rendering selection: {err}");
            ExitCode::FAILURE
        }
    }
}
