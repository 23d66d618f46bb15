use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Fetches the animation shown next to the title.
///
/// Decoration is optional, so any failure (including running past `timeout`)
/// just means there is nothing to show.
#[instrument]
pub async fn fetch_decoration(url: &str, timeout: Duration) -> Option<Value> {
    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(err) => {
            warn!("Couldn't build decoration client. Continuing without it. Err: {err}");
            return None;
        }
    };

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Couldn't reach decoration. Continuing without it. Err: {err}");
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        warn!(
            "Decoration answered with {}. Continuing without it.",
            response.status()
        );
        return None;
    }

    match response.json::<Value>().await {
        Ok(animation) => {
            info!("Decoration loaded");
            Some(animation)
        }
        Err(err) => {
            warn!("Decoration is not valid JSON. Continuing without it. Err: {err}");
            None
        }
    }
}
