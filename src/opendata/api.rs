use super::dto::{RawRecord, SearchResponse};
use crate::config::model::CatalogConfig;
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info};

const DATASET: &str = "que-faire-a-paris-";
const SORT_BY_START_DESC: &str = "-date_start";
const CITY: &str = "Paris";
const EXCLUDED_TAG: &str = "Enfants";

#[derive(strum::IntoStaticStr, strum::EnumIter, Debug, Clone, Copy)]
#[strum(serialize_all = "snake_case")]
pub enum Facet {
    DateStart,
    DateEnd,
    Tags,
    AddressName,
    AddressZipcode,
    AddressCity,
    Transport,
    PriceType,
    UpdatedAt,
    Programs,
}

pub struct OpenDataParisAPI {
    client: Client,
    base_url: String,
    max_records: usize,
}

impl OpenDataParisAPI {
    pub fn new(config: &CatalogConfig) -> Result<Self, APIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(APIError::Unavailable)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            max_records: config.max_records,
        })
    }

    /**
    Returns at most `max_records` records, most recent start date first.
    Never retried: a failure here ends the session
    */
    #[tracing::instrument(skip(self), fields(url = %self.base_url, max_records = self.max_records))]
    pub async fn get_records(&self) -> Result<Vec<RawRecord>, APIError> {
        info!("Getting events catalog");

        let json_response = self
            .client
            .get(&self.base_url)
            .query(&search_query(self.max_records))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                error!("Catalog request failed: {err}");
                APIError::Unavailable(err)
            })?
            .text()
            .await
            .map_err(APIError::Unavailable)?;

        let parsed_response = serde_json::from_str::<SearchResponse>(&json_response);

        match parsed_response {
            Ok(parsed_response) => {
                let mut records = parsed_response.into_raw_records();
                records.truncate(self.max_records);

                info!("Got {} raw records", records.len());

                Ok(records)
            }
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(APIError::InvalidResponse(e))
            }
        }
    }
}

pub fn search_query(max_records: usize) -> Vec<(&'static str, String)> {
    use strum::IntoEnumIterator;

    let mut query = vec![
        ("dataset", DATASET.to_string()),
        ("q", String::new()),
        ("rows", max_records.to_string()),
        ("sort", SORT_BY_START_DESC.to_string()),
    ];

    query.extend(Facet::iter().map(|facet| {
        let facet: &'static str = facet.into();
        ("facet", facet.to_string())
    }));

    query.push(("refine.address_city", CITY.to_string()));
    query.push(("exclude.tags", EXCLUDED_TAG.to_string()));

    query
}

#[derive(Debug, Error)]
pub enum APIError {
    #[error("events catalog is unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),
    #[error("events catalog sent an invalid response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_build_search_query() {
        let query = search_query(5000);

        assert!(query.contains(&("rows", "5000".to_string())));
        assert!(query.contains(&("sort", "-date_start".to_string())));
        assert!(query.contains(&("refine.address_city", "Paris".to_string())));
        assert!(query.contains(&("exclude.tags", "Enfants".to_string())));
    }

    #[test_log::test]
    fn should_request_every_facet() {
        let facets: Vec<String> = search_query(10)
            .into_iter()
            .filter(|(key, _)| *key == "facet")
            .map(|(_, value)| value)
            .collect();

        assert_eq!(
            facets,
            [
                "date_start",
                "date_end",
                "tags",
                "address_name",
                "address_zipcode",
                "address_city",
                "transport",
                "price_type",
                "updated_at",
                "programs"
            ]
        );
    }
}
