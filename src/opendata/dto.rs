use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub records: Vec<RecordEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct RecordEnvelope {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl SearchResponse {
    /// Unwraps every record's `fields` object, keeping response order.
    pub fn into_raw_records(self) -> Vec<RawRecord> {
        self.records
            .into_iter()
            .filter_map(|envelope| {
                RawRecord::from_fields(envelope.fields)
                    .inspect_err(|err| warn!("Skipping unreadable record: {err}"))
                    .ok()
            })
            .collect()
    }
}

/// A catalog record as delivered, already flattened.
///
/// Note: text fields use the lenient deserializer since the catalog
/// sometimes sends numbers (zip codes) or nulls where text is expected
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub date_end: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub date_description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub lead_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address_zipcode: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address_street: Option<String>,
    #[serde(default)]
    pub lat_lon: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub price_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub price_detail: Option<String>,
}

impl RawRecord {
    pub fn from_fields(fields: Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(fields))
    }
}

fn deserialize_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
