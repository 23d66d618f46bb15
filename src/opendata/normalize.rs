use super::dto::RawRecord;
use super::model::{Event, Label, LabelInterner, Zipcode, PAID_PRICE_TYPE};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info};

const TAG_SEPARATOR: char = ';';
const TAG_SLOTS: usize = 5;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default)]
pub struct Normalized {
    pub events: Vec<Event>,
    pub discarded: usize,
}

/// Turns raw catalog records into events, keeping input order.
///
/// Records without a first tag, a start date or a Paris zip code are dropped.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn normalize(records: Vec<RawRecord>) -> Normalized {
    let mut interner = LabelInterner::default();
    let mut normalized = Normalized::default();

    for record in records {
        match normalize_record(record, &mut interner) {
            Some(event) => normalized.events.push(event),
            None => normalized.discarded += 1,
        }
    }

    info!(
        "Kept {} events, discarded {} records ({} distinct labels)",
        normalized.events.len(),
        normalized.discarded,
        interner.len()
    );

    normalized
}

fn normalize_record(record: RawRecord, interner: &mut LabelInterner) -> Option<Event> {
    let title = coerce_title(record.title.as_ref());

    let [tag1, tag2, _tag3, _tag4, tag5] = split_tags(record.tags.as_deref(), interner);

    let (latitude, longitude) = decompose_lat_lon(record.lat_lon.as_ref());

    let date_start = record.date_start.as_deref().and_then(parse_timestamp);
    let date_end = record.date_end.as_deref().and_then(parse_timestamp);
    let updated_at = record.updated_at.as_deref().and_then(parse_timestamp);

    let address_zipcode = record
        .address_zipcode
        .as_deref()
        .and_then(|raw| Zipcode::extract_interned(raw, interner));

    let (Some(tag1), Some(date_start), Some(address_zipcode)) = (tag1, date_start, address_zipcode)
    else {
        debug!(title = %title, "Discarding record missing a tag, start date or Paris zip code");
        return None;
    };

    let price_type = infer_price_type(
        record.price_type.as_deref(),
        record.price_detail.as_deref(),
        interner,
    );

    Some(Event {
        title,
        tag1,
        tag2,
        tag5,
        date_start,
        date_end,
        updated_at,
        date_description: record.date_description,
        description: record.lead_text,
        url: record.url,
        address_zipcode,
        address_name: record.address_name,
        address_street: record.address_street,
        latitude,
        longitude,
        price_type,
        price_detail: record.price_detail,
    })
}

fn coerce_title(title: Option<&Value>) -> String {
    match title {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Positional tag slots; a slot past the end of the list is `None`.
///
/// Blank slots count as absent too, so `";Musique"` has no first tag and the
/// record is later discarded.
fn split_tags(tags: Option<&str>, interner: &mut LabelInterner) -> [Option<Label>; TAG_SLOTS] {
    let mut slots: [Option<Label>; TAG_SLOTS] = Default::default();

    if let Some(tags) = tags {
        for (slot, tag) in slots.iter_mut().zip(tags.split(TAG_SEPARATOR)) {
            let tag = tag.trim();

            if !tag.is_empty() {
                *slot = Some(interner.intern(tag));
            }
        }
    }

    slots
}

fn decompose_lat_lon(lat_lon: Option<&Value>) -> (Option<f64>, Option<f64>) {
    match lat_lon {
        Some(Value::Array(pair)) if pair.len() == 2 => {
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
                _ => (None, None),
            }
        }
        _ => (None, None),
    }
}

/// Offsets are dropped, keeping the local wall-clock time the catalog published.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn infer_price_type(
    price_type: Option<&str>,
    price_detail: Option<&str>,
    interner: &mut LabelInterner,
) -> Option<Label> {
    match (price_type, price_detail) {
        (Some(price_type), _) => Some(interner.intern(price_type)),
        (None, Some(_)) => Some(interner.intern(PAID_PRICE_TYPE)),
        (None, None) => None,
    }
}
