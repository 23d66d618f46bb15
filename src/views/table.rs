use crate::opendata::model::{Event, Label, Zipcode};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

#[derive(strum::Display, strum::EnumIter, Debug, Clone, Copy, PartialEq)]
pub enum Column {
    #[strum(serialize = "Event name")]
    EventName,
    Address,
    Arrondissement,
    #[strum(serialize = "Start date")]
    StartDate,
    #[strum(serialize = "End date")]
    EndDate,
    Description,
    Pricing,
    Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    #[serde(rename = "Event name")]
    pub event_name: String,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Arrondissement")]
    pub arrondissement: Zipcode,
    #[serde(rename = "Start date")]
    pub start_date: NaiveDate,
    #[serde(rename = "End date")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Pricing")]
    pub pricing: Option<Label>,
    #[serde(rename = "Link")]
    pub link: Option<String>,
}

impl From<&Event> for DisplayRow {
    fn from(event: &Event) -> Self {
        Self {
            event_name: event.title.clone(),
            address: event.address_name.clone(),
            arrondissement: event.address_zipcode.clone(),
            start_date: event.date_start.date(),
            end_date: event.date_end.map(|end| end.date()),
            description: event.description.clone(),
            pricing: event.price_type.clone(),
            link: event.url.clone(),
        }
    }
}

/// Events as shown in the table, soonest ending first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DisplayTable {
    rows: Vec<DisplayRow>,
}

impl DisplayTable {
    /// Sorting is stable, and rows without an end date go last.
    pub fn project(events: &[Event]) -> Self {
        let rows = events
            .iter()
            .map(DisplayRow::from)
            .sorted_by_key(|row| (row.end_date.is_none(), row.end_date))
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Several events can share a name.
    pub fn find<'a>(&'a self, event_name: &'a str) -> impl Iterator<Item = &'a DisplayRow> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.event_name == event_name)
    }
}
