use crate::filter::FilterSpec;
use crate::opendata::dto::RawRecord;
use crate::opendata::model::{Event, Label, Zipcode};
use crate::opendata::normalize::normalize;
use crate::views::map::MapMarkers;
use crate::views::table::DisplayTable;
use itertools::Itertools;
use std::sync::Arc;
use tracing::info;

pub const NO_RESULTS_MESSAGE: &str = "There are no events that meet the current selection.";

/// One catalog snapshot. Events are normalized once here and every
/// selection is computed from that same collection.
#[derive(Debug, Clone)]
pub struct Session {
    events: Arc<[Event]>,
    discarded: usize,
}

impl Session {
    pub fn new(records: Vec<RawRecord>) -> Self {
        let normalized = normalize(records);

        Self {
            events: normalized.events.into(),
            discarded: normalized.discarded,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Distinct first tags, sorted, to pick categories from.
    pub fn category_options(&self) -> Vec<Label> {
        self.events
            .iter()
            .map(|event| event.tag1.clone())
            .unique()
            .sorted()
            .collect()
    }

    pub fn postcode_options(&self) -> Vec<Zipcode> {
        self.events
            .iter()
            .map(|event| event.address_zipcode.clone())
            .unique()
            .sorted()
            .collect()
    }

    #[tracing::instrument(skip_all)]
    pub fn refine(&self, spec: &FilterSpec) -> Selection {
        let events = spec.apply(&self.events);

        info!("{} events match the current selection", events.len());

        Selection {
            table: DisplayTable::project(&events),
            markers: MapMarkers::project(&events),
            events,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub events: Vec<Event>,
    pub table: DisplayTable,
    pub markers: MapMarkers,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Message to show in place of both the table and the map.
    pub fn notice(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_RESULTS_MESSAGE)
    }
}
