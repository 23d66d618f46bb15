use crate::config::model::FilterConfig;
use crate::opendata::model::{Event, Label, Zipcode};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

/// User selections applied to the events. Every criterion left empty lets
/// everything through; the set ones are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub categories: HashSet<Label>,
    pub postcodes: HashSet<Zipcode>,
    pub single_day: Option<NaiveDate>,
    pub venue_text: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories
            .extend(categories.into_iter().map(|c| Label::from(c.as_ref())));
        self
    }

    pub fn with_postcodes(mut self, postcodes: impl IntoIterator<Item = Zipcode>) -> Self {
        self.postcodes.extend(postcodes);
        self
    }

    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.single_day = Some(day);
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue_text = Some(venue.into());
        self
    }

    /// Keeps the matching events, in their original order.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        let venue = self
            .venue_text
            .as_deref()
            .map(str::trim)
            .filter(|venue| !venue.is_empty())
            .map(str::to_lowercase);

        let filtered: Vec<Event> = events
            .iter()
            .filter(|event| self.categories.is_empty() || event.has_category(&self.categories))
            .filter(|event| {
                self.postcodes.is_empty() || self.postcodes.contains(&event.address_zipcode)
            })
            .filter(|event| self.single_day.map_or(true, |day| runs_on(event, day)))
            .filter(|event| venue.as_deref().map_or(true, |venue| venue_matches(event, venue)))
            .cloned()
            .collect();

        debug!("{} of {} events match", filtered.len(), events.len());

        filtered
    }
}

impl From<&FilterConfig> for FilterSpec {
    fn from(config: &FilterConfig) -> Self {
        let postcodes = config.postcodes.iter().filter_map(|postcode| {
            let zipcode = Zipcode::extract(postcode);

            if zipcode.is_none() {
                warn!("Ignoring '{}' since it is not a Paris zip code", postcode);
            }

            zipcode
        });

        let mut spec = FilterSpec::new()
            .with_categories(&config.categories)
            .with_postcodes(postcodes);

        if config.specific_day {
            spec = spec.on_day(config.date);
        }

        if let Some(venue) = &config.venue {
            spec = spec.with_venue(venue);
        }

        spec
    }
}

fn runs_on(event: &Event, day: NaiveDate) -> bool {
    match event.date_end {
        Some(date_end) => event.date_start.date() <= day && date_end.date() >= day,
        None => false,
    }
}

fn venue_matches(event: &Event, lowercase_venue: &str) -> bool {
    event
        .address_name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(lowercase_venue))
}
