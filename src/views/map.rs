use crate::opendata::model::Event;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

const ICON_URL: &str = "https://img.icons8.com/color/48/null/marker--v1.png";

pub const PARIS_VIEW: ViewState = ViewState {
    longitude: 2.349014,
    latitude: 48.864716,
    zoom: 12,
    pitch: 30,
};

pub const MARKER_ICON: IconDescriptor = IconDescriptor {
    url: ICON_URL,
    width: 200,
    height: 200,
    anchor_y: 200,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: u8,
    pub pitch: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    pub url: &'static str,
    pub width: u32,
    pub height: u32,
    pub anchor_y: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// `[longitude, latitude]`
    pub position: [f64; 2],
    pub icon: IconDescriptor,
    pub tooltip: String,
}

impl Marker {
    /// `None` unless the event has a venue name and coordinates.
    pub fn for_event(event: &Event) -> Option<Marker> {
        let address_name = event.address_name.as_deref()?;
        let latitude = event.latitude?;
        let longitude = event.longitude?;

        Some(Marker {
            position: [longitude, latitude],
            icon: MARKER_ICON,
            tooltip: format!(
                "<b>Address:</b> {}<br/> <b>Event:</b> {}",
                address_name, event.title
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapMarkers {
    /// Nothing was left to place on the map, show a message instead.
    NoEvents,
    /// Can be empty when none of the events can be located.
    Markers(Vec<Marker>),
}

impl MapMarkers {
    pub fn project(events: &[Event]) -> Self {
        if events.is_empty() {
            return MapMarkers::NoEvents;
        }

        let markers: Vec<Marker> = events
            .iter()
            .filter_map(Marker::for_event)
            .unique_by(|marker| {
                (
                    marker.position.map(f64::to_bits),
                    marker.tooltip.clone(),
                )
            })
            .collect();

        debug!("Placing {} markers for {} events", markers.len(), events.len());

        MapMarkers::Markers(markers)
    }

    pub fn markers(&self) -> &[Marker] {
        match self {
            MapMarkers::NoEvents => &[],
            MapMarkers::Markers(markers) => markers,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TooltipStyle {
    #[serde(rename = "backgroundColor")]
    pub background_color: &'static str,
    pub color: &'static str,
}

/// Everything the map renderer needs: where to look and what to draw.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayer<'a> {
    pub initial_view_state: ViewState,
    #[serde(rename = "type")]
    pub layer_type: &'static str,
    pub get_size: u32,
    pub size_scale: u32,
    pub pickable: bool,
    pub tooltip_style: TooltipStyle,
    pub data: &'a [Marker],
}

impl<'a> MapLayer<'a> {
    pub fn icons(markers: &'a [Marker]) -> Self {
        Self {
            initial_view_state: PARIS_VIEW,
            layer_type: "IconLayer",
            get_size: 4,
            size_scale: 15,
            pickable: true,
            tooltip_style: TooltipStyle {
                background_color: "steelblue",
                color: "white",
            },
            data: markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendata::dto::RawRecord;
    use crate::opendata::normalize::normalize;
    use serde_json::json;

    fn events(records: Vec<serde_json::Value>) -> Vec<Event> {
        normalize(
            records
                .into_iter()
                .map(|value| serde_json::from_value::<RawRecord>(value).unwrap())
                .collect(),
        )
        .events
    }

    fn located(title: &str, venue: Option<&str>, lat_lon: Option<[f64; 2]>) -> serde_json::Value {
        json!({
            "title": title,
            "tags": "Concert",
            "date_start": "2024-05-01",
            "address_zipcode": "75011",
            "address_name": venue,
            "lat_lon": lat_lon
        })
    }

    #[test_log::test]
    fn when_no_events_should_signal_no_markers() {
        assert_eq!(MapMarkers::project(&[]), MapMarkers::NoEvents);
    }

    #[test_log::test]
    fn when_no_event_can_be_located_should_give_empty_markers() {
        let markers = MapMarkers::project(&events(vec![
            located("Jazz", Some("Le Sunset"), None),
            located("Rock", None, Some([48.85, 2.37])),
        ]));

        assert_eq!(markers, MapMarkers::Markers(vec![]));
    }

    #[test_log::test]
    fn should_place_marker_at_longitude_latitude() {
        let markers = MapMarkers::project(&events(vec![located(
            "Jazz",
            Some("Le Sunset"),
            Some([48.859, 2.347]),
        )]));

        let marker = &markers.markers()[0];

        assert_eq!(marker.position, [2.347, 48.859]);
        assert_eq!(marker.icon, MARKER_ICON);
        assert_eq!(
            marker.tooltip,
            "<b>Address:</b> Le Sunset<br/> <b>Event:</b> Jazz"
        );
    }

    #[test_log::test]
    fn should_collapse_identical_markers() {
        let markers = MapMarkers::project(&events(vec![
            located("Jazz", Some("Le Sunset"), Some([48.859, 2.347])),
            located("Jazz", Some("Le Sunset"), Some([48.859, 2.347])),
            located("Blues", Some("Le Sunset"), Some([48.859, 2.347])),
        ]));

        assert_eq!(markers.markers().len(), 2);
    }

    #[test_log::test]
    fn should_serialize_layer_for_renderer() {
        let markers = MapMarkers::project(&events(vec![located(
            "Jazz",
            Some("Le Sunset"),
            Some([48.859, 2.347]),
        )]));

        let layer = serde_json::to_value(MapLayer::icons(markers.markers())).unwrap();

        assert_eq!(layer["type"], "IconLayer");
        assert_eq!(layer["initialViewState"]["zoom"], 12);
        assert_eq!(layer["initialViewState"]["pitch"], 30);
        assert_eq!(layer["tooltipStyle"]["backgroundColor"], "steelblue");
        assert_eq!(layer["data"][0]["icon"]["anchorY"], 200);
    }
}
