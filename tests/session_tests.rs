mod common;

use parisevents::filter::FilterSpec;
use parisevents::opendata::dto::SearchResponse;
use parisevents::opendata::model::{Label, Zipcode};
use parisevents::session::{Session, NO_RESULTS_MESSAGE};
use parisevents::views::map::MapMarkers;

fn session() -> Session {
    let response = serde_json::from_str::<SearchResponse>(&common::catalog_body()).unwrap();

    Session::new(response.into_raw_records())
}

fn names(session_events: &[parisevents::views::table::DisplayRow]) -> Vec<&str> {
    session_events
        .iter()
        .map(|row| row.event_name.as_str())
        .collect()
}

#[test_log::test]
fn should_discard_records_outside_paris() {
    let session = session();

    assert_eq!(session.events().len(), 3);
    assert_eq!(session.discarded(), 1);
    assert!(session
        .events()
        .iter()
        .all(|event| event.address_zipcode.as_str().len() == 5
            && event.address_zipcode.as_str().starts_with("75")));
}

#[test_log::test]
fn should_offer_sorted_distinct_options() {
    let session = session();

    assert_eq!(
        session.category_options(),
        [Label::from("Cinéma"), Label::from("Concert"), Label::from("Expo")]
    );
    assert_eq!(
        session
            .postcode_options()
            .iter()
            .map(Zipcode::as_str)
            .collect::<Vec<_>>(),
        ["75001", "75002", "75004"]
    );
}

#[test_log::test]
fn should_refine_without_touching_the_session() {
    let session = session();

    let concerts = session.refine(&FilterSpec::new().with_categories(["Concert"]));
    let everything = session.refine(&FilterSpec::new());

    // Le Grand Rex lists Concert as its second tag
    assert_eq!(names(concerts.table.rows()), ["Nuit du jazz", "2046"]);
    assert_eq!(everything.events.len(), session.events().len());
    assert_eq!(
        names(everything.table.rows()),
        ["Nuit du jazz", "2046", "Portraits"]
    );
    assert!(everything.notice().is_none());
}

#[test_log::test]
fn should_infer_paid_events() {
    let session = session();

    let prices: Vec<Option<&str>> = session
        .events()
        .iter()
        .map(|event| event.price_type.as_ref().map(Label::as_str))
        .collect();

    assert_eq!(prices, [Some("payant"), Some("gratuit"), None]);
}

#[test_log::test]
fn when_nothing_matches_should_show_notice() {
    let session = session();

    let selection = session.refine(&FilterSpec::new().with_venue("Olympia"));

    assert!(selection.table.is_empty());
    assert_eq!(selection.markers, MapMarkers::NoEvents);
    assert_eq!(selection.notice(), Some(NO_RESULTS_MESSAGE));
}

#[test_log::test]
fn should_place_only_located_events_on_map() {
    let session = session();

    let selection = session.refine(&FilterSpec::new());

    // 2046 has no coordinates
    assert_eq!(selection.table.len(), 3);
    assert_eq!(selection.markers.markers().len(), 2);
}
