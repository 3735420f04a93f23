use dalemeta_core::{Catalog, MetadataError};
use serde_json::json;

#[test]
fn embedded_catalog_loads() {
    let catalog = Catalog::load().expect("catalog");

    assert_eq!(catalog.dataset.name, "UK-DALE");
    assert_eq!(catalog.dataset.number_of_buildings, 5);
    assert_eq!(catalog.buildings.len(), 5);
    assert_eq!(
        catalog.timezone().expect("timezone"),
        chrono_tz::Europe::London
    );
}

#[test]
fn appliance_tables_match_the_survey() {
    let catalog = Catalog::load().expect("catalog");

    assert_eq!(catalog.appliances_for(1).len(), 69);
    assert_eq!(catalog.appliances_for(2).len(), 18);
    assert_eq!(catalog.appliances_for(3).len(), 4);
    assert_eq!(catalog.appliances_for(4).len(), 11);
    assert_eq!(catalog.appliances_for(5).len(), 24);
    assert!(catalog.appliances_for(6).is_empty());
}

#[test]
fn boiler_entry_keeps_its_nested_attributes() {
    let catalog = Catalog::load().expect("catalog");
    let boiler = &catalog.appliances_for(1)[0];

    assert_eq!(boiler.kind, "boiler");
    assert_eq!(boiler.original_name.as_deref(), Some("boiler"));
    assert_eq!(boiler.manufacturer.as_deref(), Some("Worcester~Greenstar"));
    assert_eq!(boiler.subtype.as_deref(), Some("system"));
    assert_eq!(boiler.extra["nominal_consumption"]["on_power"], json!(70));
    assert_eq!(
        boiler.extra["efficiency_rating"]["certification_name"],
        json!("SEDBUK")
    );
    assert_eq!(
        boiler.extra["distributions"]["on_power"][0]["model"]["mu"],
        json!(73)
    );
}

#[test]
fn television_carries_its_crt_component() {
    let catalog = Catalog::load().expect("catalog");
    let tv = catalog
        .appliances_for(1)
        .iter()
        .find(|appliance| appliance.kind == "television")
        .expect("television entry");

    let components = tv.components.as_ref().expect("components");
    assert_eq!(components[0].kind, "CRT screen");
    assert_eq!(components[0].extra["display_format"], json!("PAL"));
}

#[test]
fn audio_system_components_recurse() {
    let catalog = Catalog::load().expect("catalog");
    let hifi = catalog
        .appliances_for(1)
        .iter()
        .find(|appliance| appliance.original_name.as_deref() == Some("hifi_office"))
        .expect("hifi entry");

    let amp = &hifi.components.as_ref().expect("components")[0];
    assert_eq!(amp.kind, "audio amplifier");
    let nested = amp.components.as_ref().expect("nested components");
    assert_eq!(nested[0].kind, "DAC");
}

#[test]
fn unmetered_entries_keep_their_sentinel_channel() {
    let catalog = Catalog::load().expect("catalog");
    let alarm = catalog
        .appliances_for(1)
        .iter()
        .find(|appliance| appliance.kind == "security alarm")
        .expect("security alarm entry");

    assert_eq!(alarm.meters, Some(vec![0]));
    assert_eq!(
        alarm.dates_active.as_ref().expect("dates_active")[0]
            .end
            .as_deref(),
        Some("2013-08-11")
    );
}

#[test]
fn building_metadata_is_populated_where_surveyed() {
    let catalog = Catalog::load().expect("catalog");

    let house_1 = &catalog.buildings[0];
    assert_eq!(house_1.instance, 1);
    assert_eq!(house_1.metadata.n_occupants, Some(4));
    assert_eq!(house_1.metadata.construction_year, Some(1905));
    assert_eq!(house_1.metadata.rooms.as_ref().expect("rooms").len(), 10);

    // Houses 3 and 4 were never surveyed.
    assert_eq!(catalog.buildings[2].instance, 3);
    assert!(catalog.buildings[2].metadata.rooms.is_none());
    assert!(catalog.buildings[2].metadata.n_occupants.is_none());

    let house_5 = &catalog.buildings[4];
    assert_eq!(house_5.metadata.communal_boiler, Some(true));
    assert_eq!(house_5.metadata.building_type.as_deref(), Some("flat"));
}

const TEST_DATASET: &str = r#"
[dataset]
name = "Test"
long_name = "Test dataset"
subject = "testing"
geospatial_coverage = "nowhere"
publisher = "nobody"
related_documents = []
creators = ["Doe, Jane"]
contact = "jane@example.com"
institution = "Example"
description = "test fixture"
number_of_buildings = 2
timezone = "Europe/London"
schema = "https://example.com/schema"
funding = []
rights_list = []
description_of_subjects = "none"

[dataset.geo_location]
country = "GB"
locality = "London"
latitude = 51.0
longitude = -0.1
"#;

#[test]
fn building_count_mismatch_is_rejected() {
    let err = Catalog::from_toml(TEST_DATASET, "[[building]]\ninstance = 1\n", &[(1, "")])
        .unwrap_err();
    assert!(matches!(err, MetadataError::Validation(_)));
}

#[test]
fn building_without_an_appliance_table_is_rejected() {
    let buildings = "[[building]]\ninstance = 1\n\n[[building]]\ninstance = 2\n";
    let err = Catalog::from_toml(TEST_DATASET, buildings, &[(1, "")]).unwrap_err();
    assert!(matches!(err, MetadataError::Validation(_)));
}

#[test]
fn malformed_catalog_toml_is_a_parse_error() {
    let err = Catalog::from_toml("not toml at all [", "", &[]).unwrap_err();
    assert!(matches!(err, MetadataError::Catalog(_)));
}
