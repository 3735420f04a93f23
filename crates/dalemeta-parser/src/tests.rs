use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::errors::ParserError;
use crate::labels::LabelTable;
use crate::logs::{read_log_bounds, DataSource, FsDataSource};

const LONDON: Tz = chrono_tz::Europe::London;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn fixture(path: &str) -> String {
    let full_path = fixture_dir().join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_label_table_in_channel_order() {
    let labels = LabelTable::parse(&fixture("house_1/labels.dat")).expect("label parse failed");

    assert_eq!(labels.len(), 4);
    assert_eq!(labels.get(1), Some("aggregate"));
    assert_eq!(labels.get(2), Some("kettle"));
    assert_eq!(labels.max_channel(), Some(4));
    assert!(labels.contains_label("aggregate"));

    let order: Vec<u32> = labels.iter().map(|(channel, _)| channel).collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
}

#[test]
fn label_table_trims_trailing_whitespace() {
    let labels = LabelTable::parse("7 kettle   \n").expect("parse failed");
    assert_eq!(labels.get(7), Some("kettle"));
}

#[test]
fn label_table_keeps_spaces_inside_labels() {
    let labels = LabelTable::parse("2 kitchen lights\n").expect("parse failed");
    assert_eq!(labels.get(2), Some("kitchen lights"));
}

#[test]
fn label_table_rejects_non_integer_channel() {
    let err = LabelTable::parse("x aggregate\n").unwrap_err();
    assert!(matches!(
        err,
        ParserError::MalformedLabelRow { line: 1, .. }
    ));
}

#[test]
fn label_table_rejects_line_without_separator() {
    let err = LabelTable::parse("1 aggregate\n2kettle\n").unwrap_err();
    assert!(matches!(
        err,
        ParserError::MalformedLabelRow { line: 2, .. }
    ));
}

#[test]
fn label_table_rejects_empty_label() {
    let err = LabelTable::parse("3  \n").unwrap_err();
    assert!(matches!(err, ParserError::MalformedLabelRow { .. }));
}

#[test]
fn label_table_rejects_duplicate_channel() {
    let err = LabelTable::parse("1 aggregate\n1 kettle\n").unwrap_err();
    assert!(matches!(
        err,
        ParserError::DuplicateChannel { line: 2, channel: 1 }
    ));
}

#[test]
fn reverse_lookup_finds_unique_channel() {
    let labels = LabelTable::parse(&fixture("house_1/labels.dat")).expect("parse failed");
    assert_eq!(labels.channel_for_label("lighting_circuit").expect("lookup"), 3);
}

#[test]
fn reverse_lookup_rejects_missing_label() {
    let labels = LabelTable::parse(&fixture("house_1/labels.dat")).expect("parse failed");
    let err = labels.channel_for_label("toaster").unwrap_err();
    assert!(matches!(err, ParserError::LabelNotFound { .. }));
}

#[test]
fn reverse_lookup_rejects_ambiguous_label() {
    let labels = LabelTable::parse("1 kettle\n2 kettle\n").expect("parse failed");
    match labels.channel_for_label("kettle").unwrap_err() {
        ParserError::AmbiguousLabel { label, channels } => {
            assert_eq!(label, "kettle");
            assert_eq!(channels, vec![1, 2]);
        }
        other => panic!("expected AmbiguousLabel, got {other:?}"),
    }
}

#[test]
fn log_bounds_reads_first_and_last_line() {
    let path = fixture_dir().join("house_1/channel_1.dat");
    let bounds =
        read_log_bounds(&path, "house_1/channel_1.dat", LONDON).expect("bounds failed");

    assert_eq!(bounds.start.timestamp(), 1362974926);
    assert_eq!(bounds.end.timestamp(), 1363060800);
    assert_eq!(bounds.end.timestamp_subsec_millis(), 500);
    // March 2013 is before the DST transition, so civil time is GMT.
    assert!(bounds.start.to_rfc3339().ends_with("+00:00"));
}

#[test]
fn log_bounds_uses_the_dataset_timezone() {
    let path = fixture_dir().join("house_1/channel_2.dat");
    let bounds =
        read_log_bounds(&path, "house_1/channel_2.dat", LONDON).expect("bounds failed");

    // 2013-07-01T00:00:00Z falls inside British Summer Time.
    assert_eq!(bounds.start.to_rfc3339(), "2013-07-01T01:00:00+01:00");
}

#[test]
fn single_line_log_has_equal_bounds() {
    let path = fixture_dir().join("house_1/channel_2.dat");
    let bounds =
        read_log_bounds(&path, "house_1/channel_2.dat", LONDON).expect("bounds failed");
    assert_eq!(bounds.start, bounds.end);
}

#[test]
fn empty_log_is_an_error() {
    let path = fixture_dir().join("house_1/empty.dat");
    let err = read_log_bounds(&path, "house_1/empty.dat", LONDON).unwrap_err();
    assert!(matches!(err, ParserError::EmptyLog { .. }));
}

#[test]
fn unparseable_timestamp_is_an_error() {
    let path = fixture_dir().join("house_1/channel_99.dat");
    let err = read_log_bounds(&path, "house_1/channel_99.dat", LONDON).unwrap_err();
    assert!(matches!(err, ParserError::InvalidTimestamp { .. }));
}

#[test]
fn missing_log_is_an_io_error() {
    let path = fixture_dir().join("house_1/channel_42.dat");
    let err = read_log_bounds(&path, "house_1/channel_42.dat", LONDON).unwrap_err();
    assert!(matches!(err, ParserError::Io { .. }));
}

#[test]
fn last_line_is_found_past_the_tail_window() {
    let path = std::env::temp_dir().join(format!("dalemeta_long_log_{}.dat", std::process::id()));
    {
        let mut file = fs::File::create(&path).expect("create long log");
        for _ in 0..2000 {
            writeln!(file, "1362974926 500").expect("write row");
        }
        writeln!(file, "1372636800.5 999").expect("write final row");
    }

    let bounds = read_log_bounds(&path, "long.dat", LONDON).expect("bounds failed");
    fs::remove_file(&path).ok();

    assert_eq!(bounds.start.timestamp(), 1362974926);
    assert_eq!(bounds.end.timestamp(), 1372636800);
    assert_eq!(bounds.end.timestamp_subsec_millis(), 500);
}

#[test]
fn fs_data_source_resolves_relative_locations() {
    let source = FsDataSource::new(fixture_dir(), LONDON);

    assert!(source.exists("house_1/mains.dat"));
    assert!(!source.exists("house_1/channel_42.dat"));

    let labels = LabelTable::parse(&source.read_text("house_1/labels.dat").expect("read_text"))
        .expect("parse failed");
    assert_eq!(labels.len(), 4);

    let bounds = source.log_bounds("house_1/mains.dat").expect("bounds failed");
    assert_eq!(bounds.start.timestamp(), 1362980000);
    assert_eq!(bounds.end.timestamp(), 1363000000);
}
