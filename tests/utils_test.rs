use chrono::{Duration, TimeZone, Utc};
use scrobcli::{error::ScrobbleError, types::ScrobbleCounts, utils::*};
use serde_json::json;

#[test]
fn test_plan_timestamps_spacing_and_order() {
    let base = 1_700_000_000;
    let timestamps = plan_timestamps(base, 5, TRACK_DURATION_SECS);

    assert_eq!(timestamps.len(), 5);
    assert_eq!(*timestamps.last().unwrap(), base);
    assert_eq!(timestamps[0], base - 4 * 180);
    for pair in timestamps.windows(2) {
        assert_eq!(pair[1] - pair[0], 180);
    }
}

#[test]
fn test_plan_timestamps_edge_counts() {
    assert!(plan_timestamps(100, 0, 180).is_empty());
    assert_eq!(plan_timestamps(100, 1, 180), vec![100]);
}

#[test]
fn test_build_events() {
    let events = build_events("Artist A", "Track B", &[10, 20]);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].artist, "Artist A");
    assert_eq!(events[0].track, "Track B");
    assert_eq!(events[1].timestamp, 20);
}

#[test]
fn test_clamp_count() {
    assert_eq!(clamp_count(5000), 1000);
    assert_eq!(clamp_count(0), 1);
    assert_eq!(clamp_count(-7), 1);
    assert_eq!(clamp_count(1), 1);
    assert_eq!(clamp_count(1000), 1000);
    assert_eq!(clamp_count(42), 42);
}

#[test]
fn test_parse_count() {
    assert_eq!(parse_count("5000").unwrap(), 1000);
    assert_eq!(parse_count(" 0\n").unwrap(), 1);
    assert_eq!(parse_count("120").unwrap(), 120);
    assert!(matches!(parse_count("lots"), Err(ScrobbleError::Input(_))));
    assert!(matches!(parse_count(""), Err(ScrobbleError::Input(_))));
}

#[test]
fn test_parse_days_ago_and_yes_no() {
    assert_eq!(parse_days_ago("3").unwrap(), 3);
    assert!(parse_days_ago("-1").is_err());
    assert!(parse_days_ago("soon").is_err());

    assert!(parse_yes_no("y"));
    assert!(parse_yes_no("Y"));
    assert!(parse_yes_no("yes"));
    assert!(!parse_yes_no("n"));
    assert!(!parse_yes_no(""));
}

#[test]
fn test_backdate() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    assert_eq!(backdate(now, 0).unwrap(), now);
    assert_eq!(backdate(now, 2).unwrap(), now - Duration::days(2));
}

#[test]
fn test_backdate_too_far_back_is_input_error() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    assert!(matches!(
        backdate(now, 100_000_000),
        Err(ScrobbleError::Input(_))
    ));
    assert!(matches!(
        backdate(now, u32::MAX),
        Err(ScrobbleError::Input(_))
    ));
}

#[test]
fn test_parse_start_time() {
    let start = parse_start_time("1").unwrap();
    assert_eq!((Utc::now() - start).num_days(), 1);
    assert!(matches!(
        parse_start_time("100000000"),
        Err(ScrobbleError::Input(_))
    ));
    assert!(parse_start_time("soon").is_err());
}

#[test]
fn test_scrobble_counts_numbers_and_strings() {
    let numeric = json!({ "scrobbles": { "@attr": { "accepted": 50, "ignored": 2 } } });
    assert_eq!(
        scrobble_counts(&numeric),
        Some(ScrobbleCounts {
            accepted: 50,
            ignored: 2
        })
    );

    let strings = json!({ "scrobbles": { "@attr": { "accepted": "20", "ignored": "0" } } });
    assert_eq!(
        scrobble_counts(&strings),
        Some(ScrobbleCounts {
            accepted: 20,
            ignored: 0
        })
    );

    let no_ignored = json!({ "scrobbles": { "@attr": { "accepted": 3 } } });
    assert_eq!(scrobble_counts(&no_ignored).map(|c| c.ignored), Some(0));
}

#[test]
fn test_scrobble_counts_unparseable() {
    assert_eq!(scrobble_counts(&json!({})), None);
    assert_eq!(scrobble_counts(&json!({ "scrobbles": {} })), None);
    assert_eq!(
        scrobble_counts(&json!({ "scrobbles": { "@attr": { "accepted": "many" } } })),
        None
    );
    assert_eq!(
        scrobble_counts(&json!({ "error": 9, "message": "Invalid session key" })),
        None
    );
}

#[test]
fn test_api_error_message() {
    let body = json!({ "error": 9, "message": "Invalid session key" });
    assert_eq!(
        api_error_message(&body).as_deref(),
        Some("Invalid session key (code 9)")
    );
    assert_eq!(api_error_message(&json!({ "token": "x" })), None);
}

#[test]
fn test_format_timestamp() {
    assert_eq!(format_timestamp(0), "1970-01-01 00:00");
    assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13");
}
