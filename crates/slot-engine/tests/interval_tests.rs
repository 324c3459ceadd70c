//! Tests for `HH:MM` parsing and minute-range algebra.

use slot_engine::interval::{format_hhmm, parse_hhmm, MinuteRange, MINUTES_PER_DAY};
use slot_engine::SlotError;

#[test]
fn parses_zero_padded_times() {
    assert_eq!(parse_hhmm("00:00").unwrap(), 0);
    assert_eq!(parse_hhmm("09:00").unwrap(), 540);
    assert_eq!(parse_hhmm("17:30").unwrap(), 1050);
    assert_eq!(parse_hhmm("23:59").unwrap(), 1439);
}

#[test]
fn parses_single_digit_hour() {
    assert_eq!(parse_hhmm("9:05").unwrap(), 545);
}

#[test]
fn end_of_day_is_accepted() {
    assert_eq!(parse_hhmm("24:00").unwrap(), MINUTES_PER_DAY);
}

#[test]
fn malformed_times_are_config_errors() {
    for bad in ["", "noon", "17:60", "25:00", "24:30", "12"] {
        let err = parse_hhmm(bad).unwrap_err();
        assert!(
            matches!(err, SlotError::Config(_)),
            "'{}' should be rejected as a config error, got {:?}",
            bad,
            err
        );
    }
}

#[test]
fn formats_minutes_as_hhmm() {
    assert_eq!(format_hhmm(0), "00:00");
    assert_eq!(format_hhmm(545), "09:05");
    assert_eq!(format_hhmm(1020), "17:00");
}

#[test]
fn adjacent_ranges_do_not_overlap() {
    let a = MinuteRange::new(540, 600);
    let b = MinuteRange::new(600, 660);
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));
}

#[test]
fn partially_overlapping_ranges_overlap_both_ways() {
    let a = MinuteRange::new(540, 610);
    let b = MinuteRange::new(600, 660);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn contained_range_overlaps() {
    let outer = MinuteRange::new(540, 1020);
    let inner = MinuteRange::new(720, 780);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn intersect_returns_common_part() {
    let a = MinuteRange::new(540, 1020);
    let b = MinuteRange::new(600, 1080);
    assert_eq!(a.intersect(&b), Some(MinuteRange::new(600, 1020)));
}

#[test]
fn intersect_of_disjoint_ranges_is_none() {
    let a = MinuteRange::new(540, 600);
    let b = MinuteRange::new(600, 660);
    assert_eq!(a.intersect(&b), None);
}

#[test]
fn enclose_covers_both_ranges() {
    let a = MinuteRange::new(720, 780);
    let b = MinuteRange::new(750, 810);
    assert_eq!(a.enclose(&b), MinuteRange::new(720, 810));
    assert_eq!(b.enclose(&a), MinuteRange::new(720, 810));
}

#[test]
fn len_and_emptiness() {
    assert_eq!(MinuteRange::new(540, 600).len(), 60);
    assert!(MinuteRange::new(600, 600).is_empty());
    assert!(MinuteRange::new(660, 600).is_empty());
    assert_eq!(MinuteRange::new(660, 600).len(), 0);
}

#[test]
fn parse_pair_and_display() {
    let range = MinuteRange::parse("12:00", "13:00").unwrap();
    assert_eq!(range, MinuteRange::new(720, 780));
    assert_eq!(range.to_string(), "12:00-13:00");
}
