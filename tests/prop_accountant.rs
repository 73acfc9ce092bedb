//! Property-based tests for the interval accountant.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;
use shiftkeeper::core::accountant::{classify_crosses_day, compute_duration, find_overlaps, span};
use shiftkeeper::models::interval::{Interval, NewInterval};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A start in 2025, minute precision. Day capped at 28.
fn arb_start() -> impl Strategy<Value = NaiveDateTime> {
    (1u32..=12, 1u32..=28, 0u32..=23, 0u32..=59).prop_map(|(m, d, h, min)| {
        NaiveDate::from_ymd_opt(2025, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    })
}

/// Offset of the end from the start, in minutes: anything from just under a
/// day back to two days ahead.
fn arb_offset() -> impl Strategy<Value = i64> {
    -(24 * 60 - 1i64)..=(48 * 60)
}

fn new_interval(owner: &str, start: NaiveDateTime, end: NaiveDateTime) -> NewInterval {
    NewInterval {
        owner_id: owner.to_string(),
        start,
        end,
        notes: String::new(),
        duration_hours: compute_duration(start, end).unwrap(),
    }
}

fn stored(owner: &str, start: NaiveDateTime, end: NaiveDateTime) -> Interval {
    Interval {
        id: 1,
        owner_id: owner.to_string(),
        start,
        end,
        duration_hours: compute_duration(start, end).unwrap(),
        notes: String::new(),
        created_at: String::new(),
    }
}

proptest! {
    #[test]
    fn duration_is_never_negative(start in arb_start(), offset in arb_offset()) {
        let end = start + TimeDelta::minutes(offset);
        let h = compute_duration(start, end).unwrap();

        prop_assert!(h >= 0.0);
        if offset >= 0 {
            prop_assert!((h - offset as f64 / 60.0).abs() < 1e-9);
        } else {
            prop_assert!(h < 24.0);
        }
    }

    #[test]
    fn a_day_or_more_back_is_rejected(start in arb_start(), extra in 0i64..=(48 * 60)) {
        let end = start - TimeDelta::minutes(24 * 60 + extra);
        prop_assert!(compute_duration(start, end).is_err());
    }

    #[test]
    fn crosses_day_iff_dates_differ(start in arb_start(), offset in arb_offset()) {
        let end = start + TimeDelta::minutes(offset);
        prop_assert_eq!(classify_crosses_day(start, end), start.date() != end.date());
    }

    #[test]
    fn span_length_matches_duration(start in arb_start(), offset in arb_offset()) {
        let end = start + TimeDelta::minutes(offset);
        let (s, e) = span(start, end).unwrap();
        let h = compute_duration(start, end).unwrap();

        prop_assert_eq!(s, start);
        prop_assert!(((e - s).num_seconds() as f64 / 3600.0 - h).abs() < 1e-9);
    }

    #[test]
    fn overlap_is_symmetric(
        a_start in arb_start(),
        a_len in 0i64..=(12 * 60),
        shift in -(12 * 60i64)..=(12 * 60),
        b_len in 0i64..=(12 * 60),
    ) {
        let a_end = a_start + TimeDelta::minutes(a_len);
        let b_start = a_start + TimeDelta::minutes(shift);
        let b_end = b_start + TimeDelta::minutes(b_len);

        let ab = find_overlaps(&new_interval("a", a_start, a_end), &[stored("b", b_start, b_end)]);
        let ba = find_overlaps(&new_interval("b", b_start, b_end), &[stored("a", a_start, a_end)]);

        prop_assert_eq!(ab.len(), ba.len());
        if let (Some(x), Some(y)) = (ab.first(), ba.first()) {
            prop_assert_eq!(x.overlap_minutes, y.overlap_minutes);
            prop_assert!(x.overlap_minutes > 0);
        }
    }

    #[test]
    fn same_owner_never_conflicts(
        a_start in arb_start(),
        a_len in 0i64..=(12 * 60),
        shift in -(12 * 60i64)..=(12 * 60),
        b_len in 0i64..=(12 * 60),
    ) {
        let b_start = a_start + TimeDelta::minutes(shift);
        let cand = new_interval("a", a_start, a_start + TimeDelta::minutes(a_len));
        let existing = stored("a", b_start, b_start + TimeDelta::minutes(b_len));

        prop_assert!(find_overlaps(&cand, &[existing]).is_empty());
    }
}
