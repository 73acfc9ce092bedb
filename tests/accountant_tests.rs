use chrono::{NaiveDate, NaiveDateTime};
use shiftkeeper::core::accountant::{
    classify_crosses_day, compute_duration, find_overlaps, round_hours, span, validate,
};
use shiftkeeper::errors::AppError;
use shiftkeeper::models::interval::{Candidate, Interval, NewInterval};

fn dt(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").unwrap()
}

fn stored(id: i64, owner: &str, start: NaiveDateTime, end: NaiveDateTime) -> Interval {
    Interval {
        id,
        owner_id: owner.to_string(),
        start,
        end,
        duration_hours: compute_duration(start, end).unwrap(),
        notes: String::new(),
        created_at: "2025-03-01T00:00:00+00:00".to_string(),
    }
}

fn candidate(owner: &str, start: NaiveDateTime, end: NaiveDateTime) -> NewInterval {
    validate(&Candidate::new(owner, start, end)).unwrap()
}

#[test]
fn day_shift_is_eight_hours() {
    let h = compute_duration(dt("2025-03-10", "09:00"), dt("2025-03-10", "17:00")).unwrap();
    assert_eq!(h, 8.0);
}

#[test]
fn wall_clock_rollover_on_same_date_adds_a_day() {
    let h = compute_duration(dt("2025-03-10", "23:00"), dt("2025-03-10", "02:00")).unwrap();
    assert_eq!(h, 3.0);
}

#[test]
fn explicit_next_day_end_is_plain_difference() {
    let h = compute_duration(dt("2025-03-10", "22:00"), dt("2025-03-11", "06:00")).unwrap();
    assert_eq!(h, 8.0);
}

#[test]
fn end_a_day_or_more_before_start_is_invalid() {
    let start = dt("2025-03-10", "09:00");

    let err = compute_duration(start, dt("2025-03-08", "09:00")).unwrap_err();
    assert!(matches!(err, AppError::InvalidInterval(_)));

    // exactly 24h back cannot be repaired either
    let err = compute_duration(start, dt("2025-03-09", "09:00")).unwrap_err();
    assert!(matches!(err, AppError::InvalidInterval(_)));

    // just under a day back rolls over
    let h = compute_duration(start, dt("2025-03-09", "09:30")).unwrap();
    assert_eq!(h, 0.5);
}

#[test]
fn duration_keeps_full_precision() {
    let h = compute_duration(dt("2025-03-10", "09:00"), dt("2025-03-10", "09:20")).unwrap();
    assert!((h - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(round_hours(h), 0.3);
}

#[test]
fn crosses_day_looks_at_dates_only() {
    assert!(classify_crosses_day(dt("2025-03-10", "22:00"), dt("2025-03-11", "06:00")));
    assert!(!classify_crosses_day(dt("2025-03-10", "23:00"), dt("2025-03-10", "02:00")));
    assert!(!classify_crosses_day(dt("2025-03-10", "09:00"), dt("2025-03-10", "17:00")));
    // negative duration, dates still differ
    assert!(classify_crosses_day(dt("2025-03-11", "09:00"), dt("2025-03-10", "17:00")));
}

#[test]
fn pure_functions_are_repeatable() {
    let (s, e) = (dt("2025-03-10", "23:00"), dt("2025-03-10", "02:00"));

    assert_eq!(compute_duration(s, e).unwrap(), compute_duration(s, e).unwrap());
    assert_eq!(classify_crosses_day(s, e), classify_crosses_day(s, e));
}

#[test]
fn span_of_rollover_ends_next_morning() {
    let (s, e) = span(dt("2025-03-10", "23:00"), dt("2025-03-10", "01:00")).unwrap();
    assert_eq!(s, dt("2025-03-10", "23:00"));
    assert_eq!(e, dt("2025-03-11", "01:00"));
}

#[test]
fn overlap_with_other_owner_is_reported() {
    let cand = candidate("alice", dt("2025-03-10", "10:00"), dt("2025-03-10", "14:00"));
    let existing = vec![stored(7, "bob", dt("2025-03-10", "12:00"), dt("2025-03-10", "16:00"))];

    let conflicts = find_overlaps(&cand, &existing);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].other.id, 7);
    assert_eq!(conflicts[0].other.owner_id, "bob");
    assert_eq!(conflicts[0].overlap_minutes, 120);
}

#[test]
fn same_owner_is_never_a_conflict() {
    let cand = candidate("alice", dt("2025-03-10", "10:00"), dt("2025-03-10", "14:00"));
    let existing = vec![stored(7, "alice", dt("2025-03-10", "12:00"), dt("2025-03-10", "16:00"))];

    assert!(find_overlaps(&cand, &existing).is_empty());
}

#[test]
fn touching_intervals_do_not_overlap() {
    let cand = candidate("alice", dt("2025-03-10", "09:00"), dt("2025-03-10", "12:00"));
    let existing = vec![stored(1, "bob", dt("2025-03-10", "12:00"), dt("2025-03-10", "15:00"))];

    assert!(find_overlaps(&cand, &existing).is_empty());
}

#[test]
fn zero_length_intervals_never_overlap() {
    let zero = candidate("alice", dt("2025-03-10", "09:00"), dt("2025-03-10", "09:00"));
    let wide = vec![stored(1, "bob", dt("2025-03-10", "08:00"), dt("2025-03-10", "17:00"))];
    assert!(find_overlaps(&zero, &wide).is_empty());

    let cand = candidate("bob", dt("2025-03-10", "08:00"), dt("2025-03-10", "17:00"));
    let existing = vec![stored(2, "alice", dt("2025-03-10", "09:00"), dt("2025-03-10", "09:00"))];
    assert!(find_overlaps(&cand, &existing).is_empty());
}

#[test]
fn night_shift_conflicts_with_colleague_around_midnight() {
    let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let cand = candidate("alice", dt("2025-03-10", "22:00"), dt("2025-03-11", "06:00"));

    assert_eq!(cand.duration_hours, 8.0);
    assert!(cand.crosses_day());

    // bob's 23:00-01:00 stored both ways: with the real end date, and with
    // the end on the nominal start date
    for bob_end in [dt("2025-03-11", "01:00"), dt("2025-03-10", "01:00")] {
        let bob = stored(3, "bob", start.and_hms_opt(23, 0, 0).unwrap(), bob_end);
        let conflicts = find_overlaps(&cand, &[bob]);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].other.owner_id, "bob");
        assert_eq!(conflicts[0].overlap_minutes, 120);
    }
}

#[test]
fn invalid_stored_intervals_are_skipped() {
    let cand = candidate("alice", dt("2025-03-10", "09:00"), dt("2025-03-10", "17:00"));
    let broken = Interval {
        id: 9,
        owner_id: "bob".into(),
        start: dt("2025-03-10", "10:00"),
        end: dt("2025-03-08", "10:00"),
        duration_hours: 0.0,
        notes: String::new(),
        created_at: String::new(),
    };

    assert!(find_overlaps(&cand, &[broken]).is_empty());
}

#[test]
fn validate_requires_owner_start_and_end() {
    let s = dt("2025-03-10", "09:00");
    let e = dt("2025-03-10", "17:00");

    let missing_owner = Candidate {
        owner_id: Some("   ".into()),
        start: Some(s),
        end: Some(e),
        notes: None,
    };
    let missing_start = Candidate {
        start: None,
        ..Candidate::new("alice", s, e)
    };
    let missing_end = Candidate {
        end: None,
        ..Candidate::new("alice", s, e)
    };

    for c in [missing_owner, missing_start, missing_end] {
        assert!(matches!(validate(&c), Err(AppError::InvalidInterval(_))));
    }
}

#[test]
fn validate_fills_duration_and_notes() {
    let c = Candidate::new("alice", dt("2025-03-10", "23:00"), dt("2025-03-10", "02:00"))
        .with_notes("inventory");

    let new = validate(&c).unwrap();
    assert_eq!(new.owner_id, "alice");
    assert_eq!(new.duration_hours, 3.0);
    assert_eq!(new.notes, "inventory");
    assert!(!new.crosses_day());
}
