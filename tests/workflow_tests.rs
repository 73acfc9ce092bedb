use chrono::{NaiveDate, NaiveTime};
use shiftkeeper::config::{Config, OverlapPolicy};
use shiftkeeper::core::add::{AddLogic, AddRequest, Submission};
use shiftkeeper::core::del::DeleteLogic;
use shiftkeeper::core::edit::{EditLogic, EditRequest};
use shiftkeeper::core::employee::EmployeeLogic;
use shiftkeeper::core::schedule::ScheduleLogic;
use shiftkeeper::db::log::load_log;
use shiftkeeper::db::pool::DbPool;
use shiftkeeper::db::store::{IntervalStore, all_intervals};
use shiftkeeper::errors::AppError;
use shiftkeeper::models::employee::Role;
use shiftkeeper::models::interval::Interval;
use shiftkeeper::models::session::Session;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn config(policy: OverlapPolicy) -> Config {
    Config {
        overlap_policy: policy,
        ..Config::default()
    }
}

/// In-memory team: `boss` (admin), `alice`, `bob`.
fn team() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    EmployeeLogic::register(&pool, None, "boss", "The Boss", Role::Admin).unwrap();
    EmployeeLogic::register(&pool, None, "alice", "Alice", Role::Employee).unwrap();
    EmployeeLogic::register(&pool, None, "bob", "Bob", Role::Employee).unwrap();
    pool
}

fn session(pool: &DbPool, id: &str) -> Session {
    Session::open(pool, id).unwrap()
}

fn request(date: &str, start: &str, end: &str) -> AddRequest {
    AddRequest {
        owner: None,
        date: day(date),
        start: Some(t(start)),
        end: Some(t(end)),
        end_date: None,
        notes: None,
        force: false,
        dry_run: false,
    }
}

fn saved(outcome: Submission) -> Interval {
    match outcome {
        Submission::Saved { interval, .. } => interval,
        other => panic!("expected a saved shift, got {other:?}"),
    }
}

fn never_asked(_: &[shiftkeeper::models::interval::Conflict]) -> bool {
    panic!("confirmation should not be requested")
}

/// bob already works 23:00-01:00 on 2025-03-10
fn with_bob_night(pool: &DbPool, cfg: &Config) {
    let bob = session(pool, "bob");
    AddLogic::apply(pool, cfg, &bob, &request("2025-03-10", "23:00", "01:00"), never_asked).unwrap();
}

#[test]
fn end_before_start_rolls_to_next_day() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    let alice = session(&pool, "alice");

    let iv = saved(
        AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "22:00", "06:00"), never_asked)
            .unwrap(),
    );

    assert_eq!(iv.owner_id, "alice");
    assert_eq!(iv.end.date(), day("2025-03-11"));
    assert_eq!(iv.duration_hours, 8.0);
    assert!(iv.crosses_day());
}

#[test]
fn block_policy_rejects_cross_owner_overlap() {
    let pool = team();
    let cfg = config(OverlapPolicy::Block);
    with_bob_night(&pool, &cfg);

    let alice = session(&pool, "alice");
    let err = AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "22:00", "06:00"), never_asked)
        .unwrap_err();

    assert!(matches!(err, AppError::OverlapRejected(1)));
    assert_eq!(all_intervals(&pool.conn).unwrap().len(), 1);
}

#[test]
fn force_overrides_the_block_policy() {
    let pool = team();
    let cfg = config(OverlapPolicy::Block);
    with_bob_night(&pool, &cfg);

    let alice = session(&pool, "alice");
    let mut req = request("2025-03-10", "22:00", "06:00");
    req.force = true;

    match AddLogic::apply(&pool, &cfg, &alice, &req, never_asked).unwrap() {
        Submission::Saved { conflicts, .. } => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].other.owner_id, "bob");
            assert_eq!(conflicts[0].overlap_minutes, 120);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(all_intervals(&pool.conn).unwrap().len(), 2);
}

#[test]
fn warn_policy_asks_and_respects_a_no() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    with_bob_night(&pool, &cfg);

    let alice = session(&pool, "alice");
    let outcome = AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "22:00", "06:00"), |c| {
        assert_eq!(c.len(), 1);
        false
    })
    .unwrap();

    assert!(matches!(outcome, Submission::Cancelled { .. }));
    assert_eq!(all_intervals(&pool.conn).unwrap().len(), 1);

    // and a yes saves it
    let outcome = AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "22:00", "06:00"), |_| true)
        .unwrap();
    saved(outcome);
    assert_eq!(all_intervals(&pool.conn).unwrap().len(), 2);
}

#[test]
fn previous_day_night_shift_is_checked() {
    let pool = team();
    let cfg = config(OverlapPolicy::Block);
    with_bob_night(&pool, &cfg);

    // starts on the 11th, bob's shift started on the 10th and runs to 01:00
    let alice = session(&pool, "alice");
    let err = AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-11", "00:00", "08:00"), never_asked)
        .unwrap_err();
    assert!(matches!(err, AppError::OverlapRejected(1)));
}

#[test]
fn multi_day_shift_of_another_employee_is_checked() {
    let pool = team();
    let cfg = config(OverlapPolicy::Block);

    // bob's 48h shift started two days before alice's
    let bob = session(&pool, "bob");
    let mut long = request("2025-03-08", "08:00", "08:00");
    long.end_date = Some(day("2025-03-10"));
    let iv = saved(AddLogic::apply(&pool, &cfg, &bob, &long, never_asked).unwrap());
    assert_eq!(iv.duration_hours, 48.0);

    let alice = session(&pool, "alice");
    let err = AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "06:00", "07:00"), never_asked)
        .unwrap_err();
    assert!(matches!(err, AppError::OverlapRejected(1)));

    // right after bob's shift ends there is no overlap
    saved(
        AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "08:00", "12:00"), never_asked)
            .unwrap(),
    );
}

#[test]
fn dry_run_reports_without_saving() {
    let pool = team();
    let cfg = config(OverlapPolicy::Block);
    with_bob_night(&pool, &cfg);

    let alice = session(&pool, "alice");
    let mut req = request("2025-03-10", "22:00", "06:00");
    req.dry_run = true;

    match AddLogic::apply(&pool, &cfg, &alice, &req, never_asked).unwrap() {
        Submission::DryRun {
            interval,
            conflicts,
        } => {
            assert_eq!(interval.duration_hours, 8.0);
            assert!(interval.crosses_day());
            assert_eq!(conflicts.len(), 1);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(all_intervals(&pool.conn).unwrap().len(), 1);
}

#[test]
fn employees_cannot_record_for_others_but_admins_can() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);

    let mut req = request("2025-03-10", "09:00", "17:00");
    req.owner = Some("bob".into());

    let alice = session(&pool, "alice");
    let err = AddLogic::apply(&pool, &cfg, &alice, &req, never_asked).unwrap_err();
    match err {
        AppError::PermissionDenied(msg) => assert_eq!(msg, "alice cannot add shifts for bob"),
        other => panic!("unexpected error {other:?}"),
    }

    let boss = session(&pool, "boss");
    let iv = saved(AddLogic::apply(&pool, &cfg, &boss, &req, never_asked).unwrap());
    assert_eq!(iv.owner_id, "bob");

    req.owner = Some("nobody".into());
    let err = AddLogic::apply(&pool, &cfg, &boss, &req, never_asked).unwrap_err();
    assert!(matches!(err, AppError::UnknownEmployee(_)));
}

#[test]
fn missing_times_come_from_schedule_then_config() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    let alice = session(&pool, "alice");

    // 2025-03-10 is a Monday
    ScheduleLogic::add(&pool, &alice, "alice", 1, "07:30", "15:30").unwrap();

    let mut req = request("2025-03-10", "00:00", "00:00");
    req.start = None;
    req.end = None;

    let monday = saved(AddLogic::apply(&pool, &cfg, &alice, &req, never_asked).unwrap());
    assert_eq!(monday.start.time(), t("07:30"));
    assert_eq!(monday.duration_hours, 8.0);

    req.date = day("2025-03-11");
    let tuesday = saved(AddLogic::apply(&pool, &cfg, &alice, &req, never_asked).unwrap());
    assert_eq!(tuesday.start.time(), t("09:00"));
    assert_eq!(tuesday.end.time(), t("18:00"));
    assert_eq!(tuesday.duration_hours, 9.0);
}

#[test]
fn edit_replaces_times_and_checks_ownership() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    let alice = session(&pool, "alice");

    let mut req = request("2025-03-10", "22:00", "06:00");
    req.notes = Some("first night".into());
    let iv = saved(AddLogic::apply(&pool, &cfg, &alice, &req, never_asked).unwrap());

    let edit = EditRequest {
        id: iv.id,
        end: Some(t("07:00")),
        clear_notes: true,
        ..EditRequest::default()
    };

    let bob = session(&pool, "bob");
    let err = EditLogic::apply(&pool, &cfg, &bob, &edit, never_asked).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    let updated = saved(EditLogic::apply(&pool, &cfg, &alice, &edit, never_asked).unwrap());
    assert_eq!(updated.id, iv.id);
    assert_eq!(updated.duration_hours, 9.0);
    assert_eq!(updated.end.date(), day("2025-03-11"));
    assert_eq!(updated.notes, "");

    // moving the start date keeps the overnight layout
    let moved = EditRequest {
        id: iv.id,
        date: Some(day("2025-03-12")),
        ..EditRequest::default()
    };
    let moved = saved(EditLogic::apply(&pool, &cfg, &alice, &moved, never_asked).unwrap());
    assert_eq!(moved.start.date(), day("2025-03-12"));
    assert_eq!(moved.end.date(), day("2025-03-13"));
    assert_eq!(moved.duration_hours, 9.0);
}

#[test]
fn delete_checks_ownership_and_confirmation() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    let alice = session(&pool, "alice");
    let iv = saved(
        AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "09:00", "17:00"), never_asked)
            .unwrap(),
    );

    let bob = session(&pool, "bob");
    let err = DeleteLogic::apply(&pool, &bob, iv.id, |_| true).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    assert!(DeleteLogic::apply(&pool, &alice, iv.id, |_| false).unwrap().is_none());
    assert!(pool.get_interval(iv.id).unwrap().is_some());

    let deleted = DeleteLogic::apply(&pool, &alice, iv.id, |_| true).unwrap();
    assert_eq!(deleted.map(|d| d.id), Some(iv.id));

    let err = DeleteLogic::apply(&pool, &alice, iv.id, |_| true).unwrap_err();
    assert!(matches!(err, AppError::IntervalNotFound(_)));
}

#[test]
fn mutations_are_audited() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    let alice = session(&pool, "alice");
    let iv = saved(
        AddLogic::apply(&pool, &cfg, &alice, &request("2025-03-10", "09:00", "17:00"), never_asked)
            .unwrap(),
    );
    DeleteLogic::apply(&pool, &alice, iv.id, |_| true).unwrap();

    let ops: Vec<String> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();

    assert!(ops.contains(&"add".to_string()));
    assert!(ops.contains(&"del".to_string()));
    assert!(ops.contains(&"employee_add".to_string()));
}

#[test]
fn only_the_first_admin_registers_freely() {
    let pool = team();

    let err = EmployeeLogic::register(&pool, None, "eve", "Eve", Role::Admin).unwrap_err();
    assert!(matches!(err, AppError::NoSession));

    let alice = session(&pool, "alice");
    let err = EmployeeLogic::register(&pool, Some(&alice), "eve", "Eve", Role::Admin).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    let boss = session(&pool, "boss");
    let eve = EmployeeLogic::register(&pool, Some(&boss), "eve", "Eve", Role::Admin).unwrap();
    assert!(eve.is_admin());

    let err = EmployeeLogic::register(&pool, None, "alice", "Again", Role::Employee).unwrap_err();
    assert!(matches!(err, AppError::EmployeeExists(_)));
}

#[test]
fn removing_an_employee_removes_their_shifts() {
    let pool = team();
    let cfg = config(OverlapPolicy::Warn);
    let bob = session(&pool, "bob");
    AddLogic::apply(&pool, &cfg, &bob, &request("2025-03-10", "09:00", "17:00"), never_asked).unwrap();
    ScheduleLogic::add(&pool, &bob, "bob", 1, "09:00", "17:00").unwrap();

    let err = EmployeeLogic::remove(&pool, &bob, "bob").unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    let boss = session(&pool, "boss");
    EmployeeLogic::remove(&pool, &boss, "bob").unwrap();

    assert!(all_intervals(&pool.conn).unwrap().is_empty());
    assert!(ScheduleLogic::list(&pool, Some("bob")).unwrap().is_empty());
    assert!(Session::open(&pool, "bob").is_err());
}

#[test]
fn schedules_validate_day_and_times() {
    let pool = team();
    let alice = session(&pool, "alice");

    for (weekday, start, end) in [(7, "09:00", "17:00"), (1, "9:00", "17:00"), (1, "09:00", "24:00")] {
        let err = ScheduleLogic::add(&pool, &alice, "alice", weekday, start, end).unwrap_err();
        assert!(matches!(err, AppError::InvalidSchedule(_)));
    }

    let s = ScheduleLogic::add(&pool, &alice, "alice", 0, "22:00", "06:00").unwrap();
    assert_eq!(s.day_name(), "Sunday");

    let s = ScheduleLogic::update(&pool, &alice, s.id, Some(6), None, Some("07:00")).unwrap();
    assert_eq!(s.day_of_week, 6);
    assert_eq!(s.start_time, "22:00");
    assert_eq!(s.end_time, "07:00");

    let bob = session(&pool, "bob");
    let err = ScheduleLogic::remove(&pool, &bob, s.id).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));

    ScheduleLogic::remove(&pool, &alice, s.id).unwrap();
    assert!(ScheduleLogic::list(&pool, None).unwrap().is_empty());
}
