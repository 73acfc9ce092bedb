use chrono::NaiveDate;
use shiftkeeper::errors::AppError;
use shiftkeeper::utils::colors::{GREEN, RESET, strip_ansi};
use shiftkeeper::utils::date::{parse_period, parse_weekday, weekday_index};
use shiftkeeper::utils::formatting::{hours, mins2readable, percent};
use shiftkeeper::utils::table::Table;
use shiftkeeper::utils::time::{is_hhmm, parse_time};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn periods_expand_to_inclusive_ranges() {
    let r = parse_period("2025").unwrap();
    assert_eq!((r.from, r.to), (day("2025-01-01"), day("2025-12-31")));

    let r = parse_period("2024-02").unwrap();
    assert_eq!((r.from, r.to), (day("2024-02-01"), day("2024-02-29")));

    let r = parse_period("2025-03-10").unwrap();
    assert_eq!((r.from, r.to), (day("2025-03-10"), day("2025-03-10")));

    let r = parse_period("2025-01:2025-03").unwrap();
    assert_eq!((r.from, r.to), (day("2025-01-01"), day("2025-03-31")));
}

#[test]
fn bad_periods_are_rejected() {
    for p in ["25", "2025-13", "2025-03:2025-03-10", "2025-03-10:2025-03-01", "march"] {
        assert!(
            matches!(parse_period(p), Err(AppError::InvalidDate(_))),
            "{p} should be rejected"
        );
    }
}

#[test]
fn weekdays_by_number_or_name() {
    assert_eq!(parse_weekday("0").unwrap(), 0);
    assert_eq!(parse_weekday("mon").unwrap(), 1);
    assert_eq!(parse_weekday("Saturday").unwrap(), 6);
    assert!(matches!(parse_weekday("7"), Err(AppError::InvalidSchedule(_))));
    assert!(matches!(parse_weekday("someday"), Err(AppError::InvalidSchedule(_))));

    assert_eq!(weekday_index(day("2025-03-09")), 0);
    assert_eq!(weekday_index(day("2025-03-10")), 1);
}

#[test]
fn time_parsing() {
    assert!(is_hhmm("00:00"));
    assert!(is_hhmm("23:59"));
    assert!(!is_hhmm("24:00"));
    assert!(!is_hhmm("7:30"));

    assert_eq!(parse_time("07:30").unwrap().to_string(), "07:30:00");
    assert_eq!(parse_time("07:30:15").unwrap().to_string(), "07:30:15");
    assert!(parse_time("7h30").is_none());
}

#[test]
fn number_formatting() {
    assert_eq!(hours(8.0), "8.0");
    assert_eq!(hours(10.54), "10.5");
    assert_eq!(percent(41.66), "41.7%");
    assert_eq!(mins2readable(120), "02h 00m");
    assert_eq!(mins2readable(-75), "-01h 15m");
}

#[test]
fn table_ignores_colour_codes_when_sizing() {
    let mut t = Table::new(["ID", "NAME"]);
    t.add_row(vec!["1".into(), format!("{GREEN}alice{RESET}")]);
    t.add_row(vec!["22".into(), "bob".into()]);

    let out = t.render("=");
    let lines: Vec<String> = out.lines().map(strip_ansi).collect();

    assert_eq!(lines[0], "ID  NAME");
    assert_eq!(lines[1], "=========");
    assert_eq!(lines[2], "1   alice");
    assert_eq!(lines[3], "22  bob");
}
