use crate::core::accountant;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A stored shift.
///
/// `duration_hours` mirrors the `intervals.total_hours` column but is always
/// recomputed from (`start`, `end`) when a row is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub id: i64,                // ⇔ intervals.id
    pub owner_id: String,       // ⇔ intervals.employee_id
    pub start: NaiveDateTime,   // ⇔ intervals.start_date + start_time
    pub end: NaiveDateTime,     // ⇔ intervals.end_date + end_time
    pub duration_hours: f64,    // ⇔ intervals.total_hours
    pub notes: String,          // ⇔ intervals.notes (TEXT, default '')
    pub created_at: String,     // ⇔ intervals.created_at (ISO8601)
}

impl Interval {
    pub fn crosses_day(&self) -> bool {
        accountant::classify_crosses_day(self.start, self.end)
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Raw user input for a shift, before validation.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub owner_id: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl Candidate {
    pub fn new(owner_id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            owner_id: Some(owner_id.to_string()),
            start: Some(start),
            end: Some(end),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// A validated candidate, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInterval {
    pub owner_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub notes: String,
    pub duration_hours: f64,
}

impl NewInterval {
    pub fn crosses_day(&self) -> bool {
        accountant::classify_crosses_day(self.start, self.end)
    }
}

/// Fields replaced by an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct IntervalPatch {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl From<&NewInterval> for IntervalPatch {
    fn from(n: &NewInterval) -> Self {
        Self {
            start: Some(n.start),
            end: Some(n.end),
            notes: Some(n.notes.clone()),
        }
    }
}

/// An existing shift of another employee overlapping a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub other: Interval,
    pub overlap_minutes: i64,
}
