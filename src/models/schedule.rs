use serde::Serialize;

/// Weekday labels, index = `day_of_week` (0 = Sunday).
pub const DAY_OF_WEEK_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Default working hours of an employee for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultSchedule {
    pub id: i64,
    pub employee_id: String,
    pub day_of_week: u8,    // 0..=6, Sunday first
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
    pub created_at: String,
}

impl DefaultSchedule {
    pub fn day_name(&self) -> &'static str {
        DAY_OF_WEEK_NAMES
            .get(self.day_of_week as usize)
            .copied()
            .unwrap_or("?")
    }
}
