//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Interval accounting
    // ---------------------------
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Shift overlaps {0} existing shift(s) of other employees")]
    OverlapRejected(usize),

    #[error("Shift #{0} not found")]
    IntervalNotFound(i64),

    // ---------------------------
    // Identity / authorization
    // ---------------------------
    #[error("No acting employee: pass --as <ID> or set default_user in the configuration")]
    NoSession,

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Invalid employee: {0}")]
    InvalidEmployee(String),

    #[error("Employee already exists: {0}")]
    EmployeeExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // ---------------------------
    // Default schedules
    // ---------------------------
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Schedule #{0} not found")]
    ScheduleNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
