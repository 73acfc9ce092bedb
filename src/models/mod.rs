pub mod date_range;
pub mod employee;
pub mod interval;
pub mod schedule;
pub mod session;
