pub mod accountant;
pub mod add;
pub mod del;
pub mod edit;
pub mod employee;
pub mod log;
pub mod report;
pub mod schedule;
