pub mod calendar;
pub mod job;
pub mod resume;
