pub mod calendar;
pub mod email;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod orchestrator;
pub mod request;
