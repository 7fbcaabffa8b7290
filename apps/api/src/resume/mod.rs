pub mod classifier;
pub mod extractors;
pub mod handlers;
pub mod parser;
pub mod source;
