pub mod auto_apply;
pub mod cover_letter;
pub mod handlers;
pub mod matcher;
pub mod pipeline;
pub mod scoring;
