//! Headless survey logic shared by every platform shell.

pub mod aggregate;
pub mod brush;
pub mod coordinator;
pub mod dataset;
pub mod filters;
pub mod format;
pub mod platform;
pub mod sample;
pub mod source;
pub mod stats;
