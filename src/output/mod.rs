//! Output module: console formatting, CSV reports and aggregate insights

pub mod formatter;
pub mod insights;
pub mod report;
