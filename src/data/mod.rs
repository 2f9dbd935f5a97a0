/// Typed tables and index-based row views
pub mod dataset;
/// Loading tables from delimited files
pub mod reader;
