pub mod errors;
pub mod labels;
pub mod logs;

pub use errors::ParserError;
pub use labels::LabelTable;
pub use logs::{read_log_bounds, DataSource, FsDataSource, LogBounds};

#[cfg(test)]
mod tests;
