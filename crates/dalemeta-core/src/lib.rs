pub mod appliances;
pub mod building;
pub mod catalog;
pub mod emit;
pub mod error;
pub mod meters;
pub mod pipeline;
pub mod rules;
pub mod types;

pub use catalog::Catalog;
pub use error::{MetadataError, Result};
pub use pipeline::ConvertSummary;
