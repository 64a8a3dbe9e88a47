pub mod catalog;
pub mod normalize;

pub use catalog::{AnalyteCatalog, AnalyteDef};
pub use normalize::{AliasTable, clean_name};
