/// Analysis modules: classification and in-scan aggregation.
pub mod aggregator;
pub mod file_types;
pub mod top_files;

pub use aggregator::ScanAggregator;
pub use file_types::{
    categorise_extension, classify, Category, CategoryFilter, ParseCategoryError,
};
pub use top_files::TopFiles;
