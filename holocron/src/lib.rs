pub mod datasets;
pub mod mapping;
pub mod output;

pub use datasets::{load_dataset, parse_csv, parse_json};
pub use mapping::load_mapping;
pub use output::{to_pretty_json, write_json};
