mod value;
mod record;
mod dataset;

pub use value::Value;
pub use record::Record;
pub use dataset::Dataset;
