pub mod access_record;

pub use access_record::{AccessRecord, Protocol};
