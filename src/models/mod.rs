pub mod record;
pub mod status;

pub use record::{Record, RecordTable};
pub use status::ValidationStatus;
