pub mod stats;
pub mod validator;

pub use stats::{AggregateStatistics, Deviation, ErrorDetail};
pub use validator::{ParameterValidator, ValidatedRecord, ValidatedTable};
