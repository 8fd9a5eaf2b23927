pub mod constraint;
pub mod counter;
pub mod record;

pub use constraint::{CompareOp, CompareValue, Constraint, UnknownOperator, parse_timestamp};
pub use counter::ValueCounter;
pub use record::Record;
