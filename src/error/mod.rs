mod diagnostic;

pub use diagnostic::{BindError, ConversionSummary};

pub(crate) use diagnostic::{error_for_target, CallShape};
