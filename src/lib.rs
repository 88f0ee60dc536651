// Prevent accidental debug output in library code; resolve tracing goes
// through the explicit stderr writer in `resolver`.
#![deny(clippy::print_stderr)]

//! Overload resolution for bridging a dynamic language to a statically typed
//! host.
//!
//! Given a method name, a set of raw host signatures, and a description of a
//! dynamic call site (positional + named + splatted arguments), the resolver
//! selects the single most applicable overload or reports a precise,
//! structured failure. Conversion questions, numeric preference, and the
//! call-site shape are all answered by an embedder-supplied
//! [`BindingPolicy`].

// Shared enums
pub mod narrowing;
pub mod preference;

// Raw signatures and the embedder capability surface
pub mod policy;
pub mod signature;

// Candidates and their construction
pub mod candidate;

// Call-site arguments and name binding
pub mod arguments;
pub mod binding;

// Outcomes and diagnostics
pub mod error;
pub mod target;

// The pipeline
pub mod resolver;

pub use arguments::{ActualArg, ActualArguments};
pub use binding::ArgumentBinding;
pub use candidate::{
    ArgBuilder, CandidateSet, MethodCandidate, ParameterMapping, ParameterWrapper, ReturnBuilder,
};
pub use error::{BindError, ConversionSummary};
pub use narrowing::NarrowingLevel;
pub use policy::{BindingPolicy, HostType, SplatSequence};
pub use preference::Preference;
pub use resolver::OverloadResolver;
pub use signature::{ByRefKind, MethodKind, MethodSignature, ParameterInfo, Visibility};
pub use target::{
    BindingTarget, CallFailure, CallFailureReason, ConversionResult, Restriction,
};
