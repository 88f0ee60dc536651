//! Resolution outcomes.

use crate::binding::ArgumentBinding;
use crate::candidate::MethodCandidate;
use crate::narrowing::NarrowingLevel;

/// A runtime type guard attached to a successful binding. The caching layer
/// may reuse the binding only while every restricted argument still carries
/// the recorded type.
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction<Ty> {
    pub arg_index: usize,
    /// Observed runtime type the argument is restricted to.
    pub ty: Ty,
    /// False when the restricted parameter is the universal top type: the
    /// guard is identity-only and must not coerce (box/unbox) the value.
    pub coerce_value: bool,
}

/// One conversion probe, recorded for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult<Ty> {
    pub arg_index: usize,
    pub from: Ty,
    pub to: Ty,
    pub failed: bool,
}

/// Why one candidate rejected the call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallFailureReason<Ty> {
    /// At least one argument had no conversion; carries every probe of the
    /// failing pass.
    ConversionFailure(Vec<ConversionResult<Ty>>),
    DuplicateKeyword(String),
    UnassignableKeyword(String),
}

/// A per-candidate failure record.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFailure<Ty> {
    /// Rendered candidate signature.
    pub method: String,
    pub reason: CallFailureReason<Ty>,
}

/// The single outcome of a resolution.
#[derive(Debug, Clone)]
pub enum BindingTarget<Ty> {
    /// A unique best candidate was found.
    Success {
        candidate: MethodCandidate<Ty>,
        binding: ArgumentBinding,
        /// Level at which the candidate became applicable; no candidate is
        /// applicable at any stricter level.
        narrowing_level: NarrowingLevel,
        restrictions: Vec<Restriction<Ty>>,
        /// Temps allocated for by-ref routing, for downstream emission.
        temps: Vec<String>,
    },
    /// Candidates of the right arity existed, but none accepted the
    /// arguments at any probed level.
    CallFailure { failures: Vec<CallFailure<Ty>> },
    /// Two or more applicable candidates were pairwise incomparable.
    AmbiguousMatch { candidates: Vec<MethodCandidate<Ty>> },
    /// No candidate (and no variadic specialization) matches the argument
    /// count. `variadic` marks an "or more" upper bound.
    IncorrectArgumentCount {
        expected_arities: Vec<usize>,
        variadic: bool,
        actual: usize,
    },
    /// The call shape itself was rejected before any candidate was seen.
    InvalidArguments,
}

impl<Ty> BindingTarget<Ty> {
    pub fn is_success(&self) -> bool {
        matches!(self, BindingTarget::Success { .. })
    }

    /// The chosen candidate, if any.
    pub fn candidate(&self) -> Option<&MethodCandidate<Ty>> {
        match self {
            BindingTarget::Success { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}
