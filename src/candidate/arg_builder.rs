//! Per-parameter consumption policies.
//!
//! Each formal parameter of a candidate is backed by one builder describing
//! how it consumes (or synthesizes) a slot of the normalized argument vector.
//! Builders carry a priority used in tie-breaking: lower priority means an
//! earlier conversion rule, which dominates later ones.

use crate::signature::ByRefKind;

/// How one formal parameter is filled when the candidate is invoked.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgBuilder<Ty> {
    /// Consumes one actual argument by value (or by reference, when the
    /// parameter is by-ref and the caller passes a reference cell).
    Simple { ty: Ty, by_ref: ByRefKind },
    /// Consumes the receiver slot of an instance call.
    Instance { ty: Ty },
    /// Consumes one actual argument as an element of an expanded variadic
    /// tail.
    ParamsElement { ty: Ty },
    /// Consumes one actual argument as the whole variadic array.
    ParamsArray { ty: Ty },
    /// Absorbs unmatched keyword arguments; only appears on the
    /// keyword-normalization dual candidates.
    ParamsDict { ty: Ty },
    /// Synthesizes a trailing optional parameter from its declared default.
    /// Consumes no actual argument.
    Default { info_index: usize },
    /// Consumes one actual argument by value and routes the updated value
    /// out through a named temp (by-ref-reduced `ref` parameter).
    Reference { ty: Ty, temp: String },
    /// Consumes no actual argument; the parameter's output is routed through
    /// a named temp (by-ref-reduced `out` parameter).
    Out { ty: Ty, temp: String },
}

impl<Ty> ArgBuilder<Ty> {
    /// Tie-breaking priority band. Lower wins.
    pub fn priority(&self) -> u32 {
        match self {
            ArgBuilder::Simple { .. } | ArgBuilder::Instance { .. } => 0,
            ArgBuilder::ParamsElement { .. } | ArgBuilder::ParamsArray { .. } => 1,
            ArgBuilder::Default { .. } => 2,
            ArgBuilder::ParamsDict { .. } => 3,
            ArgBuilder::Reference { .. } | ArgBuilder::Out { .. } => 5,
        }
    }

    /// True if this builder consumes a slot of the actual argument vector.
    pub fn consumes_argument(&self) -> bool {
        !matches!(self, ArgBuilder::Default { .. } | ArgBuilder::Out { .. })
    }
}

/// Largest priority not exceeding `bound` among `builders`; 0 when none
/// qualify. Drives the high-to-low band walk of the structural tie-breaker.
pub(crate) fn max_priority_not_exceeding<Ty>(
    builders: impl Iterator<Item = impl std::borrow::Borrow<ArgBuilder<Ty>>>,
    bound: u32,
) -> u32 {
    builders
        .map(|b| b.borrow().priority())
        .filter(|p| *p <= bound)
        .max()
        .unwrap_or(0)
}
