//! Mapping argument names onto candidate parameter slots.

use crate::arguments::ActualArguments;
use crate::candidate::MethodCandidate;

/// A permutation from flat argument positions to parameter slots of one
/// candidate. Identity when the call has no named arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentBinding {
    to_parameter: Vec<usize>,
}

impl ArgumentBinding {
    pub fn identity(count: usize) -> Self {
        Self {
            to_parameter: (0..count).collect(),
        }
    }

    /// Parameter slot consumed by the argument at `arg_index`.
    pub fn parameter_index(&self, arg_index: usize) -> usize {
        self.to_parameter[arg_index]
    }

    pub fn len(&self) -> usize {
        self.to_parameter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_parameter.is_empty()
    }
}

/// Why one candidate rejected the call's argument names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameFailure {
    /// The keyword also binds a positionally-filled (or already bound) slot.
    Duplicate(String),
    /// No parameter slot answers to the keyword.
    Unassignable(String),
}

/// Bind the call's argument names to `candidate`'s parameter slots.
///
/// Positional arguments fill the leading slots in order; each keyword must
/// name a distinct trailing slot. The candidate's arity is guaranteed to
/// match the argument count by candidate-set selection, so a successful
/// binding covers every slot.
pub(crate) fn bind_names<Ty: Clone>(
    candidate: &MethodCandidate<Ty>,
    actual: &ActualArguments<Ty>,
) -> Result<ArgumentBinding, NameFailure> {
    debug_assert_eq!(candidate.parameter_count(), actual.count());
    if actual.named_count() == 0 {
        return Ok(ArgumentBinding::identity(actual.count()));
    }

    let positional = actual.positional_count();
    let mut to_parameter: Vec<usize> = (0..actual.count()).collect();
    let mut keyword_bound = vec![false; candidate.parameter_count()];
    for (j, name) in actual.names().iter().enumerate() {
        let Some(slot) = candidate
            .parameters()
            .iter()
            .position(|w| w.name.as_deref() == Some(name.as_str()))
        else {
            return Err(NameFailure::Unassignable(name.clone()));
        };
        if slot < positional || keyword_bound[slot] {
            return Err(NameFailure::Duplicate(name.clone()));
        }
        keyword_bound[slot] = true;
        to_parameter[positional + j] = slot;
    }
    debug_assert!({
        let mut seen = vec![false; to_parameter.len()];
        to_parameter.iter().for_each(|&p| seen[p] = true);
        seen.into_iter().all(|s| s)
    });

    Ok(ArgumentBinding { to_parameter })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ActualArg;
    use crate::candidate::ParameterMapping;
    use crate::signature::{MethodKind, MethodSignature, ParameterInfo};

    type Ty = &'static str;

    fn candidate_for(names: &[&str]) -> MethodCandidate<Ty> {
        let params = names
            .iter()
            .map(|n| ParameterInfo::new(*n, "int"))
            .collect();
        let sig = MethodSignature::new("f", MethodKind::Static, params);
        let mut mapping = ParameterMapping::new(sig, &[]);
        mapping.map_remaining(0, |_| None);
        let mut temps = 0;
        mapping.into_candidates(&mut temps, false, "object").remove(0)
    }

    fn args(positional: usize, names: &[&str]) -> ActualArguments<Ty> {
        ActualArguments::new(
            vec![ActualArg::of("int"); positional],
            vec![ActualArg::of("int"); names.len()],
            names.iter().map(|n| n.to_string()).collect(),
            None,
            0,
            0,
            0,
        )
    }

    #[test]
    fn test_identity_without_names() {
        let binding = bind_names(&candidate_for(&["a", "b"]), &args(2, &[])).unwrap();
        assert_eq!(binding.parameter_index(0), 0);
        assert_eq!(binding.parameter_index(1), 1);
    }

    #[test]
    fn test_keywords_permute_to_their_slots() {
        // f(a, b, c) called as f(1, c: 3, b: 2)
        let binding = bind_names(&candidate_for(&["a", "b", "c"]), &args(1, &["c", "b"])).unwrap();
        assert_eq!(binding.parameter_index(0), 0);
        assert_eq!(binding.parameter_index(1), 2);
        assert_eq!(binding.parameter_index(2), 1);
    }

    #[test]
    fn test_unassignable_keyword() {
        let err = bind_names(&candidate_for(&["y"]), &args(0, &["x"])).unwrap_err();
        assert_eq!(err, NameFailure::Unassignable("x".to_string()));
    }

    #[test]
    fn test_keyword_collides_with_positional() {
        // f(a, b) called as f(1, a: 2)
        let err = bind_names(&candidate_for(&["a", "b"]), &args(1, &["a"])).unwrap_err();
        assert_eq!(err, NameFailure::Duplicate("a".to_string()));
    }
}
