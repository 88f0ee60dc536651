//! Preference selection among applicable candidates.

use crate::arguments::ActualArguments;
use crate::binding::ArgumentBinding;
use crate::candidate::{max_priority_not_exceeding, MethodCandidate, ParameterWrapper};
use crate::narrowing::NarrowingLevel;
use crate::policy::BindingPolicy;
use crate::preference::{aggregate_votes, Preference};
use crate::signature::Visibility;

/// A candidate that survived name binding, paired with its argument
/// permutation.
pub(crate) struct ApplicableCandidate<'c, Ty> {
    pub candidate: &'c MethodCandidate<Ty>,
    pub binding: ArgumentBinding,
}

impl<Ty> ApplicableCandidate<'_, Ty> {
    /// The parameter slot consumed by the argument at `arg_index`.
    pub fn parameter(&self, arg_index: usize) -> &ParameterWrapper<Ty> {
        self.candidate
            .parameter(self.binding.parameter_index(arg_index))
    }
}

/// Find the unique candidate preferred over every other one, if any.
///
/// `subset` holds indices into `bound` of the candidates applicable at the
/// current level. Returns an index into `bound`.
pub(crate) fn select_best<P: BindingPolicy>(
    policy: &P,
    actual: &ActualArguments<P::Ty>,
    bound: &[ApplicableCandidate<'_, P::Ty>],
    subset: &[usize],
    level: NarrowingLevel,
) -> Option<usize> {
    'candidates: for &i in subset {
        for &j in subset {
            if i == j {
                continue;
            }
            if preferred_candidate(policy, actual, &bound[i], &bound[j], level) != Preference::One {
                continue 'candidates;
            }
        }
        return Some(i);
    }
    None
}

/// Pairwise comparison: per-argument parameter preference first, structural
/// tie-breakers only when the parameters came out equivalent.
pub(crate) fn preferred_candidate<P: BindingPolicy>(
    policy: &P,
    actual: &ActualArguments<P::Ty>,
    one: &ApplicableCandidate<'_, P::Ty>,
    two: &ApplicableCandidate<'_, P::Ty>,
    level: NarrowingLevel,
) -> Preference {
    match preferred_parameters(policy, actual, one, two, level) {
        Preference::Equivalent => compare_equivalent_candidates(one, two),
        verdict => verdict,
    }
}

fn preferred_parameters<P: BindingPolicy>(
    policy: &P,
    actual: &ActualArguments<P::Ty>,
    one: &ApplicableCandidate<'_, P::Ty>,
    two: &ApplicableCandidate<'_, P::Ty>,
    level: NarrowingLevel,
) -> Preference {
    aggregate_votes((0..actual.count()).map(|i| {
        preferred_parameter(
            policy,
            &actual.arg(i).limit_type,
            one.parameter(i),
            two.parameter(i),
            level,
        )
    }))
}

fn preferred_parameter<P: BindingPolicy>(
    policy: &P,
    actual_ty: &P::Ty,
    p1: &ParameterWrapper<P::Ty>,
    p2: &ParameterWrapper<P::Ty>,
    level: NarrowingLevel,
) -> Preference {
    if policy.parameters_equivalent(p1, p2) {
        return Preference::Equivalent;
    }

    for probe_level in NarrowingLevel::range(NarrowingLevel::None, level) {
        let verdict = policy.select_best_conversion_for(actual_ty, p1, p2, probe_level);
        if verdict != Preference::Equivalent {
            return verdict;
        }
    }

    if p1.ty == p2.ty {
        return Preference::Equivalent;
    }

    // Assignability without narrowing: the type assignable into the other is
    // the narrower one and wins.
    let one_into_two = policy.is_assignable_from(&p2.ty, &p1.ty);
    let two_into_one = policy.is_assignable_from(&p1.ty, &p2.ty);
    if one_into_two && !two_into_one {
        return Preference::One;
    }
    if two_into_one && !one_into_two {
        return Preference::Two;
    }

    // Host numeric ordering, applied symmetrically so the final verdict is
    // antisymmetric.
    let verdict = policy.prefer_convert(&p1.ty, &p2.ty);
    if verdict.chosen() {
        return verdict;
    }
    let verdict = policy.prefer_convert(&p2.ty, &p1.ty).other();
    if verdict.chosen() {
        return verdict;
    }
    Preference::Equivalent
}

/// Structural tie-breakers for parameter-equivalent candidates.
fn compare_equivalent_candidates<Ty>(
    one: &ApplicableCandidate<'_, Ty>,
    two: &ApplicableCandidate<'_, Ty>,
) -> Preference {
    // Non-private beats private (explicit-interface-implementation
    // demotion).
    let vis1 = one.candidate.signature().visibility;
    let vis2 = two.candidate.signature().visibility;
    if vis1 != vis2 {
        return if vis1 == Visibility::Public {
            Preference::One
        } else {
            Preference::Two
        };
    }

    // Non-generic beats generic; generic-vs-generic stays equivalent.
    match (one.candidate.is_generic(), two.candidate.is_generic()) {
        (false, true) => return Preference::One,
        (true, false) => return Preference::Two,
        _ => {}
    }

    // Fewer out-parameters.
    let outs1 = one.candidate.return_builder().count_out_params();
    let outs2 = two.candidate.return_builder().count_out_params();
    if outs1 != outs2 {
        return if outs1 < outs2 {
            Preference::One
        } else {
            Preference::Two
        };
    }

    // Builder-priority band walk, high to low: the side whose worst builder
    // within the band uses an earlier conversion rule wins.
    let mut bound = u32::MAX;
    loop {
        let max1 = max_priority_not_exceeding(one.candidate.all_builders(), bound);
        let max2 = max_priority_not_exceeding(two.candidate.all_builders(), bound);
        if max1 < max2 {
            return Preference::One;
        }
        if max2 < max1 {
            return Preference::Two;
        }
        if max1 == 0 {
            return Preference::Equivalent;
        }
        bound = max1 - 1;
    }
}
