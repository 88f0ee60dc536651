//! The overload resolution pipeline.
//!
//! A resolver runs five stages over one call site: candidate construction,
//! argument normalization, candidate-set selection, name binding, and
//! applicability filtering with preference selection. Each stage feeds the
//! next; the whole computation is synchronous and bounded by
//! candidates x arguments x narrowing levels.
//!
//! ## Debug Logging
//!
//! Set `HOSTBIND_RESOLVE_DEBUG=1` to trace candidate survival and selection
//! in debug builds.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod select;

use std::collections::BTreeMap;

use crate::arguments::ActualArguments;
use crate::binding::{bind_names, NameFailure};
use crate::candidate::{ArgBuilder, CandidateSet, MethodCandidate, ParameterMapping};
use crate::error::{error_for_target, BindError, CallShape};
use crate::narrowing::NarrowingLevel;
use crate::policy::BindingPolicy;
use crate::target::{
    BindingTarget, CallFailure, CallFailureReason, ConversionResult, Restriction,
};
use select::{select_best, ApplicableCandidate};

/// Check if resolve tracing is enabled via `HOSTBIND_RESOLVE_DEBUG`.
/// Only available in debug builds to avoid overhead on release dispatch.
#[cfg(debug_assertions)]
fn resolve_debug_enabled() -> bool {
    use once_cell::sync::Lazy;
    static ENABLED: Lazy<bool> = Lazy::new(|| std::env::var("HOSTBIND_RESOLVE_DEBUG").is_ok());
    *ENABLED
}

/// Emit resolve traces in debug builds without relying on `eprintln!`.
#[cfg(debug_assertions)]
fn resolve_debug_log(args: std::fmt::Arguments<'_>) {
    use std::io::Write;
    let _ = writeln!(std::io::stderr(), "{args}");
}

macro_rules! resolve_trace {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        {
            if resolve_debug_enabled() {
                resolve_debug_log(format_args!($($arg)*));
            }
        }
    }};
}

/// Single-use resolver for one call site.
///
/// The resolver owns its candidate sets, the normalized arguments, and every
/// interior candidate for the duration of one [`resolve_overload`] call; a
/// second call panics. Successful targets carry owned clones of whatever
/// the embedder needs, so the resolver can be dropped immediately after.
///
/// [`resolve_overload`]: OverloadResolver::resolve_overload
pub struct OverloadResolver<'a, P: BindingPolicy> {
    policy: &'a P,
    method_name: String,
    arg_names: Vec<String>,
    candidate_sets: BTreeMap<usize, CandidateSet<P::Ty>>,
    params_candidates: Vec<MethodCandidate<P::Ty>>,
    actual_args: Option<ActualArguments<P::Ty>>,
    default_param_count: usize,
    resolved: bool,
}

impl<'a, P: BindingPolicy> OverloadResolver<'a, P> {
    pub fn new(policy: &'a P) -> Self {
        Self {
            policy,
            method_name: String::new(),
            arg_names: Vec::new(),
            candidate_sets: BTreeMap::new(),
            params_candidates: Vec::new(),
            actual_args: None,
            default_param_count: 0,
            resolved: false,
        }
    }

    /// Resolve `method_name` against `signatures` for this resolver's call
    /// site, probing narrowing levels from `min_level` to `max_level`.
    ///
    /// # Panics
    ///
    /// Panics on programmer errors: `min_level > max_level`, an empty
    /// signature slice, or reuse of an already-consumed resolver.
    pub fn resolve_overload(
        &mut self,
        method_name: &str,
        signatures: &[crate::signature::MethodSignature<P::Ty>],
        min_level: NarrowingLevel,
        max_level: NarrowingLevel,
    ) -> BindingTarget<P::Ty> {
        assert!(
            min_level <= max_level,
            "min_level must not exceed max_level"
        );
        assert!(
            !signatures.is_empty(),
            "resolve_overload requires at least one signature"
        );
        assert!(
            !self.resolved,
            "overload resolver is single-use; create a new resolver per call site"
        );
        self.resolved = true;
        self.method_name = method_name.to_string();

        // Stage 1: candidate construction, bucketed by effective arity.
        let (named, names) = self.policy.get_named_arguments();
        self.arg_names = names.clone();
        self.build_candidate_sets(signatures);

        // Stage 2: argument normalization with splat limits.
        let (pre_splat, post_splat) = self.splat_limits();
        let Some(actual) = self
            .policy
            .create_actual_arguments(named, names, pre_splat, post_splat)
        else {
            return BindingTarget::InvalidArguments;
        };
        self.actual_args = Some(actual);
        let Some(actual) = self.actual_args.as_ref() else {
            unreachable!("actual arguments stored above");
        };

        // Stage 3: candidate-set selection by arity.
        let set = match self.select_candidate_set(actual) {
            Ok(set) => set,
            Err(target) => return target,
        };
        resolve_trace!(
            "hostbind: {}: arity {} set with {} candidate(s), {} collapsed",
            self.method_name,
            set.arity(),
            set.len(),
            actual.collapsed_count()
        );

        // Stage 4: name binding, per candidate.
        let mut bound: Vec<ApplicableCandidate<'_, P::Ty>> = Vec::new();
        let mut name_failures: Vec<CallFailure<P::Ty>> = Vec::new();
        for candidate in set.candidates() {
            if candidate.has_params_dictionary() {
                continue;
            }
            match bind_names(candidate, actual) {
                Ok(binding) => bound.push(ApplicableCandidate { candidate, binding }),
                Err(failure) => {
                    let reason = match failure {
                        NameFailure::Duplicate(name) => CallFailureReason::DuplicateKeyword(name),
                        NameFailure::Unassignable(name) => {
                            CallFailureReason::UnassignableKeyword(name)
                        }
                    };
                    name_failures.push(CallFailure {
                        method: candidate.to_string(),
                        reason,
                    });
                }
            }
        }
        if bound.is_empty() {
            return BindingTarget::CallFailure {
                failures: name_failures,
            };
        }

        // Stage 5: applicability per narrowing level, then preference.
        let mut last_failures: Vec<CallFailure<P::Ty>> = Vec::new();
        for level in NarrowingLevel::range(min_level, max_level) {
            let mut applicable: Vec<usize> = Vec::new();
            let mut failures: Vec<CallFailure<P::Ty>> = Vec::new();
            for (index, candidate) in bound.iter().enumerate() {
                match self.applicability(candidate, actual, level) {
                    Ok(()) => applicable.push(index),
                    Err(results) => failures.push(CallFailure {
                        method: candidate.candidate.to_string(),
                        reason: CallFailureReason::ConversionFailure(results),
                    }),
                }
            }
            resolve_trace!(
                "hostbind: {}: {} of {} candidate(s) applicable at {:?}",
                self.method_name,
                applicable.len(),
                bound.len(),
                level
            );
            if applicable.is_empty() {
                last_failures = failures;
                continue;
            }

            let winner = if applicable.len() == 1 {
                Some(applicable[0])
            } else {
                select_best(self.policy, actual, &bound, &applicable, level)
            };
            return match winner {
                Some(index) => {
                    resolve_trace!(
                        "hostbind: {}: selected {} at {:?}",
                        self.method_name,
                        bound[index].candidate,
                        level
                    );
                    self.make_success(&bound, &applicable, index, actual, level)
                }
                // Broader levels only admit more candidates; a tie at this
                // level stays a tie, so report it here.
                None => BindingTarget::AmbiguousMatch {
                    candidates: applicable
                        .iter()
                        .map(|&i| bound[i].candidate.clone())
                        .collect(),
                },
            };
        }

        let mut failures = last_failures;
        failures.extend(name_failures);
        BindingTarget::CallFailure { failures }
    }

    /// The normalized arguments. Valid only after stage 2 has run.
    ///
    /// # Panics
    ///
    /// Panics when called before [`resolve_overload`] normalized the call.
    ///
    /// [`resolve_overload`]: OverloadResolver::resolve_overload
    pub fn actual_arguments(&self) -> &ActualArguments<P::Ty> {
        match self.actual_args.as_ref() {
            Some(actual) => actual,
            None => panic!("actual arguments are only available after resolution has normalized the call"),
        }
    }

    /// Convert a non-success target into a structured, renderable error.
    pub fn make_invalid_parameters_error(&self, target: &BindingTarget<P::Ty>) -> BindError {
        let shape = CallShape {
            method: &self.method_name,
            has_arg_list: self.policy.splat().is_some(),
            has_kwargs: !self.arg_names.is_empty(),
            default_count: self.default_param_count,
        };
        error_for_target(&shape, target)
    }

    // ---- stage 1 ----

    fn build_candidate_sets(&mut self, signatures: &[crate::signature::MethodSignature<P::Ty>]) {
        let policy = self.policy;
        let mut temp_counter = 0usize;
        for signature in signatures {
            // C-variadic and open-generic signatures cannot be bound.
            if signature.is_unbindable() {
                continue;
            }
            let mut mapping = ParameterMapping::new(signature.clone(), &self.arg_names);
            let consumed = policy.map_special_parameters(&mut mapping);
            mapping.map_remaining(consumed, |ty| policy.element_type(ty));

            let defaults = signature.params.iter().filter(|p| p.has_default).count();
            self.default_param_count = self.default_param_count.max(defaults);

            let allow_keywords = policy.allow_keyword_argument_setting(signature);
            for candidate in
                mapping.into_candidates(&mut temp_counter, allow_keywords, policy.universal_type())
            {
                if candidate.has_params_array() && candidate.params_element().is_some() {
                    self.params_candidates.push(candidate.clone());
                }
                let arity = candidate.parameter_count();
                self.candidate_sets
                    .entry(arity)
                    .or_insert_with(|| CandidateSet::new(arity))
                    .push(candidate);
            }
        }

        // Specialize every variadic candidate into each existing bucket.
        let arities: Vec<usize> = self.candidate_sets.keys().copied().collect();
        for arity in arities {
            for params_candidate in &self.params_candidates {
                if let Some(extended) =
                    params_candidate.make_params_extended(arity, &self.arg_names)
                {
                    if let Some(set) = self.candidate_sets.get_mut(&arity) {
                        set.push(extended);
                    }
                }
            }
        }
    }

    // ---- stage 2 ----

    /// Expansion limits for the splatted sequence.
    ///
    /// The `1 +` below is load-bearing: at least one expanded element must
    /// precede the collapse point so collapsed-tail convertibility can be
    /// probed against a concrete params-array slot.
    fn splat_limits(&self) -> (Option<usize>, Option<usize>) {
        let mut max_params_index = None;
        let mut post = 0usize;
        for candidate in &self.params_candidates {
            let Some(index) = candidate.params_array_index() else {
                continue;
            };
            max_params_index = Some(max_params_index.map_or(index, |m: usize| m.max(index)));
            post = post.max(candidate.parameter_count() - index - 1);
        }
        let Some(max_params_index) = max_params_index else {
            return (None, None);
        };
        let mut pre = 1 + max_params_index;
        let max_arity = self.candidate_sets.keys().max().copied().unwrap_or(0);
        if pre + post < max_arity {
            pre = max_arity - post;
        }
        (Some(pre), Some(post))
    }

    // ---- stage 3 ----

    fn select_candidate_set(
        &self,
        actual: &ActualArguments<P::Ty>,
    ) -> Result<CandidateSet<P::Ty>, BindingTarget<P::Ty>> {
        let count = actual.count();
        if actual.collapsed_count() == 0 {
            if let Some(set) = self.candidate_sets.get(&count) {
                if !set.only_params_dictionaries() {
                    return Ok(set.clone());
                }
            }
        }
        if !self.params_candidates.is_empty() {
            let mut fresh = CandidateSet::new(count);
            for params_candidate in &self.params_candidates {
                if let Some(extended) = params_candidate.make_params_extended(count, &self.arg_names)
                {
                    fresh.push(extended);
                }
            }
            if !fresh.is_empty() {
                return Ok(fresh);
            }
        }
        Err(self.incorrect_argument_count(actual))
    }

    fn incorrect_argument_count(&self, actual: &ActualArguments<P::Ty>) -> BindingTarget<P::Ty> {
        let expected_arities: Vec<usize> = self
            .candidate_sets
            .iter()
            .filter(|(_, set)| !set.only_params_dictionaries())
            .map(|(arity, _)| *arity)
            .collect();
        BindingTarget::IncorrectArgumentCount {
            expected_arities,
            variadic: !self.params_candidates.is_empty(),
            actual: actual.count(),
        }
    }

    // ---- stage 5 ----

    /// Probe every argument of `candidate` at `level`; on failure return the
    /// full probe record for diagnostics.
    fn applicability(
        &self,
        candidate: &ApplicableCandidate<'_, P::Ty>,
        actual: &ActualArguments<P::Ty>,
        level: NarrowingLevel,
    ) -> Result<(), Vec<ConversionResult<P::Ty>>> {
        let mut results = Vec::with_capacity(actual.count());
        let mut ok = true;
        for i in 0..actual.count() {
            let param = candidate.parameter(i);
            let from = &actual.arg(i).limit_type;
            let converts = self.policy.can_convert_from(from, param, level);
            ok &= converts;
            results.push(ConversionResult {
                arg_index: i,
                from: from.clone(),
                to: param.ty.clone(),
                failed: !converts,
            });
        }

        // Collapsed tail: every unexpanded splat element must convert to the
        // params-array slot just before the collapse point.
        if ok && actual.collapsed_count() > 0 {
            if let (Some(splat_index), Some(sequence)) =
                (actual.splat_index(), self.policy.splat())
            {
                let Some(slot) = splat_index.checked_sub(1) else {
                    debug_assert!(false, "pre-splat limit guarantees an expanded element");
                    return Err(results);
                };
                let param = candidate.parameter(slot);
                for ordinal in 0..actual.collapsed_count() {
                    let item = sequence.item(actual.to_splatted_item_index(ordinal));
                    if !self.policy.can_convert_from(&item.limit_type, param, level) {
                        results.push(ConversionResult {
                            arg_index: splat_index,
                            from: item.limit_type,
                            to: param.ty.clone(),
                            failed: true,
                        });
                        ok = false;
                        break;
                    }
                }
            }
        }

        if ok {
            Ok(())
        } else {
            Err(results)
        }
    }

    fn make_success(
        &self,
        bound: &[ApplicableCandidate<'_, P::Ty>],
        applicable: &[usize],
        winner: usize,
        actual: &ActualArguments<P::Ty>,
        level: NarrowingLevel,
    ) -> BindingTarget<P::Ty> {
        let best = &bound[winner];
        let count = actual.count();
        let universal = self.policy.universal_type();

        let mut restrictions = Vec::new();
        for i in 0..count {
            let param = best.parameter(i);
            let selected_ty = self.effective_type(param);
            let overloaded = applicable.iter().any(|&j| {
                let sibling = bound[j].parameter(i);
                // An applicable candidate consuming the whole array at this
                // position (the selected one included) makes the shape
                // runtime-type dependent.
                if sibling.is_params_array && bound[j].candidate.parameter_count() == count {
                    return true;
                }
                j != winner && self.effective_type(sibling) != selected_ty
            });
            let arg = actual.arg(i);
            if overloaded || !self.policy.is_assignable_from(&param.ty, &arg.expression_type) {
                restrictions.push(Restriction {
                    arg_index: i,
                    ty: arg.limit_type.clone(),
                    // Guards on the top type are identity-only; no coercion.
                    coerce_value: param.ty != universal,
                });
            }
        }

        let temps: Vec<String> = best
            .candidate
            .all_builders()
            .filter_map(|builder| match builder {
                ArgBuilder::Reference { temp, .. } | ArgBuilder::Out { temp, .. } => {
                    Some(temp.clone())
                }
                _ => None,
            })
            .collect();

        BindingTarget::Success {
            candidate: best.candidate.clone(),
            binding: best.binding.clone(),
            narrowing_level: level,
            restrictions,
            temps,
        }
    }

    fn effective_type(&self, param: &crate::candidate::ParameterWrapper<P::Ty>) -> P::Ty {
        if param.is_params_array {
            self.policy
                .element_type(&param.ty)
                .unwrap_or_else(|| param.ty.clone())
        } else {
            param.ty.clone()
        }
    }
}
