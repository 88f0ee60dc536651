//! A callable specialized to one effective arity.

use std::fmt;
use std::sync::Arc;

use crate::candidate::arg_builder::ArgBuilder;
use crate::candidate::parameter::ParameterWrapper;
use crate::candidate::return_builder::ReturnBuilder;
use crate::signature::MethodSignature;

/// One bindable shape of a raw signature.
///
/// A signature can yield several candidates: the base form, one per
/// trailing-optional suffix, a by-ref-reduced form, and on-demand
/// specializations of a variadic tail. Each candidate exposes exactly
/// `parameter_count()` argument-consuming slots; builders that synthesize
/// values without consuming a slot (defaults, hoisted outs) live in
/// `extra_builders`.
#[derive(Debug, Clone)]
pub struct MethodCandidate<Ty> {
    signature: Arc<MethodSignature<Ty>>,
    parameters: Vec<ParameterWrapper<Ty>>,
    arg_builders: Vec<ArgBuilder<Ty>>,
    extra_builders: Vec<ArgBuilder<Ty>>,
    return_builder: ReturnBuilder<Ty>,
    /// Element type of the variadic tail, when the candidate still carries
    /// an unexpanded params-array slot.
    params_element: Option<Ty>,
}

impl<Ty> MethodCandidate<Ty> {
    pub(crate) fn new(
        signature: Arc<MethodSignature<Ty>>,
        parameters: Vec<ParameterWrapper<Ty>>,
        arg_builders: Vec<ArgBuilder<Ty>>,
        extra_builders: Vec<ArgBuilder<Ty>>,
        return_builder: ReturnBuilder<Ty>,
        params_element: Option<Ty>,
    ) -> Self {
        debug_assert_eq!(parameters.len(), arg_builders.len());
        debug_assert!(
            parameters.iter().filter(|p| p.is_params_array).count() <= 1,
            "a candidate may carry at most one params-array slot"
        );
        Self {
            signature,
            parameters,
            arg_builders,
            extra_builders,
            return_builder,
            params_element,
        }
    }

    pub fn signature(&self) -> &Arc<MethodSignature<Ty>> {
        &self.signature
    }

    pub fn parameters(&self) -> &[ParameterWrapper<Ty>] {
        &self.parameters
    }

    pub fn parameter(&self, index: usize) -> &ParameterWrapper<Ty> {
        &self.parameters[index]
    }

    /// Effective arity: the number of actual arguments this candidate
    /// consumes.
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn arg_builders(&self) -> &[ArgBuilder<Ty>] {
        &self.arg_builders
    }

    pub fn extra_builders(&self) -> &[ArgBuilder<Ty>] {
        &self.extra_builders
    }

    /// All builders, consuming and synthetic alike, for priority walks.
    pub fn all_builders(&self) -> impl Iterator<Item = &ArgBuilder<Ty>> {
        self.arg_builders.iter().chain(self.extra_builders.iter())
    }

    pub fn return_builder(&self) -> &ReturnBuilder<Ty> {
        &self.return_builder
    }

    pub fn params_array_index(&self) -> Option<usize> {
        self.parameters.iter().position(|p| p.is_params_array)
    }

    pub fn has_params_array(&self) -> bool {
        self.params_array_index().is_some()
    }

    pub fn has_params_dictionary(&self) -> bool {
        self.parameters.iter().any(|p| p.is_params_dict)
    }

    pub fn params_element(&self) -> Option<&Ty> {
        self.params_element.as_ref()
    }

    pub fn is_generic(&self) -> bool {
        self.signature.generic_arity > 0
    }
}

impl<Ty: Clone> MethodCandidate<Ty> {
    /// Specialize a variadic candidate to exactly `count` consuming slots.
    ///
    /// The params-array slot is replaced by as many element slots as needed;
    /// a params-dictionary slot is replaced by one named slot per caller
    /// keyword in `names`. Returns `None` when `count` cannot accommodate
    /// the fixed parameters.
    pub fn make_params_extended(&self, count: usize, names: &[String]) -> Option<Self> {
        let has_array = self.has_params_array();
        let has_dict = self.has_params_dictionary();
        if !has_array && !has_dict {
            return None;
        }

        let variadic_slots = usize::from(has_array) + usize::from(has_dict);
        let fixed = self.parameters.len() - variadic_slots;
        let expansion_total = count.checked_sub(fixed)?;
        let dict_expansion = if has_dict { names.len() } else { 0 };
        let array_expansion = expansion_total.checked_sub(dict_expansion)?;
        let element = if has_array {
            Some(self.params_element.clone()?)
        } else {
            None
        };

        let mut parameters = Vec::with_capacity(count);
        let mut builders = Vec::with_capacity(count);
        for (wrapper, builder) in self.parameters.iter().zip(&self.arg_builders) {
            if wrapper.is_params_array {
                // element presence checked above
                let Some(element) = element.as_ref() else {
                    return None;
                };
                for _ in 0..array_expansion {
                    let mut expanded = ParameterWrapper::new(element.clone());
                    expanded.info_index = wrapper.info_index;
                    parameters.push(expanded);
                    builders.push(ArgBuilder::ParamsElement {
                        ty: element.clone(),
                    });
                }
            } else if wrapper.is_params_dict {
                for name in names {
                    let mut expanded = ParameterWrapper::new(wrapper.ty.clone())
                        .with_name(name.clone())
                        .with_params_dict();
                    expanded.info_index = wrapper.info_index;
                    parameters.push(expanded);
                    builders.push(ArgBuilder::ParamsDict {
                        ty: wrapper.ty.clone(),
                    });
                }
            } else {
                parameters.push(wrapper.clone());
                builders.push(builder.clone());
            }
        }
        debug_assert_eq!(parameters.len(), count);

        Some(Self::new(
            Arc::clone(&self.signature),
            parameters,
            builders,
            self.extra_builders.clone(),
            self.return_builder.clone(),
            None,
        ))
    }
}

impl<Ty: fmt::Display> fmt::Display for MethodCandidate<Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.signature.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if p.is_params_array {
                write!(f, "params {}", p.ty)?;
            } else if p.is_by_ref {
                write!(f, "ref {}", p.ty)?;
            } else {
                write!(f, "{}", p.ty)?;
            }
        }
        write!(f, ")")
    }
}
