//! Per-signature candidate derivation.
//!
//! A [`ParameterMapping`] walks one raw signature and produces every bindable
//! candidate shape: the base form, one per trailing-optional suffix, a
//! by-ref-reduced form, and (for constructors that accept keyword setting) a
//! keyword-normalization dual. Variadic routing into the params pool is the
//! resolver's job; the mapping only marks candidates that carry a variadic
//! tail.

use std::sync::Arc;

use crate::candidate::arg_builder::ArgBuilder;
use crate::candidate::method_candidate::MethodCandidate;
use crate::candidate::parameter::ParameterWrapper;
use crate::candidate::return_builder::ReturnBuilder;
use crate::signature::{ByRefKind, MethodKind, MethodSignature};

/// Mutable mapping state handed to the special-parameter hook before the
/// default mapping fills the remainder.
pub struct ParameterMapping<Ty> {
    signature: Arc<MethodSignature<Ty>>,
    arg_names: Vec<String>,
    parameters: Vec<ParameterWrapper<Ty>>,
    arg_builders: Vec<ArgBuilder<Ty>>,
    params_element: Option<Ty>,
    instance_added: bool,
}

impl<Ty: Clone> ParameterMapping<Ty> {
    pub(crate) fn new(signature: MethodSignature<Ty>, arg_names: &[String]) -> Self {
        Self {
            signature: Arc::new(signature),
            arg_names: arg_names.to_vec(),
            parameters: Vec::new(),
            arg_builders: Vec::new(),
            params_element: None,
            instance_added: false,
        }
    }

    pub fn signature(&self) -> &MethodSignature<Ty> {
        &self.signature
    }

    /// Prepend the receiver slot for instance methods. Idempotent; a no-op
    /// for static methods, constructors (no instance exists yet), and
    /// signatures without a declaring type.
    pub fn add_instance_parameter(&mut self) {
        if self.instance_added || !matches!(self.signature.kind, MethodKind::Instance) {
            return;
        }
        let Some(declaring) = self.signature.declaring_type.clone() else {
            return;
        };
        self.instance_added = true;
        self.parameters
            .push(ParameterWrapper::new(declaring.clone()).with_prohibits_null(true));
        self.arg_builders.push(ArgBuilder::Instance { ty: declaring });
    }

    /// Pre-map one slot from a special-parameter hook. The hook must also
    /// report the raw parameters it consumed through its returned bitmask.
    pub fn add_mapped_parameter(&mut self, wrapper: ParameterWrapper<Ty>, builder: ArgBuilder<Ty>) {
        self.parameters.push(wrapper);
        self.arg_builders.push(builder);
    }

    /// Map every raw parameter the special hook did not consume.
    ///
    /// `consumed_mask` is the hook's bitmask (bit *i* set = raw parameter *i*
    /// already mapped); `element_of` resolves a params-array type to its
    /// element type.
    pub(crate) fn map_remaining(
        &mut self,
        consumed_mask: u64,
        element_of: impl Fn(&Ty) -> Option<Ty>,
    ) {
        let signature = Arc::clone(&self.signature);
        for (i, p) in signature.params.iter().enumerate() {
            if i < 64 && consumed_mask & (1u64 << i) != 0 {
                continue;
            }
            let mut wrapper = ParameterWrapper::new(p.ty.clone())
                .with_name(p.name.clone())
                .with_prohibits_null(p.prohibits_null)
                .with_info_index(i);
            let builder = if p.is_params_dict {
                wrapper = wrapper.with_params_dict();
                ArgBuilder::ParamsDict { ty: p.ty.clone() }
            } else if p.is_params_array {
                wrapper = wrapper.with_params_array();
                self.params_element = element_of(&p.ty);
                ArgBuilder::ParamsArray { ty: p.ty.clone() }
            } else if p.by_ref != ByRefKind::None {
                wrapper = wrapper.with_by_ref();
                ArgBuilder::Simple {
                    ty: p.ty.clone(),
                    by_ref: p.by_ref,
                }
            } else {
                ArgBuilder::Simple {
                    ty: p.ty.clone(),
                    by_ref: ByRefKind::None,
                }
            };
            self.parameters.push(wrapper);
            self.arg_builders.push(builder);
        }
    }

    /// Wrapper positions of the trailing optional run, last first. Variadic
    /// tail slots are skipped; the run stops at the first non-defaultable
    /// slot.
    fn trailing_defaultable(&self) -> Vec<usize> {
        let mut run = Vec::new();
        for (j, w) in self.parameters.iter().enumerate().rev() {
            if w.is_params_array || w.is_params_dict {
                continue;
            }
            let Some(info) = w.info_index else {
                break;
            };
            if self.signature.params[info].has_default {
                run.push(j);
            } else {
                break;
            }
        }
        run
    }

    /// Derive every candidate shape of the mapped signature.
    pub(crate) fn into_candidates(
        self,
        temp_counter: &mut usize,
        allow_keyword_setting: bool,
        universal: Ty,
    ) -> Vec<MethodCandidate<Ty>> {
        let base_return = ReturnBuilder::new(self.signature.return_type.clone());
        let mut out = Vec::new();

        out.push(MethodCandidate::new(
            Arc::clone(&self.signature),
            self.parameters.clone(),
            self.arg_builders.clone(),
            Vec::new(),
            base_return.clone(),
            self.params_element.clone(),
        ));

        // One candidate per suffix of trailing optionals, the omitted slots
        // supplied by defaulting builders.
        let defaultable = self.trailing_defaultable();
        for suffix in 1..=defaultable.len() {
            let omitted = &defaultable[..suffix];
            let mut parameters = Vec::with_capacity(self.parameters.len() - suffix);
            let mut builders = Vec::with_capacity(self.parameters.len() - suffix);
            let mut extra = Vec::with_capacity(suffix);
            for (j, (w, b)) in self.parameters.iter().zip(&self.arg_builders).enumerate() {
                if omitted.contains(&j) {
                    let Some(info) = w.info_index else {
                        continue;
                    };
                    extra.push(ArgBuilder::Default { info_index: info });
                } else {
                    parameters.push(w.clone());
                    builders.push(b.clone());
                }
            }
            out.push(MethodCandidate::new(
                Arc::clone(&self.signature),
                parameters,
                builders,
                extra,
                base_return.clone(),
                self.params_element.clone(),
            ));
        }

        // By-ref reduction: out-only slots leave the argument list entirely,
        // ref slots consume a plain value; both route through a named temp
        // hoisted into the return.
        if self.parameters.iter().any(|w| w.is_by_ref) {
            let mut parameters = Vec::new();
            let mut builders = Vec::new();
            let mut extra = Vec::new();
            let mut reduced_return = base_return.clone();
            for (w, b) in self.parameters.iter().zip(&self.arg_builders) {
                let Some(info) = w.info_index.filter(|_| w.is_by_ref) else {
                    parameters.push(w.clone());
                    builders.push(b.clone());
                    continue;
                };
                let temp = format!("$ref{}", *temp_counter);
                *temp_counter += 1;
                reduced_return.out_params.push(info);
                match self.signature.params[info].by_ref {
                    ByRefKind::Out => {
                        extra.push(ArgBuilder::Out {
                            ty: w.ty.clone(),
                            temp,
                        });
                    }
                    _ => {
                        let mut by_value = w.clone();
                        by_value.is_by_ref = false;
                        parameters.push(by_value);
                        builders.push(ArgBuilder::Reference {
                            ty: w.ty.clone(),
                            temp,
                        });
                    }
                }
            }
            out.push(MethodCandidate::new(
                Arc::clone(&self.signature),
                parameters,
                builders,
                extra,
                reduced_return,
                self.params_element.clone(),
            ));
        }

        // Keyword-normalization dual: caller keywords matching no declared
        // parameter are absorbed into params-dictionary slots. Duals keep
        // arity bookkeeping honest but never bind (stage 4 skips them).
        if allow_keyword_setting {
            let unmatched: Vec<String> = self
                .arg_names
                .iter()
                .filter(|n| !self.signature.params.iter().any(|p| p.name == **n))
                .cloned()
                .collect();
            if !unmatched.is_empty() {
                let mut parameters = self.parameters.clone();
                let mut builders = self.arg_builders.clone();
                for name in unmatched {
                    parameters.push(
                        ParameterWrapper::new(universal.clone())
                            .with_name(name)
                            .with_params_dict(),
                    );
                    builders.push(ArgBuilder::ParamsDict {
                        ty: universal.clone(),
                    });
                }
                out.push(MethodCandidate::new(
                    Arc::clone(&self.signature),
                    parameters,
                    builders,
                    Vec::new(),
                    base_return,
                    self.params_element.clone(),
                ));
            }
        }

        out
    }
}
