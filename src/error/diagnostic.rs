//! Renderable diagnostics for failed resolutions.
//!
//! [`BindError`] is the embedder-transportable form of a non-success
//! [`BindingTarget`]: every host type is stringified so the value can be
//! serialized across an embedding boundary and rendered without access to
//! the host type system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::HostType;
use crate::target::{BindingTarget, CallFailureReason};

/// One stringified conversion probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub arg_index: usize,
    pub from: String,
    pub to: String,
    pub failed: bool,
}

/// Structured, renderable resolution error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindError {
    #[error("{}", conversion_message(.method, .conversions))]
    ConversionFailure {
        method: String,
        conversions: Vec<ConversionSummary>,
    },

    #[error("{method}() got multiple values for argument '{name}'")]
    DuplicateKeyword { method: String, name: String },

    #[error("{method}() got an unexpected keyword argument '{name}'")]
    UnassignableKeyword { method: String, name: String },

    #[error("{}", arity_message(.method, .min, .max, .actual))]
    IncorrectArgumentCount {
        method: String,
        min: usize,
        max: Option<usize>,
        actual: usize,
        /// Parameters the best-arity signatures could fill from defaults.
        default_count: usize,
        /// The call carried a splatted sequence.
        has_arg_list: bool,
        /// The call carried keyword arguments.
        has_kwargs: bool,
    },

    #[error("{}", ambiguous_message(.method, .signatures))]
    AmbiguousMatch {
        method: String,
        signatures: Vec<String>,
    },

    #[error("invalid arguments for {method}()")]
    InvalidArguments { method: String },
}

fn conversion_message(method: &str, conversions: &[ConversionSummary]) -> String {
    match conversions.iter().find(|c| c.failed) {
        Some(c) => format!(
            "cannot bind {}: argument {} of type {} has no conversion to {}",
            method, c.arg_index, c.from, c.to
        ),
        None => format!("cannot bind {method}: argument conversion failed"),
    }
}

fn arity_message(method: &str, min: &usize, max: &Option<usize>, actual: &usize) -> String {
    match max {
        Some(max) if max == min => {
            format!("{method}() takes {max} arguments ({actual} given)")
        }
        Some(max) => format!("{method}() takes {min} to {max} arguments ({actual} given)"),
        None => format!("{method}() takes at least {min} arguments ({actual} given)"),
    }
}

fn ambiguous_message(method: &str, signatures: &[String]) -> String {
    let mut msg = format!("call to {method}() is ambiguous. Candidates:\n");
    for sig in signatures {
        msg.push_str(&format!("  {sig}\n"));
    }
    msg
}

/// Call-site facts the resolver contributes to diagnostics.
pub(crate) struct CallShape<'a> {
    pub method: &'a str,
    pub has_arg_list: bool,
    pub has_kwargs: bool,
    pub default_count: usize,
}

/// Convert a non-success target into its renderable form.
///
/// Panics on a successful target; asking for an error out of a success is a
/// programmer error.
pub(crate) fn error_for_target<Ty: HostType>(
    shape: &CallShape<'_>,
    target: &BindingTarget<Ty>,
) -> BindError {
    let method = shape.method.to_string();
    match target {
        BindingTarget::Success { .. } => {
            panic!("make_invalid_parameters_error called on a successful binding")
        }
        BindingTarget::CallFailure { failures } => match failures.first() {
            Some(failure) => match &failure.reason {
                CallFailureReason::ConversionFailure(results) => BindError::ConversionFailure {
                    method: failure.method.clone(),
                    conversions: results
                        .iter()
                        .map(|r| ConversionSummary {
                            arg_index: r.arg_index,
                            from: r.from.to_string(),
                            to: r.to.to_string(),
                            failed: r.failed,
                        })
                        .collect(),
                },
                CallFailureReason::DuplicateKeyword(name) => BindError::DuplicateKeyword {
                    method,
                    name: name.clone(),
                },
                CallFailureReason::UnassignableKeyword(name) => BindError::UnassignableKeyword {
                    method,
                    name: name.clone(),
                },
            },
            None => BindError::InvalidArguments { method },
        },
        BindingTarget::AmbiguousMatch { candidates } => {
            let mut signatures: Vec<String> = Vec::with_capacity(candidates.len());
            for c in candidates {
                let rendered = c.to_string();
                if !signatures.contains(&rendered) {
                    signatures.push(rendered);
                }
            }
            BindError::AmbiguousMatch { method, signatures }
        }
        BindingTarget::IncorrectArgumentCount {
            expected_arities,
            variadic,
            actual,
        } => BindError::IncorrectArgumentCount {
            method,
            min: expected_arities.first().copied().unwrap_or(0),
            max: if *variadic {
                None
            } else {
                expected_arities.last().copied()
            },
            actual: *actual,
            default_count: shape.default_count,
            has_arg_list: shape.has_arg_list,
            has_kwargs: shape.has_kwargs,
        },
        BindingTarget::InvalidArguments => BindError::InvalidArguments { method },
    }
}
