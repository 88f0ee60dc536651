//! The embedder-facing capability surface.
//!
//! The resolver never talks to the host type system or the call-site front
//! end directly; everything flows through a [`BindingPolicy`]. One policy
//! value describes one call site and is consulted by exactly one resolver.

use crate::arguments::{ActualArg, ActualArguments};
use crate::candidate::{ParameterMapping, ParameterWrapper};
use crate::narrowing::NarrowingLevel;
use crate::preference::Preference;
use crate::signature::{MethodKind, MethodSignature};

/// Bounds every host type handle must satisfy. Blanket-implemented.
pub trait HostType: Clone + PartialEq + std::fmt::Debug + std::fmt::Display {}

impl<T: Clone + PartialEq + std::fmt::Debug + std::fmt::Display> HostType for T {}

/// Lazy view of a splatted sequence argument. The sequence length is known
/// at bind time but elements beyond the expansion limits are only fetched
/// when applicability probes the collapsed tail.
pub trait SplatSequence<Ty> {
    /// Position of the splat within the caller's positional arguments.
    fn splice_index(&self) -> usize;

    /// Runtime length of the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the `index`-th element's type descriptor.
    fn item(&self, index: usize) -> ActualArg<Ty>;

    /// The sequence argument itself, as a whole.
    fn source(&self) -> ActualArg<Ty>;
}

/// Everything the resolver asks of its embedder: raw conversion questions
/// answered by the host-binder, structural questions about host types, and
/// the shape of the call site being bound.
pub trait BindingPolicy {
    type Ty: HostType;

    // ---- host-binder conversion questions ----

    /// Can a value of type `from` convert to parameter `to` at `level`?
    /// Must be monotone in `level`.
    fn can_convert_from(
        &self,
        from: &Self::Ty,
        to: &ParameterWrapper<Self::Ty>,
        level: NarrowingLevel,
    ) -> bool;

    /// Host-specific preference between two parameters for one actual type
    /// at one level. Consulted before the generic assignability fallback.
    fn select_best_conversion_for(
        &self,
        _actual: &Self::Ty,
        _p1: &ParameterWrapper<Self::Ty>,
        _p2: &ParameterWrapper<Self::Ty>,
        _level: NarrowingLevel,
    ) -> Preference {
        Preference::Equivalent
    }

    /// Last-resort numeric ordering between two parameter types. The
    /// resolver applies it symmetrically (swap + invert), so implementations
    /// only need to answer one direction.
    fn prefer_convert(&self, _t1: &Self::Ty, _t2: &Self::Ty) -> Preference {
        Preference::Equivalent
    }

    fn parameters_equivalent(
        &self,
        p1: &ParameterWrapper<Self::Ty>,
        p2: &ParameterWrapper<Self::Ty>,
    ) -> bool {
        p1 == p2
    }

    // ---- host type structure ----

    /// Assignability without narrowing: can a value statically typed `from`
    /// be used where `to` is expected?
    fn is_assignable_from(&self, to: &Self::Ty, from: &Self::Ty) -> bool;

    /// Element type of an array/sequence type; `None` if `ty` has none.
    fn element_type(&self, ty: &Self::Ty) -> Option<Self::Ty>;

    /// The universal top type (`object`-equivalent) of the host.
    fn universal_type(&self) -> Self::Ty;

    // ---- call-site shape ----

    /// Positional arguments in caller order, including an implicit receiver
    /// when `implicit_receiver` reports one.
    fn positional_args(&self) -> &[ActualArg<Self::Ty>];

    /// True when argument 0 is a receiver the caller did not write.
    fn implicit_receiver(&self) -> bool {
        false
    }

    /// Named arguments and their names, parallel vectors.
    fn get_named_arguments(&self) -> (Vec<ActualArg<Self::Ty>>, Vec<String>) {
        (Vec::new(), Vec::new())
    }

    /// The splatted sequence, if the call carries one.
    fn splat(&self) -> Option<&dyn SplatSequence<Self::Ty>> {
        None
    }

    /// May unmatched keyword arguments be retargeted at settable members?
    fn allow_keyword_argument_setting(&self, method: &MethodSignature<Self::Ty>) -> bool {
        matches!(method.kind, MethodKind::Constructor)
    }

    /// Pre-map special parameters (implicit context slots and the like),
    /// returning a bitmask of raw parameters consumed. The default prepends
    /// the instance parameter for non-static methods and consumes nothing.
    fn map_special_parameters(&self, mapping: &mut ParameterMapping<Self::Ty>) -> u64 {
        mapping.add_instance_parameter();
        0
    }

    /// Normalize the call into an [`ActualArguments`] record, or `None` when
    /// the shape is invalid (reported as `InvalidArguments`).
    fn create_actual_arguments(
        &self,
        named: Vec<ActualArg<Self::Ty>>,
        names: Vec<String>,
        pre_splat_limit: Option<usize>,
        post_splat_limit: Option<usize>,
    ) -> Option<ActualArguments<Self::Ty>> {
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return None;
            }
        }
        Some(ActualArguments::from_call(
            self.positional_args(),
            named,
            names,
            self.splat(),
            pre_splat_limit,
            post_splat_limit,
            usize::from(self.implicit_receiver()),
        ))
    }
}
