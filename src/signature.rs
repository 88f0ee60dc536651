//! Raw host method signatures as supplied by the embedder.
//!
//! These are normalized views over whatever reflection or metadata system the
//! host exposes. The resolver never inspects host metadata directly; the
//! embedder lowers each callable into a [`MethodSignature`] before asking for
//! a binding.

use serde::{Deserialize, Serialize};

/// How a method relates to its declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    /// No receiver slot.
    Static,
    /// Takes a receiver; the resolver prepends an instance parameter.
    Instance,
    /// Object construction; keyword-argument setting may be allowed.
    Constructor,
}

/// Host-side accessibility, reduced to what preference selection consults.
///
/// Explicit interface implementations surface as `Private` and are demoted
/// during tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

/// By-reference passing mode of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByRefKind {
    /// Ordinary by-value parameter.
    None,
    /// In-out reference; consumes an argument and produces an output.
    Ref,
    /// Out-only reference; produces an output without consuming an argument.
    Out,
}

/// One formal parameter of a raw signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo<Ty> {
    pub name: String,
    pub ty: Ty,
    pub by_ref: ByRefKind,
    /// True if the host declares a default value for this parameter.
    pub has_default: bool,
    /// Variadic positional tail (`params T[]` style).
    pub is_params_array: bool,
    /// Variadic keyword tail (`params dict` style).
    pub is_params_dict: bool,
    /// The host forbids passing a null/none value here.
    pub prohibits_null: bool,
}

impl<Ty> ParameterInfo<Ty> {
    /// An ordinary by-value parameter with no flags set.
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            by_ref: ByRefKind::None,
            has_default: false,
            is_params_array: false,
            is_params_dict: false,
            prohibits_null: false,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn with_by_ref(mut self, by_ref: ByRefKind) -> Self {
        self.by_ref = by_ref;
        self
    }

    pub fn with_params_array(mut self) -> Self {
        self.is_params_array = true;
        self
    }

    pub fn with_params_dict(mut self) -> Self {
        self.is_params_dict = true;
        self
    }

    pub fn with_prohibits_null(mut self) -> Self {
        self.prohibits_null = true;
        self
    }
}

/// A candidate callable as the host describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSignature<Ty> {
    pub name: String,
    pub kind: MethodKind,
    pub visibility: Visibility,
    /// Required for instance methods (receiver type); optional otherwise.
    pub declaring_type: Option<Ty>,
    pub params: Vec<ParameterInfo<Ty>>,
    pub return_type: Option<Ty>,
    /// C-style variadic calling convention. Such signatures cannot be bound
    /// and are skipped during candidate construction.
    pub is_c_varargs: bool,
    /// Number of generic parameters left unresolved. Non-zero means the
    /// signature is skipped (inference is unsupported).
    pub open_generic_params: usize,
    /// Number of already-bound generic arguments. Non-zero marks the method
    /// generic for tie-breaking purposes only.
    pub generic_arity: usize,
}

impl<Ty> MethodSignature<Ty> {
    pub fn new(name: impl Into<String>, kind: MethodKind, params: Vec<ParameterInfo<Ty>>) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            declaring_type: None,
            params,
            return_type: None,
            is_c_varargs: false,
            open_generic_params: 0,
            generic_arity: 0,
        }
    }

    pub fn with_declaring_type(mut self, ty: Ty) -> Self {
        self.declaring_type = Some(ty);
        self
    }

    pub fn with_return_type(mut self, ty: Ty) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_generic_arity(mut self, arity: usize) -> Self {
        self.generic_arity = arity;
        self
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, MethodKind::Static)
    }

    /// True if the signature cannot participate in binding at all.
    pub fn is_unbindable(&self) -> bool {
        self.is_c_varargs || self.open_generic_params > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbindable_signatures() {
        let mut sig = MethodSignature::new("f", MethodKind::Static, vec![ParameterInfo::new("x", 0u8)]);
        assert!(!sig.is_unbindable());
        sig.open_generic_params = 1;
        assert!(sig.is_unbindable());
        sig.open_generic_params = 0;
        sig.is_c_varargs = true;
        assert!(sig.is_unbindable());
    }

    #[test]
    fn test_parameter_builders() {
        let p = ParameterInfo::new("count", 3u8)
            .with_default()
            .with_by_ref(ByRefKind::Ref)
            .with_prohibits_null();
        assert!(p.has_default);
        assert_eq!(p.by_ref, ByRefKind::Ref);
        assert!(p.prohibits_null);
        assert!(!p.is_params_array);
    }
}
