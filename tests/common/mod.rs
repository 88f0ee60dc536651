//! Shared host-type mock and binding policy for resolver tests.
// This helper module is consumed selectively by the integration test files.
// Keep the utilities available without forcing every helper to be referenced
// in each individual test target.
#![allow(dead_code)]

use std::fmt;

use hostbind::{
    ActualArg, BindingPolicy, NarrowingLevel, ParameterWrapper, Preference, SplatSequence,
};

/// A small host type lattice: a universal top, a null value type, a numeric
/// tower, strings, invariant arrays, and single-inheritance classes.
#[derive(Debug, Clone, PartialEq)]
pub enum HostTy {
    Object,
    Null,
    Bool,
    Int32,
    Int64,
    Double,
    Str,
    ArrayOf(Box<HostTy>),
    Class {
        name: &'static str,
        parent: Option<&'static str>,
    },
}

impl HostTy {
    pub fn array(element: HostTy) -> HostTy {
        HostTy::ArrayOf(Box::new(element))
    }

    pub fn class(name: &'static str) -> HostTy {
        HostTy::Class { name, parent: None }
    }

    pub fn subclass(name: &'static str, parent: &'static str) -> HostTy {
        HostTy::Class {
            name,
            parent: Some(parent),
        }
    }

    fn numeric_rank(&self) -> Option<u8> {
        match self {
            HostTy::Bool => Some(0),
            HostTy::Int32 => Some(1),
            HostTy::Int64 => Some(2),
            HostTy::Double => Some(3),
            _ => None,
        }
    }

    pub fn is_subtype_of(&self, other: &HostTy) -> bool {
        if self == other {
            return true;
        }
        match other {
            HostTy::Object => true,
            HostTy::Class { name, .. } => match self {
                HostTy::Class {
                    parent: Some(parent),
                    ..
                } => parent == name,
                _ => false,
            },
            _ => false,
        }
    }
}

impl fmt::Display for HostTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostTy::Object => write!(f, "Object"),
            HostTy::Null => write!(f, "Null"),
            HostTy::Bool => write!(f, "Bool"),
            HostTy::Int32 => write!(f, "Int32"),
            HostTy::Int64 => write!(f, "Int64"),
            HostTy::Double => write!(f, "Double"),
            HostTy::Str => write!(f, "Str"),
            HostTy::ArrayOf(element) => write!(f, "{element}[]"),
            HostTy::Class { name, .. } => write!(f, "{name}"),
        }
    }
}

/// A splatted sequence with bind-time length and lazily fetched items.
pub struct TestSplat {
    pub splice: usize,
    pub items: Vec<HostTy>,
}

impl SplatSequence<HostTy> for TestSplat {
    fn splice_index(&self) -> usize {
        self.splice
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> ActualArg<HostTy> {
        ActualArg::of(self.items[index].clone())
    }

    fn source(&self) -> ActualArg<HostTy> {
        ActualArg::of(HostTy::array(HostTy::Object))
    }
}

/// Test policy over [`HostTy`].
///
/// Conversion rules: subtype assignment at every level, numeric widening at
/// every level, numeric narrowing from [`NarrowingLevel::Two`] upward.
pub struct TestPolicy {
    pub args: Vec<ActualArg<HostTy>>,
    pub named: Vec<(String, ActualArg<HostTy>)>,
    pub splat: Option<TestSplat>,
    pub implicit_receiver: bool,
}

impl TestPolicy {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            named: Vec::new(),
            splat: None,
            implicit_receiver: false,
        }
    }

    pub fn positional(types: &[HostTy]) -> Self {
        let mut policy = Self::new();
        policy.args = types.iter().cloned().map(ActualArg::of).collect();
        policy
    }

    pub fn with_arg(mut self, arg: ActualArg<HostTy>) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_named(mut self, name: &str, ty: HostTy) -> Self {
        self.named.push((name.to_string(), ActualArg::of(ty)));
        self
    }

    pub fn with_splat(mut self, splice: usize, items: Vec<HostTy>) -> Self {
        self.splat = Some(TestSplat { splice, items });
        self
    }

    pub fn with_implicit_receiver(mut self) -> Self {
        self.implicit_receiver = true;
        self
    }
}

pub fn convert_allowed(from: &HostTy, to: &ParameterWrapper<HostTy>, level: NarrowingLevel) -> bool {
    if *from == HostTy::Null {
        // null assigns to reference-like slots only, never where the host
        // prohibits it
        return !to.prohibits_null && to.ty.numeric_rank().is_none();
    }
    if from.is_subtype_of(&to.ty) {
        return true;
    }
    let (Some(from_rank), Some(to_rank)) = (from.numeric_rank(), to.ty.numeric_rank()) else {
        return false;
    };
    if from_rank <= to_rank {
        // widening is implicit at every level
        true
    } else {
        level >= NarrowingLevel::Two
    }
}

impl BindingPolicy for TestPolicy {
    type Ty = HostTy;

    fn can_convert_from(
        &self,
        from: &HostTy,
        to: &ParameterWrapper<HostTy>,
        level: NarrowingLevel,
    ) -> bool {
        convert_allowed(from, to, level)
    }

    fn prefer_convert(&self, t1: &HostTy, t2: &HostTy) -> Preference {
        match (t1.numeric_rank(), t2.numeric_rank()) {
            (Some(r1), Some(r2)) if r1 < r2 => Preference::One,
            (Some(r1), Some(r2)) if r2 < r1 => Preference::Two,
            _ => Preference::Equivalent,
        }
    }

    fn is_assignable_from(&self, to: &HostTy, from: &HostTy) -> bool {
        from.is_subtype_of(to)
    }

    fn element_type(&self, ty: &HostTy) -> Option<HostTy> {
        match ty {
            HostTy::ArrayOf(element) => Some((**element).clone()),
            _ => None,
        }
    }

    fn universal_type(&self) -> HostTy {
        HostTy::Object
    }

    fn positional_args(&self) -> &[ActualArg<HostTy>] {
        &self.args
    }

    fn implicit_receiver(&self) -> bool {
        self.implicit_receiver
    }

    fn get_named_arguments(&self) -> (Vec<ActualArg<HostTy>>, Vec<String>) {
        let args = self.named.iter().map(|(_, a)| a.clone()).collect();
        let names = self.named.iter().map(|(n, _)| n.clone()).collect();
        (args, names)
    }

    fn splat(&self) -> Option<&dyn SplatSequence<HostTy>> {
        self.splat
            .as_ref()
            .map(|s| s as &dyn SplatSequence<HostTy>)
    }
}
