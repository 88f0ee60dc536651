//! Normalized call-site arguments.
//!
//! The embedder's front end supplies positional arguments, named arguments,
//! and optionally a splatted sequence whose length is only known at bind
//! time. Normalization splices the splat into the positional vector up to
//! the expansion limits; whatever remains stays behind as a *collapsed* tail
//! that applicability probes element by element.

use crate::policy::SplatSequence;

/// One dynamic argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualArg<Ty> {
    /// Static type of the argument expression at the call site.
    pub expression_type: Ty,
    /// Most specific type observed on the actual value.
    pub limit_type: Ty,
}

impl<Ty: Clone> ActualArg<Ty> {
    pub fn new(expression_type: Ty, limit_type: Ty) -> Self {
        Self {
            expression_type,
            limit_type,
        }
    }

    /// An argument whose static and observed types coincide.
    pub fn of(ty: Ty) -> Self {
        Self {
            expression_type: ty.clone(),
            limit_type: ty,
        }
    }
}

/// Flat view of a call's arguments after normalization.
#[derive(Debug, Clone)]
pub struct ActualArguments<Ty> {
    positional: Vec<ActualArg<Ty>>,
    named: Vec<ActualArg<Ty>>,
    names: Vec<String>,
    /// Position in the flat vector where the collapsed portion of the splat
    /// sits; `None` when the call carries no splat.
    splat_index: Option<usize>,
    /// Position where splat expansion began; maps collapsed ordinals back to
    /// splat item indices.
    first_splatted_arg: usize,
    collapsed_count: usize,
    /// Leading arguments the caller did not write (implicit receiver).
    hidden_count: usize,
}

impl<Ty: Clone> ActualArguments<Ty> {
    pub fn new(
        positional: Vec<ActualArg<Ty>>,
        named: Vec<ActualArg<Ty>>,
        names: Vec<String>,
        splat_index: Option<usize>,
        first_splatted_arg: usize,
        collapsed_count: usize,
        hidden_count: usize,
    ) -> Self {
        debug_assert_eq!(named.len(), names.len());
        debug_assert!(splat_index.map_or(true, |s| s <= positional.len() + named.len()));
        debug_assert!(
            names
                .iter()
                .enumerate()
                .all(|(i, n)| !names[..i].contains(n)),
            "argument names must be unique"
        );
        Self {
            positional,
            named,
            names,
            splat_index,
            first_splatted_arg,
            collapsed_count,
            hidden_count,
        }
    }

    /// Build arguments from a call description, expanding a splat up to the
    /// given limits. `None` limits mean "expand fully".
    #[allow(clippy::too_many_arguments)]
    pub fn from_call(
        positional: &[ActualArg<Ty>],
        named: Vec<ActualArg<Ty>>,
        names: Vec<String>,
        splat: Option<&dyn SplatSequence<Ty>>,
        pre_splat_limit: Option<usize>,
        post_splat_limit: Option<usize>,
        hidden_count: usize,
    ) -> Self {
        let Some(seq) = splat else {
            return Self::new(positional.to_vec(), named, names, None, 0, 0, hidden_count);
        };

        let splice = seq.splice_index().min(positional.len());
        let len = seq.len();
        let post_positional = positional.len() - splice;
        let (head, tail, collapsed) = expand_splat(
            len,
            splice,
            post_positional,
            pre_splat_limit,
            post_splat_limit,
        );

        let mut flat = Vec::with_capacity(positional.len() + head + tail);
        flat.extend_from_slice(&positional[..splice]);
        for i in 0..head {
            flat.push(seq.item(i));
        }
        let splat_index = flat.len();
        for i in (len - tail)..len {
            flat.push(seq.item(i));
        }
        flat.extend_from_slice(&positional[splice..]);

        Self::new(
            flat,
            named,
            names,
            Some(splat_index),
            splice,
            collapsed,
            hidden_count,
        )
    }

    /// Total number of flat arguments (positional + named); collapsed splat
    /// elements are not counted.
    pub fn count(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// The argument count as the caller wrote it, for diagnostics.
    pub fn visible_count(&self) -> usize {
        self.count() - self.hidden_count
    }

    pub fn positional_count(&self) -> usize {
        self.positional.len()
    }

    pub fn named_count(&self) -> usize {
        self.named.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Flat access: positional arguments first, then named.
    pub fn arg(&self, index: usize) -> &ActualArg<Ty> {
        if index < self.positional.len() {
            &self.positional[index]
        } else {
            &self.named[index - self.positional.len()]
        }
    }

    pub fn splat_index(&self) -> Option<usize> {
        self.splat_index
    }

    pub fn collapsed_count(&self) -> usize {
        self.collapsed_count
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    pub fn has_named(&self) -> bool {
        !self.named.is_empty()
    }

    /// Splat item index of the `ordinal`-th collapsed element.
    pub fn to_splatted_item_index(&self, ordinal: usize) -> usize {
        debug_assert!(ordinal < self.collapsed_count);
        let head = self.splat_index.unwrap_or(0) - self.first_splatted_arg;
        head + ordinal
    }
}

/// Split a splatted sequence of `len` items into an expanded head, an
/// expanded tail, and a collapsed middle.
///
/// `splice` is the position of the splat within the caller's positional
/// arguments and `post_positional` the number of positional arguments after
/// it. The head is sized so that at least `pre_limit` flat positions precede
/// the collapse point, the tail so that `post_limit` fixed trailing slots can
/// be satisfied. Unbounded limits expand fully.
fn expand_splat(
    len: usize,
    splice: usize,
    post_positional: usize,
    pre_limit: Option<usize>,
    post_limit: Option<usize>,
) -> (usize, usize, usize) {
    let (Some(pre), Some(post)) = (pre_limit, post_limit) else {
        return (len, 0, 0);
    };
    let head_target = pre.saturating_sub(splice);
    let tail_target = post.saturating_sub(post_positional);
    if len <= head_target + tail_target {
        (len, 0, 0)
    } else {
        (head_target, tail_target, len - head_target - tail_target)
    }
}
