//! Pairwise preference verdicts.

/// Outcome of comparing two candidates (or two parameters) for preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// The left-hand side is preferred.
    One,
    /// The right-hand side is preferred.
    Two,
    /// Neither side is preferred; the comparison carries no information.
    Equivalent,
    /// The sides are incomparable.
    Ambiguous,
}

impl Preference {
    /// True if the verdict elects one side.
    pub fn chosen(self) -> bool {
        matches!(self, Preference::One | Preference::Two)
    }

    /// Swap the sides of the verdict. `Equivalent` and `Ambiguous` are fixed
    /// points; this is what makes the symmetric `prefer_convert` fallback
    /// antisymmetric.
    pub fn other(self) -> Preference {
        match self {
            Preference::One => Preference::Two,
            Preference::Two => Preference::One,
            other => other,
        }
    }
}

/// Combine per-argument verdicts into an overall verdict.
///
/// Order-independent: conflicting decisive votes yield `Ambiguous`, a lone
/// decisive vote wins, positional `Ambiguous` votes are overridden by any
/// decisive vote, and all-`Equivalent` stays `Equivalent`.
pub(crate) fn aggregate_votes(votes: impl IntoIterator<Item = Preference>) -> Preference {
    let mut saw_one = false;
    let mut saw_two = false;
    let mut saw_ambiguous = false;
    for vote in votes {
        match vote {
            Preference::One => saw_one = true,
            Preference::Two => saw_two = true,
            Preference::Ambiguous => saw_ambiguous = true,
            Preference::Equivalent => {}
        }
    }
    match (saw_one, saw_two) {
        (true, true) => Preference::Ambiguous,
        (true, false) => Preference::One,
        (false, true) => Preference::Two,
        (false, false) => {
            if saw_ambiguous {
                Preference::Ambiguous
            } else {
                Preference::Equivalent
            }
        }
    }
}
