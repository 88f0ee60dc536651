//! Conversion tiers used when probing argument-to-parameter convertibility.

use serde::{Deserialize, Serialize};

/// A tier in the host conversion lattice.
///
/// Levels are totally ordered from strictest to broadest; the resolver only
/// relies on comparisons, never on the identity of a particular tier. The
/// host-binder guarantees monotonicity: a conversion admitted at one level is
/// admitted at every higher level.
///
/// # Examples
/// ```
/// use hostbind::NarrowingLevel;
///
/// assert!(NarrowingLevel::None < NarrowingLevel::One);
/// assert!(NarrowingLevel::Three < NarrowingLevel::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NarrowingLevel {
    /// Only identity, reference and implicit conversions.
    None,
    /// First tier of narrowing conversions.
    One,
    /// Second tier of narrowing conversions.
    Two,
    /// Third tier of narrowing conversions.
    Three,
    /// Every conversion the host knows how to perform.
    All,
}

impl NarrowingLevel {
    const LADDER: [NarrowingLevel; 5] = [
        NarrowingLevel::None,
        NarrowingLevel::One,
        NarrowingLevel::Two,
        NarrowingLevel::Three,
        NarrowingLevel::All,
    ];

    /// Iterate levels from `min` to `max` inclusive.
    pub fn range(min: NarrowingLevel, max: NarrowingLevel) -> impl Iterator<Item = NarrowingLevel> {
        Self::LADDER
            .iter()
            .copied()
            .filter(move |l| *l >= min && *l <= max)
    }
}
