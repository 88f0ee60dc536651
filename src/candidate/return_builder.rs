//! Return shaping for candidates.

/// Summarizes how a candidate's return value and by-reference outputs are
/// combined.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnBuilder<Ty> {
    pub return_type: Option<Ty>,
    /// Raw parameter indices whose values are hoisted into the return
    /// (by-ref-reduced candidates only).
    pub out_params: Vec<usize>,
}

impl<Ty> ReturnBuilder<Ty> {
    pub fn new(return_type: Option<Ty>) -> Self {
        Self {
            return_type,
            out_params: Vec::new(),
        }
    }

    pub fn count_out_params(&self) -> usize {
        self.out_params.len()
    }
}
