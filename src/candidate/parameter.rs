//! Normalized per-parameter view used by candidates.

/// A normalized view of one formal parameter slot.
///
/// Wrappers are what conversion probing and preference selection look at; the
/// optional `info_index` points back into the raw signature's parameter list
/// for embedders that need conversion context (attributes, default values).
#[derive(Debug, Clone)]
pub struct ParameterWrapper<Ty> {
    pub ty: Ty,
    /// Keyword name, if the slot can be addressed by name. The implicit
    /// instance parameter has none.
    pub name: Option<String>,
    pub prohibits_null: bool,
    pub is_by_ref: bool,
    pub is_params_array: bool,
    pub is_params_dict: bool,
    /// Index into the raw signature's `params`, when the wrapper corresponds
    /// to a declared parameter.
    pub info_index: Option<usize>,
}

impl<Ty> ParameterWrapper<Ty> {
    pub fn new(ty: Ty) -> Self {
        Self {
            ty,
            name: None,
            prohibits_null: false,
            is_by_ref: false,
            is_params_array: false,
            is_params_dict: false,
            info_index: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_prohibits_null(mut self, prohibits_null: bool) -> Self {
        self.prohibits_null = prohibits_null;
        self
    }

    pub fn with_by_ref(mut self) -> Self {
        self.is_by_ref = true;
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

    pub fn with_info_index(mut self, index: usize) -> Self {
        self.info_index = Some(index);
        self
    }
}

// Wrapper identity is (type, null-prohibition); the remaining fields are
// bookkeeping and must not affect preference equivalence.
impl<Ty: PartialEq> PartialEq for ParameterWrapper<Ty> {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.prohibits_null == other.prohibits_null
    }
}
