//! Type alias definitions

use crate::ts_type_params::DocTypeParameter;
use crate::types::TypeRef;

/// Type alias definition
///
/// ```typescript
/// type Callback<T> = (value: T) => void;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDef {
    /// The aliased type
    pub type_ref: TypeRef,

    pub type_parameters: Vec<DocTypeParameter>,
}

impl TypeAliasDef {
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            type_parameters: vec![],
        }
    }

    /// Add type parameters
    pub fn with_type_parameters(mut self, params: Vec<DocTypeParameter>) -> Self {
        self.type_parameters = params;
        self
    }
}
