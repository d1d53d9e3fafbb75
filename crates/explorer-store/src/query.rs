//! Query options and write outcomes.

/// Outcome of a write against a remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Whether the store accepted the write.
    pub is_successful: bool,
    /// The store's explanation when it did not.
    pub reason: Option<String>,
}

impl QueryResult {
    /// An accepted write.
    pub fn success() -> Self {
        Self {
            is_successful: true,
            reason: None,
        }
    }

    /// A rejected write.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            reason: Some(reason.into()),
        }
    }
}

/// Which fields a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnElements {
    /// Identifiers and names only.
    IdOnly,
    /// Every field.
    #[default]
    All,
}

/// Options accompanying a read or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionsIn {
    /// Fields to return.
    pub return_elements: ReturnElements,
    /// Delete children along with the object.
    pub cascaded_delete: bool,
}

impl OptionsIn {
    /// Options for an identifiers-only read.
    pub fn id_only() -> Self {
        Self {
            return_elements: ReturnElements::IdOnly,
            ..Self::default()
        }
    }

    /// Options for a full read.
    pub fn all() -> Self {
        Self::default()
    }

    /// Options for a delete, optionally cascading to children.
    pub fn delete(cascaded_delete: bool) -> Self {
        Self {
            cascaded_delete,
            ..Self::default()
        }
    }
}
