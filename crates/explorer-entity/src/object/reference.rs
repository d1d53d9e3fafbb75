//! References used by job payloads to point at remote objects.

use serde::{Deserialize, Serialize};

/// Reference to a single well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellReference {
    /// Well uid.
    #[serde(default)]
    pub well_uid: String,
    /// Well name.
    #[serde(default)]
    pub well_name: Option<String>,
}

/// Reference to a single wellbore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellboreReference {
    /// Parent well uid.
    #[serde(default)]
    pub well_uid: String,
    /// Wellbore uid.
    #[serde(default)]
    pub wellbore_uid: String,
    /// Parent well name.
    #[serde(default)]
    pub well_name: Option<String>,
    /// Wellbore name.
    #[serde(default)]
    pub wellbore_name: Option<String>,
}

/// Reference to a single object inside a wellbore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    /// Parent well uid.
    #[serde(default)]
    pub well_uid: String,
    /// Parent wellbore uid.
    #[serde(default)]
    pub wellbore_uid: String,
    /// Object uid.
    #[serde(default)]
    pub uid: String,
    /// Object name.
    #[serde(default)]
    pub name: Option<String>,
    /// Parent well name.
    #[serde(default)]
    pub well_name: Option<String>,
    /// Parent wellbore name.
    #[serde(default)]
    pub wellbore_name: Option<String>,
}

/// Reference to a set of sibling objects inside one wellbore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReferences {
    /// Parent well uid.
    #[serde(default)]
    pub well_uid: String,
    /// Parent wellbore uid.
    #[serde(default)]
    pub wellbore_uid: String,
    /// Uids of the referenced objects, in submission order.
    #[serde(default)]
    pub object_uids: Vec<String>,
    /// Names of the referenced objects, parallel to `object_uids` when given.
    #[serde(default)]
    pub names: Vec<String>,
    /// Parent well name.
    #[serde(default)]
    pub well_name: Option<String>,
    /// Parent wellbore name.
    #[serde(default)]
    pub wellbore_name: Option<String>,
}

impl ObjectReferences {
    /// Comma-separated object names, falling back to uids when no names are known.
    pub fn joined_names(&self) -> String {
        if self.names.is_empty() {
            self.object_uids.join(", ")
        } else {
            self.names.join(", ")
        }
    }

    /// Display name for the object at `index`.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}
