//! Navigation tree refresh notifications.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::object::ObjectType;

/// How the affected part of the tree changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefreshType {
    /// Entities were added.
    Add,
    /// Entities were changed.
    Update,
    /// Entities were removed.
    Remove,
}

/// Tells subscribers which part of the navigation tree changed on a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshAction {
    /// Server on which the change happened.
    pub server_url: Url,
    /// Affected well, if scoped to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_uid: Option<String>,
    /// Affected wellbore, if scoped to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellbore_uid: Option<String>,
    /// Type of the affected entities.
    pub entity_type: ObjectType,
    /// Kind of change.
    pub refresh_type: RefreshType,
    /// Uids of the entities that actually changed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_uids: Vec<String>,
}

impl RefreshAction {
    /// A change to a well (or to the well list when `well_uid` is `None`).
    pub fn well(server_url: Url, well_uid: Option<String>, refresh_type: RefreshType) -> Self {
        Self {
            server_url,
            well_uid,
            wellbore_uid: None,
            entity_type: ObjectType::Well,
            refresh_type,
            object_uids: Vec::new(),
        }
    }

    /// A change to a wellbore.
    pub fn wellbore(
        server_url: Url,
        well_uid: impl Into<String>,
        wellbore_uid: impl Into<String>,
        refresh_type: RefreshType,
    ) -> Self {
        Self {
            server_url,
            well_uid: Some(well_uid.into()),
            wellbore_uid: Some(wellbore_uid.into()),
            entity_type: ObjectType::Wellbore,
            refresh_type,
            object_uids: Vec::new(),
        }
    }

    /// A change to objects of one type inside a wellbore.
    pub fn objects(
        server_url: Url,
        well_uid: impl Into<String>,
        wellbore_uid: impl Into<String>,
        entity_type: ObjectType,
        refresh_type: RefreshType,
    ) -> Self {
        Self {
            server_url,
            well_uid: Some(well_uid.into()),
            wellbore_uid: Some(wellbore_uid.into()),
            entity_type,
            refresh_type,
            object_uids: Vec::new(),
        }
    }

    /// Scope the action to the given uids.
    pub fn with_object_uids(mut self, uids: Vec<String>) -> Self {
        self.object_uids = uids;
        self
    }
}
