//! Object type tags and the generic object record exchanged with remote stores.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Object type tag used in refresh actions and store queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// A well.
    Well,
    /// A wellbore within a well.
    Wellbore,
    /// A bottom hole assembly run.
    BhaRun,
    /// A log.
    Log,
    /// A message object.
    Message,
    /// A mud log.
    MudLog,
    /// A rig.
    Rig,
    /// A risk.
    Risk,
    /// A trajectory.
    Trajectory,
    /// A tubular.
    Tubular,
    /// A wellbore geometry.
    WbGeometry,
}

impl ObjectType {
    /// Human-readable singular name used in job messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Well => "well",
            Self::Wellbore => "wellbore",
            Self::BhaRun => "bhaRun",
            Self::Log => "log",
            Self::Message => "message",
            Self::MudLog => "mudLog",
            Self::Rig => "rig",
            Self::Risk => "risk",
            Self::Trajectory => "trajectory",
            Self::Tubular => "tubular",
            Self::WbGeometry => "wbGeometry",
        }
    }

    /// Plural form used in bulk job messages.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Well => "wells",
            Self::Wellbore => "wellbores",
            Self::BhaRun => "bhaRuns",
            Self::Log => "logs",
            Self::Message => "messages",
            Self::MudLog => "mudLogs",
            Self::Rig => "rigs",
            Self::Risk => "risks",
            Self::Trajectory => "trajectories",
            Self::Tubular => "tubulars",
            Self::WbGeometry => "wbGeometries",
        }
    }

    /// Singular or plural form to follow `count`.
    pub fn noun(&self, count: usize) -> &'static str {
        if count == 1 { self.as_str() } else { self.plural() }
    }

    /// Whether objects of this type live inside a wellbore.
    pub fn is_wellbore_object(&self) -> bool {
        !matches!(self, Self::Well | Self::Wellbore)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A generic object as stored in a remote WITSML store.
///
/// Only the identifying fields are modelled; everything else is carried
/// opaquely in `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitsmlObject {
    /// Object type tag.
    pub object_type: ObjectType,
    /// Object uid. For wells and wellbores this is the well/wellbore uid.
    pub uid: String,
    /// Uid of the parent well (absent for wells).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_uid: Option<String>,
    /// Uid of the parent wellbore (absent for wells and wellbores).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellbore_uid: Option<String>,
    /// Object name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Name of the parent well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_name: Option<String>,
    /// Name of the parent wellbore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellbore_name: Option<String>,
    /// Remaining object fields.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl WitsmlObject {
    /// An id-only query/delete template for a well.
    pub fn well(uid: impl Into<String>) -> Self {
        Self::bare(ObjectType::Well, uid.into(), None, None)
    }

    /// An id-only query/delete template for a wellbore.
    pub fn wellbore(well_uid: impl Into<String>, uid: impl Into<String>) -> Self {
        Self::bare(ObjectType::Wellbore, uid.into(), Some(well_uid.into()), None)
    }

    /// An id-only query/delete template for an object inside a wellbore.
    pub fn child(
        object_type: ObjectType,
        well_uid: impl Into<String>,
        wellbore_uid: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self::bare(
            object_type,
            uid.into(),
            Some(well_uid.into()),
            Some(wellbore_uid.into()),
        )
    }

    fn bare(
        object_type: ObjectType,
        uid: String,
        well_uid: Option<String>,
        wellbore_uid: Option<String>,
    ) -> Self {
        Self {
            object_type,
            uid,
            well_uid,
            wellbore_uid,
            name: None,
            well_name: None,
            wellbore_name: None,
            properties: serde_json::Map::new(),
        }
    }

    /// Set the object name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The uid of the well this object belongs to (its own uid for wells).
    pub fn owning_well_uid(&self) -> Option<&str> {
        match self.object_type {
            ObjectType::Well => Some(self.uid.as_str()),
            _ => self.well_uid.as_deref(),
        }
    }

    /// The uid of the wellbore this object belongs to (its own uid for wellbores).
    pub fn owning_wellbore_uid(&self) -> Option<&str> {
        match self.object_type {
            ObjectType::Well => None,
            ObjectType::Wellbore => Some(self.uid.as_str()),
            _ => self.wellbore_uid.as_deref(),
        }
    }

    /// Storage key used by stores that index objects by their full path.
    pub fn path_key(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.object_type.as_str(),
            self.well_uid.as_deref().unwrap_or_default(),
            self.wellbore_uid.as_deref().unwrap_or_default(),
            self.uid
        )
    }
}
