//! Job payloads.
//!
//! Each payload implements [`JobPayload`] so that [`Job`](super::Job) can
//! describe itself without matching on every variant.

use serde::{Deserialize, Serialize};

use explorer_core::{AppError, AppResult};

use crate::object::{
    ObjectReference, ObjectReferences, ObjectType, WellReference, WellboreReference, WitsmlObject,
};

/// Common interface over job payloads.
pub trait JobPayload: std::fmt::Debug + Send + Sync {
    /// Identifying summary of the payload, without the job kind prefix.
    fn describe(&self) -> String;

    /// Name(s) of the object(s) the job acts on.
    fn object_name(&self) -> Option<String>;

    /// Name of the well the job acts in.
    fn well_name(&self) -> Option<String>;

    /// Name of the wellbore the job acts in.
    fn wellbore_name(&self) -> Option<String>;

    /// Check that every identifier needed for remote calls is present.
    fn validate(&self) -> AppResult<()>;
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_object(object: &WitsmlObject) -> AppResult<()> {
    require(&object.uid, "Uid")?;
    if object.object_type != ObjectType::Well {
        require(object.well_uid.as_deref().unwrap_or_default(), "WellUid")?;
    }
    if object.object_type.is_wellbore_object() {
        require(object.wellbore_uid.as_deref().unwrap_or_default(), "WellboreUid")?;
    }
    if let Some(name) = &object.name {
        require(name, "Name")?;
    }
    Ok(())
}

fn validate_references(refs: &ObjectReferences) -> AppResult<()> {
    require(&refs.well_uid, "WellUid")?;
    require(&refs.wellbore_uid, "WellboreUid")?;
    if refs.object_uids.is_empty() {
        return Err(AppError::validation("ObjectUids cannot be empty"));
    }
    for uid in &refs.object_uids {
        require(uid, "ObjectUid")?;
    }
    Ok(())
}

fn describe_references(refs: &ObjectReferences) -> String {
    format!(
        "WellUid: {}; WellboreUid: {}; Uids: {};",
        refs.well_uid,
        refs.wellbore_uid,
        refs.object_uids.join(", ")
    )
}

fn describe_object(object: &WitsmlObject) -> String {
    format!(
        "WellUid: {}; WellboreUid: {}; Uid: {};",
        object.owning_well_uid().unwrap_or_default(),
        object.owning_wellbore_uid().unwrap_or_default(),
        object.uid
    )
}

/// Delete one well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWellJob {
    /// The well to delete.
    pub to_delete: WellReference,
    /// Also delete every wellbore and object below the well.
    #[serde(default)]
    pub cascaded_delete: bool,
}

impl JobPayload for DeleteWellJob {
    fn describe(&self) -> String {
        format!("WellUid: {};", self.to_delete.well_uid)
    }

    fn object_name(&self) -> Option<String> {
        self.to_delete.well_name.clone()
    }

    fn well_name(&self) -> Option<String> {
        self.to_delete.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        None
    }

    fn validate(&self) -> AppResult<()> {
        require(&self.to_delete.well_uid, "WellUid")
    }
}

/// Delete one wellbore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWellboreJob {
    /// The wellbore to delete.
    pub to_delete: WellboreReference,
    /// Also delete every object below the wellbore.
    #[serde(default)]
    pub cascaded_delete: bool,
}

impl JobPayload for DeleteWellboreJob {
    fn describe(&self) -> String {
        format!(
            "WellUid: {}; WellboreUid: {};",
            self.to_delete.well_uid, self.to_delete.wellbore_uid
        )
    }

    fn object_name(&self) -> Option<String> {
        self.to_delete.wellbore_name.clone()
    }

    fn well_name(&self) -> Option<String> {
        self.to_delete.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.to_delete.wellbore_name.clone()
    }

    fn validate(&self) -> AppResult<()> {
        require(&self.to_delete.well_uid, "WellUid")?;
        require(&self.to_delete.wellbore_uid, "WellboreUid")
    }
}

/// Delete one object inside a wellbore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectJob {
    /// The object to delete.
    pub to_delete: ObjectReference,
}

impl JobPayload for DeleteObjectJob {
    fn describe(&self) -> String {
        format!(
            "WellUid: {}; WellboreUid: {}; Uid: {};",
            self.to_delete.well_uid, self.to_delete.wellbore_uid, self.to_delete.uid
        )
    }

    fn object_name(&self) -> Option<String> {
        self.to_delete.name.clone()
    }

    fn well_name(&self) -> Option<String> {
        self.to_delete.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.to_delete.wellbore_name.clone()
    }

    fn validate(&self) -> AppResult<()> {
        require(&self.to_delete.well_uid, "WellUid")?;
        require(&self.to_delete.wellbore_uid, "WellboreUid")?;
        require(&self.to_delete.uid, "Uid")
    }
}

/// Delete a set of sibling objects inside one wellbore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectsJob {
    /// The objects to delete.
    pub to_delete: ObjectReferences,
}

impl JobPayload for DeleteObjectsJob {
    fn describe(&self) -> String {
        describe_references(&self.to_delete)
    }

    fn object_name(&self) -> Option<String> {
        Some(self.to_delete.joined_names())
    }

    fn well_name(&self) -> Option<String> {
        self.to_delete.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.to_delete.wellbore_name.clone()
    }

    fn validate(&self) -> AppResult<()> {
        validate_references(&self.to_delete)
    }
}

/// Update an existing object with the fields present in `object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyObjectJob {
    /// The object carrying the changed fields.
    pub object: WitsmlObject,
}

impl JobPayload for ModifyObjectJob {
    fn describe(&self) -> String {
        describe_object(&self.object)
    }

    fn object_name(&self) -> Option<String> {
        self.object.name.clone()
    }

    fn well_name(&self) -> Option<String> {
        self.object.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.object.wellbore_name.clone()
    }

    fn validate(&self) -> AppResult<()> {
        require_object(&self.object)
    }
}

/// Create a new object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObjectJob {
    /// The object to create.
    pub object: WitsmlObject,
}

impl JobPayload for CreateObjectJob {
    fn describe(&self) -> String {
        describe_object(&self.object)
    }

    fn object_name(&self) -> Option<String> {
        self.object.name.clone()
    }

    fn well_name(&self) -> Option<String> {
        self.object.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.object.wellbore_name.clone()
    }

    fn validate(&self) -> AppResult<()> {
        require_object(&self.object)?;
        require(self.object.name.as_deref().unwrap_or_default(), "Name")
    }
}

/// Update several wells with the same or different field sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchModifyWellJob {
    /// The wells carrying the changed fields, in submission order.
    pub wells: Vec<WitsmlObject>,
}

impl JobPayload for BatchModifyWellJob {
    fn describe(&self) -> String {
        let uids: Vec<&str> = self.wells.iter().map(|w| w.uid.as_str()).collect();
        format!("WellUids: {};", uids.join(", "))
    }

    fn object_name(&self) -> Option<String> {
        let names: Vec<&str> = self
            .wells
            .iter()
            .map(|w| w.name.as_deref().unwrap_or(w.uid.as_str()))
            .collect();
        Some(names.join(", "))
    }

    fn well_name(&self) -> Option<String> {
        self.object_name()
    }

    fn wellbore_name(&self) -> Option<String> {
        None
    }

    fn validate(&self) -> AppResult<()> {
        if self.wells.is_empty() {
            return Err(AppError::validation("Wells cannot be empty"));
        }
        for well in &self.wells {
            require_object(well)?;
        }
        Ok(())
    }
}

/// Copy objects from a wellbore on the source server into a wellbore on the
/// target server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyObjectsJob {
    /// The objects to copy.
    pub source: ObjectReferences,
    /// The wellbore receiving the copies.
    pub target: WellboreReference,
}

impl JobPayload for CopyObjectsJob {
    fn describe(&self) -> String {
        format!(
            "Source - {}\t\nTarget - WellUid: {}; WellboreUid: {};",
            describe_references(&self.source),
            self.target.well_uid,
            self.target.wellbore_uid
        )
    }

    fn object_name(&self) -> Option<String> {
        Some(self.source.joined_names())
    }

    fn well_name(&self) -> Option<String> {
        self.target.well_name.clone()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.target.wellbore_name.clone()
    }

    fn validate(&self) -> AppResult<()> {
        validate_references(&self.source)?;
        require(&self.target.well_uid, "Target WellUid")?;
        require(&self.target.wellbore_uid, "Target WellboreUid")
    }
}

/// Delete objects in the target wellbore, then copy replacements into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceObjectsJob {
    /// Objects to remove first.
    pub delete_job: DeleteObjectsJob,
    /// Objects to copy in afterwards.
    pub copy_job: CopyObjectsJob,
}

impl JobPayload for ReplaceObjectsJob {
    fn describe(&self) -> String {
        format!(
            "{}\t\n{}",
            self.delete_job.describe(),
            self.copy_job.describe()
        )
    }

    fn object_name(&self) -> Option<String> {
        self.copy_job.object_name()
    }

    fn well_name(&self) -> Option<String> {
        self.copy_job.well_name()
    }

    fn wellbore_name(&self) -> Option<String> {
        self.copy_job.wellbore_name()
    }

    fn validate(&self) -> AppResult<()> {
        self.delete_job.validate()?;
        self.copy_job.validate()
    }
}
