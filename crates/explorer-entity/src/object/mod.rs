//! Remote store objects and references to them.

pub mod model;
pub mod reference;

pub use model::{ObjectType, WitsmlObject};
pub use reference::{ObjectReference, ObjectReferences, WellReference, WellboreReference};
