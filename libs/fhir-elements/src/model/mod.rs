//! Representative FHIR R5 type descriptors
//!
//! Abstract bases, primitives and common data types are re-exported here;
//! resources keep their backbone descriptors and `builder()` entry points
//! in their own modules.

mod base;
mod datatypes;
pub mod group;
pub mod specimen;

pub use base::*;
pub use datatypes::*;
pub use group::{GROUP, GROUP_CHARACTERISTIC, GROUP_MEMBER};
pub use specimen::{
    SPECIMEN, SPECIMEN_COLLECTION, SPECIMEN_CONTAINER, SPECIMEN_FEATURE, SPECIMEN_PROCESSING,
};
