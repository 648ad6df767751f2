//! FHIR element builders and validation
//!
//! This crate builds immutable FHIR element trees from static type
//! descriptors and checks their shape as they are built.
//!
//! # Module Organization
//!
//! - `descriptor`: static `TypeInfo`/`FieldInfo` tables (cardinality, choice types,
//!   reference targets, required bindings)
//! - `model`: the representative R5 descriptors (`Group`, `Specimen` and the data types they use)
//! - `builder`: mutable drafts that seal into `Node`s
//! - `validate`: the shape rules run by `Builder::build`
//! - `visit`: read-only, descriptor-driven tree traversal
//! - `registry`: type name to descriptor lookup
//!
//! # Example
//!
//! ```rust
//! use ferrum_elements::{model, ValidationStatus};
//!
//! let member = model::group::member()
//!     .set("entity", model::reference("Patient/p1")?)
//!     .build()?;
//!
//! let group = model::group::builder()
//!     .id("g1")
//!     .string("type", "person")
//!     .string("membership", "enumerated")
//!     .add("member", [member])
//!     .build()?;
//!
//! assert_eq!(group.validation_status(), ValidationStatus::Valid);
//! assert_eq!(group.to_builder().build()?, group);
//! # Ok::<(), ferrum_elements::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod node;
pub mod primitive;
pub mod registry;
pub mod traits;
pub mod validate;
pub mod visit;

pub use builder::Builder;
pub use config::{BuildOptions, ValidationMode};
pub use descriptor::{Cardinality, FieldInfo, FieldKind, TypeInfo, TypeKind};
pub use error::{Error, IssueCode, Result};
pub use node::{FieldValue, Node, NodeData, ValidationStatus};
pub use primitive::{Primitive, PrimitiveKind, Repr};
pub use traits::{HasExtensions, HasId, HasModifierExtensions, Validatable, Visitable};
pub use visit::{collect, walk, Segment, VisitContext, Visitor, Walk};
