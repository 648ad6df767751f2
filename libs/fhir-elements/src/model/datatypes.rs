//! Common complex data types
//!
//! Also provides small constructors for values that tests and callers build
//! over and over (codings, literal references, bare primitives).

use super::base::ELEMENT;
use crate::builder::Builder;
use crate::descriptor::{Cardinality, FieldInfo, TypeInfo, TypeKind};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::primitive::Primitive;
use crate::registry;

pub static CODING: TypeInfo = TypeInfo::new(
    "Coding",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("system", "uri", Cardinality::OPTIONAL),
        FieldInfo::element("version", "string", Cardinality::OPTIONAL),
        FieldInfo::element("code", "code", Cardinality::OPTIONAL),
        FieldInfo::element("display", "string", Cardinality::OPTIONAL),
        FieldInfo::element("userSelected", "boolean", Cardinality::OPTIONAL),
    ],
);

pub static CODEABLE_CONCEPT: TypeInfo = TypeInfo::new(
    "CodeableConcept",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("coding", "Coding", Cardinality::MANY),
        FieldInfo::element("text", "string", Cardinality::OPTIONAL),
    ],
);

/// A concept or a reference; targets are declared on the using field.
pub static CODEABLE_REFERENCE: TypeInfo = TypeInfo::new(
    "CodeableReference",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("concept", "CodeableConcept", Cardinality::OPTIONAL),
        FieldInfo::element("reference", "Reference", Cardinality::OPTIONAL),
    ],
);

pub static IDENTIFIER: TypeInfo = TypeInfo::new(
    "Identifier",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("use", "code", Cardinality::OPTIONAL)
            .with_binding(&["usual", "official", "temp", "secondary", "old"])
            .modifier(),
        FieldInfo::element("type", "CodeableConcept", Cardinality::OPTIONAL),
        FieldInfo::element("system", "uri", Cardinality::OPTIONAL),
        FieldInfo::element("value", "string", Cardinality::OPTIONAL),
        FieldInfo::element("period", "Period", Cardinality::OPTIONAL),
        FieldInfo::reference("assigner", &["Organization"], Cardinality::OPTIONAL),
    ],
);

pub static PERIOD: TypeInfo = TypeInfo::new(
    "Period",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("start", "dateTime", Cardinality::OPTIONAL),
        FieldInfo::element("end", "dateTime", Cardinality::OPTIONAL),
    ],
);

pub static QUANTITY: TypeInfo = TypeInfo::new(
    "Quantity",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("value", "decimal", Cardinality::OPTIONAL),
        FieldInfo::element("comparator", "code", Cardinality::OPTIONAL)
            .with_binding(&["<", "<=", ">=", ">", "ad"])
            .modifier(),
        FieldInfo::element("unit", "string", Cardinality::OPTIONAL),
        FieldInfo::element("system", "uri", Cardinality::OPTIONAL),
        FieldInfo::element("code", "code", Cardinality::OPTIONAL),
    ],
);

/// A length of time; a `Quantity` profile with no fields of its own.
pub static DURATION: TypeInfo = TypeInfo::new("Duration", TypeKind::ComplexType, Some(&QUANTITY), &[]);

pub static RANGE: TypeInfo = TypeInfo::new(
    "Range",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("low", "Quantity", Cardinality::OPTIONAL),
        FieldInfo::element("high", "Quantity", Cardinality::OPTIONAL),
    ],
);

pub static REFERENCE: TypeInfo = TypeInfo::new(
    "Reference",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("reference", "string", Cardinality::OPTIONAL),
        FieldInfo::element("type", "uri", Cardinality::OPTIONAL),
        FieldInfo::element("identifier", "Identifier", Cardinality::OPTIONAL),
        FieldInfo::element("display", "string", Cardinality::OPTIONAL),
    ],
);

pub static ANNOTATION: TypeInfo = TypeInfo::new(
    "Annotation",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::choice("author", &["Reference", "string"], Cardinality::OPTIONAL).with_targets(&[
            "Practitioner",
            "PractitionerRole",
            "Patient",
            "RelatedPerson",
            "Organization",
        ]),
        FieldInfo::element("time", "dateTime", Cardinality::OPTIONAL),
        FieldInfo::element("text", "markdown", Cardinality::REQUIRED),
    ],
);

pub static META: TypeInfo = TypeInfo::new(
    "Meta",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("versionId", "id", Cardinality::OPTIONAL),
        FieldInfo::element("lastUpdated", "instant", Cardinality::OPTIONAL),
        FieldInfo::element("source", "uri", Cardinality::OPTIONAL),
        FieldInfo::element("profile", "canonical", Cardinality::MANY),
        FieldInfo::element("security", "Coding", Cardinality::MANY),
        FieldInfo::element("tag", "Coding", Cardinality::MANY),
    ],
);

pub static NARRATIVE: TypeInfo = TypeInfo::new(
    "Narrative",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::element("status", "code", Cardinality::REQUIRED)
            .with_binding(&["generated", "extensions", "additional", "empty"]),
        FieldInfo::element("div", "xhtml", Cardinality::REQUIRED),
    ],
);

/// Build a bare primitive element of the named primitive type.
pub fn primitive(type_name: &str, value: impl Into<Primitive>) -> Result<Node> {
    let type_info = registry::type_info(type_name)
        .filter(|type_info| type_info.is_primitive())
        .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;
    Builder::new(type_info).value(value).build()
}

pub fn string(value: impl Into<String>) -> Result<Node> {
    primitive("string", Primitive::String(value.into()))
}

pub fn code(value: impl Into<String>) -> Result<Node> {
    primitive("code", Primitive::String(value.into()))
}

pub fn uri(value: impl Into<String>) -> Result<Node> {
    primitive("uri", Primitive::String(value.into()))
}

pub fn coding(system: &str, code: &str) -> Result<Node> {
    Builder::new(&CODING)
        .string("system", system)
        .string("code", code)
        .build()
}

pub fn codeable_concept(system: &str, code: &str) -> Result<Node> {
    Builder::new(&CODEABLE_CONCEPT)
        .add("coding", [coding(system, code)?])
        .build()
}

/// A literal reference such as `Patient/123`.
pub fn reference(literal: &str) -> Result<Node> {
    Builder::new(&REFERENCE).string("reference", literal).build()
}
