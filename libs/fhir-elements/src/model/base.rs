//! Abstract base types, `Extension` and the primitive types

use crate::descriptor::{Cardinality, FieldInfo, FieldKind, TypeInfo, TypeKind};
use crate::primitive::PrimitiveKind;

/// Base for all elements: `id` attribute and extensions.
pub static ELEMENT: TypeInfo = TypeInfo::new_abstract(
    "Element",
    TypeKind::ComplexType,
    None,
    &[
        FieldInfo::attribute("id", Cardinality::OPTIONAL),
        FieldInfo::element("extension", "Extension", Cardinality::MANY),
    ],
);

/// Base for elements nested inside resources.
pub static BACKBONE_ELEMENT: TypeInfo = TypeInfo::new_abstract(
    "BackboneElement",
    TypeKind::BackboneElement,
    Some(&ELEMENT),
    &[FieldInfo::element("modifierExtension", "Extension", Cardinality::MANY).modifier()],
);

pub static RESOURCE: TypeInfo = TypeInfo::new_abstract(
    "Resource",
    TypeKind::Resource,
    None,
    &[
        FieldInfo::element("id", "id", Cardinality::OPTIONAL),
        FieldInfo::element("meta", "Meta", Cardinality::OPTIONAL),
        FieldInfo::element("implicitRules", "uri", Cardinality::OPTIONAL).modifier(),
        FieldInfo::element("language", "code", Cardinality::OPTIONAL),
    ],
);

pub static DOMAIN_RESOURCE: TypeInfo = TypeInfo::new_abstract(
    "DomainResource",
    TypeKind::Resource,
    Some(&RESOURCE),
    &[
        FieldInfo::element("text", "Narrative", Cardinality::OPTIONAL),
        FieldInfo::new("contained", FieldKind::Resource, Cardinality::MANY),
        FieldInfo::element("extension", "Extension", Cardinality::MANY),
        FieldInfo::element("modifierExtension", "Extension", Cardinality::MANY).modifier(),
    ],
);

pub static EXTENSION: TypeInfo = TypeInfo::new(
    "Extension",
    TypeKind::ComplexType,
    Some(&ELEMENT),
    &[
        FieldInfo::attribute("url", Cardinality::REQUIRED),
        FieldInfo::choice(
            "value",
            &[
                "boolean",
                "integer",
                "decimal",
                "string",
                "code",
                "uri",
                "canonical",
                "date",
                "dateTime",
                "instant",
                "markdown",
                "Coding",
                "CodeableConcept",
                "Identifier",
                "Period",
                "Quantity",
                "Range",
                "Reference",
                "Annotation",
            ],
            Cardinality::OPTIONAL,
        )
        .with_targets(&["Resource"]),
    ],
);

pub static BOOLEAN: TypeInfo = TypeInfo::new_primitive("boolean", PrimitiveKind::Boolean, &ELEMENT);
pub static INTEGER: TypeInfo = TypeInfo::new_primitive("integer", PrimitiveKind::Integer, &ELEMENT);
pub static POSITIVE_INT: TypeInfo =
    TypeInfo::new_primitive("positiveInt", PrimitiveKind::PositiveInt, &INTEGER);
pub static UNSIGNED_INT: TypeInfo =
    TypeInfo::new_primitive("unsignedInt", PrimitiveKind::UnsignedInt, &INTEGER);
pub static DECIMAL: TypeInfo = TypeInfo::new_primitive("decimal", PrimitiveKind::Decimal, &ELEMENT);
pub static STRING: TypeInfo = TypeInfo::new_primitive("string", PrimitiveKind::String, &ELEMENT);
pub static MARKDOWN: TypeInfo = TypeInfo::new_primitive("markdown", PrimitiveKind::Markdown, &STRING);
pub static CODE: TypeInfo = TypeInfo::new_primitive("code", PrimitiveKind::Code, &STRING);
pub static ID: TypeInfo = TypeInfo::new_primitive("id", PrimitiveKind::Id, &STRING);
pub static URI: TypeInfo = TypeInfo::new_primitive("uri", PrimitiveKind::Uri, &ELEMENT);
pub static CANONICAL: TypeInfo = TypeInfo::new_primitive("canonical", PrimitiveKind::Canonical, &URI);
pub static DATE: TypeInfo = TypeInfo::new_primitive("date", PrimitiveKind::Date, &ELEMENT);
pub static DATE_TIME: TypeInfo = TypeInfo::new_primitive("dateTime", PrimitiveKind::DateTime, &ELEMENT);
pub static INSTANT: TypeInfo = TypeInfo::new_primitive("instant", PrimitiveKind::Instant, &ELEMENT);
pub static XHTML: TypeInfo = TypeInfo::new_primitive("xhtml", PrimitiveKind::Xhtml, &ELEMENT);
