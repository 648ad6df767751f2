//! `Group` resource: a set of people, animals, devices or other entities
//! that are collectively considered together.

use super::base::{BACKBONE_ELEMENT, DOMAIN_RESOURCE};
use crate::builder::Builder;
use crate::descriptor::{Cardinality, FieldInfo, TypeInfo, TypeKind};

pub static GROUP: TypeInfo = TypeInfo::new(
    "Group",
    TypeKind::Resource,
    Some(&DOMAIN_RESOURCE),
    &[
        FieldInfo::element("identifier", "Identifier", Cardinality::MANY),
        FieldInfo::element("active", "boolean", Cardinality::OPTIONAL),
        FieldInfo::element("type", "code", Cardinality::REQUIRED).with_binding(&[
            "person",
            "animal",
            "practitioner",
            "device",
            "careteam",
            "healthcareservice",
            "location",
            "organization",
            "relatedperson",
            "specimen",
        ]),
        FieldInfo::element("membership", "code", Cardinality::REQUIRED)
            .with_binding(&["definitional", "enumerated"]),
        FieldInfo::element("code", "CodeableConcept", Cardinality::OPTIONAL),
        FieldInfo::element("name", "string", Cardinality::OPTIONAL),
        FieldInfo::element("description", "markdown", Cardinality::OPTIONAL),
        FieldInfo::element("quantity", "unsignedInt", Cardinality::OPTIONAL),
        FieldInfo::reference(
            "managingEntity",
            &["Organization", "RelatedPerson", "Practitioner", "PractitionerRole"],
            Cardinality::OPTIONAL,
        ),
        FieldInfo::element("characteristic", "Group.characteristic", Cardinality::MANY),
        FieldInfo::element("member", "Group.member", Cardinality::MANY),
    ],
);

/// Include or exclude rule for membership of a definitional group.
pub static GROUP_CHARACTERISTIC: TypeInfo = TypeInfo::new(
    "Group.characteristic",
    TypeKind::BackboneElement,
    Some(&BACKBONE_ELEMENT),
    &[
        FieldInfo::element("code", "CodeableConcept", Cardinality::REQUIRED),
        FieldInfo::choice(
            "value",
            &["CodeableConcept", "boolean", "Quantity", "Range", "Reference"],
            Cardinality::REQUIRED,
        )
        .with_targets(&["Resource"]),
        FieldInfo::element("exclude", "boolean", Cardinality::REQUIRED),
        FieldInfo::element("description", "markdown", Cardinality::OPTIONAL),
        FieldInfo::element("method", "CodeableConcept", Cardinality::MANY),
        FieldInfo::element("period", "Period", Cardinality::OPTIONAL),
        FieldInfo::element("duration", "Duration", Cardinality::OPTIONAL),
    ],
);

pub static GROUP_MEMBER: TypeInfo = TypeInfo::new(
    "Group.member",
    TypeKind::BackboneElement,
    Some(&BACKBONE_ELEMENT),
    &[
        FieldInfo::reference(
            "entity",
            &[
                "CareTeam",
                "Device",
                "Group",
                "HealthcareService",
                "Location",
                "Organization",
                "Patient",
                "Practitioner",
                "PractitionerRole",
                "RelatedPerson",
                "Specimen",
            ],
            Cardinality::REQUIRED,
        ),
        FieldInfo::element("involvement", "CodeableConcept", Cardinality::MANY),
        FieldInfo::element("period", "Period", Cardinality::OPTIONAL),
        FieldInfo::element("inactive", "boolean", Cardinality::OPTIONAL),
    ],
);

pub fn builder() -> Builder {
    Builder::new(&GROUP)
}

pub fn characteristic() -> Builder {
    Builder::new(&GROUP_CHARACTERISTIC)
}

pub fn member() -> Builder {
    Builder::new(&GROUP_MEMBER)
}
