//! `Specimen` resource: a sample to be used for analysis.

use super::base::{BACKBONE_ELEMENT, DOMAIN_RESOURCE};
use crate::builder::Builder;
use crate::descriptor::{Cardinality, FieldInfo, TypeInfo, TypeKind};

pub static SPECIMEN: TypeInfo = TypeInfo::new(
    "Specimen",
    TypeKind::Resource,
    Some(&DOMAIN_RESOURCE),
    &[
        FieldInfo::element("identifier", "Identifier", Cardinality::MANY),
        FieldInfo::element("accessionIdentifier", "Identifier", Cardinality::OPTIONAL),
        FieldInfo::element("status", "code", Cardinality::OPTIONAL)
            .with_binding(&["available", "unavailable", "unsatisfactory", "entered-in-error"])
            .modifier(),
        FieldInfo::element("type", "CodeableConcept", Cardinality::OPTIONAL),
        FieldInfo::reference(
            "subject",
            &[
                "Patient",
                "Group",
                "Device",
                "BiologicallyDerivedProduct",
                "Substance",
                "Location",
            ],
            Cardinality::OPTIONAL,
        ),
        FieldInfo::element("receivedTime", "dateTime", Cardinality::OPTIONAL),
        FieldInfo::reference("parent", &["Specimen"], Cardinality::MANY),
        FieldInfo::reference("request", &["ServiceRequest"], Cardinality::MANY),
        FieldInfo::element("combined", "code", Cardinality::OPTIONAL)
            .with_binding(&["grouped", "pooled"]),
        FieldInfo::element("role", "CodeableConcept", Cardinality::MANY),
        FieldInfo::element("feature", "Specimen.feature", Cardinality::MANY),
        FieldInfo::element("collection", "Specimen.collection", Cardinality::OPTIONAL),
        FieldInfo::element("processing", "Specimen.processing", Cardinality::MANY),
        FieldInfo::element("container", "Specimen.container", Cardinality::MANY),
        FieldInfo::element("condition", "CodeableConcept", Cardinality::MANY),
        FieldInfo::element("note", "Annotation", Cardinality::MANY),
    ],
);

pub static SPECIMEN_FEATURE: TypeInfo = TypeInfo::new(
    "Specimen.feature",
    TypeKind::BackboneElement,
    Some(&BACKBONE_ELEMENT),
    &[
        FieldInfo::element("type", "CodeableConcept", Cardinality::REQUIRED),
        FieldInfo::element("description", "string", Cardinality::REQUIRED),
    ],
);

pub static SPECIMEN_COLLECTION: TypeInfo = TypeInfo::new(
    "Specimen.collection",
    TypeKind::BackboneElement,
    Some(&BACKBONE_ELEMENT),
    &[
        FieldInfo::reference(
            "collector",
            &["Practitioner", "PractitionerRole", "Patient", "RelatedPerson"],
            Cardinality::OPTIONAL,
        ),
        FieldInfo::choice("collected", &["dateTime", "Period"], Cardinality::OPTIONAL),
        FieldInfo::element("duration", "Duration", Cardinality::OPTIONAL),
        FieldInfo::element("quantity", "Quantity", Cardinality::OPTIONAL),
        FieldInfo::element("method", "CodeableConcept", Cardinality::OPTIONAL),
        FieldInfo::element("device", "CodeableReference", Cardinality::OPTIONAL)
            .with_targets(&["Device"]),
        FieldInfo::reference("procedure", &["Procedure"], Cardinality::OPTIONAL),
        FieldInfo::element("bodySite", "CodeableReference", Cardinality::OPTIONAL)
            .with_targets(&["BodyStructure"]),
        FieldInfo::choice(
            "fastingStatus",
            &["CodeableConcept", "Duration"],
            Cardinality::OPTIONAL,
        ),
    ],
);

pub static SPECIMEN_PROCESSING: TypeInfo = TypeInfo::new(
    "Specimen.processing",
    TypeKind::BackboneElement,
    Some(&BACKBONE_ELEMENT),
    &[
        FieldInfo::element("description", "string", Cardinality::OPTIONAL),
        FieldInfo::element("method", "CodeableConcept", Cardinality::OPTIONAL),
        FieldInfo::reference("additive", &["Substance"], Cardinality::MANY),
        FieldInfo::choice("time", &["dateTime", "Period"], Cardinality::OPTIONAL),
    ],
);

pub static SPECIMEN_CONTAINER: TypeInfo = TypeInfo::new(
    "Specimen.container",
    TypeKind::BackboneElement,
    Some(&BACKBONE_ELEMENT),
    &[
        FieldInfo::reference("device", &["Device"], Cardinality::REQUIRED),
        FieldInfo::reference("location", &["Location"], Cardinality::OPTIONAL),
        FieldInfo::element("specimenQuantity", "Quantity", Cardinality::OPTIONAL),
    ],
);

pub fn builder() -> Builder {
    Builder::new(&SPECIMEN)
}

pub fn feature() -> Builder {
    Builder::new(&SPECIMEN_FEATURE)
}

pub fn collection() -> Builder {
    Builder::new(&SPECIMEN_COLLECTION)
}

pub fn processing() -> Builder {
    Builder::new(&SPECIMEN_PROCESSING)
}

pub fn container() -> Builder {
    Builder::new(&SPECIMEN_CONTAINER)
}
