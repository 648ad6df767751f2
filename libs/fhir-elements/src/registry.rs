//! Type registry
//!
//! Maps FHIR type names to their descriptors. Uses a compile-time perfect hash
//! map (phf) so lookups never allocate.

use crate::descriptor::TypeInfo;
use crate::model;
use phf::phf_map;

static TYPES_BY_NAME: phf::Map<&'static str, &'static TypeInfo> = phf_map! {
    // Abstract bases
    "Element" => &model::ELEMENT,
    "BackboneElement" => &model::BACKBONE_ELEMENT,
    "Resource" => &model::RESOURCE,
    "DomainResource" => &model::DOMAIN_RESOURCE,

    // Primitives
    "boolean" => &model::BOOLEAN,
    "integer" => &model::INTEGER,
    "positiveInt" => &model::POSITIVE_INT,
    "unsignedInt" => &model::UNSIGNED_INT,
    "decimal" => &model::DECIMAL,
    "string" => &model::STRING,
    "markdown" => &model::MARKDOWN,
    "code" => &model::CODE,
    "id" => &model::ID,
    "uri" => &model::URI,
    "canonical" => &model::CANONICAL,
    "date" => &model::DATE,
    "dateTime" => &model::DATE_TIME,
    "instant" => &model::INSTANT,
    "xhtml" => &model::XHTML,

    // Complex types
    "Extension" => &model::EXTENSION,
    "Coding" => &model::CODING,
    "CodeableConcept" => &model::CODEABLE_CONCEPT,
    "CodeableReference" => &model::CODEABLE_REFERENCE,
    "Identifier" => &model::IDENTIFIER,
    "Period" => &model::PERIOD,
    "Quantity" => &model::QUANTITY,
    "Duration" => &model::DURATION,
    "Range" => &model::RANGE,
    "Reference" => &model::REFERENCE,
    "Annotation" => &model::ANNOTATION,
    "Meta" => &model::META,
    "Narrative" => &model::NARRATIVE,

    // Resources and their backbone elements
    "Group" => &model::GROUP,
    "Group.characteristic" => &model::GROUP_CHARACTERISTIC,
    "Group.member" => &model::GROUP_MEMBER,
    "Specimen" => &model::SPECIMEN,
    "Specimen.feature" => &model::SPECIMEN_FEATURE,
    "Specimen.collection" => &model::SPECIMEN_COLLECTION,
    "Specimen.processing" => &model::SPECIMEN_PROCESSING,
    "Specimen.container" => &model::SPECIMEN_CONTAINER,
};

pub fn type_info(name: &str) -> Option<&'static TypeInfo> {
    TYPES_BY_NAME.get(name).copied()
}

/// Descriptor of a concrete resource type.
pub fn resource_type(name: &str) -> Option<&'static TypeInfo> {
    type_info(name).filter(|ty| ty.is_resource() && !ty.is_abstract)
}

pub fn is_resource_type(name: &str) -> bool {
    resource_type(name).is_some()
}

/// Every registered descriptor, in no particular order.
pub fn types() -> impl Iterator<Item = &'static TypeInfo> {
    TYPES_BY_NAME.values().copied()
}

/// Names of the concrete resource types, sorted.
pub fn resource_types() -> Vec<&'static str> {
    let mut names: Vec<_> = types()
        .filter(|ty| ty.is_resource() && !ty.is_abstract)
        .map(|ty| ty.name)
        .collect();
    names.sort_unstable();
    names
}
