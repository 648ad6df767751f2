#![allow(dead_code)]

use ferrum_elements::{model, Builder, Cardinality, FieldInfo, Node, TypeInfo, TypeKind};

/// Small element type with one single and one repeating primitive field.
pub static THING: TypeInfo = TypeInfo::new(
    "Thing",
    TypeKind::ComplexType,
    Some(&model::ELEMENT),
    &[
        FieldInfo::element("name", "string", Cardinality::OPTIONAL),
        FieldInfo::element("items", "string", Cardinality::MANY),
    ],
);

/// Resource with one required reference and one required choice.
pub static SAMPLE: TypeInfo = TypeInfo::new(
    "Sample",
    TypeKind::Resource,
    Some(&model::DOMAIN_RESOURCE),
    &[
        FieldInfo::reference("subject", &["Patient", "Group"], Cardinality::REQUIRED),
        FieldInfo::choice("effective", &["dateTime", "Period"], Cardinality::REQUIRED),
        FieldInfo::element("note", "Annotation", Cardinality::MANY),
    ],
);

pub fn string(value: &str) -> Node {
    model::string(value).expect("string fixture must build")
}

pub fn strings(values: &[&str]) -> Vec<Node> {
    values.iter().map(|value| string(value)).collect()
}

pub fn reference(literal: &str) -> Node {
    model::reference(literal).expect("reference fixture must build")
}

pub fn typed_reference(type_name: &str) -> Node {
    Builder::new(&model::REFERENCE)
        .string("type", type_name)
        .string("display", "typed only")
        .build()
        .expect("typed reference fixture must build")
}

pub fn concept(code: &str) -> Node {
    model::codeable_concept("http://snomed.info/sct", code).expect("concept fixture must build")
}

pub fn period(start: &str, end: &str) -> Node {
    Builder::new(&model::PERIOD)
        .string("start", start)
        .string("end", end)
        .build()
        .expect("period fixture must build")
}

pub fn extension(url: &str, value: bool) -> Node {
    Builder::new(&model::EXTENSION)
        .attribute("url", url)
        .boolean("value", value)
        .build()
        .expect("extension fixture must build")
}

pub fn member(entity: &str) -> Node {
    model::group::member()
        .set("entity", reference(entity))
        .build()
        .expect("member fixture must build")
}

/// A valid enumerated group of patients.
pub fn group_builder() -> Builder {
    model::group::builder()
        .id("g1")
        .boolean("active", true)
        .string("type", "person")
        .string("membership", "enumerated")
        .string("name", "Study cohort")
        .add("member", [member("Patient/p1"), member("Patient/p2")])
}

pub fn sample_builder() -> Builder {
    Builder::new(&SAMPLE)
        .set("subject", reference("Patient/p1"))
        .string("effective", "2024-02-01")
}
