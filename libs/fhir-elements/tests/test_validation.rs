//! Shape rules, validation modes and error reporting

use ferrum_elements::{
    model, BuildOptions, Builder, Error, IssueCode, Node, Validatable, ValidationMode,
    ValidationStatus,
};

mod test_support;
use test_support::*;

#[test]
fn test_required_field_missing() {
    let err = Builder::new(&SAMPLE)
        .string("effective", "2024-02-01")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::MissingElement {
            element: "Sample.subject".to_string()
        }
    );
    assert_eq!(err.code(), IssueCode::Required);
}

#[test]
fn test_required_field_present() {
    let sample = sample_builder().build().unwrap();
    assert_eq!(sample.validation_status(), ValidationStatus::Valid);
}

#[test]
fn test_required_list_must_not_be_empty() {
    static TEAM: ferrum_elements::TypeInfo = ferrum_elements::TypeInfo::new(
        "Team",
        ferrum_elements::TypeKind::ComplexType,
        Some(&model::ELEMENT),
        &[ferrum_elements::FieldInfo::element(
            "player",
            "string",
            ferrum_elements::Cardinality::AT_LEAST_ONE,
        )],
    );

    let err = Builder::new(&TEAM).id("t").build().unwrap_err();
    assert!(matches!(err, Error::MissingElement { .. }));

    let err = Builder::new(&TEAM)
        .replace("player", Some(Vec::<Node>::new()))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::MissingElement { .. }));

    assert!(Builder::new(&TEAM).add("player", [string("p")]).build().is_ok());
}

#[test]
fn test_choice_allowed_shapes() {
    assert!(sample_builder().build().is_ok());
    assert!(sample_builder()
        .set("effective", period("2024-02-01", "2024-02-03"))
        .build()
        .is_ok());
}

#[test]
fn test_choice_disallowed_shape_names_field_and_types() {
    let err = sample_builder()
        .set("effective", concept("260385009"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidChoice {
            element: "Sample.effective".to_string(),
            actual: "CodeableConcept",
            allowed: vec!["dateTime", "Period"],
        }
    );
    let message = err.to_string();
    assert!(message.contains("Sample.effective"));
    assert!(message.contains("dateTime"));
    assert!(message.contains("Period"));
}

#[test]
fn test_typed_field_rejects_other_type() {
    let err = sample_builder()
        .set("subject", concept("x"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidType {
            element: "Sample.subject".to_string(),
            expected: "Reference",
            actual: "CodeableConcept",
        }
    );
}

#[test]
fn test_contained_must_be_resources() {
    let err = sample_builder()
        .add("contained", [string("not a resource")])
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidType { expected: "Resource", .. }));

    let contained = group_builder().build().unwrap();
    let sample = sample_builder()
        .add("contained", [contained])
        .set("subject", reference("#g1"))
        .build()
        .unwrap();
    assert_eq!(sample.list("contained").len(), 1);
}

#[test]
fn test_null_entry_names_field_and_index() {
    let err = Builder::new(&THING)
        .replace("items", Some(vec![Some(string("a")), None, Some(string("c"))]))
        .unwrap()
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::NullEntry {
            element: "Thing.items".to_string(),
            index: 1
        }
    );
}

#[test]
fn test_null_entry_fails_regardless_of_cardinality() {
    let err = group_builder()
        .add("identifier", [None::<Node>])
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::NullEntry { index: 0, .. }));
}

#[test]
fn test_reference_allow_list() {
    let err = sample_builder()
        .set("subject", reference("Encounter/e1"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidReferenceType {
            element: "Sample.subject".to_string(),
            actual: "Encounter".to_string(),
            allowed: vec!["Patient", "Group"],
        }
    );

    for ok in ["Patient/p1", "Group/g1", "#contained", "urn:uuid:0b0b1b2a-1c3d-4e5f-8a9b-0c1d2e3f4a5b"] {
        assert!(
            sample_builder().set("subject", reference(ok)).build().is_ok(),
            "{ok}"
        );
    }
}

#[test]
fn test_reference_type_element_is_checked() {
    let err = sample_builder()
        .set("subject", typed_reference("Encounter"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidReferenceType { .. }));

    assert!(sample_builder()
        .set(
            "subject",
            typed_reference("http://hl7.org/fhir/StructureDefinition/Patient")
        )
        .build()
        .is_ok());
}

#[test]
fn test_untyped_reference_passes() {
    let display_only = Builder::new(&model::REFERENCE)
        .string("display", "Someone")
        .build()
        .unwrap();
    assert!(sample_builder().set("subject", display_only).build().is_ok());
}

#[test]
fn test_reference_checks_can_be_disabled() {
    let options = BuildOptions::default().with_reference_type_checks(false);
    let sample = sample_builder()
        .options(options)
        .set("subject", reference("Encounter/e1"))
        .build()
        .unwrap();
    assert_eq!(sample.validation_status(), ValidationStatus::Valid);
}

#[test]
fn test_binding_checks_can_be_disabled() {
    assert!(group_builder().string("type", "robot").build().is_err());

    let group = group_builder()
        .options(BuildOptions::default().with_binding_checks(false))
        .string("type", "robot")
        .build()
        .unwrap();
    assert_eq!(group.primitive("type").and_then(|v| v.as_str()), Some("robot"));
}

#[test]
fn test_record_mode_attaches_violation() {
    let sample = Builder::new(&SAMPLE)
        .validation(ValidationMode::Record)
        .set("subject", reference("Encounter/e1"))
        .build()
        .unwrap();

    assert_eq!(sample.validation_status(), ValidationStatus::Invalid);
    assert_eq!(
        sample.violation(),
        Some(&Error::MissingElement {
            element: "Sample.effective".to_string()
        })
    );
    assert!(!sample.is_valid());
}

#[test]
fn test_record_mode_drops_null_entries_from_sealed_list() {
    let thing = Builder::new(&THING)
        .validation(ValidationMode::Record)
        .add("items", [Some(string("a")), None])
        .build()
        .unwrap();
    assert_eq!(thing.validation_status(), ValidationStatus::Invalid);
    assert_eq!(thing.list("items").len(), 1);
}

#[test]
fn test_record_mode_reports_wrapped_primitive_failure() {
    let sample = sample_builder()
        .validation(ValidationMode::Record)
        .string("effective", "someday")
        .build()
        .unwrap();
    assert!(matches!(
        sample.violation(),
        Some(Error::InvalidPrimitive { type_name: "dateTime", .. })
    ));
    assert_eq!(
        sample.get("effective").unwrap().validation_status(),
        ValidationStatus::Invalid
    );
}

#[test]
fn test_skip_mode_builds_unvalidated() {
    let sample = Builder::new(&SAMPLE)
        .options(BuildOptions::unchecked())
        .add("note", [None::<Node>])
        .build()
        .unwrap();
    assert_eq!(sample.validation_status(), ValidationStatus::Unvalidated);
    assert!(sample.violation().is_none());
    assert!(sample.list("note").is_empty());
}

#[test]
fn test_validated_promotes_unvalidated_node() {
    let sample = sample_builder()
        .options(BuildOptions::unchecked())
        .build()
        .unwrap();
    assert_eq!(sample.validation_status(), ValidationStatus::Unvalidated);

    let promoted = sample.validated().unwrap();
    assert_eq!(promoted.validation_status(), ValidationStatus::Valid);
    assert_eq!(promoted, sample);
    assert_eq!(sample.validation_status(), ValidationStatus::Unvalidated);

    let broken = Builder::new(&SAMPLE)
        .options(BuildOptions::unchecked())
        .build()
        .unwrap();
    assert!(broken.validated().is_err());
    assert!(broken.validate().is_err());
}

#[test]
fn test_options_from_json() {
    let options = BuildOptions::from_json_str(r#"{"validation": "skip"}"#).unwrap();
    let sample = Builder::new(&SAMPLE).options(options).build().unwrap();
    assert_eq!(sample.validation_status(), ValidationStatus::Unvalidated);
}

#[test]
fn test_invalid_primitive_values() {
    let err = Builder::new(&model::POSITIVE_INT).value(0).build().unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { type_name: "positiveInt", .. }));

    let err = group_builder().integer("quantity", -1).build().unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { type_name: "unsignedInt", .. }));

    let err = Builder::new(&model::BOOLEAN).value("true").build().unwrap_err();
    assert_eq!(err.code(), IssueCode::Value);
}

#[test]
fn test_empty_backbone_element() {
    let err = model::specimen::processing().build().unwrap_err();
    assert_eq!(
        err,
        Error::EmptyElement {
            type_name: "Specimen.processing"
        }
    );
}

#[test]
fn test_error_renders_operation_outcome() {
    let err = group_builder().string("membership", "sometimes").build().unwrap_err();
    let outcome = err.to_operation_outcome();
    assert_eq!(outcome["resourceType"], "OperationOutcome");
    assert_eq!(outcome["issue"][0]["code"], "code-invalid");
    assert_eq!(outcome["issue"][0]["expression"][0], "Group.membership");
}

#[test]
fn test_end_to_end_minimal_instance() {
    let sample = sample_builder().build().unwrap();
    assert!(sample.has_children());
    assert_eq!(sample, sample_builder().build().unwrap());
    assert_eq!(sample, sample.to_builder().build().unwrap());

    let err = sample.to_builder().clear("effective").build().unwrap_err();
    assert_eq!(err.element(), Some("Sample.effective"));
}

#[test]
fn test_enforce_parent_checks_unvalidated_children() {
    let empty_period = Builder::new(&model::PERIOD)
        .options(BuildOptions::unchecked())
        .build()
        .unwrap();
    let err = sample_builder()
        .set("effective", empty_period.clone())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::EmptyElement { type_name: "Period" });

    let unchecked_period = Builder::new(&model::PERIOD)
        .options(BuildOptions::unchecked())
        .string("start", "2024-02-01")
        .build()
        .unwrap();
    let sample = sample_builder()
        .set("effective", unchecked_period)
        .build()
        .unwrap();
    assert_eq!(sample.validation_status(), ValidationStatus::Valid);
    assert_eq!(
        sample.get("effective").unwrap().validation_status(),
        ValidationStatus::Valid
    );
    assert!(sample.validate().is_ok());

    // Skip-mode parents keep unchecked children as they are; promotion finds them.
    let sample = sample_builder()
        .options(BuildOptions::unchecked())
        .set("effective", empty_period)
        .build()
        .unwrap();
    assert_eq!(
        sample.validated().unwrap_err(),
        Error::EmptyElement { type_name: "Period" }
    );
}

#[test]
fn test_invalid_child_fails_enforce_parent() {
    let coding = Builder::new(&model::CODING)
        .validation(ValidationMode::Record)
        .string("code", " bad  code ")
        .build()
        .unwrap();
    assert_eq!(coding.validation_status(), ValidationStatus::Invalid);

    let err = Builder::new(&model::CODEABLE_CONCEPT)
        .add("coding", [coding.clone()])
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPrimitive { type_name: "code", .. }));
    assert_eq!(Some(&err), coding.violation());

    let concept = Builder::new(&model::CODEABLE_CONCEPT)
        .validation(ValidationMode::Record)
        .add("coding", [coding.clone()])
        .build()
        .unwrap();
    assert_eq!(concept.validation_status(), ValidationStatus::Invalid);
    assert_eq!(concept.violation(), coding.violation());
    assert!(!concept.is_valid());
    assert!(concept.validate().is_err());
}

#[test]
fn test_relaxed_options_survive_round_trip() {
    let group = group_builder()
        .options(BuildOptions::default().with_binding_checks(false))
        .string("type", "robot")
        .build()
        .unwrap();
    assert_eq!(group.validation_status(), ValidationStatus::Valid);
    assert!(group.validate().is_ok());
    assert!(group.validated().is_ok());

    let rebuilt = group.to_builder().build().unwrap();
    assert_eq!(rebuilt, group);
    assert_eq!(rebuilt.options(), group.options());

    let sample = sample_builder()
        .options(BuildOptions::default().with_reference_type_checks(false))
        .set("subject", reference("Encounter/e1"))
        .build()
        .unwrap();
    assert!(sample.validate().is_ok());
    assert_eq!(sample.to_builder().build().unwrap(), sample);
}

#[test]
fn test_required_list_of_only_null_entries_reports_null_entry() {
    static ROSTER: ferrum_elements::TypeInfo = ferrum_elements::TypeInfo::new(
        "Roster",
        ferrum_elements::TypeKind::ComplexType,
        Some(&model::ELEMENT),
        &[ferrum_elements::FieldInfo::element(
            "player",
            "string",
            ferrum_elements::Cardinality::AT_LEAST_ONE,
        )],
    );
    let err = Builder::new(&ROSTER)
        .add("player", [None::<Node>, None])
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        Error::NullEntry {
            element: "Roster.player".to_string(),
            index: 0
        }
    );
}
