//! Shape validation
//!
//! Rules run rule-major over the fields of one sealed node, fields in layout
//! order, and the first violation wins:
//!
//! 1. required fields are present (required lists are non-empty)
//! 2. children have an allowed type (choice fields, typed fields, `contained`)
//! 3. repeating fields had no null entries
//! 4. typed references point at an allowed resource type
//! 5. non-resource elements carry a value, an id or children
//! 6. primitive values conform to their type
//! 7. coded values are members of their required binding
//!
//! `Builder::build` folds the status of each child into its parent, so only
//! one level is checked here.

use crate::config::BuildOptions;
use crate::descriptor::{FieldInfo, FieldKind, TypeInfo};
use crate::error::{Error, Result};
use crate::node::{FieldValue, NodeData};
use crate::primitive::Primitive;
use regex::Regex;
use std::sync::OnceLock;

/// Canonical prefix stripped from `Reference.type`.
const STRUCTURE_DEFINITION_PREFIX: &str = "http://hl7.org/fhir/StructureDefinition/";

/// A null entry dropped from a repeating field while sealing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hole {
    pub field: &'static FieldInfo,
    pub index: usize,
}

pub(crate) fn check(node: &NodeData, holes: &[Hole], options: &BuildOptions) -> Result<()> {
    let type_info = node.type_info();

    for (field, value) in node.fields() {
        // A required list that held only null entries is reported by rule 3.
        let had_holes = holes.iter().any(|hole| std::ptr::eq(hole.field, field));
        if field.is_required() && value.is_empty() && !had_holes {
            return Err(Error::MissingElement {
                element: element_name(type_info, field),
            });
        }
    }

    for (field, value) in node.fields() {
        check_shape(type_info, field, value)?;
    }

    if let Some(hole) = holes.first() {
        return Err(Error::NullEntry {
            element: element_name(type_info, hole.field),
            index: hole.index,
        });
    }

    if options.check_reference_types {
        for (field, value) in node.fields().filter(|(field, _)| field.is_reference()) {
            for reference in value.nodes().iter().filter_map(|child| reference_of(child)) {
                check_reference_type(type_info, field, reference)?;
            }
        }
    }

    if !type_info.is_resource()
        && !node.has_value()
        && node.id().is_none()
        && !node.has_children()
    {
        return Err(Error::EmptyElement {
            type_name: type_info.name,
        });
    }

    if let (Some(kind), Some(value)) = (type_info.primitive, node.value()) {
        kind.check(value).map_err(|reason| Error::InvalidPrimitive {
            type_name: type_info.name,
            value: value.to_string(),
            reason,
        })?;
    }

    if options.check_bindings {
        for (field, value) in node.fields() {
            let Some(codes) = field.binding else {
                continue;
            };
            for coded in value.nodes() {
                if let Some(code) = coded.value().and_then(Primitive::as_str) {
                    if !codes.iter().any(|allowed| *allowed == code) {
                        return Err(Error::InvalidCode {
                            element: element_name(type_info, field),
                            code: code.to_string(),
                            allowed: codes.to_vec(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

fn check_shape(type_info: &TypeInfo, field: &FieldInfo, value: FieldValue<'_>) -> Result<()> {
    for child in value.nodes() {
        match field.kind {
            FieldKind::Element(expected) if !child.is_a(expected) => {
                return Err(Error::InvalidType {
                    element: element_name(type_info, field),
                    expected,
                    actual: child.type_name(),
                });
            }
            FieldKind::Choice(allowed) if !allowed.iter().any(|name| child.is_a(name)) => {
                return Err(Error::InvalidChoice {
                    element: element_name(type_info, field),
                    actual: child.type_name(),
                    allowed: allowed.to_vec(),
                });
            }
            FieldKind::Resource if !child.is_resource() => {
                return Err(Error::InvalidType {
                    element: element_name(type_info, field),
                    expected: "Resource",
                    actual: child.type_name(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// The `Reference` held directly or through a `CodeableReference`.
fn reference_of(child: &NodeData) -> Option<&NodeData> {
    if child.is_a("Reference") {
        Some(child)
    } else if child.is_a("CodeableReference") {
        child.get("reference").map(|reference| &**reference)
    } else {
        None
    }
}

fn check_reference_type(type_info: &TypeInfo, field: &FieldInfo, reference: &NodeData) -> Result<()> {
    let Some(actual) = reference_type(reference) else {
        return Ok(());
    };
    if field
        .targets
        .iter()
        .any(|target| *target == "Resource" || *target == actual)
    {
        return Ok(());
    }
    Err(Error::InvalidReferenceType {
        element: element_name(type_info, field),
        actual: actual.to_string(),
        allowed: field.targets.to_vec(),
    })
}

/// The statically declared target type of a `Reference`, if any.
///
/// `Reference.type` wins over the type segment of a literal reference.
/// Contained (`#id`) and `urn:` references are untyped.
pub fn reference_type(reference: &NodeData) -> Option<&str> {
    if let Some(declared) = reference.primitive("type").and_then(Primitive::as_str) {
        return Some(
            declared
                .strip_prefix(STRUCTURE_DEFINITION_PREFIX)
                .unwrap_or(declared),
        );
    }

    let literal = reference.primitive("reference").and_then(Primitive::as_str)?;
    if literal.starts_with('#') || literal.starts_with("urn:") {
        return None;
    }
    literal_reference_regex()
        .captures(literal)
        .and_then(|captures| captures.name("type"))
        .map(|m| m.as_str())
}

fn literal_reference_regex() -> &'static Regex {
    static LITERAL_RE: OnceLock<Regex> = OnceLock::new();
    LITERAL_RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?:https?://|urn:)[^\s]*/)?(?P<type>[A-Z][A-Za-z]+)/[A-Za-z0-9\-.]{1,64}(?:/_history/[A-Za-z0-9\-.]{1,64})?$",
        )
        .expect("literal reference regex must compile")
    })
}

fn element_name(type_info: &TypeInfo, field: &FieldInfo) -> String {
    format!("{}.{}", type_info.name, field.name)
}
