//! Static type descriptors
//!
//! Every element type is described by a [`TypeInfo`]: its name, kind, base
//! type and the ordered table of fields it declares. Builders, validation
//! and traversal are all driven by these tables, so the declaration order
//! here is the traversal order everywhere else.

use crate::primitive::PrimitiveKind;
use serde::{Serialize, Serializer};
use std::sync::OnceLock;

/// Kind of FHIR type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    /// FHIR Resource (e.g., Group, Specimen)
    Resource,
    /// Complex datatype (e.g., Coding, Period, Reference)
    ComplexType,
    /// Primitive type (e.g., string, boolean, dateTime)
    PrimitiveType,
    /// Backbone element (nested complex element within a resource)
    BackboneElement,
}

/// Cardinality of a field (min..max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cardinality {
    /// Minimum occurrences
    pub min: u32,
    /// Maximum occurrences (None means unbounded/*)
    pub max: Option<u32>,
}

impl Cardinality {
    pub const OPTIONAL: Cardinality = Cardinality::new(0, Some(1));
    pub const REQUIRED: Cardinality = Cardinality::new(1, Some(1));
    pub const MANY: Cardinality = Cardinality::new(0, None);
    pub const AT_LEAST_ONE: Cardinality = Cardinality::new(1, None);

    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Check if this field is a list/array
    pub fn is_array(&self) -> bool {
        self.max.map(|m| m > 1).unwrap_or(true)
    }

    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }
}

/// What a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "types", rename_all = "kebab-case")]
pub enum FieldKind {
    /// A plain string carried on the element itself (`Element.id`, `Extension.url`).
    Attribute,
    /// A child element of one declared type (or a subtype of it).
    Element(&'static str),
    /// A child element whose type is exactly one of a fixed set.
    Choice(&'static [&'static str]),
    /// Any concrete resource (`DomainResource.contained`).
    Resource,
}

/// A field declared by a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    /// Allowed target resource types for `Reference` values held by this field.
    #[serde(skip_serializing_if = "no_targets")]
    pub targets: &'static [&'static str],
    /// Codes of a required value set binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<&'static [&'static str]>,
    pub is_modifier: bool,
}

impl FieldInfo {
    pub const fn new(name: &'static str, kind: FieldKind, cardinality: Cardinality) -> Self {
        Self {
            name,
            kind,
            cardinality,
            targets: &[],
            binding: None,
            is_modifier: false,
        }
    }

    pub const fn attribute(name: &'static str, cardinality: Cardinality) -> Self {
        Self::new(name, FieldKind::Attribute, cardinality)
    }

    pub const fn element(name: &'static str, type_name: &'static str, cardinality: Cardinality) -> Self {
        Self::new(name, FieldKind::Element(type_name), cardinality)
    }

    pub const fn choice(
        name: &'static str,
        types: &'static [&'static str],
        cardinality: Cardinality,
    ) -> Self {
        Self::new(name, FieldKind::Choice(types), cardinality)
    }

    pub const fn reference(
        name: &'static str,
        targets: &'static [&'static str],
        cardinality: Cardinality,
    ) -> Self {
        Self::new(name, FieldKind::Element("Reference"), cardinality).with_targets(targets)
    }

    pub const fn with_targets(self, targets: &'static [&'static str]) -> Self {
        Self { targets, ..self }
    }

    pub const fn with_binding(self, codes: &'static [&'static str]) -> Self {
        Self {
            binding: Some(codes),
            ..self
        }
    }

    pub const fn modifier(self) -> Self {
        Self {
            is_modifier: true,
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        self.cardinality.is_required()
    }

    pub fn is_repeating(&self) -> bool {
        self.cardinality.is_array()
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }

    pub fn is_reference(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Type names this field may hold, in declaration order.
    pub fn type_names(&self) -> &[&'static str] {
        match &self.kind {
            FieldKind::Choice(types) => types,
            FieldKind::Element(type_name) => std::slice::from_ref(type_name),
            FieldKind::Attribute | FieldKind::Resource => &[],
        }
    }
}

/// Descriptor of one element, backbone, primitive or resource type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub name: &'static str,
    pub kind: TypeKind,
    pub is_abstract: bool,
    #[serde(serialize_with = "serialize_base")]
    pub base: Option<&'static TypeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primitive: Option<PrimitiveKind>,
    /// Fields declared by this type itself (inherited fields live on `base`).
    pub fields: &'static [FieldInfo],
    #[serde(skip)]
    layout: OnceLock<Box<[&'static FieldInfo]>>,
}

impl TypeInfo {
    pub const fn new(
        name: &'static str,
        kind: TypeKind,
        base: Option<&'static TypeInfo>,
        fields: &'static [FieldInfo],
    ) -> Self {
        Self {
            name,
            kind,
            is_abstract: false,
            base,
            primitive: None,
            fields,
            layout: OnceLock::new(),
        }
    }

    pub const fn new_abstract(
        name: &'static str,
        kind: TypeKind,
        base: Option<&'static TypeInfo>,
        fields: &'static [FieldInfo],
    ) -> Self {
        Self {
            name,
            kind,
            is_abstract: true,
            base,
            primitive: None,
            fields,
            layout: OnceLock::new(),
        }
    }

    pub const fn new_primitive(
        name: &'static str,
        primitive: PrimitiveKind,
        base: &'static TypeInfo,
    ) -> Self {
        Self {
            name,
            kind: TypeKind::PrimitiveType,
            is_abstract: false,
            base: Some(base),
            primitive: Some(primitive),
            fields: &[],
            layout: OnceLock::new(),
        }
    }

    /// All fields in traversal order: ancestor fields first, then own fields.
    pub fn elements(&'static self) -> &'static [&'static FieldInfo] {
        self.layout.get_or_init(|| {
            let mut layout: Vec<&'static FieldInfo> = match self.base {
                Some(base) => base.elements().to_vec(),
                None => Vec::new(),
            };
            layout.extend(self.fields.iter());
            layout.into_boxed_slice()
        })
    }

    /// Position of a field within [`TypeInfo::elements`].
    pub fn index_of(&'static self, name: &str) -> Option<usize> {
        self.elements().iter().position(|f| f.name == name)
    }

    pub fn field(&'static self, name: &str) -> Option<&'static FieldInfo> {
        self.elements().iter().copied().find(|f| f.name == name)
    }

    /// Whether this type is `type_name` or derives from it.
    pub fn is_a(&self, type_name: &str) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty.name == type_name {
                return true;
            }
            current = ty.base;
        }
        false
    }

    pub fn is_resource(&self) -> bool {
        self.kind == TypeKind::Resource
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::PrimitiveType
    }

    pub fn is_backbone_element(&self) -> bool {
        self.kind == TypeKind::BackboneElement
    }

    /// Names of the ancestors of this type, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static str> {
        std::iter::successors(self.base, |ty| ty.base).map(|ty| ty.name)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.name == other.name
    }
}

impl Eq for TypeInfo {}

fn no_targets(targets: &&'static [&'static str]) -> bool {
    targets.is_empty()
}

fn serialize_base<S: Serializer>(
    base: &Option<&'static TypeInfo>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match base {
        Some(ty) => serializer.serialize_some(ty.name),
        None => serializer.serialize_none(),
    }
}
