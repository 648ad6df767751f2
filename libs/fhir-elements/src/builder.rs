//! Element builders
//!
//! A [`Builder`] is the mutable draft of one node. Setters never fail: misuse
//! of the type's field table is remembered and reported by [`Builder::build`],
//! which seals the draft, runs validation according to its [`BuildOptions`]
//! and returns an immutable [`Node`].

use crate::config::{BuildOptions, ValidationMode};
use crate::descriptor::{FieldInfo, FieldKind, TypeInfo};
use crate::error::{Error, Result};
use crate::node::{Node, NodeData, Slot, ValidationStatus};
use crate::primitive::Primitive;
use crate::registry;
use crate::validate::{self, Hole};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, trace};

/// A child value waiting to be sealed.
#[derive(Debug, Clone)]
enum Pending {
    Node(Node),
    /// A host value wrapped by a convenience setter; sealed with the parent's options.
    Primitive(&'static TypeInfo, Primitive),
}

impl Pending {
    /// Seal a child and fold its validation status into the parent's.
    ///
    /// Outside skip mode an invalid child contributes its violation to
    /// `nested`, and an unvalidated child is checked against its own options
    /// and replaced by its validated copy.
    fn seal(self, options: &BuildOptions, nested: &mut Option<Error>) -> Result<Node> {
        let node = match self {
            Pending::Node(node) => node,
            Pending::Primitive(type_info, value) => Builder::new(type_info)
                .options(*options)
                .value(value)
                .build()?,
        };
        if options.validation == ValidationMode::Skip {
            return Ok(node);
        }

        match node.validation_status() {
            ValidationStatus::Valid => Ok(node),
            ValidationStatus::Invalid => {
                if let Some(violation) = node.violation() {
                    nested.get_or_insert_with(|| violation.clone());
                }
                Ok(node)
            }
            ValidationStatus::Unvalidated => match node.validated() {
                Ok(checked) => Ok(checked),
                Err(violation) => {
                    nested.get_or_insert(violation);
                    Ok(node)
                }
            },
        }
    }
}

#[derive(Debug, Clone)]
enum DraftSlot {
    Empty,
    Text(String),
    One(Pending),
    Many(Vec<Option<Pending>>),
}

impl From<&Slot> for DraftSlot {
    fn from(slot: &Slot) -> Self {
        match slot {
            Slot::Empty => DraftSlot::Empty,
            Slot::Text(text) => DraftSlot::Text(text.clone()),
            Slot::One(node) => DraftSlot::One(Pending::Node(node.clone())),
            Slot::Many(nodes) => DraftSlot::Many(
                nodes
                    .iter()
                    .map(|node| Some(Pending::Node(node.clone())))
                    .collect(),
            ),
        }
    }
}

/// Mutable draft of a node of one type.
#[derive(Debug, Clone)]
pub struct Builder {
    type_info: &'static TypeInfo,
    options: BuildOptions,
    value: Option<Primitive>,
    /// Parallel to `type_info.elements()`.
    slots: Vec<DraftSlot>,
    misuse: Option<Error>,
}

impl Builder {
    pub fn new(type_info: &'static TypeInfo) -> Self {
        Self {
            type_info,
            options: BuildOptions::default(),
            value: None,
            slots: vec![DraftSlot::Empty; type_info.elements().len()],
            misuse: None,
        }
    }

    /// Builder for a type looked up by name, e.g. `"Group.member"`.
    pub fn for_type(type_name: &str) -> Result<Self> {
        registry::type_info(type_name)
            .map(Self::new)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))
    }

    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.options.validation = mode;
        self
    }

    /// Set the element id, or the logical id of a resource.
    pub fn id(self, id: impl Into<String>) -> Self {
        if self.type_info.is_resource() {
            self.string("id", id)
        } else {
            self.attribute("id", id)
        }
    }

    /// Set a string attribute such as `Extension.url`.
    pub fn attribute(self, name: &str, value: impl Into<String>) -> Self {
        match self.lookup(name) {
            Ok((index, field)) if field.kind == FieldKind::Attribute => {
                self.put(index, DraftSlot::Text(value.into()))
            }
            Ok((_, field)) => {
                let expected = field.type_names().first().copied().unwrap_or("Resource");
                let element = self.element_name(field);
                self.misuse(Error::InvalidType {
                    element,
                    expected,
                    actual: "string",
                })
            }
            Err(err) => self.misuse(err),
        }
    }

    /// Set the host value of a primitive element.
    pub fn value(mut self, value: impl Into<Primitive>) -> Self {
        if !self.type_info.is_primitive() {
            let element = format!("{}.value", self.type_info.name);
            return self.misuse(Error::NotPrimitive { element });
        }
        self.value = Some(value.into());
        self
    }

    /// Set a single-valued child.
    pub fn set(self, name: &str, node: Node) -> Self {
        self.set_pending(name, Some(Pending::Node(node)))
    }

    /// Set or, with `None`, clear a single-valued child.
    pub fn set_opt(self, name: &str, node: Option<Node>) -> Self {
        self.set_pending(name, node.map(Pending::Node))
    }

    /// Clear any field.
    pub fn clear(self, name: &str) -> Self {
        match self.lookup(name) {
            Ok((index, _)) => self.put(index, DraftSlot::Empty),
            Err(err) => self.misuse(err),
        }
    }

    /// Append to a repeating field. `None` entries are kept and fail validation.
    pub fn add<I, T>(mut self, name: &str, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Node>>,
    {
        let index = match self.repeating(name) {
            Ok(index) => index,
            Err(err) => return self.misuse(err),
        };
        let pending = items.into_iter().map(|item| item.into().map(Pending::Node));
        match &mut self.slots[index] {
            DraftSlot::Many(list) => list.extend(pending),
            slot => *slot = DraftSlot::Many(pending.collect()),
        }
        self
    }

    /// Replace the whole content of a repeating field.
    ///
    /// Fails immediately when the collection itself is absent.
    pub fn replace<I, T>(self, name: &str, items: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Node>>,
    {
        match items {
            Some(items) => Ok(self.clear(name).add(name, items)),
            None => Err(Error::NullArgument {
                element: format!("{}.{}", self.type_info.name, name),
            }),
        }
    }

    pub fn boolean(self, name: &str, value: impl Into<Option<bool>>) -> Self {
        self.primitive(name, value.into().map(Primitive::from))
    }

    pub fn integer(self, name: &str, value: impl Into<Option<i32>>) -> Self {
        self.primitive(name, value.into().map(Primitive::from))
    }

    pub fn decimal(self, name: &str, value: impl Into<Option<Decimal>>) -> Self {
        self.primitive(name, value.into().map(Primitive::from))
    }

    pub fn string(self, name: &str, value: impl Into<String>) -> Self {
        self.primitive(name, Some(Primitive::String(value.into())))
    }

    /// Set or, with `None`, clear a string-valued field.
    pub fn string_opt(self, name: &str, value: Option<String>) -> Self {
        self.primitive(name, value.map(Primitive::String))
    }

    /// Wrap a host value into the field's primitive type.
    ///
    /// For choice fields the first allowed primitive type whose representation
    /// matches the value is used. `None` clears the field.
    pub fn primitive(self, name: &str, value: Option<Primitive>) -> Self {
        let (index, field) = match self.lookup(name) {
            Ok(found) => found,
            Err(err) => return self.misuse(err),
        };
        if field.is_repeating() {
            let element = self.element_name(field);
            return self.misuse(Error::Repeating { element });
        }
        let Some(value) = value else {
            return self.put(index, DraftSlot::Empty);
        };
        match wrapper_type(field, &value) {
            Some(type_info) => {
                self.put(index, DraftSlot::One(Pending::Primitive(type_info, value)))
            }
            None => {
                let element = self.element_name(field);
                self.misuse(Error::NotPrimitive { element })
            }
        }
    }

    /// Seal the draft and validate it according to the builder's options.
    pub fn build(self) -> Result<Node> {
        let Builder {
            type_info,
            options,
            value,
            slots,
            misuse,
        } = self;
        if let Some(err) = misuse {
            return Err(err);
        }

        let mut holes = Vec::new();
        let mut nested = None;
        let sealed = slots
            .into_iter()
            .zip(type_info.elements().iter().copied())
            .map(|(draft, field)| seal_slot(draft, field, &options, &mut holes, &mut nested))
            .collect::<Result<Vec<_>>>()?;

        let data = NodeData::new(type_info, value, sealed.into_boxed_slice(), options);
        trace!(type_name = type_info.name, mode = ?options.validation, "sealed node");

        if options.validation == ValidationMode::Skip {
            debug!(type_name = type_info.name, "validation skipped");
            return Ok(data.into_node());
        }

        // Child violations surface before the node's own rules.
        let outcome = match nested {
            Some(violation) => Err(violation),
            None => validate::check(&data, &holes, &options),
        };
        match outcome {
            Ok(()) => Ok(data.with_status(ValidationStatus::Valid, None).into_node()),
            Err(violation) if options.validation == ValidationMode::Record => {
                debug!(
                    type_name = type_info.name,
                    error = %violation,
                    "recorded invalid node"
                );
                Ok(data
                    .with_status(ValidationStatus::Invalid, Some(violation))
                    .into_node())
            }
            Err(violation) => Err(violation),
        }
    }

    fn lookup(&self, name: &str) -> Result<(usize, &'static FieldInfo)> {
        let type_info = self.type_info;
        type_info
            .index_of(name)
            .map(|index| (index, type_info.elements()[index]))
            .ok_or_else(|| Error::UnknownElement {
                type_name: type_info.name,
                element: name.to_string(),
            })
    }

    fn repeating(&self, name: &str) -> Result<usize> {
        let (index, field) = self.lookup(name)?;
        if field.is_repeating() {
            Ok(index)
        } else {
            Err(Error::NotRepeating {
                element: self.element_name(field),
            })
        }
    }

    fn set_pending(self, name: &str, pending: Option<Pending>) -> Self {
        let (index, field) = match self.lookup(name) {
            Ok(found) => found,
            Err(err) => return self.misuse(err),
        };
        if field.is_repeating() {
            let element = self.element_name(field);
            return self.misuse(Error::Repeating { element });
        }
        if let (FieldKind::Attribute, Some(Pending::Node(node))) = (field.kind, &pending) {
            let element = self.element_name(field);
            let actual = node.type_name();
            return self.misuse(Error::InvalidType {
                element,
                expected: "string",
                actual,
            });
        }
        let slot = pending.map_or(DraftSlot::Empty, DraftSlot::One);
        self.put(index, slot)
    }

    fn put(mut self, index: usize, slot: DraftSlot) -> Self {
        self.slots[index] = slot;
        self
    }

    fn misuse(mut self, err: Error) -> Self {
        self.misuse.get_or_insert(err);
        self
    }

    fn element_name(&self, field: &FieldInfo) -> String {
        format!("{}.{}", self.type_info.name, field.name)
    }
}

impl From<&Node> for Builder {
    /// Copies scalars, child handles and build options; repeating fields get
    /// fresh draft lists.
    fn from(node: &Node) -> Self {
        Self {
            type_info: node.type_info(),
            options: *node.options(),
            value: node.value().cloned(),
            slots: node.slots().iter().map(DraftSlot::from).collect(),
            misuse: None,
        }
    }
}

/// The primitive type a convenience setter wraps `value` into.
fn wrapper_type(field: &FieldInfo, value: &Primitive) -> Option<&'static TypeInfo> {
    let mut candidates = field
        .type_names()
        .iter()
        .filter_map(|name| registry::type_info(name))
        .filter(|type_info| type_info.is_primitive());

    match field.kind {
        // A single declared type is always used; a mismatched value fails validation.
        FieldKind::Element(_) => candidates.next(),
        FieldKind::Choice(_) => candidates
            .find(|type_info| type_info.primitive.map(|kind| kind.repr()) == Some(value.repr())),
        FieldKind::Attribute | FieldKind::Resource => None,
    }
}

fn seal_slot(
    draft: DraftSlot,
    field: &'static FieldInfo,
    options: &BuildOptions,
    holes: &mut Vec<Hole>,
    nested: &mut Option<Error>,
) -> Result<Slot> {
    let slot = match draft {
        DraftSlot::Empty => Slot::Empty,
        DraftSlot::Text(text) => Slot::Text(text),
        DraftSlot::One(pending) => Slot::One(pending.seal(options, nested)?),
        DraftSlot::Many(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Some(pending) => nodes.push(pending.seal(options, nested)?),
                    None => holes.push(Hole { field, index }),
                }
            }
            if nodes.is_empty() {
                Slot::Empty
            } else {
                Slot::Many(Arc::from(nodes))
            }
        }
    };
    Ok(slot)
}
