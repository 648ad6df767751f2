//! Sealed element nodes
//!
//! A [`Node`] is the immutable product of `Builder::build`. It is a cheap,
//! reference-counted handle: cloning a node or deriving a builder from it
//! shares every unchanged subtree instead of copying it.

use crate::builder::Builder;
use crate::config::BuildOptions;
use crate::descriptor::{FieldInfo, TypeInfo, TypeKind};
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// Outcome of the shape rules for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Built with validation skipped; nothing is known about its shape.
    Unvalidated,
    /// Every rule passed.
    Valid,
    /// Built in record mode and a rule failed; see [`NodeData::violation`].
    Invalid,
}

/// Storage for one declared field of a sealed node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Empty,
    Text(String),
    One(Node),
    /// Never empty; an empty list is stored as `Empty`.
    Many(Arc<[Node]>),
}

/// Borrowed view of one field of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Empty,
    Text(&'a str),
    One(&'a Node),
    Many(&'a [Node]),
}

impl<'a> FieldValue<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The child nodes held by this field, in order.
    pub fn nodes(&self) -> &'a [Node] {
        match *self {
            Self::One(node) => std::slice::from_ref(node),
            Self::Many(nodes) => nodes,
            Self::Empty | Self::Text(_) => &[],
        }
    }
}

impl<'a> From<&'a Slot> for FieldValue<'a> {
    fn from(slot: &'a Slot) -> Self {
        match slot {
            Slot::Empty => Self::Empty,
            Slot::Text(text) => Self::Text(text),
            Slot::One(node) => Self::One(node),
            Slot::Many(nodes) => Self::Many(nodes),
        }
    }
}

/// The contents of a sealed node.
pub struct NodeData {
    type_info: &'static TypeInfo,
    value: Option<Primitive>,
    /// Parallel to `type_info.elements()`.
    slots: Box<[Slot]>,
    /// The options the node was built with; reused by `to_builder` and `validate`.
    options: BuildOptions,
    status: ValidationStatus,
    violation: Option<Error>,
    hash: OnceLock<u64>,
}

impl NodeData {
    pub(crate) fn new(
        type_info: &'static TypeInfo,
        value: Option<Primitive>,
        slots: Box<[Slot]>,
        options: BuildOptions,
    ) -> Self {
        debug_assert_eq!(slots.len(), type_info.elements().len());
        Self {
            type_info,
            value,
            slots,
            options,
            status: ValidationStatus::Unvalidated,
            violation: None,
            hash: OnceLock::new(),
        }
    }

    pub(crate) fn with_status(mut self, status: ValidationStatus, violation: Option<Error>) -> Self {
        self.status = status;
        self.violation = violation;
        self
    }

    pub(crate) fn into_node(self) -> Node {
        Node(Arc::new(self))
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn type_name(&self) -> &'static str {
        self.type_info.name
    }

    pub fn kind(&self) -> TypeKind {
        self.type_info.kind
    }

    pub fn is_resource(&self) -> bool {
        self.type_info.is_resource()
    }

    /// Whether this node's type is `type_name` or derives from it.
    pub fn is_a(&self, type_name: &str) -> bool {
        self.type_info.is_a(type_name)
    }

    /// The boxed host value of a primitive element.
    pub fn value(&self) -> Option<&Primitive> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The element id; for resources, the logical id.
    pub fn id(&self) -> Option<&str> {
        match self.field("id") {
            FieldValue::Text(id) => Some(id),
            FieldValue::One(node) => node.value().and_then(Primitive::as_str),
            _ => None,
        }
    }

    /// View of a declared field; unknown names read as empty.
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        match self.type_info.index_of(name) {
            Some(index) => FieldValue::from(&self.slots[index]),
            None => FieldValue::Empty,
        }
    }

    /// A single-valued child.
    pub fn get(&self, name: &str) -> Option<&Node> {
        match self.field(name) {
            FieldValue::One(node) => Some(node),
            _ => None,
        }
    }

    /// The read-only sequence held by a repeating field (empty when unset).
    pub fn list(&self, name: &str) -> &[Node] {
        match self.field(name) {
            FieldValue::Many(nodes) => nodes,
            _ => &[],
        }
    }

    /// A string attribute such as `Extension.url`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self.field(name) {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The primitive value of a single-valued child, e.g. `group.primitive("type")`.
    pub fn primitive(&self, name: &str) -> Option<&Primitive> {
        self.get(name).and_then(|node| node.value())
    }

    /// Every declared field, ancestor fields first.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldInfo, FieldValue<'_>)> {
        self.type_info
            .elements()
            .iter()
            .copied()
            .zip(self.slots.iter().map(FieldValue::from))
    }

    /// Whether any child element is present. String attributes do not count.
    pub fn has_children(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| matches!(slot, Slot::One(_) | Slot::Many(_)))
    }

    pub fn validation_status(&self) -> ValidationStatus {
        self.status
    }

    /// The rule violation recorded for an `Invalid` node.
    pub fn violation(&self) -> Option<&Error> {
        self.violation.as_ref()
    }

    /// Validate this node and every descendant not already known to be valid,
    /// each against the options it was built with.
    pub(crate) fn check_tree(&self) -> Result<()> {
        for (_, value) in self.fields() {
            for child in value.nodes() {
                if child.status != ValidationStatus::Valid {
                    child.check_tree()?;
                }
            }
        }
        crate::validate::check(self, &[], &self.options)
    }

    fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.type_info.name.hash(&mut hasher);
        self.value.hash(&mut hasher);
        self.slots.hash(&mut hasher);
        hasher.finish()
    }

    /// Structural hash, computed once and cached.
    pub fn structural_hash(&self) -> u64 {
        *self.hash.get_or_init(|| self.compute_hash())
    }
}

impl PartialEq for NodeData {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.hash.get(), other.hash.get()) {
            if a != b {
                return false;
            }
        }
        self.type_info == other.type_info && self.value == other.value && self.slots == other.slots
    }
}

impl Eq for NodeData {}

impl fmt::Debug for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_info.name);
        if let Some(value) = &self.value {
            out.field("value", value);
        }
        for (field, value) in self.fields() {
            if !value.is_empty() {
                out.field(field.name, &value);
            }
        }
        out.finish()
    }
}

/// An immutable, shareable element tree node.
///
/// Safe for unsynchronized concurrent reads, traversal, equality and hashing.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Start a builder seeded with this node's fields.
    pub fn to_builder(&self) -> Builder {
        Builder::from(self)
    }

    /// Re-run validation and return a copy marked valid.
    ///
    /// Descendants that were not built valid are checked too. Children are
    /// shared with `self`, which is left untouched.
    pub fn validated(&self) -> Result<Node> {
        self.check_tree()?;
        Ok(NodeData::new(
            self.type_info,
            self.value.clone(),
            self.slots.clone(),
            self.options,
        )
        .with_status(ValidationStatus::Valid, None)
            .into_node())
    }

    /// Whether both handles point at the same sealed node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Node {
    type Target = NodeData;

    fn deref(&self) -> &NodeData {
        &self.0
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0 == *other.0
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
