//! Capability traits implemented by [`Node`]

use crate::error::Result;
use crate::node::{Node, NodeData, ValidationStatus};
use crate::visit::{self, Visitor, Walk};

pub trait HasId {
    fn id(&self) -> Option<&str>;
}

pub trait HasExtensions {
    fn extensions(&self) -> &[Node];

    /// The first extension with the given url.
    fn extension(&self, url: &str) -> Option<&Node> {
        self.extensions()
            .iter()
            .find(|extension| extension.attribute("url") == Some(url))
    }
}

pub trait HasModifierExtensions: HasExtensions {
    fn modifier_extensions(&self) -> &[Node];
}

pub trait Validatable {
    fn validation_status(&self) -> ValidationStatus;

    /// Re-check the shape rules against this node and its unvalidated descendants.
    fn validate(&self) -> Result<()>;

    fn is_valid(&self) -> bool {
        self.validation_status() == ValidationStatus::Valid
    }
}

pub trait Visitable {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Walk;
}

impl HasId for Node {
    fn id(&self) -> Option<&str> {
        NodeData::id(self)
    }
}

impl HasExtensions for Node {
    fn extensions(&self) -> &[Node] {
        self.list("extension")
    }
}

impl HasModifierExtensions for Node {
    fn modifier_extensions(&self) -> &[Node] {
        self.list("modifierExtension")
    }
}

impl Validatable for Node {
    fn validation_status(&self) -> ValidationStatus {
        NodeData::validation_status(self)
    }

    fn validate(&self) -> Result<()> {
        self.check_tree()
    }
}

impl Visitable for Node {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Walk {
        visit::walk(self, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::model;
    use crate::ValidationMode;

    #[test]
    fn test_extension_lookup() {
        let extension = Builder::new(&model::EXTENSION)
            .attribute("url", "http://example.org/fhir/StructureDefinition/flag")
            .boolean("value", true)
            .build()
            .unwrap();
        let coding = Builder::new(&model::CODING)
            .string("code", "x")
            .add("extension", [extension.clone()])
            .build()
            .unwrap();

        assert_eq!(coding.extensions().len(), 1);
        assert_eq!(
            coding.extension("http://example.org/fhir/StructureDefinition/flag"),
            Some(&extension)
        );
        assert!(coding.extension("http://example.org/other").is_none());
        assert!(coding.modifier_extensions().is_empty());
    }

    #[test]
    fn test_validatable_on_unvalidated_node() {
        let empty = Builder::new(&model::PERIOD)
            .validation(ValidationMode::Skip)
            .build()
            .unwrap();
        assert!(!empty.is_valid());
        assert!(empty.validate().is_err());
        assert_eq!(HasId::id(&empty), None);
    }
}
