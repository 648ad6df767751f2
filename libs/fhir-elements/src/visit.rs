//! Visitor pattern for element tree traversal
//!
//! The walk is driven by each node's field table: the node itself is
//! entered, then every declared field in layout order (inherited fields
//! first), repeating fields in list order, then the node is left.

use crate::node::{FieldValue, Node};
use smallvec::SmallVec;
use std::fmt;

/// What the walk does after [`Visitor::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's fields.
    Continue,
    /// Skip the node's fields; `leave` is still called.
    SkipChildren,
    /// Abort the whole walk; no further callbacks are made.
    Stop,
}

/// One step of the path from the root to the visited element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub name: &'static str,
    pub index: Option<usize>,
}

/// Where a callback is in the tree.
#[derive(Debug, Clone, Copy)]
pub struct VisitContext<'a> {
    path: &'a [Segment],
}

impl<'a> VisitContext<'a> {
    /// Element name: the field name, or the type name for the root.
    pub fn name(&self) -> &'static str {
        self.last().name
    }

    /// Position within a repeating field.
    pub fn index(&self) -> Option<usize> {
        self.last().index
    }

    /// Zero for the root.
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    pub fn segments(&self) -> &'a [Segment] {
        self.path
    }

    fn last(&self) -> &'a Segment {
        &self.path[self.path.len() - 1]
    }
}

impl fmt::Display for VisitContext<'_> {
    /// Renders the path as `Group.member[1].entity`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.name)?;
            if let Some(index) = segment.index {
                write!(f, "[{}]", index)?;
            }
        }
        Ok(())
    }
}

/// Callbacks for a read-only tree walk. Every method has a no-op default.
pub trait Visitor {
    fn enter(&mut self, _ctx: &VisitContext<'_>, _node: &Node) -> Walk {
        Walk::Continue
    }

    fn leave(&mut self, _ctx: &VisitContext<'_>, _node: &Node) {}

    /// A string attribute such as `Element.id` or `Extension.url`.
    fn attribute(&mut self, _ctx: &VisitContext<'_>, _value: &str) {}
}

/// Walk `node` and its descendants.
///
/// Returns [`Walk::Stop`] if the visitor aborted, [`Walk::Continue`] otherwise.
pub fn walk<V: Visitor + ?Sized>(node: &Node, visitor: &mut V) -> Walk {
    let mut walker = Walker {
        path: SmallVec::new(),
    };
    walker.node(node, node.type_name(), None, visitor)
}

struct Walker {
    path: SmallVec<[Segment; 8]>,
}

impl Walker {
    fn context(&self) -> VisitContext<'_> {
        VisitContext { path: &self.path }
    }

    fn node<V: Visitor + ?Sized>(
        &mut self,
        node: &Node,
        name: &'static str,
        index: Option<usize>,
        visitor: &mut V,
    ) -> Walk {
        self.path.push(Segment { name, index });
        let flow = self.visit(node, visitor);
        self.path.pop();
        flow
    }

    fn visit<V: Visitor + ?Sized>(&mut self, node: &Node, visitor: &mut V) -> Walk {
        match visitor.enter(&self.context(), node) {
            Walk::Stop => return Walk::Stop,
            Walk::SkipChildren => {
                visitor.leave(&self.context(), node);
                return Walk::Continue;
            }
            Walk::Continue => {}
        }

        for (field, value) in node.fields() {
            match value {
                FieldValue::Empty => {}
                FieldValue::Text(text) => {
                    self.path.push(Segment {
                        name: field.name,
                        index: None,
                    });
                    visitor.attribute(&self.context(), text);
                    self.path.pop();
                }
                FieldValue::One(child) => {
                    if self.node(child, field.name, None, visitor) == Walk::Stop {
                        return Walk::Stop;
                    }
                }
                FieldValue::Many(children) => {
                    for (index, child) in children.iter().enumerate() {
                        if self.node(child, field.name, Some(index), visitor) == Walk::Stop {
                            return Walk::Stop;
                        }
                    }
                }
            }
        }

        visitor.leave(&self.context(), node);
        Walk::Continue
    }
}

struct Collector<'a> {
    type_name: &'a str,
    found: Vec<Node>,
}

impl Visitor for Collector<'_> {
    fn enter(&mut self, ctx: &VisitContext<'_>, node: &Node) -> Walk {
        if ctx.depth() > 0 && node.is_a(self.type_name) {
            self.found.push(node.clone());
        }
        Walk::Continue
    }
}

/// Every descendant of `node` (excluding `node` itself) that is-a `type_name`,
/// in walk order.
pub fn collect(node: &Node, type_name: &str) -> Vec<Node> {
    let mut collector = Collector {
        type_name,
        found: Vec::new(),
    };
    walk(node, &mut collector);
    collector.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::model;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        stop_at: Option<&'static str>,
    }

    impl Visitor for Recorder {
        fn enter(&mut self, ctx: &VisitContext<'_>, _node: &Node) -> Walk {
            self.events.push(format!("enter {}", ctx));
            if self.stop_at == Some(ctx.name()) {
                Walk::Stop
            } else {
                Walk::Continue
            }
        }

        fn leave(&mut self, ctx: &VisitContext<'_>, _node: &Node) {
            self.events.push(format!("leave {}", ctx));
        }

        fn attribute(&mut self, ctx: &VisitContext<'_>, value: &str) {
            self.events.push(format!("attr {}={}", ctx, value));
        }
    }

    fn coding() -> Node {
        Builder::new(&model::CODING)
            .id("c")
            .string("system", "http://loinc.org")
            .string("code", "1234-5")
            .build()
            .unwrap()
    }

    #[test]
    fn test_walk_order_and_paths() {
        let mut recorder = Recorder::default();
        assert_eq!(walk(&coding(), &mut recorder), Walk::Continue);
        assert_eq!(
            recorder.events,
            vec![
                "enter Coding",
                "attr Coding.id=c",
                "enter Coding.system",
                "leave Coding.system",
                "enter Coding.code",
                "leave Coding.code",
                "leave Coding",
            ]
        );
    }

    #[test]
    fn test_stop_aborts_walk() {
        let mut recorder = Recorder {
            stop_at: Some("system"),
            ..Default::default()
        };
        assert_eq!(walk(&coding(), &mut recorder), Walk::Stop);
        assert_eq!(
            recorder.events,
            vec!["enter Coding", "attr Coding.id=c", "enter Coding.system"]
        );
    }

    #[test]
    fn test_skip_children_still_leaves() {
        struct Skipper(Vec<String>);
        impl Visitor for Skipper {
            fn enter(&mut self, ctx: &VisitContext<'_>, _node: &Node) -> Walk {
                self.0.push(format!("enter {}", ctx.name()));
                Walk::SkipChildren
            }
            fn leave(&mut self, ctx: &VisitContext<'_>, _node: &Node) {
                self.0.push(format!("leave {}", ctx.name()));
            }
        }

        let mut skipper = Skipper(Vec::new());
        walk(&coding(), &mut skipper);
        assert_eq!(skipper.0, vec!["enter Coding", "leave Coding"]);
    }

    #[test]
    fn test_context_depth_and_index() {
        let concept = Builder::new(&model::CODEABLE_CONCEPT)
            .add("coding", [coding(), coding()])
            .build()
            .unwrap();

        struct Depths(Vec<(String, usize, Option<usize>)>);
        impl Visitor for Depths {
            fn enter(&mut self, ctx: &VisitContext<'_>, _node: &Node) -> Walk {
                self.0.push((ctx.to_string(), ctx.depth(), ctx.index()));
                Walk::Continue
            }
        }

        let mut depths = Depths(Vec::new());
        walk(&concept, &mut depths);
        assert_eq!(depths.0[0], ("CodeableConcept".to_string(), 0, None));
        assert_eq!(depths.0[1], ("CodeableConcept.coding[0]".to_string(), 1, Some(0)));
        assert_eq!(
            depths.0[2],
            ("CodeableConcept.coding[0].system".to_string(), 2, None)
        );
        assert_eq!(depths.0[4].0, "CodeableConcept.coding[1]");
    }

    #[test]
    fn test_collect_excludes_root() {
        let codings = collect(&coding(), "Coding");
        assert!(codings.is_empty());

        let primitives = collect(&coding(), "uri");
        assert_eq!(primitives.len(), 1);
    }
}
