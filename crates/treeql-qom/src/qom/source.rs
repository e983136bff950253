use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Selector
///
/// A named binding of one repository node type. Evaluating a selector
/// produces one node per tuple; the selector name is how constraints,
/// orderings, and columns refer back to it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    pub node_type: String,
    pub name: String,
}

impl Selector {
    #[must_use]
    pub fn new(node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: name.into(),
        }
    }
}

///
/// JoinType
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum JoinType {
    #[display("INNER JOIN")]
    Inner,
    #[display("LEFT OUTER JOIN")]
    LeftOuter,
    #[display("RIGHT OUTER JOIN")]
    RightOuter,
}

///
/// JoinCondition
///
/// Per-tuple condition deciding which left/right node pairs join.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum JoinCondition {
    /// Property on the left selector equals property on the right selector.
    EquiJoin {
        left_selector: String,
        left_property: String,
        right_selector: String,
        right_property: String,
    },

    /// Both selectors bind the same node, optionally re-rooted at a
    /// relative path under the left node.
    SameNode {
        left_selector: String,
        right_selector: String,
        path: Option<String>,
    },

    /// The child selector's node is a direct child of the parent's.
    ChildNode {
        child_selector: String,
        parent_selector: String,
    },

    /// The descendant selector's node is anywhere under the ancestor's.
    Descendant {
        descendant_selector: String,
        ancestor_selector: String,
    },
}

impl JoinCondition {
    /// Selector names this condition refers to, in declaration order.
    #[must_use]
    pub fn referenced_selectors(&self) -> [&str; 2] {
        match self {
            Self::EquiJoin {
                left_selector,
                right_selector,
                ..
            }
            | Self::SameNode {
                left_selector,
                right_selector,
                ..
            } => [left_selector, right_selector],
            Self::ChildNode {
                child_selector,
                parent_selector,
            } => [child_selector, parent_selector],
            Self::Descendant {
                descendant_selector,
                ancestor_selector,
            } => [descendant_selector, ancestor_selector],
        }
    }
}

///
/// Join
///
/// Two sources combined under one join type and condition. Sides are
/// themselves sources, so joins nest into a tree.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub left: Box<Source>,
    pub right: Box<Source>,
    pub join_type: JoinType,
    pub condition: JoinCondition,
}

impl Join {
    #[must_use]
    pub fn new(left: Source, right: Source, join_type: JoinType, condition: JoinCondition) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            condition,
        }
    }
}

///
/// Source
///
/// The node-tuple source of a query: a single selector or a join tree.
/// The number of selectors in the tree is the arity of result tuples.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Source {
    Selector(Selector),
    Join(Join),
}

impl Source {
    /// Construct a single-selector source.
    #[must_use]
    pub fn selector(node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Selector(Selector::new(node_type, name))
    }

    /// Construct a join source.
    #[must_use]
    pub fn join(
        left: Self,
        right: Self,
        join_type: JoinType,
        condition: JoinCondition,
    ) -> Self {
        Self::Join(Join::new(left, right, join_type, condition))
    }

    /// Number of selectors in this source; equals the result tuple arity.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Selector(_) => 1,
            Self::Join(join) => join.left.arity() + join.right.arity(),
        }
    }

    /// Selector names bound by this source, left to right.
    #[must_use]
    pub fn selector_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.arity());
        self.collect_selector_names(&mut names);
        names
    }

    /// Return true when `name` is bound by a selector in this source.
    #[must_use]
    pub fn binds_selector(&self, name: &str) -> bool {
        match self {
            Self::Selector(selector) => selector.name == name,
            Self::Join(join) => join.left.binds_selector(name) || join.right.binds_selector(name),
        }
    }

    fn collect_selector_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Selector(selector) => names.push(&selector.name),
            Self::Join(join) => {
                join.left.collect_selector_names(names);
                join.right.collect_selector_names(names);
            }
        }
    }
}

impl From<Selector> for Source {
    fn from(value: Selector) -> Self {
        Self::Selector(value)
    }
}

impl From<Join> for Source {
    fn from(value: Join) -> Self {
        Self::Join(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_way_join() -> Source {
        Source::join(
            Source::selector("page", "p"),
            Source::selector("author", "a"),
            JoinType::Inner,
            JoinCondition::EquiJoin {
                left_selector: "p".to_string(),
                left_property: "author".to_string(),
                right_selector: "a".to_string(),
                right_property: "name".to_string(),
            },
        )
    }

    #[test]
    fn selector_source_has_arity_one() {
        let source = Source::selector("page", "p");
        assert_eq!(source.arity(), 1);
        assert_eq!(source.selector_names(), vec!["p"]);
    }

    #[test]
    fn join_arity_sums_both_sides() {
        let source = Source::join(
            two_way_join(),
            Source::selector("tag", "t"),
            JoinType::LeftOuter,
            JoinCondition::ChildNode {
                child_selector: "t".to_string(),
                parent_selector: "p".to_string(),
            },
        );

        assert_eq!(source.arity(), 3);
        assert_eq!(source.selector_names(), vec!["p", "a", "t"]);
    }

    #[test]
    fn binds_selector_walks_the_tree() {
        let source = two_way_join();
        assert!(source.binds_selector("p"));
        assert!(source.binds_selector("a"));
        assert!(!source.binds_selector("x"));
    }
}
