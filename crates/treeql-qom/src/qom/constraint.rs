use crate::qom::operand::{DynamicOperand, StaticOperand};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr};

///
/// Constraint AST
///
/// Pure, schema-agnostic representation of query constraints over
/// node-tuples. This layer contains no validation or evaluation
/// semantics; interpretation occurs in later passes:
///
/// - normalization
/// - validation (source-aware)
/// - execution (engine collaborator)
///

///
/// Operator
///
/// Comparison operator between a dynamic and a static operand.
/// Display spells the statement-text form.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    #[display("=")]
    Eq,
    #[display("<>")]
    Ne,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,
    #[display("LIKE")]
    Like,
}

///
/// Comparison
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub operand: DynamicOperand,
    pub op: Operator,
    pub value: StaticOperand,
}

impl Comparison {
    fn new(operand: DynamicOperand, op: Operator, value: impl Into<StaticOperand>) -> Self {
        Self {
            operand,
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Eq, value)
    }

    #[must_use]
    pub fn ne(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Ne, value)
    }

    #[must_use]
    pub fn lt(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Lt, value)
    }

    #[must_use]
    pub fn lte(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Lte, value)
    }

    #[must_use]
    pub fn gt(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Gt, value)
    }

    #[must_use]
    pub fn gte(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Gte, value)
    }

    #[must_use]
    pub fn like(operand: DynamicOperand, value: impl Into<StaticOperand>) -> Self {
        Self::new(operand, Operator::Like, value)
    }
}

///
/// Constraint
///
/// Boolean predicate tree over node-tuples. Absence of a constraint is
/// `Option::None` on the query model, never a sentinel variant here.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Comparison(Comparison),

    /// The selector's node has the named property.
    PropertyExists { selector: String, property: String },

    /// Full-text match against one property, or against all properties
    /// of the selector when `property` is absent.
    FullTextSearch {
        selector: String,
        property: Option<String>,
        expression: String,
    },

    /// The selector's node is the node at `path`.
    SameNode { selector: String, path: String },

    /// The selector's node is a direct child of the node at `path`.
    ChildNode { selector: String, path: String },

    /// The selector's node is a descendant of the node at `path`.
    DescendantNode { selector: String, path: String },
}

impl Constraint {
    #[must_use]
    pub const fn and(constraints: Vec<Self>) -> Self {
        Self::And(constraints)
    }

    #[must_use]
    pub const fn or(constraints: Vec<Self>) -> Self {
        Self::Or(constraints)
    }

    #[must_use]
    pub fn not(constraint: Self) -> Self {
        Self::Not(Box::new(constraint))
    }

    #[must_use]
    pub fn property_exists(selector: impl Into<String>, property: impl Into<String>) -> Self {
        Self::PropertyExists {
            selector: selector.into(),
            property: property.into(),
        }
    }

    #[must_use]
    pub fn full_text(
        selector: impl Into<String>,
        property: Option<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self::FullTextSearch {
            selector: selector.into(),
            property,
            expression: expression.into(),
        }
    }

    #[must_use]
    pub fn same_node(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::SameNode {
            selector: selector.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn child_node(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::ChildNode {
            selector: selector.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn descendant_node(selector: impl Into<String>, path: impl Into<String>) -> Self {
        Self::DescendantNode {
            selector: selector.into(),
            path: path.into(),
        }
    }

    /// Collect the selector names this constraint refers to, in tree order.
    pub(crate) fn collect_selectors<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_selectors(out);
                }
            }
            Self::Not(inner) => inner.collect_selectors(out),
            Self::Comparison(cmp) => out.push(cmp.operand.selector_name()),
            Self::PropertyExists { selector, .. }
            | Self::FullTextSearch { selector, .. }
            | Self::SameNode { selector, .. }
            | Self::ChildNode { selector, .. }
            | Self::DescendantNode { selector, .. } => out.push(selector),
        }
    }

    /// Collect bind-variable names appearing in comparison operands.
    pub(crate) fn collect_bind_variables<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_bind_variables(out);
                }
            }
            Self::Not(inner) => inner.collect_bind_variables(out),
            Self::Comparison(cmp) => {
                if let StaticOperand::BindVariable(name) = &cmp.value {
                    out.insert(name);
                }
            }
            Self::PropertyExists { .. }
            | Self::FullTextSearch { .. }
            | Self::SameNode { .. }
            | Self::ChildNode { .. }
            | Self::DescendantNode { .. } => {}
        }
    }
}

impl From<Comparison> for Constraint {
    fn from(value: Comparison) -> Self {
        Self::Comparison(value)
    }
}

impl BitAnd for Constraint {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Constraint {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::Or(vec![self, rhs])
    }
}
