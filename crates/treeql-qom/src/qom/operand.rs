use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// DynamicOperand
///
/// An operand evaluated per node-tuple: a property value, a node-derived
/// value, or a case-folded wrapper around either. Every operand is rooted
/// at exactly one selector.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DynamicOperand {
    /// Value of a single-valued property on the selector's node.
    PropertyValue { selector: String, property: String },

    /// Length of a property value (text length or binary size).
    Length { selector: String, property: String },

    /// Full name of the selector's node.
    NodeName { selector: String },

    /// Local (namespace-stripped) name of the selector's node.
    NodeLocalName { selector: String },

    /// Full-text search score of the selector's node.
    FullTextScore { selector: String },

    /// Lower-cased inner operand.
    LowerCase(Box<Self>),

    /// Upper-cased inner operand.
    UpperCase(Box<Self>),
}

impl DynamicOperand {
    #[must_use]
    pub fn property(selector: impl Into<String>, property: impl Into<String>) -> Self {
        Self::PropertyValue {
            selector: selector.into(),
            property: property.into(),
        }
    }

    #[must_use]
    pub fn length(selector: impl Into<String>, property: impl Into<String>) -> Self {
        Self::Length {
            selector: selector.into(),
            property: property.into(),
        }
    }

    #[must_use]
    pub fn node_name(selector: impl Into<String>) -> Self {
        Self::NodeName {
            selector: selector.into(),
        }
    }

    #[must_use]
    pub fn node_local_name(selector: impl Into<String>) -> Self {
        Self::NodeLocalName {
            selector: selector.into(),
        }
    }

    #[must_use]
    pub fn full_text_score(selector: impl Into<String>) -> Self {
        Self::FullTextScore {
            selector: selector.into(),
        }
    }

    /// Wrap this operand in a lower-case fold.
    #[must_use]
    pub fn lower_case(self) -> Self {
        Self::LowerCase(Box::new(self))
    }

    /// Wrap this operand in an upper-case fold.
    #[must_use]
    pub fn upper_case(self) -> Self {
        Self::UpperCase(Box::new(self))
    }

    /// The selector this operand is rooted at, through case folds.
    #[must_use]
    pub fn selector_name(&self) -> &str {
        match self {
            Self::PropertyValue { selector, .. }
            | Self::Length { selector, .. }
            | Self::NodeName { selector }
            | Self::NodeLocalName { selector }
            | Self::FullTextScore { selector } => selector,
            Self::LowerCase(inner) | Self::UpperCase(inner) => inner.selector_name(),
        }
    }
}

///
/// StaticOperand
///
/// An operand fixed at query-build time: a literal or a bind variable
/// supplied before execution.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StaticOperand {
    Literal(Value),
    BindVariable(String),
}

impl StaticOperand {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub fn bind(name: impl Into<String>) -> Self {
        Self::BindVariable(name.into())
    }
}

impl From<Value> for StaticOperand {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}
