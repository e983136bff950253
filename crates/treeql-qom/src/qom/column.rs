use serde::{Deserialize, Serialize};

///
/// Column
///
/// One value to include in the tabular view of query results. An absent
/// property selects all properties of the selector; an absent name lets
/// the consumer derive one from the property.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub selector: String,
    pub property: Option<String>,
    pub name: Option<String>,
}

impl Column {
    /// Column for one property of a selector, optionally aliased.
    #[must_use]
    pub fn property(
        selector: impl Into<String>,
        property: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            property: Some(property.into()),
            name,
        }
    }

    /// Column selecting all properties of a selector.
    #[must_use]
    pub fn all_properties(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            property: None,
            name: None,
        }
    }
}
