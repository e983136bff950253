use crate::qom::column::Column;
use crate::qom::constraint::Constraint;
use crate::qom::model::{Page, QueryModel};
use crate::qom::normalize::normalize;
use crate::qom::operand::DynamicOperand;
use crate::qom::ordering::Ordering;
use crate::qom::source::Source;
use crate::qom::validate::{ValidateError, validate_model};

///
/// QueryBuilder
///
/// Declarative factory for `QueryModel` values.
///
/// This builder:
/// - Starts from a source, so a query without one cannot exist
/// - Collects constraint, orderings, columns, and an optional window
/// - Is purely declarative (no schema access or execution)
///
/// Important design notes:
/// - No validation occurs until `build()`; names are accepted as strings
/// - Repeated `filter` calls AND onto the existing constraint
/// - `build()` validates structurally, then normalizes the constraint
///

#[derive(Clone, Debug)]
pub struct QueryBuilder {
    source: Source,
    constraint: Option<Constraint>,
    orderings: Vec<Ordering>,
    columns: Vec<Column>,
    page: Option<Page>,
}

impl QueryBuilder {
    /// Start a query over the given source.
    #[must_use]
    pub const fn new(source: Source) -> Self {
        Self {
            source,
            constraint: None,
            orderings: Vec::new(),
            columns: Vec::new(),
            page: None,
        }
    }

    /// Add a constraint, implicitly AND-ing with any existing constraint.
    #[must_use]
    pub fn filter(mut self, constraint: Constraint) -> Self {
        self.constraint = match self.constraint.take() {
            Some(existing) => Some(Constraint::And(vec![existing, constraint])),
            None => Some(constraint),
        };
        self
    }

    /// Explicit AND combinator for constraints.
    #[must_use]
    pub fn and(self, constraint: Constraint) -> Self {
        self.filter(constraint)
    }

    /// Explicit OR combinator for constraints.
    #[must_use]
    pub fn or(mut self, constraint: Constraint) -> Self {
        self.constraint = match self.constraint.take() {
            Some(existing) => Some(Constraint::Or(vec![existing, constraint])),
            None => Some(constraint),
        };
        self
    }

    /// Append an ascending ordering.
    #[must_use]
    pub fn order_by(mut self, operand: DynamicOperand) -> Self {
        self.orderings.push(Ordering::ascending(operand));
        self
    }

    /// Append a descending ordering.
    #[must_use]
    pub fn order_by_desc(mut self, operand: DynamicOperand) -> Self {
        self.orderings.push(Ordering::descending(operand));
        self
    }

    /// Append an ordering specification as-is.
    #[must_use]
    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    /// Append a column for one property, optionally aliased.
    #[must_use]
    pub fn column(
        mut self,
        selector: impl Into<String>,
        property: impl Into<String>,
        name: Option<String>,
    ) -> Self {
        self.columns.push(Column::property(selector, property, name));
        self
    }

    /// Append a column selecting all properties of a selector.
    #[must_use]
    pub fn all_columns(mut self, selector: impl Into<String>) -> Self {
        self.columns.push(Column::all_properties(selector));
        self
    }

    /// Set or replace the result limit.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.page = Some(match self.page {
            Some(mut page) => {
                page.limit = Some(n);
                page
            }
            None => Page {
                limit: Some(n),
                offset: 0,
            },
        });
        self
    }

    /// Set or replace the result offset.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.page = Some(match self.page {
            Some(mut page) => {
                page.offset = n;
                page
            }
            None => Page {
                limit: None,
                offset: n,
            },
        });
        self
    }

    /// Validate and seal the builder into an immutable `QueryModel`.
    pub fn build(self) -> Result<QueryModel, ValidateError> {
        validate_model(
            &self.source,
            self.constraint.as_ref(),
            &self.orderings,
            &self.columns,
        )?;

        Ok(QueryModel {
            source: self.source,
            constraint: self.constraint.as_ref().map(normalize),
            orderings: self.orderings,
            columns: self.columns,
            page: self.page,
        })
    }
}
