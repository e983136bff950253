use crate::qom::column::Column;
use crate::qom::constraint::Constraint;
use crate::qom::ordering::Ordering;
use crate::qom::source::Source;
use crate::statement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// Page
///
/// Optional result window applied after ordering.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: u64,
}

///
/// QueryModel
///
/// Immutable structured query: one source, an optional constraint, and
/// ordered lists of orderings and columns. Constructed only by
/// `QueryBuilder::build`, which validates and normalizes; instances are
/// read-only thereafter and safe to share across concurrent readers.
///
/// Empty `columns` means the result columns are consumer-determined,
/// minimally one column per single-valued non-residual property per
/// selector.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QueryModel {
    pub(crate) source: Source,
    pub(crate) constraint: Option<Constraint>,
    pub(crate) orderings: Vec<Ordering>,
    pub(crate) columns: Vec<Column>,
    pub(crate) page: Option<Page>,
}

impl QueryModel {
    /// The node-tuple source; never absent.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// The constraint tree; `None` means no filtering.
    #[must_use]
    pub const fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Ordering specifications, applied in list order as tie-breakers.
    #[must_use]
    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    /// Column specifications; empty means consumer-determined columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Optional result window.
    #[must_use]
    pub const fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Result tuple arity, determined by the source's selector count.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.source.arity()
    }

    /// Sorted, deduplicated bind-variable names appearing in the
    /// constraint. Empty when the query has no bind variables.
    #[must_use]
    pub fn bind_variable_names(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        if let Some(constraint) = &self.constraint {
            constraint.collect_bind_variables(&mut names);
        }

        names.into_iter().collect()
    }

    /// Deterministic statement text for this model.
    #[must_use]
    pub fn statement(&self) -> String {
        statement::render(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::qom::builder::QueryBuilder;
    use crate::qom::constraint::{Comparison, Constraint};
    use crate::qom::operand::{DynamicOperand, StaticOperand};
    use crate::qom::source::Source;

    #[test]
    fn accessors_are_never_absent() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .build()
            .unwrap();

        assert_eq!(model.source().selector_names(), vec!["p"]);
        assert!(model.constraint().is_none());
        assert!(model.orderings().is_empty());
        assert!(model.columns().is_empty());
        assert_eq!(model.arity(), 1);
    }

    #[test]
    fn empty_columns_round_trip_as_empty_slice() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .build()
            .unwrap();

        // Empty, not absent: the consumer sees "columns are mine to pick".
        assert_eq!(model.columns().len(), 0);
    }

    #[test]
    fn bind_variable_names_are_sorted_and_deduped() {
        let operand = DynamicOperand::property("p", "status");
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::Comparison(Comparison::eq(
                operand.clone(),
                StaticOperand::bind("zeta"),
            )))
            .and(Constraint::Comparison(Comparison::ne(
                operand.clone(),
                StaticOperand::bind("alpha"),
            )))
            .and(Constraint::Comparison(Comparison::gt(
                operand,
                StaticOperand::bind("zeta"),
            )))
            .build()
            .unwrap();

        assert_eq!(model.bind_variable_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn serde_round_trip_preserves_the_model() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::property_exists("p", "title"))
            .order_by(DynamicOperand::property("p", "title"))
            .column("p", "title", None)
            .limit(10)
            .build()
            .unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let back: super::QueryModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
