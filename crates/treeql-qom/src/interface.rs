//! Capability traits at the query boundary.
//!
//! `Query` is the generic query capability; `QueryObjectModel` layers the
//! four structural accessors on top of it. The split is capability
//! composition: a `QueryModel` value is plain data until bound to an
//! `ExecutionEngine`, and only the bound pair carries the `Query`
//! capability.

use crate::qom::column::Column;
use crate::qom::constraint::Constraint;
use crate::qom::model::QueryModel;
use crate::qom::ordering::Ordering;
use crate::qom::source::Source;
use derive_more::Display;

///
/// QueryLanguage
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum QueryLanguage {
    /// Composed through the object model rather than parsed from text.
    #[display("object-model")]
    ObjectModel,

    /// Parsed from SQL statement text (by an out-of-scope parser).
    #[display("sql")]
    Sql,
}

///
/// Query
///
/// Generic query capability: execution, statement text, language, and
/// bind-variable enumeration.
///

pub trait Query {
    type Rows;
    type Error;

    /// Evaluate the query and produce its tabular result.
    fn execute(&self) -> Result<Self::Rows, Self::Error>;

    /// Deterministic statement text for this query.
    fn statement(&self) -> String;

    /// The language this query was composed in.
    fn language(&self) -> QueryLanguage;

    /// Sorted, deduplicated bind-variable names.
    fn bind_variable_names(&self) -> Vec<&str>;
}

///
/// QueryObjectModel
///
/// Structured-query capability: a query that additionally exposes its
/// structural parts for introspection.
///

pub trait QueryObjectModel: Query {
    /// The node-tuple source; never absent.
    fn source(&self) -> &Source;

    /// The constraint tree; `None` means no filtering.
    fn constraint(&self) -> Option<&Constraint>;

    /// Ordering specifications, applied in list order as tie-breakers.
    fn orderings(&self) -> &[Ordering];

    /// Column specifications; empty means consumer-determined columns.
    fn columns(&self) -> &[Column];
}

///
/// ExecutionEngine
///
/// Boundary trait for the collaborator that evaluates a query model
/// against a repository. Output rows must respect the orderings sequence
/// as a lexicographic comparator chain; when `columns()` is empty the
/// engine determines the column set. No implementation ships here.
///

pub trait ExecutionEngine {
    type Rows;
    type Error;

    fn execute(&self, query: &QueryModel) -> Result<Self::Rows, Self::Error>;
}

///
/// BoundQuery
///
/// One query model coupled to one engine. Owns no state; both sides are
/// borrowed for the execution round.
///

pub struct BoundQuery<'a, E: ExecutionEngine> {
    model: &'a QueryModel,
    engine: &'a E,
}

impl QueryModel {
    /// Couple this model to an engine, gaining the `Query` capability.
    #[must_use]
    pub const fn bind<'a, E: ExecutionEngine>(&'a self, engine: &'a E) -> BoundQuery<'a, E> {
        BoundQuery {
            model: self,
            engine,
        }
    }
}

impl<E: ExecutionEngine> Query for BoundQuery<'_, E> {
    type Rows = E::Rows;
    type Error = E::Error;

    fn execute(&self) -> Result<Self::Rows, Self::Error> {
        self.engine.execute(self.model)
    }

    fn statement(&self) -> String {
        self.model.statement()
    }

    fn language(&self) -> QueryLanguage {
        QueryLanguage::ObjectModel
    }

    fn bind_variable_names(&self) -> Vec<&str> {
        self.model.bind_variable_names()
    }
}

impl<E: ExecutionEngine> QueryObjectModel for BoundQuery<'_, E> {
    fn source(&self) -> &Source {
        self.model.source()
    }

    fn constraint(&self) -> Option<&Constraint> {
        self.model.constraint()
    }

    fn orderings(&self) -> &[Ordering] {
        self.model.orderings()
    }

    fn columns(&self) -> &[Column] {
        self.model.columns()
    }
}
