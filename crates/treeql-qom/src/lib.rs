//! Structured, language-independent queries over hierarchical content
//! repositories, composed as an object model rather than written as a
//! query string.
//!
//! ## Crate layout
//! - `qom`: the object model AST, the immutable `QueryModel`, and the
//!   validating builder.
//! - `value`: literal values and their canonical total order.
//! - `interface`: the `Query` / `QueryObjectModel` capability traits and
//!   the `ExecutionEngine` boundary.
//! - `statement`: deterministic statement-text rendering.
//!
//! A query is one source (selector or join tree), an optional constraint
//! tree, and ordered lists of orderings and columns. The source's
//! selector count fixes the result tuple arity; orderings apply in list
//! order as successive tie-breakers; an empty column list leaves the
//! result columns to the consuming engine.

pub mod interface;
pub mod qom;
pub mod statement;
pub mod value;

pub use interface::{BoundQuery, ExecutionEngine, Query, QueryLanguage, QueryObjectModel};
pub use qom::{
    Column, Comparison, Constraint, DynamicOperand, Join, JoinCondition, JoinType, Operator,
    Order, Ordering, Page, QueryBuilder, QueryModel, Selector, Source, StaticOperand,
    ValidateError,
};
pub use value::Value;
