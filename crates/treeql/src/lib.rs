//! Facade over the treeql object-model crate.
//!
//! Most consumers want the `prelude`; the full module tree stays
//! reachable through the `qom` re-export.

pub use treeql_qom as qom;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use treeql_qom::{
    BoundQuery, Column, Comparison, Constraint, DynamicOperand, ExecutionEngine, Join,
    JoinCondition, JoinType, Operator, Order, Ordering, Page, QueryBuilder, QueryLanguage,
    QueryModel, Selector, Source, StaticOperand, ValidateError, Value,
};

///
/// Prelude
/// using _ brings the capability traits into scope and avoids name
/// conflicts
///

pub mod prelude {
    pub use treeql_qom::{
        Column, Comparison, Constraint, DynamicOperand, ExecutionEngine, JoinCondition, JoinType,
        Operator, Order, Ordering, Query as _, QueryBuilder, QueryModel, QueryObjectModel as _,
        Selector, Source, StaticOperand, Value,
    };
}
