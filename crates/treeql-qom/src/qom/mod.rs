//! The query object model: sources, operands, constraints, orderings,
//! columns, the immutable `QueryModel` value, and the builder that
//! constructs it.

pub mod builder;
pub mod column;
pub mod constraint;
pub mod model;
pub mod normalize;
pub mod operand;
pub mod ordering;
pub mod source;
pub mod validate;

pub use builder::QueryBuilder;
pub use column::Column;
pub use constraint::{Comparison, Constraint, Operator};
pub use model::{Page, QueryModel};
pub use operand::{DynamicOperand, StaticOperand};
pub use ordering::{Order, Ordering, comparator};
pub use source::{Join, JoinCondition, JoinType, Selector, Source};
pub use validate::ValidateError;
