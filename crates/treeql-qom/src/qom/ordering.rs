use crate::qom::operand::DynamicOperand;
use crate::value::{Value, canonical_cmp};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp;

///
/// Order
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum Order {
    #[default]
    #[display("ASC")]
    Ascending,
    #[display("DESC")]
    Descending,
}

///
/// Ordering
///
/// One ordering specification: a dynamic operand plus a direction.
/// A query's orderings apply in list order as successive tie-breakers;
/// when none discriminate two tuples their relative order is
/// unspecified.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ordering {
    pub operand: DynamicOperand,
    pub order: Order,
}

impl Ordering {
    #[must_use]
    pub const fn ascending(operand: DynamicOperand) -> Self {
        Self {
            operand,
            order: Order::Ascending,
        }
    }

    #[must_use]
    pub const fn descending(operand: DynamicOperand) -> Self {
        Self {
            operand,
            order: Order::Descending,
        }
    }
}

/// Build the lexicographic comparator chain for an orderings list.
///
/// `eval` resolves one dynamic operand against one tuple; `None` means
/// the operand has no value for that tuple. Missing values order after
/// present ones. Tuples not discriminated by any ordering compare
/// `Equal`, leaving their relative order to the consumer.
pub fn comparator<'a, T, F>(
    orderings: &'a [Ordering],
    eval: F,
) -> impl Fn(&T, &T) -> cmp::Ordering + 'a
where
    F: Fn(&T, &DynamicOperand) -> Option<Value> + 'a,
{
    move |left, right| {
        for ordering in orderings {
            let lhs = eval(left, &ordering.operand);
            let rhs = eval(right, &ordering.operand);

            let step = match ordering.order {
                Order::Ascending => compare_optional(lhs.as_ref(), rhs.as_ref()),
                Order::Descending => compare_optional(lhs.as_ref(), rhs.as_ref()).reverse(),
            };
            if step != cmp::Ordering::Equal {
                return step;
            }
        }

        cmp::Ordering::Equal
    }
}

// Present values use the canonical total order; missing sorts last.
fn compare_optional(left: Option<&Value>, right: Option<&Value>) -> cmp::Ordering {
    match (left, right) {
        (Some(lhs), Some(rhs)) => canonical_cmp(lhs, rhs),
        (Some(_), None) => cmp::Ordering::Less,
        (None, Some(_)) => cmp::Ordering::Greater,
        (None, None) => cmp::Ordering::Equal,
    }
}
