use crate::qom::column::Column;
use crate::qom::constraint::{Comparison, Constraint};
use crate::qom::operand::{DynamicOperand, StaticOperand};
use crate::qom::ordering::Ordering;
use crate::qom::source::{JoinCondition, Source};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ValidateError
///
/// Structural rejection raised at query build time. Everything here is
/// decidable from the model alone; schema-level checks (node types,
/// property existence) belong to the repository collaborator.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("selector name must not be empty")]
    EmptySelectorName,

    #[error("node type name must not be empty for selector '{selector}'")]
    EmptyNodeTypeName { selector: String },

    #[error("duplicate selector name '{name}' in source")]
    DuplicateSelector { name: String },

    #[error("selector '{name}' is not bound by the query source")]
    UnknownSelector { name: String },

    #[error("property name must not be empty on selector '{selector}'")]
    EmptyPropertyName { selector: String },

    #[error("AND/OR constraint requires at least one child")]
    EmptyCompound,

    #[error("bind variable name must not be empty")]
    EmptyBindVariable,

    #[error("bind variable name '{name}' is not a valid identifier")]
    InvalidBindVariable { name: String },

    #[error("full-text search expression must not be empty for selector '{selector}'")]
    EmptyFullTextExpression { selector: String },

    #[error("node path must not be empty for selector '{selector}'")]
    EmptyPath { selector: String },
}

/// Validate a fully assembled model before it is sealed into a
/// `QueryModel`. First failure wins; the walk order is deterministic.
pub(crate) fn validate_model(
    source: &Source,
    constraint: Option<&Constraint>,
    orderings: &[Ordering],
    columns: &[Column],
) -> Result<(), ValidateError> {
    let mut seen = BTreeSet::new();
    validate_source(source, &mut seen)?;

    if let Some(constraint) = constraint {
        validate_constraint(constraint, source)?;
    }
    for ordering in orderings {
        validate_operand(&ordering.operand, source)?;
    }
    for column in columns {
        validate_column(column, source)?;
    }

    Ok(())
}

// Selector names must be non-empty and unique across the whole join
// tree; join conditions may only name selectors bound beneath the join.
fn validate_source<'a>(
    source: &'a Source,
    seen: &mut BTreeSet<&'a str>,
) -> Result<(), ValidateError> {
    match source {
        Source::Selector(selector) => {
            if selector.name.is_empty() {
                return Err(ValidateError::EmptySelectorName);
            }
            if selector.node_type.is_empty() {
                return Err(ValidateError::EmptyNodeTypeName {
                    selector: selector.name.clone(),
                });
            }
            if !seen.insert(&selector.name) {
                return Err(ValidateError::DuplicateSelector {
                    name: selector.name.clone(),
                });
            }

            Ok(())
        }
        Source::Join(join) => {
            validate_source(&join.left, seen)?;
            validate_source(&join.right, seen)?;

            for name in join.condition.referenced_selectors() {
                if !(join.left.binds_selector(name) || join.right.binds_selector(name)) {
                    return Err(ValidateError::UnknownSelector {
                        name: name.to_string(),
                    });
                }
            }
            if let JoinCondition::EquiJoin {
                left_selector,
                left_property,
                right_selector,
                right_property,
            } = &join.condition
            {
                require_property(left_selector, left_property)?;
                require_property(right_selector, right_property)?;
            }

            Ok(())
        }
    }
}

fn validate_constraint(constraint: &Constraint, source: &Source) -> Result<(), ValidateError> {
    match constraint {
        Constraint::And(children) | Constraint::Or(children) => {
            if children.is_empty() {
                return Err(ValidateError::EmptyCompound);
            }
            for child in children {
                validate_constraint(child, source)?;
            }

            Ok(())
        }
        Constraint::Not(inner) => validate_constraint(inner, source),
        Constraint::Comparison(cmp) => validate_comparison(cmp, source),
        Constraint::PropertyExists { selector, property } => {
            require_selector(selector, source)?;
            require_property(selector, property)
        }
        Constraint::FullTextSearch {
            selector,
            property,
            expression,
        } => {
            require_selector(selector, source)?;
            if let Some(property) = property {
                require_property(selector, property)?;
            }
            if expression.is_empty() {
                return Err(ValidateError::EmptyFullTextExpression {
                    selector: selector.clone(),
                });
            }

            Ok(())
        }
        Constraint::SameNode { selector, path }
        | Constraint::ChildNode { selector, path }
        | Constraint::DescendantNode { selector, path } => {
            require_selector(selector, source)?;
            if path.is_empty() {
                return Err(ValidateError::EmptyPath {
                    selector: selector.clone(),
                });
            }

            Ok(())
        }
    }
}

fn validate_comparison(cmp: &Comparison, source: &Source) -> Result<(), ValidateError> {
    validate_operand(&cmp.operand, source)?;

    match &cmp.value {
        StaticOperand::Literal(_) => Ok(()),
        StaticOperand::BindVariable(name) => {
            if name.is_empty() {
                return Err(ValidateError::EmptyBindVariable);
            }
            if !is_identifier(name) {
                return Err(ValidateError::InvalidBindVariable { name: name.clone() });
            }

            Ok(())
        }
    }
}

fn validate_operand(operand: &DynamicOperand, source: &Source) -> Result<(), ValidateError> {
    match operand {
        DynamicOperand::PropertyValue { selector, property }
        | DynamicOperand::Length { selector, property } => {
            require_selector(selector, source)?;
            require_property(selector, property)
        }
        DynamicOperand::NodeName { selector }
        | DynamicOperand::NodeLocalName { selector }
        | DynamicOperand::FullTextScore { selector } => require_selector(selector, source),
        DynamicOperand::LowerCase(inner) | DynamicOperand::UpperCase(inner) => {
            validate_operand(inner, source)
        }
    }
}

fn validate_column(column: &Column, source: &Source) -> Result<(), ValidateError> {
    require_selector(&column.selector, source)?;
    if let Some(property) = &column.property {
        require_property(&column.selector, property)?;
    }
    if let Some(name) = &column.name
        && name.is_empty()
    {
        return Err(ValidateError::EmptyPropertyName {
            selector: column.selector.clone(),
        });
    }

    Ok(())
}

fn require_selector(name: &str, source: &Source) -> Result<(), ValidateError> {
    if name.is_empty() {
        return Err(ValidateError::EmptySelectorName);
    }
    if !source.binds_selector(name) {
        return Err(ValidateError::UnknownSelector {
            name: name.to_string(),
        });
    }

    Ok(())
}

fn require_property(selector: &str, property: &str) -> Result<(), ValidateError> {
    if property.is_empty() {
        return Err(ValidateError::EmptyPropertyName {
            selector: selector.to_string(),
        });
    }

    Ok(())
}

// Leading alphabetic or underscore, then alphanumeric or underscore.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qom::source::JoinType;
    use crate::value::Value;

    fn joined_source() -> Source {
        Source::join(
            Source::selector("page", "p"),
            Source::selector("author", "a"),
            JoinType::Inner,
            JoinCondition::EquiJoin {
                left_selector: "p".to_string(),
                left_property: "author".to_string(),
                right_selector: "a".to_string(),
                right_property: "name".to_string(),
            },
        )
    }

    #[test]
    fn valid_model_passes() {
        let constraint = Constraint::Comparison(Comparison::eq(
            DynamicOperand::property("p", "status"),
            Value::from("live"),
        ));
        let orderings = vec![Ordering::ascending(DynamicOperand::property("a", "name"))];
        let columns = vec![Column::property("p", "title", None)];

        assert_eq!(
            validate_model(
                &joined_source(),
                Some(&constraint),
                &orderings,
                &columns
            ),
            Ok(())
        );
    }

    #[test]
    fn duplicate_selector_names_are_rejected() {
        let source = Source::join(
            Source::selector("page", "p"),
            Source::selector("author", "p"),
            JoinType::Inner,
            JoinCondition::ChildNode {
                child_selector: "p".to_string(),
                parent_selector: "p".to_string(),
            },
        );

        assert_eq!(
            validate_model(&source, None, &[], &[]),
            Err(ValidateError::DuplicateSelector {
                name: "p".to_string()
            })
        );
    }

    #[test]
    fn join_condition_must_name_bound_selectors() {
        let source = Source::join(
            Source::selector("page", "p"),
            Source::selector("author", "a"),
            JoinType::Inner,
            JoinCondition::Descendant {
                descendant_selector: "p".to_string(),
                ancestor_selector: "x".to_string(),
            },
        );

        assert_eq!(
            validate_model(&source, None, &[], &[]),
            Err(ValidateError::UnknownSelector {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn constraint_selector_must_resolve_against_source() {
        let constraint = Constraint::property_exists("ghost", "title");

        assert_eq!(
            validate_model(&joined_source(), Some(&constraint), &[], &[]),
            Err(ValidateError::UnknownSelector {
                name: "ghost".to_string()
            })
        );
    }

    #[test]
    fn ordering_and_column_selectors_must_resolve() {
        let orderings = vec![Ordering::ascending(DynamicOperand::property("x", "rank"))];
        assert_eq!(
            validate_model(&joined_source(), None, &orderings, &[]),
            Err(ValidateError::UnknownSelector {
                name: "x".to_string()
            })
        );

        let columns = vec![Column::all_properties("x")];
        assert_eq!(
            validate_model(&joined_source(), None, &[], &columns),
            Err(ValidateError::UnknownSelector {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn empty_names_are_rejected() {
        let source = Source::selector("", "p");
        assert_eq!(
            validate_model(&source, None, &[], &[]),
            Err(ValidateError::EmptyNodeTypeName {
                selector: "p".to_string()
            })
        );

        let source = Source::selector("page", "p");
        let constraint = Constraint::property_exists("p", "");
        assert_eq!(
            validate_model(&source, Some(&constraint), &[], &[]),
            Err(ValidateError::EmptyPropertyName {
                selector: "p".to_string()
            })
        );
    }

    #[test]
    fn bind_variable_names_must_be_identifiers() {
        let source = Source::selector("page", "p");
        let constraint = Constraint::Comparison(Comparison::eq(
            DynamicOperand::property("p", "status"),
            StaticOperand::bind("1bad"),
        ));

        assert_eq!(
            validate_model(&source, Some(&constraint), &[], &[]),
            Err(ValidateError::InvalidBindVariable {
                name: "1bad".to_string()
            })
        );
    }

    #[test]
    fn empty_compound_is_rejected() {
        let source = Source::selector("page", "p");
        let constraint = Constraint::and(Vec::new());

        assert_eq!(
            validate_model(&source, Some(&constraint), &[], &[]),
            Err(ValidateError::EmptyCompound)
        );
    }
}
