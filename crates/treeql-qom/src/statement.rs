//! Deterministic, read-only statement text for a query model; must not
//! execute or validate. The text is the SQL-style serialization of the
//! object model, suitable for logging, caching keys, and the base query
//! capability's statement accessor. Rendering never fails; parsing text
//! back into a model is out of scope.

use crate::qom::column::Column;
use crate::qom::constraint::Constraint;
use crate::qom::model::QueryModel;
use crate::qom::operand::{DynamicOperand, StaticOperand};
use crate::qom::source::{JoinCondition, Source};
use crate::value::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Render a query model as statement text.
#[must_use]
pub fn render(model: &QueryModel) -> String {
    let mut out = String::from("SELECT ");
    render_columns(&mut out, model.columns());

    out.push_str(" FROM ");
    render_source(&mut out, model.source());

    if let Some(constraint) = model.constraint() {
        out.push_str(" WHERE ");
        render_constraint(&mut out, constraint);
    }

    if !model.orderings().is_empty() {
        out.push_str(" ORDER BY ");
        for (i, ordering) in model.orderings().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            render_operand(&mut out, &ordering.operand);
            out.push(' ');
            out.push_str(&ordering.order.to_string());
        }
    }

    if let Some(page) = model.page() {
        if let Some(limit) = page.limit {
            out.push_str(&format!(" LIMIT {limit}"));
        }
        if page.offset > 0 {
            out.push_str(&format!(" OFFSET {}", page.offset));
        }
    }

    out
}

fn render_columns(out: &mut String, columns: &[Column]) {
    if columns.is_empty() {
        out.push('*');
        return;
    }

    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match &column.property {
            Some(property) => {
                out.push_str(&format!("{}.{property}", column.selector));
                if let Some(name) = &column.name {
                    out.push_str(&format!(" AS {name}"));
                }
            }
            None => out.push_str(&format!("{}.*", column.selector)),
        }
    }
}

fn render_source(out: &mut String, source: &Source) {
    match source {
        Source::Selector(selector) => {
            out.push_str(&format!("[{}] AS {}", selector.node_type, selector.name));
        }
        Source::Join(join) => {
            render_source(out, &join.left);
            out.push_str(&format!(" {} ", join.join_type));
            render_source(out, &join.right);
            out.push_str(" ON ");
            render_join_condition(out, &join.condition);
        }
    }
}

fn render_join_condition(out: &mut String, condition: &JoinCondition) {
    match condition {
        JoinCondition::EquiJoin {
            left_selector,
            left_property,
            right_selector,
            right_property,
        } => out.push_str(&format!(
            "{left_selector}.{left_property} = {right_selector}.{right_property}"
        )),
        JoinCondition::SameNode {
            left_selector,
            right_selector,
            path,
        } => match path {
            Some(path) => out.push_str(&format!(
                "ISSAMENODE({left_selector}, {right_selector}, {})",
                quote(path)
            )),
            None => out.push_str(&format!("ISSAMENODE({left_selector}, {right_selector})")),
        },
        JoinCondition::ChildNode {
            child_selector,
            parent_selector,
        } => out.push_str(&format!("ISCHILDNODE({child_selector}, {parent_selector})")),
        JoinCondition::Descendant {
            descendant_selector,
            ancestor_selector,
        } => out.push_str(&format!(
            "ISDESCENDANTNODE({descendant_selector}, {ancestor_selector})"
        )),
    }
}

fn render_constraint(out: &mut String, constraint: &Constraint) {
    match constraint {
        Constraint::And(children) => render_compound(out, children, " AND "),
        Constraint::Or(children) => render_compound(out, children, " OR "),
        Constraint::Not(inner) => {
            out.push_str("NOT ");
            render_child(out, inner);
        }
        Constraint::Comparison(cmp) => {
            render_operand(out, &cmp.operand);
            out.push_str(&format!(" {} ", cmp.op));
            render_static(out, &cmp.value);
        }
        Constraint::PropertyExists { selector, property } => {
            out.push_str(&format!("{selector}.{property} IS NOT NULL"));
        }
        Constraint::FullTextSearch {
            selector,
            property,
            expression,
        } => match property {
            Some(property) => out.push_str(&format!(
                "CONTAINS({selector}.{property}, {})",
                quote(expression)
            )),
            None => out.push_str(&format!("CONTAINS({selector}.*, {})", quote(expression))),
        },
        Constraint::SameNode { selector, path } => {
            out.push_str(&format!("ISSAMENODE({selector}, {})", quote(path)));
        }
        Constraint::ChildNode { selector, path } => {
            out.push_str(&format!("ISCHILDNODE({selector}, {})", quote(path)));
        }
        Constraint::DescendantNode { selector, path } => {
            out.push_str(&format!("ISDESCENDANTNODE({selector}, {})", quote(path)));
        }
    }
}

fn render_compound(out: &mut String, children: &[Constraint], separator: &str) {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        render_child(out, child);
    }
}

// Compound children get parentheses so precedence survives the text form.
fn render_child(out: &mut String, child: &Constraint) {
    match child {
        Constraint::And(_) | Constraint::Or(_) => {
            out.push('(');
            render_constraint(out, child);
            out.push(')');
        }
        _ => render_constraint(out, child),
    }
}

fn render_operand(out: &mut String, operand: &DynamicOperand) {
    match operand {
        DynamicOperand::PropertyValue { selector, property } => {
            out.push_str(&format!("{selector}.{property}"));
        }
        DynamicOperand::Length { selector, property } => {
            out.push_str(&format!("LENGTH({selector}.{property})"));
        }
        DynamicOperand::NodeName { selector } => out.push_str(&format!("NAME({selector})")),
        DynamicOperand::NodeLocalName { selector } => {
            out.push_str(&format!("LOCALNAME({selector})"));
        }
        DynamicOperand::FullTextScore { selector } => {
            out.push_str(&format!("SCORE({selector})"));
        }
        DynamicOperand::LowerCase(inner) => {
            out.push_str("LOWER(");
            render_operand(out, inner);
            out.push(')');
        }
        DynamicOperand::UpperCase(inner) => {
            out.push_str("UPPER(");
            render_operand(out, inner);
            out.push(')');
        }
    }
}

fn render_static(out: &mut String, operand: &StaticOperand) {
    match operand {
        StaticOperand::Literal(value) => render_value(out, value),
        StaticOperand::BindVariable(name) => out.push_str(&format!("${name}")),
    }
}

fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&f.to_string()),
        Value::Date(millis) => out.push_str(&format!("CAST({} AS DATE)", quote(&date_text(*millis)))),
        Value::Text(text) => out.push_str(&quote(text)),
    }
}

// RFC 3339 when the timestamp is representable, raw milliseconds
// otherwise; both are deterministic.
fn date_text(millis: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|odt| odt.format(&Rfc3339).ok())
        .unwrap_or_else(|| millis.to_string())
}

// Single-quoted with embedded quotes doubled.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use crate::qom::builder::QueryBuilder;
    use crate::qom::constraint::{Comparison, Constraint};
    use crate::qom::operand::{DynamicOperand, StaticOperand};
    use crate::qom::source::{JoinCondition, JoinType, Source};
    use crate::value::Value;

    #[test]
    fn minimal_query_selects_star() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .build()
            .unwrap();

        assert_eq!(model.statement(), "SELECT * FROM [page] AS p");
    }

    #[test]
    fn full_query_renders_every_clause() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::Comparison(Comparison::eq(
                DynamicOperand::property("p", "status"),
                Value::from("live"),
            )))
            .order_by_desc(DynamicOperand::property("p", "created"))
            .column("p", "title", Some("Title".to_string()))
            .limit(10)
            .offset(20)
            .build()
            .unwrap();

        assert_eq!(
            model.statement(),
            "SELECT p.title AS Title FROM [page] AS p \
             WHERE p.status = 'live' \
             ORDER BY p.created DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn join_sources_render_with_condition() {
        let source = Source::join(
            Source::selector("page", "p"),
            Source::selector("author", "a"),
            JoinType::LeftOuter,
            JoinCondition::EquiJoin {
                left_selector: "p".to_string(),
                left_property: "author".to_string(),
                right_selector: "a".to_string(),
                right_property: "name".to_string(),
            },
        );
        let model = QueryBuilder::new(source).build().unwrap();

        assert_eq!(
            model.statement(),
            "SELECT * FROM [page] AS p LEFT OUTER JOIN [author] AS a ON p.author = a.name"
        );
    }

    #[test]
    fn compound_children_are_parenthesized() {
        let live = Constraint::Comparison(Comparison::eq(
            DynamicOperand::property("p", "status"),
            Value::from("live"),
        ));
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(
                Constraint::property_exists("p", "title")
                    & (live | Constraint::property_exists("p", "draft")),
            )
            .build()
            .unwrap();

        assert_eq!(
            model.statement(),
            "SELECT * FROM [page] AS p WHERE p.title IS NOT NULL \
             AND (p.status = 'live' OR p.draft IS NOT NULL)"
        );
    }

    #[test]
    fn operands_and_literals_render_in_sql_form() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::Comparison(Comparison::gt(
                DynamicOperand::length("p", "body"),
                Value::from(100i64),
            )))
            .and(Constraint::Comparison(Comparison::like(
                DynamicOperand::node_name("p").lower_case(),
                Value::from("intro%"),
            )))
            .and(Constraint::Comparison(Comparison::ne(
                DynamicOperand::property("p", "flag"),
                Value::from(true),
            )))
            .build()
            .unwrap();

        assert_eq!(
            model.statement(),
            "SELECT * FROM [page] AS p WHERE LENGTH(p.body) > 100 \
             AND LOWER(NAME(p)) LIKE 'intro%' AND p.flag <> TRUE"
        );
    }

    #[test]
    fn bind_variables_and_quotes_are_escaped() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::Comparison(Comparison::eq(
                DynamicOperand::property("p", "owner"),
                StaticOperand::bind("owner"),
            )))
            .and(Constraint::full_text("p", None, "o'brien"))
            .build()
            .unwrap();

        assert_eq!(
            model.statement(),
            "SELECT * FROM [page] AS p WHERE p.owner = $owner \
             AND CONTAINS(p.*, 'o''brien')"
        );
    }

    #[test]
    fn dates_render_as_rfc3339_casts() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::Comparison(Comparison::gte(
                DynamicOperand::property("p", "created"),
                Value::Date(0),
            )))
            .build()
            .unwrap();

        assert_eq!(
            model.statement(),
            "SELECT * FROM [page] AS p WHERE p.created >= CAST('1970-01-01T00:00:00Z' AS DATE)"
        );
    }

    #[test]
    fn path_constraints_render_as_functions() {
        let model = QueryBuilder::new(Source::selector("page", "p"))
            .filter(Constraint::descendant_node("p", "/content/site"))
            .build()
            .unwrap();

        assert_eq!(
            model.statement(),
            "SELECT * FROM [page] AS p WHERE ISDESCENDANTNODE(p, '/content/site')"
        );
    }
}
