use crate::qom::constraint::Constraint;

///
/// Normalize a constraint into a canonical, deterministic form.
///
/// Normalization guarantees:
/// - Logical equivalence is preserved
/// - Nested AND / OR nodes are flattened
/// - Single-child AND / OR nodes collapse to the child
/// - Double negation is eliminated
/// - Child order is preserved
///
/// The pass is idempotent; builders run it once at `build()` so equal
/// queries compare equal structurally.
///
#[must_use]
pub fn normalize(constraint: &Constraint) -> Constraint {
    match constraint {
        Constraint::And(children) => normalize_compound(children, true),
        Constraint::Or(children) => normalize_compound(children, false),
        Constraint::Not(inner) => normalize_not(inner),

        Constraint::Comparison(_)
        | Constraint::PropertyExists { .. }
        | Constraint::FullTextSearch { .. }
        | Constraint::SameNode { .. }
        | Constraint::ChildNode { .. }
        | Constraint::DescendantNode { .. } => constraint.clone(),
    }
}

// Flatten one AND/OR level after normalizing children, then collapse
// singletons.
fn normalize_compound(children: &[Constraint], is_and: bool) -> Constraint {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        match normalize(child) {
            Constraint::And(nested) if is_and => flat.extend(nested),
            Constraint::Or(nested) if !is_and => flat.extend(nested),
            other => flat.push(other),
        }
    }

    if flat.len() == 1 {
        return flat.remove(0);
    }

    if is_and {
        Constraint::And(flat)
    } else {
        Constraint::Or(flat)
    }
}

fn normalize_not(inner: &Constraint) -> Constraint {
    match normalize(inner) {
        Constraint::Not(nested) => *nested,
        other => Constraint::not(other),
    }
}
