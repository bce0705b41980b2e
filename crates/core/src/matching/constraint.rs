use crate::navigator::ElementNode;
use capcheck_api::{ElementKind, SubmodelElement};

/// Value restriction declared by an offered capability.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint<'a> {
    /// Inclusive numeric bounds.
    Range {
        min: Option<&'a str>,
        max: Option<&'a str>,
    },
    /// Allowed literal values, in declared order.
    Enumeration(Vec<&'a str>),
    /// Any other element shape; carries its model type for diagnostics.
    Unsupported(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintVerdict {
    Satisfied,
    Violated,
    Unsupported,
}

impl ConstraintVerdict {
    fn from_bool(satisfied: bool) -> Self {
        if satisfied {
            ConstraintVerdict::Satisfied
        } else {
            ConstraintVerdict::Violated
        }
    }
}

impl<'a> Constraint<'a> {
    pub fn from_element(element: &'a SubmodelElement) -> Self {
        match &element.kind {
            ElementKind::Range { min, max } => Constraint::Range {
                min: min.as_deref(),
                max: max.as_deref(),
            },
            ElementKind::List { .. } => Constraint::Enumeration(
                element
                    .children()
                    .iter()
                    .filter(|child| child.is_property())
                    .filter_map(SubmodelElement::value)
                    .collect(),
            ),
            other => Constraint::Unsupported(other.model_type()),
        }
    }

    /// Evaluate the constraint against a required property value.
    ///
    /// Missing or non-numeric values never satisfy a range.
    pub fn evaluate(&self, value: Option<&str>) -> ConstraintVerdict {
        match self {
            Constraint::Range { min, max } => {
                let bounds = (parse_number(*min), parse_number(*max), parse_number(value));
                let satisfied = match bounds {
                    (Some(min), Some(max), Some(value)) => min <= value && value <= max,
                    _ => false,
                };
                ConstraintVerdict::from_bool(satisfied)
            }
            Constraint::Enumeration(allowed) => {
                let satisfied = value.is_some_and(|value| allowed.contains(&value));
                ConstraintVerdict::from_bool(satisfied)
            }
            Constraint::Unsupported(_) => ConstraintVerdict::Unsupported,
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| !n.is_nan())
}
