use super::constraint::{Constraint, ConstraintVerdict};
use crate::navigator::{
    ElementNode, children_with_prefix, find_child, find_child_by_id_short, resolve_path,
    semantic_id_of,
};
use crate::vocab::{
    CAPABILITY_RELATIONSHIPS, CAPABILITY_SET, CONDITION_CONTAINER_PREFIX, CONSTRAINT,
    CONSTRAINT_CONTAINER_PREFIX, PROPERTY_SET, REQUIRES_TOOL_CONDITION,
};
use capcheck_api::{ElementKind, Submodel, SubmodelElement, UnsupportedConstraintPolicy};
use tracing::{debug, warn};

/// Semantic id of the `Capability` node inside a capability container.
pub fn capability_semantic_id(container: &SubmodelElement) -> Option<&str> {
    find_child(container, SubmodelElement::is_capability).and_then(semantic_id_of)
}

/// Container of the offered `CapabilitySet` declaring `semantic_id`.
pub fn find_capability_container<'a>(
    offered: &'a Submodel,
    semantic_id: &str,
) -> Option<&'a SubmodelElement> {
    let capability_set = find_child_by_id_short(offered, CAPABILITY_SET)?;
    find_child(capability_set, |container| {
        capability_semantic_id(container) == Some(semantic_id)
    })
}

/// Tool type the offered capability depends on, if any.
pub fn required_tool_type(offered_container: &SubmodelElement) -> Option<&str> {
    let relationships = find_child_by_id_short(offered_container, CAPABILITY_RELATIONSHIPS)?;
    children_with_prefix(relationships, CONDITION_CONTAINER_PREFIX)
        .find_map(|condition| resolve_path(condition, REQUIRES_TOOL_CONDITION))
        .and_then(SubmodelElement::value)
}

/// Decides whether an offered capability description subsumes a required one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityMatcher {
    policy: UnsupportedConstraintPolicy,
}

impl CapabilityMatcher {
    pub fn new(policy: UnsupportedConstraintPolicy) -> Self {
        Self { policy }
    }

    /// `true` iff `offered` declares the required capability and every
    /// required property passes the constraint declared for it.
    pub fn offers_capability(&self, offered: &Submodel, required: &SubmodelElement) -> bool {
        let Some(capability_id) = capability_semantic_id(required) else {
            debug!("Required container declares no capability semantic id");
            return false;
        };

        let Some(offered_container) = find_capability_container(offered, capability_id) else {
            debug!(
                "Submodel '{}' does not offer capability '{}'",
                offered.id, capability_id
            );
            return false;
        };

        self.constraints_fulfilled(required, offered_container)
    }

    fn constraints_fulfilled(
        &self,
        required: &SubmodelElement,
        offered_container: &SubmodelElement,
    ) -> bool {
        let Some(property_set) = find_child_by_id_short(required, PROPERTY_SET) else {
            return true;
        };
        let Some(relationships) =
            find_child_by_id_short(offered_container, CAPABILITY_RELATIONSHIPS)
        else {
            return true;
        };

        let constraint_containers: Vec<&SubmodelElement> =
            children_with_prefix(relationships, CONSTRAINT_CONTAINER_PREFIX).collect();
        if constraint_containers.is_empty() {
            return true;
        }

        property_set
            .children()
            .iter()
            .filter_map(required_property)
            .all(|property| self.property_fulfilled(property, &constraint_containers))
    }

    fn property_fulfilled(
        &self,
        property: &SubmodelElement,
        constraint_containers: &[&SubmodelElement],
    ) -> bool {
        let Some(name) = property.id_short() else {
            return true;
        };
        let Some(constraint) = constraint_for_property(name, constraint_containers) else {
            return true;
        };

        match Constraint::from_element(constraint).evaluate(property.value()) {
            ConstraintVerdict::Satisfied => true,
            ConstraintVerdict::Violated => {
                debug!(
                    "Property '{}' = {:?} violates the offered constraint",
                    name,
                    property.value()
                );
                false
            }
            ConstraintVerdict::Unsupported => {
                warn!(
                    "Unsupported type of constraint '{}' for property '{}' (policy: {:?})",
                    constraint.kind.model_type(),
                    name,
                    self.policy
                );
                self.policy == UnsupportedConstraintPolicy::Permissive
            }
        }
    }
}

// A `PropertySet` child is either the property itself or a container holding it.
fn required_property(child: &SubmodelElement) -> Option<&SubmodelElement> {
    if child.is_property() {
        return Some(child);
    }
    let property = find_child(child, SubmodelElement::is_property);
    if property.is_none() {
        debug!(
            "Property container '{}' holds no property",
            child.id_short().unwrap_or("-")
        );
    }
    property
}

// Association is by name only: the last key of the relationship's `first`
// reference must equal the property's idShort.
fn constraint_for_property<'a>(
    name: &str,
    constraint_containers: &[&'a SubmodelElement],
) -> Option<&'a SubmodelElement> {
    let container = constraint_containers.iter().copied().find(|container| {
        find_child(*container, |child| {
            matches!(child.kind, ElementKind::RelationshipElement { .. })
        })
        .is_some_and(|relationship| match &relationship.kind {
            ElementKind::RelationshipElement { first, .. } => first.last_key() == Some(name),
            _ => false,
        })
    })?;

    find_child_by_id_short(container, CONSTRAINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use capcheck_api::Reference;

    const DRILLING: &str = "urn:cap:drilling";

    fn required(properties: Option<Vec<SubmodelElement>>) -> SubmodelElement {
        let mut children = vec![SubmodelElement::capability("Drilling").with_semantic_id(DRILLING)];
        if let Some(properties) = properties {
            children.push(SubmodelElement::collection("PropertySet", properties));
        }
        SubmodelElement::collection("CapabilityContainer01", children)
    }

    fn property_container(name: &str, value: &str) -> SubmodelElement {
        SubmodelElement::collection(
            &format!("PropertyContainer{name}"),
            vec![SubmodelElement::property(name, value)],
        )
    }

    fn constraint_container(
        index: u8,
        property: &str,
        constraint: SubmodelElement,
    ) -> SubmodelElement {
        SubmodelElement::collection(
            &format!("ConstraintContainer{index:02}"),
            vec![
                SubmodelElement::relationship(
                    "ConstraintRelationship",
                    Reference::model([
                        ("Submodel", "urn:sm:offered"),
                        ("SubmodelElementCollection", "PropertySet"),
                        ("Property", property),
                    ]),
                    Reference::model([("Submodel", "urn:sm:offered"), ("Range", "Constraint")]),
                ),
                constraint,
            ],
        )
    }

    fn offered(relationships: Vec<SubmodelElement>) -> Submodel {
        Submodel::new("urn:sm:offered", "OfferedCapabilities").with_elements(vec![
            SubmodelElement::collection(
                "CapabilitySet",
                vec![
                    SubmodelElement::collection(
                        "CapabilityContainer01",
                        vec![
                            SubmodelElement::capability("Milling")
                                .with_semantic_id("urn:cap:milling"),
                        ],
                    ),
                    SubmodelElement::collection(
                        "CapabilityContainer02",
                        vec![
                            SubmodelElement::capability("Drilling").with_semantic_id(DRILLING),
                            SubmodelElement::collection("CapabilityRelationships", relationships),
                        ],
                    ),
                ],
            ),
        ])
    }

    #[test]
    fn test_capability_without_property_set_matches() {
        let matcher = CapabilityMatcher::default();
        assert!(matcher.offers_capability(&offered(vec![]), &required(None)));
    }

    #[test]
    fn test_missing_capability_does_not_match() {
        let matcher = CapabilityMatcher::default();
        let required = SubmodelElement::collection(
            "CapabilityContainer01",
            vec![SubmodelElement::capability("Welding").with_semantic_id("urn:cap:welding")],
        );
        assert!(!matcher.offers_capability(&offered(vec![]), &required));
    }

    #[test]
    fn test_range_constraint_applies_by_property_name() {
        let matcher = CapabilityMatcher::default();
        let offered = offered(vec![constraint_container(
            1,
            "Diameter",
            SubmodelElement::range("Constraint", "10", "20"),
        )]);

        let ok = required(Some(vec![property_container("Diameter", "20")]));
        let too_large = required(Some(vec![property_container("Diameter", "25")]));
        let unconstrained = required(Some(vec![property_container("Depth", "999")]));

        assert!(matcher.offers_capability(&offered, &ok));
        assert!(!matcher.offers_capability(&offered, &too_large));
        assert!(matcher.offers_capability(&offered, &unconstrained));
    }

    #[test]
    fn test_all_properties_must_pass() {
        let matcher = CapabilityMatcher::default();
        let offered = offered(vec![
            constraint_container(1, "Diameter", SubmodelElement::range("Constraint", "10", "20")),
            constraint_container(
                2,
                "Material",
                SubmodelElement::list(
                    "Constraint",
                    vec![SubmodelElement::property("M1", "steel")],
                ),
            ),
        ]);

        let both_ok = required(Some(vec![
            property_container("Diameter", "12"),
            SubmodelElement::property("Material", "steel"),
        ]));
        let one_bad = required(Some(vec![
            property_container("Diameter", "12"),
            SubmodelElement::property("Material", "wood"),
        ]));

        assert!(matcher.offers_capability(&offered, &both_ok));
        assert!(!matcher.offers_capability(&offered, &one_bad));
    }

    #[test]
    fn test_unsupported_constraint_follows_policy() {
        let offered = offered(vec![constraint_container(
            1,
            "Speed",
            SubmodelElement::property("Constraint", "fast"),
        )]);
        let required = required(Some(vec![property_container("Speed", "slow")]));

        let permissive = CapabilityMatcher::new(UnsupportedConstraintPolicy::Permissive);
        let strict = CapabilityMatcher::new(UnsupportedConstraintPolicy::Strict);
        assert!(permissive.offers_capability(&offered, &required));
        assert!(!strict.offers_capability(&offered, &required));
    }

    #[test]
    fn test_matching_is_deterministic() {
        let matcher = CapabilityMatcher::default();
        let offered = offered(vec![constraint_container(
            1,
            "Diameter",
            SubmodelElement::range("Constraint", "10", "20"),
        )]);
        let required = required(Some(vec![property_container("Diameter", "15")]));

        let first = matcher.offers_capability(&offered, &required);
        let second = matcher.offers_capability(&offered, &required);
        assert_eq!(first, second);
    }

    #[test]
    fn test_required_tool_type() {
        let container = SubmodelElement::collection(
            "CapabilityContainer01",
            vec![
                SubmodelElement::capability("Gripping").with_semantic_id("urn:cap:gripping"),
                SubmodelElement::collection(
                    "CapabilityRelationships",
                    vec![
                        SubmodelElement::collection("ConditionContainer01", vec![]),
                        SubmodelElement::collection(
                            "ConditionContainer02",
                            vec![SubmodelElement::property("RequiresToolCondition", "gripper")],
                        ),
                    ],
                ),
            ],
        );
        assert_eq!(required_tool_type(&container), Some("gripper"));

        let self_sufficient = required(None);
        assert_eq!(required_tool_type(&self_sufficient), None);
    }

    #[test]
    fn test_find_capability_container_first_match_wins() {
        let offered = offered(vec![]);
        let container = find_capability_container(&offered, DRILLING).unwrap();
        assert_eq!(container.id_short(), Some("CapabilityContainer02"));
        assert!(find_capability_container(&offered, "urn:cap:unknown").is_none());
    }
}
