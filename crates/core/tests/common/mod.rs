#![allow(dead_code)]

use capcheck_api::{
    Asset, AssetAccessor, AssetKind, Environment, Reference, Submodel, SubmodelElement,
};
use capcheck_core::InMemoryAccessor;
use capcheck_core::vocab::{OFFERED_SLOT, REQUIRED_SLOT, TOOL_TYPE};
use std::sync::Arc;

pub const MACHINE: &str = "urn:aas:machine";
pub const GRIPPER: &str = "urn:aas:gripper";
pub const GRIPPER_ASSET: &str = "urn:asset:gripper-0815";
pub const REQUIRED: &str = "urn:sm:required";

pub const DRILLING: &str = "urn:cap:drilling";
pub const GRIPPING: &str = "urn:cap:gripping";
pub const WELDING: &str = "urn:cap:welding";

/// Drilling, no properties; offered directly by the machine.
pub const DRILL_PLAIN: &str = "CapabilitySet/CapabilityContainer01";
/// Drilling with Diameter = 25, outside the machine's [10, 20].
pub const DRILL_TOO_WIDE: &str = "CapabilitySet/CapabilityContainer02";
/// Gripping, no properties; the machine needs a gripper for it.
pub const GRIP_PLAIN: &str = "CapabilitySet/CapabilityContainer03";
/// Welding; nobody offers it.
pub const WELD: &str = "CapabilitySet/CapabilityContainer04";
/// Gripping with Payload = 50, outside the gripper's [0, 10].
pub const GRIP_HEAVY: &str = "CapabilitySet/CapabilityContainer05";

fn capability(name: &str, semantic_id: &str) -> SubmodelElement {
    SubmodelElement::capability(name).with_semantic_id(semantic_id)
}

fn property_set(name: &str, value: &str) -> SubmodelElement {
    SubmodelElement::collection(
        "PropertySet",
        vec![SubmodelElement::collection(
            "PropertyContainer01",
            vec![SubmodelElement::property(name, value)],
        )],
    )
}

fn range_constraint(submodel_id: &str, property: &str, min: &str, max: &str) -> SubmodelElement {
    SubmodelElement::collection(
        "ConstraintContainer01",
        vec![
            SubmodelElement::relationship(
                "ConstraintRelationship",
                Reference::model([
                    ("Submodel", submodel_id),
                    ("SubmodelElementCollection", "PropertySet"),
                    ("Property", property),
                ]),
                Reference::model([("Submodel", submodel_id), ("Range", "Constraint")]),
            ),
            SubmodelElement::range("Constraint", min, max),
        ],
    )
}

pub fn required_submodel() -> Submodel {
    Submodel::new(REQUIRED, "RequiredCapabilities").with_elements(vec![
        SubmodelElement::collection(
            "CapabilitySet",
            vec![
                SubmodelElement::collection(
                    "CapabilityContainer01",
                    vec![capability("Drilling", DRILLING)],
                ),
                SubmodelElement::collection(
                    "CapabilityContainer02",
                    vec![capability("Drilling", DRILLING), property_set("Diameter", "25")],
                ),
                SubmodelElement::collection(
                    "CapabilityContainer03",
                    vec![capability("Gripping", GRIPPING)],
                ),
                SubmodelElement::collection(
                    "CapabilityContainer04",
                    vec![capability("Welding", WELDING)],
                ),
                SubmodelElement::collection(
                    "CapabilityContainer05",
                    vec![capability("Gripping", GRIPPING), property_set("Payload", "50")],
                ),
            ],
        ),
    ])
}

fn machine_offered() -> Submodel {
    let id = "urn:sm:machine-offered";
    Submodel::new(id, "OfferedCapabilities").with_elements(vec![SubmodelElement::collection(
        "CapabilitySet",
        vec![
            SubmodelElement::collection(
                "CapabilityContainer01",
                vec![
                    capability("Drilling", DRILLING),
                    SubmodelElement::collection(
                        "CapabilityRelationships",
                        vec![range_constraint(id, "Diameter", "10", "20")],
                    ),
                ],
            ),
            SubmodelElement::collection(
                "CapabilityContainer02",
                vec![
                    capability("Gripping", GRIPPING),
                    SubmodelElement::collection(
                        "CapabilityRelationships",
                        vec![SubmodelElement::collection(
                            "ConditionContainer01",
                            vec![SubmodelElement::property("RequiresToolCondition", "gripper")],
                        )],
                    ),
                ],
            ),
        ],
    )])
}

fn gripper_offered() -> Submodel {
    let id = "urn:sm:gripper-offered";
    Submodel::new(id, "OfferedCapabilities").with_elements(vec![SubmodelElement::collection(
        "CapabilitySet",
        vec![SubmodelElement::collection(
            "CapabilityContainer01",
            vec![
                capability("Gripping", GRIPPING),
                SubmodelElement::collection(
                    "CapabilityRelationships",
                    vec![range_constraint(id, "Payload", "0", "10")],
                ),
            ],
        )],
    )])
}

fn bom(leaf_asset_id: &str) -> Submodel {
    Submodel::new("urn:sm:machine-bom", "HierarchicalStructures").with_elements(vec![
        SubmodelElement::entity(
            "EntryNode",
            Some("urn:asset:machine"),
            vec![SubmodelElement::entity(
                "ToolChanger",
                Some("urn:asset:changer"),
                vec![SubmodelElement::entity("Gripper", Some(leaf_asset_id), vec![])],
            )],
        ),
    ])
}

/// A machine, one gripper tool and the required capability catalog.
pub struct Plant {
    pub machine_kind: AssetKind,
    pub tool_kind: AssetKind,
    /// Slot the gripper must be mounted into; the machine offers "X".
    pub tool_slot: &'static str,
    /// Whether the machine's bill of material lists the gripper.
    pub gripper_mounted: bool,
    pub with_bom: bool,
}

impl Plant {
    pub fn types() -> Self {
        Self {
            machine_kind: AssetKind::Type,
            tool_kind: AssetKind::Type,
            tool_slot: "X",
            gripper_mounted: false,
            with_bom: false,
        }
    }

    pub fn instances() -> Self {
        Self {
            machine_kind: AssetKind::Instance,
            tool_kind: AssetKind::Instance,
            ..Self::types()
        }
    }

    pub fn mounted(mut self) -> Self {
        self.with_bom = true;
        self.gripper_mounted = true;
        self
    }

    pub fn environment(&self) -> Environment {
        let mut machine = Asset::new(MACHINE, self.machine_kind)
            .with_global_asset_id("urn:asset:machine")
            .with_extension(OFFERED_SLOT, "X")
            .with_submodel("urn:sm:machine-offered");
        let mut submodels = vec![required_submodel(), machine_offered(), gripper_offered()];

        if self.with_bom {
            machine = machine.with_submodel("urn:sm:machine-bom");
            let leaf = if self.gripper_mounted {
                GRIPPER_ASSET
            } else {
                "urn:asset:something-else"
            };
            submodels.push(bom(leaf));
        }

        let gripper = Asset::new(GRIPPER, self.tool_kind)
            .with_global_asset_id(GRIPPER_ASSET)
            .with_extension(TOOL_TYPE, "gripper")
            .with_extension(REQUIRED_SLOT, self.tool_slot)
            .with_submodel("urn:sm:gripper-offered");

        let spindle = Asset::new("urn:aas:spindle", self.tool_kind)
            .with_extension(TOOL_TYPE, "drill")
            .with_extension(REQUIRED_SLOT, "X");

        Environment {
            asset_administration_shells: vec![gripper, spindle, machine],
            submodels,
        }
    }

    pub fn accessor(&self) -> Arc<dyn AssetAccessor> {
        Arc::new(InMemoryAccessor::from_environment(self.environment()))
    }
}
