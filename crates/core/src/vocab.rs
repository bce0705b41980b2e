//! Well-known identifiers of the capability and slot vocabulary.

/// Extension declaring the slot an asset must be mounted into.
pub const REQUIRED_SLOT: &str = "http://arena2036.de/requiredSlot/1/0";
/// Extension declaring the slot an asset offers to others.
pub const OFFERED_SLOT: &str = "http://arena2036.de/offeredSlot/1/0";
/// Extension declaring the tool type of an asset.
pub const TOOL_TYPE: &str = "http://arena2036.de/toolType/1/0";

pub const OFFERED_CAPABILITIES: &str = "OfferedCapabilities";
pub const HIERARCHICAL_STRUCTURES: &str = "HierarchicalStructures";

pub const CAPABILITY_SET: &str = "CapabilitySet";
pub const PROPERTY_SET: &str = "PropertySet";
pub const CAPABILITY_RELATIONSHIPS: &str = "CapabilityRelationships";
pub const CONSTRAINT: &str = "Constraint";
pub const REQUIRES_TOOL_CONDITION: &str = "RequiresToolCondition";
pub const ENTRY_NODE: &str = "EntryNode";

pub const CONSTRAINT_CONTAINER_PREFIX: &str = "ConstraintContainer";
pub const CONDITION_CONTAINER_PREFIX: &str = "ConditionContainer";
