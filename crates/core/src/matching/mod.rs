//! Capability matching: offered vs. required capability containers.

mod capability;
mod constraint;

pub use capability::{
    CapabilityMatcher, capability_semantic_id, find_capability_container, required_tool_type,
};
pub use constraint::{Constraint, ConstraintVerdict};
