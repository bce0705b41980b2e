pub mod error;
pub mod logging;

pub mod check;
pub mod hierarchy;
pub mod matching;
pub mod memory;
pub mod mounting;
pub mod navigator;
pub mod vocab;

pub use check::CapabilityChecker;
pub use error::{CheckError, Result};
pub use memory::InMemoryAccessor;
