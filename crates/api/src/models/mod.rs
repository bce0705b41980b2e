pub mod asset;
pub mod check;
pub mod endpoint;
pub mod environment;
pub mod reference;
pub mod submodel;

pub use asset::*;
pub use check::*;
pub use endpoint::*;
pub use environment::*;
pub use reference::*;
pub use submodel::*;
