//! Commands Layer
//!
//! Operation handlers that bridge a UI layer to the repositories and the
//! section builder. Input validation happens here, before anything is
//! written.

mod item_cmd;
mod registry_cmd;
mod section_cmd;
mod trip_cmd;

#[cfg(test)]
mod tests;

pub use item_cmd::*;
pub use registry_cmd::*;
pub use section_cmd::*;
pub use trip_cmd::*;
