//! Domain models for the clinic-desk system.

mod directory;
mod dose;
mod reference;
mod units;

pub use directory::*;
pub use dose::*;
pub use reference::*;
pub use units::*;
