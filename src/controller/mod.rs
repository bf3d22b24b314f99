//! View-state controllers for the admin screens
//!
//! Each screen instance owns its state exclusively: the list/form
//! controller drives the CRUD workflow, the transfer controller drives
//! the value-transfer workflow. Both surface every outcome as a
//! transient notification and cancel all pending backend work when they
//! are torn down.

mod confirm;
mod notify;
mod transfer;
mod view;

pub use confirm::*;
pub use notify::*;
pub use transfer::*;
pub use view::*;
