/// Session state and the systems that mutate it.

pub mod construction;
pub mod event;
pub mod generation;
pub mod interact;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod step;
pub mod world;
