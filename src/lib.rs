/// Bridge Keeper: a village must be salvaged for bridge materials before
/// the flood arrives.
///
/// `sim::session::Simulation` is the entry point. Front ends feed it
/// `InputEvent`s and frame deltas, then draw from `Snapshot`.

pub mod config;
pub mod domain;
pub mod sim;
