/// Pure game rules: values, geometry and per-entity behaviour.
/// Nothing here owns session state.

pub mod entity;
pub mod motion;
pub mod particles;
pub mod resource;
pub mod rules;
