//! Controller layer: UI events, error modeling, command orchestration, and
//! the intake/results flow reducer.

pub mod events;
pub mod orchestration;
pub mod reducer;
