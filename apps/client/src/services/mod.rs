//! Services: the stateful pieces built on top of the pure domain layer.

pub mod phase_controller;
