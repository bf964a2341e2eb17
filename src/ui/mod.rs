//! egui rendering: filter widgets, top bar and the two chart panels.

pub mod panels;
pub mod plot;
