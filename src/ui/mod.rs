//! egui rendering. Every function here reads the current
//! [`AppState`](crate::state::AppState). The panels and the 3D scatter
//! (camera drag) mutate it; the other charts and the table only read.

pub mod panels;
pub mod plot;
pub mod table;
