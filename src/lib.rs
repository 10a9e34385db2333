//! Keplerian orbit viewer: trajectory computation, camera projection,
//! and the egui rendering pipeline behind the `orbit-viz` binary.

pub mod app;
pub mod camera;
pub mod celestial;
pub mod config;
pub mod drawing;
pub mod math;
pub mod orbital;
pub mod settings;
pub mod starfield;
