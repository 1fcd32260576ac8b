//! Sentinel app: wires the pure core to the engine and a terminal front end.
pub mod platform;
