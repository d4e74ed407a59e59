//! Garrison - military unit management simulator
//!
//! Soldiers, teams and missions live in a [`registry::Registry`]; the
//! [`simulation::Simulator`] wraps it with a seeded random source and the
//! mission progress rules. The [`ui::Shell`] drives everything from a text
//! menu through [`command::Command`] values.

pub mod command;
pub mod core;
pub mod data;
pub mod entity;
pub mod mission;
pub mod registry;
pub mod report;
pub mod simulation;
pub mod ui;
