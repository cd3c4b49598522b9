//! Radial verse-collection visualizer.
//!
//! This crate loads a dataset of verses grouped into numbered mandalas, lays
//! the mandalas out on a large circle with the verses of each mandala on a
//! phyllotaxis spiral, and maintains an animated pan/zoom view transform over
//! the laid-out scene.
//!
//! The binary `mandalaviz` demonstrates usage and prints the laid-out JSON.

pub mod config;
pub mod dataset;
pub mod layout;
pub mod model;
pub mod view;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
// This module provides the interactive atlas viewer launched via
// `mandalaviz --view`.
#[cfg(feature = "egui")]
pub mod egui_app;
