//! Egui-based interactive atlas viewer (feature = "egui").
//!
//! A thin adapter over the core: [`state`] holds the application state
//! (dataset, view controller, dialogs, onboarding guide) and [`ui`] renders
//! one frame and translates gestures into controller calls.

#![cfg(feature = "egui")]

mod state;
mod ui;

pub use state::{AtlasApp, AudioCue, GuideState, LoadState, VerseDialog};
