//! Client-side controller for the gapscan analyze API.
//!
//! The controller mediates between user input (file selection, drag events,
//! submit), a single backend endpoint, and a UI surface. The surface and the
//! transport are both injected traits so the full submit/render flow runs in
//! tests against fakes, with no rendering environment and no network.

pub mod backend;
pub mod controller;
pub mod error;
pub mod models;
pub mod surface;
pub mod terminal;

pub use backend::{AnalyzeBackend, HttpBackend};
pub use controller::{AnalysisController, SelectedFile};
pub use error::SubmitError;
pub use models::{AnalysisResult, ApiEnvelope, ScoreBand};
pub use surface::UiSurface;
pub use terminal::TerminalSurface;
