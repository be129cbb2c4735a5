//! Data models for the LungScan session.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`SessionState`]: the single mutable entity, owning the uploaded image,
//!   the processed image, the analysis status, and the results
//! - [`AnalysisReport`]: insertion-ordered probability distribution plus the
//!   optional [`DetectionSummary`] verdict
//! - [`UserConfig`]: user preferences loaded from `LungScan Config.yaml`
//!
//! # Architecture Note
//!
//! `SessionState` is wrapped in `Arc<RwLock<>>` by
//! [`ScanSession`](crate::session::ScanSession); mutations go through the
//! session intents so change events stay consistent with the state.

pub mod config;
pub mod results;
pub mod session;

pub use config::{ScanSettings, UserConfig};
pub use results::{AnalysisReport, CancerType, DetectionSummary};
pub use session::{AnalysisStatus, ImageHandle, SessionState};
