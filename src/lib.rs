// LungScan - Lung CT scan upload/analyze/display session controller
//
// This is the library crate containing the core state machine and data
// structures. The binary crate (main.rs) provides a headless demo entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod services;
pub mod session;
pub mod view;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{
    AnalysisReport, AnalysisStatus, CancerType, DetectionSummary, ImageHandle, SessionState,
    UserConfig,
};
pub use session::{ReselectPolicy, ScanSession, SessionError, SessionEvent};
pub use view::{ResultPresentation, ResultView};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
