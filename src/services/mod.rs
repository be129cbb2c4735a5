//! Services module - collaborators around the session core.
//!
//! Everything here is framework-agnostic and has no dependency on the session
//! layer, making each piece testable in isolation.
//!
//! # Components
//!
//! - [`AnalysisGateway`]: the boundary to the scan analysis backend. The crate
//!   ships [`FixedDelayGateway`], a pure-timer stub that resolves with a fixed
//!   result set, and [`TimeoutGateway`], a decorator that bounds any gateway
//!   with a deadline. A production deployment substitutes an implementation
//!   that calls a real inference service.
//! - [`ImageIntake`]: validates user-selected files (image MIME types only)
//!   and mints [`ImageHandle`](crate::models::ImageHandle)s, raising the
//!   upload notifications.
//!
//! # Design Philosophy
//!
//! - **Stateless**: all inputs are explicit parameters
//! - **Async at the seam**: the gateway is the session's only suspension point
//! - **Substitutable**: the session holds `Arc<dyn AnalysisGateway>`, nothing
//!   more specific

pub mod gateway;
pub mod intake;

pub use gateway::{AnalysisGateway, FixedDelayGateway, GatewayError, TimeoutGateway, reference_report};
pub use intake::{ImageIntake, IntakeError};
