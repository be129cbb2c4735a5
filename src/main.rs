//! LungScan - Lung CT scan analysis session
//!
//! Headless demo entry point. It initializes:
//! - Logging infrastructure (file rotation + console output)
//! - Tokio async runtime (the gateway call is the only suspending operation)
//! - Configuration loading ([`ConfigManager`])
//! - A [`ScanSession`] wired to the stub gateway and the tracing notifier
//!
//! The demo then walks one full upload/analyze/display cycle: a scan is
//! accepted through the intake collaborator, analyzed through the fixed-delay
//! gateway (bounded by the configured timeout), and the derived result
//! presentation is written to the log. A GUI frontend would subscribe to the
//! session's event channel instead of polling snapshots.

use anyhow::Result;
use lungscan::notify::TracingNotifier;
use lungscan::services::{FixedDelayGateway, ImageIntake, TimeoutGateway};
use lungscan::view::{ResultPresentation, ResultView};
use lungscan::{APP_NAME, ConfigManager, ScanSession, VERSION};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    // Load configuration first so the debug flag can steer log level
    let config_manager = ConfigManager::new("LungScan Data")?;
    let config = config_manager.load_user_config()?;
    let settings = &config.settings;

    let _guard = lungscan::logging::setup_logging("logs", "lungscan", settings.debug_logging, true)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!(
        "Gateway: {}s simulated delay, {}s timeout, reselect policy {:?}",
        settings.gateway_delay,
        settings.gateway_timeout,
        settings.reselect_policy
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("lungscan-worker")
        .build()?;

    // Stub gateway behind the production timeout decorator; a real deployment
    // swaps the inner gateway for an inference-service client
    let stub = Arc::new(FixedDelayGateway::new(Duration::from_secs(
        settings.gateway_delay,
    )));
    let gateway = Arc::new(TimeoutGateway::new(
        stub,
        Duration::from_secs(settings.gateway_timeout),
    ));

    let notifier = Arc::new(TracingNotifier);
    let session = ScanSession::with_policy(gateway, notifier.clone(), settings.reselect_policy);
    let intake = ImageIntake::new(notifier);
    let mut view = ResultView::with_default_rows(settings.skeleton_rows);

    runtime.block_on(async {
        let handle = intake.accept("file:///demo/ct-scan-001.png", "image/png")?;
        session.select_image(handle)?;

        tracing::info!("Running demo analysis...");
        session.analyze().await?;

        match view.present(&session.snapshot()) {
            ResultPresentation::Populated { summary, rows } => {
                if let Some(summary) = summary {
                    if let Some(model) = summary.model_name {
                        tracing::info!("Model: {}", model);
                    }
                    if let (Some(detection), Some(score)) =
                        (summary.detection, summary.confidence_score)
                    {
                        tracing::info!("Detection: {} ({}% confidence)", detection, score);
                    }
                }
                for row in rows {
                    tracing::info!("  {:<28} {}", row.name, row.percent_label);
                }
            }
            other => tracing::warn!("Unexpected presentation after analysis: {:?}", other),
        }

        session.clear();
        anyhow::Ok(())
    })?;

    session.metrics().log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Demo complete");
    Ok(())
}
