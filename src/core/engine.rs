use crate::core::confirmation;
use crate::core::registration::{DeliveryOutcome, RegistrationPipeline};
use crate::core::status::{event_status, render_status};
use crate::domain::model::{ConfirmationView, RegistrationForm};
use crate::domain::ports::{Clock, ConfigProvider, KeyValueStore, StatusDisplay};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Status clock cadence.
const TICK_MS: u64 = 1000;

/// Orchestrates the two independent flows of the page: the 1-second status
/// clock and the registration submit path with its delayed navigation to
/// the confirmation view.
pub struct LandingEngine<S: KeyValueStore, C: ConfigProvider> {
    pipeline: RegistrationPipeline<S, C>,
    clock: Arc<dyn Clock>,
}

impl<S, C> LandingEngine<S, C>
where
    S: KeyValueStore,
    C: ConfigProvider,
{
    pub fn new(pipeline: RegistrationPipeline<S, C>, clock: Arc<dyn Clock>) -> Self {
        Self { pipeline, clock }
    }

    /// Re-evaluates the event status every second and hands the view to the
    /// display, which is optional: without one each tick is a no-op. Runs
    /// until `ticks` renders have happened, or forever when `ticks` is
    /// `None`. The first render fires immediately.
    pub async fn run_countdown(
        &self,
        mut display: Option<&mut dyn StatusDisplay>,
        ticks: Option<u64>,
    ) {
        let window = self.pipeline.config().event_window();
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
        let mut rendered: u64 = 0;

        loop {
            if let Some(limit) = ticks {
                if rendered >= limit {
                    break;
                }
            }
            interval.tick().await;

            let view = render_status(&event_status(self.clock.now(), &window));
            if let Some(display) = display.as_deref_mut() {
                display.render(&view);
            }
            rendered += 1;
        }
    }

    /// The submit path: validate + persist (awaited), spawn delivery (not
    /// awaited), wait out the fixed navigation delay, then load the
    /// confirmation view. Delivery outcome never blocks or fails this.
    pub async fn run_registration(&self, form: &RegistrationForm) -> Result<ConfirmationView> {
        let record = self.pipeline.submit(form).await?;
        tracing::info!("Registration accepted for {}", record.email);

        let delay = Duration::from_millis(self.pipeline.config().submit_delay_ms());
        tokio::time::sleep(delay).await;

        Ok(self.run_confirmation().await)
    }

    /// Confirmation-view load: read the persisted record back and render,
    /// falling back to the default view when absent or unparsable.
    pub async fn run_confirmation(&self) -> ConfirmationView {
        let record = confirmation::load_record(self.pipeline.store()).await;
        confirmation::render_confirmation(record.as_ref())
    }

    pub async fn send_debug_webhook(&self) -> DeliveryOutcome {
        self.pipeline.send_debug_webhook().await
    }
}
