use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::remote::EndpointEvent;
use crate::simulation::Simulation;

/// Applies every event that arrived since the last tick, in order.
/// Returns false once the endpoint side is gone.
pub fn drain_events(
    simulation: &mut Simulation,
    events: &mut mpsc::UnboundedReceiver<EndpointEvent>,
) -> bool {
    loop {
        match events.try_recv() {
            Ok(EndpointEvent::Message {
                connection,
                payload,
            }) => {
                log::debug!("controller {connection}: {payload:?}");
                // Rejections are already logged by the simulation.
                let _ = simulation.handle_message(&payload);
            }
            Ok(EndpointEvent::Connected(connection)) => {
                log::info!("controller {connection} attached");
            }
            Ok(EndpointEvent::Disconnected(connection)) => {
                log::info!("controller {connection} detached");
            }
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

/// Runs the fixed-rate tick loop until the event channel closes.
pub async fn run(
    mut simulation: Simulation,
    mut events: mpsc::UnboundedReceiver<EndpointEvent>,
    tick_rate: u32,
) -> anyhow::Result<()> {
    let mut ticker = interval(Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1))));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_tick = Instant::now();
    loop {
        let now = ticker.tick().await;
        let delta_time = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        if !drain_events(&mut simulation, &mut events) {
            log::info!("event channel closed, stopping simulation");
            return Ok(());
        }
        simulation.tick(delta_time);
    }
}
