use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use orrery::config::{ServerConfig, SimulationConfig};
use orrery::remote::MessageEndpoint;
use orrery::simulation::Simulation;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = ServerConfig::parse();
    let simulation = Simulation::new(&SimulationConfig::from(&config));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let addr = config.listen_addr();
    let _endpoint = MessageEndpoint::bind(addr.as_str(), events_tx)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;

    orrery::engine::run(simulation, events_rx, config.tick_rate).await
}
