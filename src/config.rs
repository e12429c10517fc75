use clap::Parser;

use crate::orbit::TransferConfig;

pub const DEFAULT_PORT: u16 = 32000;

/// Remote-controlled solar system scene with a scripted orbital transfer
#[derive(Parser, Debug, Clone)]
#[command(name = "orrery")]
pub struct ServerConfig {
    /// Port the controller endpoint listens on
    #[arg(long, env = "ORRERY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "ORRERY_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Yaw offset of this display within a multi-screen wall, in degrees
    #[arg(
        long,
        env = "ORRERY_VIEW_ANGLE",
        default_value_t = 0.0,
        allow_hyphen_values = true
    )]
    pub view_angle: f32,

    /// Earth/sun/Mars angle, in whole degrees, that opens a transfer window
    #[arg(long, default_value_t = 44)]
    pub target_angle: i32,

    /// Simulation ticks per second
    #[arg(
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub tick_rate: u32,

    /// Start with orbital motion paused
    #[arg(long)]
    pub start_paused: bool,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// The parts of the configuration the simulation core sees.
#[derive(Debug, Clone, Default)]
pub struct SimulationConfig {
    pub view_angle: f32,
    pub transfer: TransferConfig,
    pub start_paused: bool,
}

impl From<&ServerConfig> for SimulationConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            view_angle: config.view_angle,
            transfer: TransferConfig {
                target_angle: config.target_angle,
                ..TransferConfig::default()
            },
            start_paused: config.start_paused,
        }
    }
}
