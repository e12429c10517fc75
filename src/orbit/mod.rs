pub mod detector;
pub mod frames;
pub mod solar_system;
pub mod transfer;

pub use detector::{subtended_angle, Firing, TransferWindowDetector};
pub use frames::{OrbitFrames, Spin};
pub use solar_system::SolarSystem;
pub use transfer::{
    TransferBodies, TransferConfig, TransferController, TransferPhase, TransferState,
};
