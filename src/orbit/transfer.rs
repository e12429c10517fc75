use glam::Vec3;

use crate::orbit::detector::{Firing, TransferWindowDetector};
use crate::orbit::frames::{OrbitFrames, Spin};
use crate::precondition_violation;
use crate::scene_graph::{ObjectId, Scene};

pub const TRANSFER_CENTER: &str = "TransferCenter";
pub const TRANSFER_ORBIT: &str = "TransferOrbit";
pub const TRANSFER_ARM: &str = "TransferArm";

#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Whole-degree angle at the reference body that opens the window.
    pub target_angle: i32,
    /// Vehicle-to-destination distance that counts as arrival.
    pub arrival_epsilon: f32,
    /// Spin of the transfer orbit frame, degrees per second about +Y.
    pub orbit_rate: f32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            target_angle: 44,
            arrival_epsilon: 0.01,
            orbit_rate: -36.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    AttachedOrigin,
    InTransit,
    AttachedDestination,
}

/// Scene nodes the controller watches and moves.
#[derive(Debug, Clone, Copy)]
pub struct TransferBodies {
    pub vehicle: ObjectId,
    pub origin: ObjectId,
    pub destination: ObjectId,
    pub reference: ObjectId,
    /// Point the transfer orbit is centered on at launch time.
    pub anchor: ObjectId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferState {
    pub attached_frame: ObjectId,
    pub ticket_count: u32,
    pub armed: bool,
    pub phase: TransferPhase,
}

pub struct TransferController {
    bodies: TransferBodies,
    config: TransferConfig,
    detector: TransferWindowDetector,
    phase: TransferPhase,
    attached_frame: ObjectId,
}

impl TransferController {
    pub fn new(bodies: TransferBodies, config: TransferConfig) -> Self {
        Self {
            detector: TransferWindowDetector::new(config.target_angle),
            phase: TransferPhase::AttachedOrigin,
            attached_frame: bodies.origin,
            bodies,
            config,
        }
    }

    pub fn phase(&self) -> TransferPhase {
        self.phase
    }

    pub fn bodies(&self) -> &TransferBodies {
        &self.bodies
    }

    pub fn state(&self) -> TransferState {
        TransferState {
            attached_frame: self.attached_frame,
            ticket_count: self.detector.ticket_count(),
            armed: self.detector.is_armed(),
            phase: self.phase,
        }
    }

    /// Per-tick evaluation: window detection first, then arrival.
    pub fn update(&mut self, scene: &mut Scene, frames: &mut OrbitFrames) {
        let TransferBodies {
            vehicle,
            origin,
            destination,
            reference,
            anchor,
        } = self.bodies;
        if [vehicle, origin, destination, reference, anchor]
            .iter()
            .any(|&id| scene.get_object(id).is_none())
        {
            precondition_violation!("transfer bodies are not part of the scene");
            return;
        }

        let firing = self.detector.observe_positions(
            frames.world_position(scene, origin),
            frames.world_position(scene, destination),
            frames.world_position(scene, reference),
        );
        if let Some(firing) = firing {
            self.on_firing(firing, scene, frames);
        }

        self.check_arrival(scene, frames);
    }

    /// Feeds a raw angle sample, bypassing position measurement.
    pub fn observe_angle(&mut self, angle: i32, scene: &mut Scene, frames: &mut OrbitFrames) {
        if let Some(firing) = self.detector.observe(angle) {
            self.on_firing(firing, scene, frames);
        }
    }

    fn on_firing(&mut self, firing: Firing, scene: &mut Scene, frames: &mut OrbitFrames) {
        if !firing.launches() {
            log::info!("transfer window {} skipped", firing.ticket);
            return;
        }

        if self.phase != TransferPhase::AttachedOrigin {
            log::debug!(
                "transfer window {} ignored in {:?}",
                firing.ticket,
                self.phase
            );
            return;
        }

        self.launch(scene, frames);
        log::info!("vehicle launched on window {}", firing.ticket);
    }

    fn launch(&mut self, scene: &mut Scene, frames: &mut OrbitFrames) {
        let center = frames.world_position(scene, self.bodies.anchor);
        let start = frames.world_position(scene, self.bodies.origin);

        let center_frame = frames.add_frame(scene, TRANSFER_CENTER, None, center, None);
        let orbit_frame = frames.add_frame(
            scene,
            TRANSFER_ORBIT,
            Some(center_frame),
            Vec3::ZERO,
            Some(Spin::about_y(self.config.orbit_rate)),
        );
        let arm = frames.add_frame(scene, TRANSFER_ARM, Some(orbit_frame), start - center, None);

        frames.reparent(scene, self.bodies.vehicle, arm);
        self.attached_frame = arm;
        self.phase = TransferPhase::InTransit;
    }

    fn check_arrival(&mut self, scene: &mut Scene, frames: &OrbitFrames) {
        if self.phase != TransferPhase::InTransit {
            return;
        }

        let vehicle = frames.world_position(scene, self.bodies.vehicle);
        let destination = frames.world_position(scene, self.bodies.destination);
        if vehicle.distance(destination) > self.config.arrival_epsilon {
            return;
        }

        frames.reparent(scene, self.bodies.vehicle, self.bodies.destination);
        self.attached_frame = self.bodies.destination;
        self.phase = TransferPhase::AttachedDestination;
        log::info!("vehicle arrived at destination");
    }
}
