use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::precondition_violation;
use crate::scene_graph::{ObjectId, Scene};

/// Constant angular velocity of a frame, in degrees per second about `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    pub rate: f32,
}

impl Spin {
    pub fn about_y(rate: f32) -> Self {
        Self {
            axis: Vec3::Y,
            rate,
        }
    }

    pub fn rotation_over(&self, delta_time: f32) -> Quat {
        Quat::from_axis_angle(self.axis.normalize(), (self.rate * delta_time).to_radians())
    }
}

/// Named reference frames living in the scene graph. Every spinning node
/// is a frame; reparenting is only allowed onto known frames.
#[derive(Default)]
pub struct OrbitFrames {
    by_name: HashMap<String, ObjectId>,
    spins: Vec<(ObjectId, Spin)>,
}

impl OrbitFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame node at `offset` below `parent` (or at world level).
    pub fn add_frame(
        &mut self,
        scene: &mut Scene,
        name: &str,
        parent: Option<ObjectId>,
        offset: Vec3,
        spin: Option<Spin>,
    ) -> ObjectId {
        let frame = scene.create_child(parent, name);
        scene.set_object_translation(frame, offset);
        self.register(name, frame, spin);
        frame
    }

    /// Adopts an existing scene node as a frame.
    pub fn register(&mut self, name: &str, frame: ObjectId, spin: Option<Spin>) {
        self.by_name.insert(name.to_string(), frame);
        if let Some(spin) = spin {
            self.spins.push((frame, spin));
        }
    }

    pub fn frame(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, frame: ObjectId) -> bool {
        self.by_name.values().any(|&id| id == frame)
    }

    /// Rotates every spinning frame by `rate * delta_time`.
    pub fn advance(&self, scene: &mut Scene, delta_time: f32) {
        for (frame, spin) in &self.spins {
            scene.rotate_object(*frame, spin.rotation_over(delta_time));
        }
    }

    pub fn world_position(&self, scene: &Scene, frame: ObjectId) -> Vec3 {
        scene.world_position(frame)
    }

    /// Moves `node` under `frame` and zeroes its local offset, so it snaps
    /// onto the frame's origin.
    pub fn reparent(&self, scene: &mut Scene, node: ObjectId, frame: ObjectId) {
        if !self.contains(frame) {
            precondition_violation!("reparent target {frame:?} is not a known frame");
            return;
        }

        scene.set_object_parent(node, Some(frame));
        scene.set_object_translation(node, Vec3::ZERO);
    }

    pub fn reparent_named(&self, scene: &mut Scene, node: ObjectId, frame_name: &str) {
        match self.frame(frame_name) {
            Some(frame) => self.reparent(scene, node, frame),
            None => precondition_violation!("reparent target {frame_name:?} is not a known frame"),
        }
    }
}
