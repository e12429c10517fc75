use glam::{Quat, Vec3};

use crate::orbit::OrbitFrames;
use crate::scene_graph::{euler_degrees, ObjectId, Scene};

/// Remote moves use a fixed step, not the elapsed network time.
pub const MOVE_SPEED: f32 = 50.0;
pub const NOMINAL_TIMESTEP: f32 = 0.1;
pub const INITIAL_PITCH: f32 = 60.0;
pub const CAMERA_MOUNT: &str = "CameraMount";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAxis {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl CameraAxis {
    pub fn direction(self) -> Vec3 {
        match self {
            CameraAxis::Forward => Vec3::Z,
            CameraAxis::Back => Vec3::NEG_Z,
            CameraAxis::Left => Vec3::NEG_X,
            CameraAxis::Right => Vec3::X,
            CameraAxis::Up => Vec3::Y,
            CameraAxis::Down => Vec3::NEG_Y,
        }
    }
}

/// Camera node plus the pitch/yaw it is re-oriented from every tick.
/// `view_angle` is this display's yaw offset within a multi-screen wall.
pub struct CameraRig {
    node: ObjectId,
    mount: ObjectId,
    pitch: f32,
    yaw: f32,
    view_angle: f32,
}

impl CameraRig {
    pub fn new(
        scene: &mut Scene,
        frames: &mut OrbitFrames,
        node: ObjectId,
        view_angle: f32,
    ) -> Self {
        let mount = frames.add_frame(scene, CAMERA_MOUNT, None, Vec3::ZERO, None);
        let rig = Self {
            node,
            mount,
            pitch: INITIAL_PITCH,
            yaw: 0.0,
            view_angle,
        };
        rig.settle(scene);
        rig
    }

    pub fn node(&self) -> ObjectId {
        self.node
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn orientation(&self) -> Quat {
        euler_degrees(Vec3::new(self.pitch, self.yaw, 0.0))
    }

    /// Restores the orientation from pitch and yaw.
    pub fn settle(&self, scene: &mut Scene) {
        scene.set_object_rotation(self.node, self.orientation());
    }

    /// Steps along a camera-relative axis, oriented with the view angle
    /// taken off the yaw. The next `settle` undoes that orientation.
    pub fn step(&mut self, scene: &mut Scene, axis: CameraAxis) {
        let heading = euler_degrees(Vec3::new(self.pitch, self.yaw - self.view_angle, 0.0));
        scene.set_object_rotation(self.node, heading);
        scene.translate_object_local(self.node, axis.direction() * MOVE_SPEED * NOMINAL_TIMESTEP);
    }

    pub fn turn(&mut self, scene: &mut Scene, degrees: f32) {
        self.yaw += degrees;
        self.settle(scene);
    }

    /// Hangs the camera off `frame_name` at a fixed offset.
    pub fn ride_along(
        &mut self,
        scene: &mut Scene,
        frames: &OrbitFrames,
        frame_name: &str,
        offset: Vec3,
    ) {
        self.pitch = 0.0;
        self.yaw = self.view_angle;

        frames.reparent_named(scene, self.mount, frame_name);
        scene.set_object_translation(self.mount, offset);
        frames.reparent(scene, self.node, self.mount);
    }
}
