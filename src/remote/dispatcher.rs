use std::collections::HashMap;

use glam::Vec3;

use crate::authoring::{AuthoringCommand, SceneAuthoring, SceneRegistry, Verb};
use crate::error::CommandError;
use crate::orbit::solar_system::{
    EARTH_POS, JUPITER_POS, ROCKET_POS, SUN_POS, TRANSFER_ANCHOR, URANUS_POS,
};
use crate::orbit::OrbitFrames;
use crate::remote::camera::{CameraAxis, CameraRig};
use crate::remote::command::Command;
use crate::remote::visuals::Visuals;
use crate::scene_graph::Scene;

pub const YAW_STEP: f32 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEffect {
    Move(CameraAxis),
    Turn(f32),
    RideAlong { frame: String, offset: Vec3 },
    TogglePause,
    ToggleSkybox,
    ToggleSunMaterial,
    ToggleSkyMaterial,
}

/// Control code to effect mapping. Codes missing from the table are ignored.
#[derive(Debug, Clone)]
pub struct ControlTable {
    effects: HashMap<char, ControlEffect>,
}

impl ControlTable {
    pub fn empty() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    pub fn insert(&mut self, code: char, effect: ControlEffect) -> Option<ControlEffect> {
        self.effects.insert(code, effect)
    }

    pub fn get(&self, code: char) -> Option<&ControlEffect> {
        self.effects.get(&code)
    }

    fn ride_along(frame: &str, x: f32, y: f32, z: f32) -> ControlEffect {
        ControlEffect::RideAlong {
            frame: frame.to_string(),
            offset: Vec3::new(x, y, z),
        }
    }
}

impl Default for ControlTable {
    fn default() -> Self {
        let mut table = Self::empty();

        table.insert('z', ControlEffect::Move(CameraAxis::Forward));
        table.insert('s', ControlEffect::Move(CameraAxis::Back));
        table.insert('q', ControlEffect::Move(CameraAxis::Left));
        table.insert('d', ControlEffect::Move(CameraAxis::Right));
        table.insert('o', ControlEffect::Move(CameraAxis::Up));
        table.insert('l', ControlEffect::Move(CameraAxis::Down));

        table.insert('k', ControlEffect::Turn(-YAW_STEP));
        table.insert('m', ControlEffect::Turn(YAW_STEP));

        table.insert('f', Self::ride_along(ROCKET_POS, -0.2, 0.1, -1.0));
        table.insert('t', Self::ride_along(EARTH_POS, -0.3, 0.1, -1.0));
        table.insert('S', Self::ride_along(SUN_POS, 0.0, 5.1, -5.0));
        table.insert('r', Self::ride_along(TRANSFER_ANCHOR, 0.0, 0.0, -3.0));
        table.insert('j', Self::ride_along(JUPITER_POS, 0.0, 0.0, -3.0));
        table.insert('u', Self::ride_along(URANUS_POS, 0.0, 0.0, -3.0));

        table.insert('p', ControlEffect::TogglePause);
        table.insert('b', ControlEffect::ToggleSkybox);
        table.insert('y', ControlEffect::ToggleSunMaterial);
        table.insert('*', ControlEffect::ToggleSkyMaterial);

        table
    }
}

/// Mutable simulation state a dispatched command may touch.
pub struct DispatchTarget<'a> {
    pub scene: &'a mut Scene,
    pub frames: &'a OrbitFrames,
    pub registry: &'a mut SceneRegistry,
    pub camera: &'a mut CameraRig,
    pub visuals: &'a mut Visuals,
    pub paused: &'a mut bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Control(char),
    Authored(Verb),
    Ignored,
}

pub struct RemoteCommandDispatcher {
    controls: ControlTable,
}

impl RemoteCommandDispatcher {
    pub fn new(controls: ControlTable) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &ControlTable {
        &self.controls
    }

    pub fn dispatch(
        &self,
        command: Command,
        target: DispatchTarget<'_>,
    ) -> Result<Dispatched, CommandError> {
        match command {
            Command::Authoring(verb, tokens) => {
                let command = AuthoringCommand::parse(verb, &tokens)?;
                SceneAuthoring::new(target.scene, target.registry).apply(command)?;
                Ok(Dispatched::Authored(verb))
            }
            Command::Control(code) => match self.controls.get(code) {
                Some(effect) => {
                    log::debug!("control {code:?}: {effect:?}");
                    Self::apply(effect, target);
                    Ok(Dispatched::Control(code))
                }
                None => {
                    log::trace!("ignoring unknown control {code:?}");
                    Ok(Dispatched::Ignored)
                }
            },
        }
    }

    fn apply(effect: &ControlEffect, target: DispatchTarget<'_>) {
        let DispatchTarget {
            scene,
            frames,
            camera,
            visuals,
            paused,
            ..
        } = target;

        match effect {
            ControlEffect::Move(axis) => camera.step(scene, *axis),
            ControlEffect::Turn(degrees) => camera.turn(scene, *degrees),
            ControlEffect::RideAlong { frame, offset } => {
                camera.ride_along(scene, frames, frame, *offset);
            }
            ControlEffect::TogglePause => {
                *paused = !*paused;
                log::info!("simulation {}", if *paused { "paused" } else { "resumed" });
            }
            ControlEffect::ToggleSkybox => visuals.toggle_skybox(scene),
            ControlEffect::ToggleSunMaterial => visuals.toggle_sun_material(scene),
            ControlEffect::ToggleSkyMaterial => visuals.toggle_sky_material(scene),
        }
    }
}

impl Default for RemoteCommandDispatcher {
    fn default() -> Self {
        Self::new(ControlTable::default())
    }
}
