use crate::authoring::SceneRegistry;
use crate::config::SimulationConfig;
use crate::error::CommandError;
use crate::orbit::{OrbitFrames, SolarSystem, TransferController};
use crate::remote::{
    CameraRig, Command, DispatchTarget, Dispatched, RemoteCommandDispatcher, Visuals,
};
use crate::scene_graph::Scene;

#[cfg(test)]
mod tests;

/// The whole simulation state. Driven from a single task: inbound messages
/// through `handle_message`, time through `tick`.
pub struct Simulation {
    scene: Scene,
    frames: OrbitFrames,
    registry: SceneRegistry,
    transfer: TransferController,
    camera: CameraRig,
    visuals: Visuals,
    dispatcher: RemoteCommandDispatcher,
    paused: bool,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Self {
        let mut scene = Scene::new();
        let mut frames = OrbitFrames::new();

        let system = SolarSystem::build(&mut scene, &mut frames);
        let camera = CameraRig::new(&mut scene, &mut frames, system.camera, config.view_angle);

        log::info!(
            "scene ready: {} nodes, transfer window at {} degrees",
            scene.len(),
            config.transfer.target_angle
        );

        Self {
            transfer: TransferController::new(system.transfer, config.transfer.clone()),
            visuals: Visuals::new(system.skybox, system.sun_graphic),
            registry: SceneRegistry::new(),
            dispatcher: RemoteCommandDispatcher::default(),
            paused: config.start_paused,
            scene,
            frames,
            camera,
        }
    }

    /// Classifies and applies one inbound payload. Errors leave the scene
    /// untouched and are also logged.
    pub fn handle_message(&mut self, payload: &str) -> Result<Dispatched, CommandError> {
        let Some(command) = Command::parse(payload) else {
            return Ok(Dispatched::Ignored);
        };

        let target = DispatchTarget {
            scene: &mut self.scene,
            frames: &self.frames,
            registry: &mut self.registry,
            camera: &mut self.camera,
            visuals: &mut self.visuals,
            paused: &mut self.paused,
        };
        let result = self.dispatcher.dispatch(command, target);
        if let Err(e) = &result {
            log::warn!("rejected {payload:?}: {e}");
        }
        result
    }

    pub fn tick(&mut self, delta_time: f32) {
        if !self.paused {
            self.frames.advance(&mut self.scene, delta_time);
        }
        self.camera.settle(&mut self.scene);
        self.transfer.update(&mut self.scene, &mut self.frames);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frames(&self) -> &OrbitFrames {
        &self.frames
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn transfer(&self) -> &TransferController {
        &self.transfer
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn visuals(&self) -> &Visuals {
        &self.visuals
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
