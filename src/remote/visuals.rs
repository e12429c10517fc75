use crate::orbit::solar_system::{SKYBOX_MODEL, SKY_MATERIAL, SPHERE_MODEL, SUN_MATERIAL};
use crate::scene_graph::{Component, ObjectId, Scene};

pub const SKY_ALTERNATE_MATERIAL: &str = "pecheux_sky.xml";
pub const SUN_ALTERNATE_MATERIAL: &str = "pecheux.xml";

/// Toggleable presentation state: skybox on/off and the two material swaps.
pub struct Visuals {
    skybox: ObjectId,
    sun: ObjectId,
    sky_enabled: bool,
    sky_alternate: bool,
    sun_alternate: bool,
}

impl Visuals {
    pub fn new(skybox: ObjectId, sun: ObjectId) -> Self {
        Self {
            skybox,
            sun,
            sky_enabled: true,
            sky_alternate: false,
            sun_alternate: false,
        }
    }

    pub fn sky_enabled(&self) -> bool {
        self.sky_enabled
    }

    pub fn toggle_skybox(&mut self, scene: &mut Scene) {
        self.sky_enabled = !self.sky_enabled;
        scene.clear_components(self.skybox);
        if self.sky_enabled {
            self.show_skybox(scene);
        }
    }

    /// Swapping the sky material always shows the skybox.
    pub fn toggle_sky_material(&mut self, scene: &mut Scene) {
        self.sky_alternate = !self.sky_alternate;
        self.sky_enabled = true;
        scene.clear_components(self.skybox);
        self.show_skybox(scene);
    }

    pub fn toggle_sun_material(&mut self, scene: &mut Scene) {
        self.sun_alternate = !self.sun_alternate;
        let material = if self.sun_alternate {
            SUN_ALTERNATE_MATERIAL
        } else {
            SUN_MATERIAL
        };
        scene.clear_components(self.sun);
        scene.attach_component(self.sun, Component::static_model(SPHERE_MODEL, material));
    }

    fn show_skybox(&self, scene: &mut Scene) {
        let skybox = Component::skybox(SKYBOX_MODEL, self.sky_material());
        scene.attach_component(self.skybox, skybox);
    }

    fn sky_material(&self) -> &'static str {
        if self.sky_alternate {
            SKY_ALTERNATE_MATERIAL
        } else {
            SKY_MATERIAL
        }
    }
}
