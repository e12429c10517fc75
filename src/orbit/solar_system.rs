use glam::Vec3;

use crate::orbit::frames::{OrbitFrames, Spin};
use crate::orbit::transfer::TransferBodies;
use crate::scene_graph::{euler_degrees, Component, ObjectId, Scene};

pub const SUN_RADIUS: f32 = 3.0;
/// Distance unit for orbit radii.
pub const AU: f32 = 5.0;
/// Base orbital rate in degrees per second; planets spin at multiples of it.
pub const BASE_RATE: f32 = -50.0;
pub const AXIAL_TILT: f32 = 23.0;

pub const SUN_POS: &str = "SunPos";
pub const EARTH_POS: &str = "EarthPos";
pub const MARS_POS: &str = "MarsPos";
pub const JUPITER_POS: &str = "JupiterPos";
pub const URANUS_POS: &str = "UranusPos";
pub const ROCKET_POS: &str = "RocketPos";
pub const TRANSFER_ANCHOR: &str = "TransferAnchor";

pub const SKYBOX_MODEL: &str = "Box.mdl";
pub const SPHERE_MODEL: &str = "Sphere.mdl";
pub const SKY_MATERIAL: &str = "skybox_stars.xml";
pub const SUN_MATERIAL: &str = "sun.xml";

struct Planet {
    name: &'static str,
    /// In AU.
    radius: f32,
    /// Multiple of `BASE_RATE`.
    rate: f32,
    scale: f32,
    material: &'static str,
    lit: bool,
}

#[rustfmt::skip]
const INNER_PLANETS: &[Planet] = &[
    Planet { name: "Mercury", radius: 0.4, rate: 10.0, scale: 0.15, material: "mercuremap.xml", lit: false },
    Planet { name: "Venus", radius: 0.7, rate: 1.62, scale: 0.28, material: "venusmap.xml", lit: false },
];

const EARTH: Planet = Planet {
    name: "Earth",
    radius: 1.0,
    rate: 1.0,
    scale: 0.3,
    material: "earthmap.xml",
    lit: false,
};

const MARS: Planet = Planet {
    name: "Mars",
    radius: 1.5,
    rate: 0.55,
    scale: 0.25,
    material: "marsmap.xml",
    lit: false,
};

#[rustfmt::skip]
const OUTER_PLANETS: &[Planet] = &[
    Planet { name: "Jupiter", radius: 2.3, rate: 1.0 / 12.0, scale: 1.0, material: "jupitermap.xml", lit: true },
    Planet { name: "Saturn", radius: 3.5, rate: 1.0 / 29.0, scale: 0.9, material: "saturnemap.xml", lit: true },
    Planet { name: "Uranus", radius: 5.0, rate: 1.0 / 84.0, scale: 0.57, material: "uranusmap.xml", lit: true },
    Planet { name: "Neptune", radius: 7.5, rate: 1.0 / 165.0, scale: 0.53, material: "neptunemap.xml", lit: true },
];

/// Rotor and position frame of one planet.
struct PlanetFrames {
    orbit: ObjectId,
    position: ObjectId,
}

/// Handles into the default scene that the simulation needs later.
pub struct SolarSystem {
    pub transfer: TransferBodies,
    pub skybox: ObjectId,
    pub sun_graphic: ObjectId,
    pub camera: ObjectId,
}

impl SolarSystem {
    pub fn build(scene: &mut Scene, frames: &mut OrbitFrames) -> Self {
        let skybox = scene.create_child(None, "Skybox");
        scene.attach_component(skybox, Component::skybox(SKYBOX_MODEL, SKY_MATERIAL));

        let plane = scene.create_child(None, "Plane");
        let disk = Component::static_model("Disk.mdl", "GreenTransparent.xml");
        scene.set_object_scale(plane, Vec3::new(5.0, 1.0, 5.0));
        scene.attach_component(plane, disk);

        let sun = frames.add_frame(scene, SUN_POS, None, Vec3::ZERO, None);
        let sun_graphic = scene.create_child(Some(sun), "SunGraphic");
        scene.set_object_scale(sun_graphic, Vec3::splat(SUN_RADIUS));
        let sun_model = Component::static_model(SPHERE_MODEL, SUN_MATERIAL);
        scene.attach_component(sun_graphic, sun_model);

        for planet in INNER_PLANETS {
            Self::add_planet(scene, frames, sun, planet);
        }
        let earth = Self::add_planet(scene, frames, sun, &EARTH);
        let mars = Self::add_planet(scene, frames, sun, &MARS);
        for planet in OUTER_PLANETS {
            Self::add_planet(scene, frames, sun, planet);
        }

        Self::add_moon(scene, frames, earth.position);

        // Centre of the circle through Earth's orbit and the far side of Mars's.
        let earth_radius = EARTH.radius * AU;
        let mars_radius = MARS.radius * AU;
        let anchor_offset = -((earth_radius + mars_radius) / 2.0 - earth_radius);
        let anchor = frames.add_frame(
            scene,
            TRANSFER_ANCHOR,
            Some(earth.orbit),
            Vec3::new(anchor_offset, 0.0, 0.0),
            None,
        );

        let vehicle = Self::add_rocket(scene, frames, earth.position);
        Self::add_sun_lights(scene);

        let camera = scene.create_child(None, "Camera");
        scene.set_object_translation(camera, Vec3::new(0.0, 15.0, 0.0));
        scene.attach_component(camera, Component::Camera);

        Self {
            transfer: TransferBodies {
                vehicle,
                origin: earth.position,
                destination: mars.position,
                reference: sun,
                anchor,
            },
            skybox,
            sun_graphic,
            camera,
        }
    }

    fn add_planet(
        scene: &mut Scene,
        frames: &mut OrbitFrames,
        sun: ObjectId,
        planet: &Planet,
    ) -> PlanetFrames {
        let orbit = frames.add_frame(
            scene,
            &format!("{}Orbit", planet.name),
            Some(sun),
            Vec3::ZERO,
            Some(Spin::about_y(BASE_RATE * planet.rate)),
        );
        let position = frames.add_frame(
            scene,
            &format!("{}Pos", planet.name),
            Some(orbit),
            Vec3::new(planet.radius * AU, 0.0, 0.0),
            None,
        );

        let inclined = scene.create_child(Some(position), &format!("{}Inclined", planet.name));
        scene.set_object_rotation(inclined, euler_degrees(Vec3::new(0.0, 0.0, AXIAL_TILT)));

        let body = frames.add_frame(
            scene,
            planet.name,
            Some(inclined),
            Vec3::ZERO,
            Some(Spin::about_y(-30.0)),
        );
        scene.set_object_scale(body, Vec3::splat(planet.scale));
        scene.attach_component(body, Component::static_model(SPHERE_MODEL, planet.material));

        if planet.name == "Saturn" {
            let ring = scene.create_child(Some(inclined), "SaturnRing");
            let ring_model = Component::static_model("Torus.mdl", "ring_saturne.xml");
            scene.set_object_scale(ring, Vec3::new(1.5, 0.01, 1.5));
            scene.attach_component(ring, ring_model);
        }

        if planet.lit {
            let light = scene.create_child(Some(position), &format!("{}Light", planet.name));
            scene.set_object_translation(light, Vec3::new(-1.5, 0.0, 0.0));
            scene.attach_component(light, Component::Light { brightness: 1.0 });
        }

        PlanetFrames { orbit, position }
    }

    fn add_moon(scene: &mut Scene, frames: &mut OrbitFrames, earth: ObjectId) {
        let moon_orbit = frames.add_frame(
            scene,
            "MoonOrbit",
            Some(earth),
            Vec3::ZERO,
            Some(Spin::about_y(-100.0)),
        );
        let moon = frames.add_frame(
            scene,
            "Moon",
            Some(moon_orbit),
            Vec3::new(0.3, 0.0, 0.0),
            Some(Spin::about_y(-30.0)),
        );
        scene.set_object_scale(moon, Vec3::splat(0.05));
        scene.attach_component(moon, Component::static_model(SPHERE_MODEL, "moonmap.xml"));
    }

    fn add_rocket(scene: &mut Scene, frames: &mut OrbitFrames, earth: ObjectId) -> ObjectId {
        let rocket_pos = frames.add_frame(scene, ROCKET_POS, Some(earth), Vec3::ZERO, None);

        let inclined = scene.create_child(Some(rocket_pos), "RocketInclined");
        scene.set_object_rotation(inclined, euler_degrees(Vec3::splat(90.0)));

        let rocket = scene.create_child(Some(inclined), "Rocket");
        scene.set_object_scale(rocket, Vec3::splat(0.02));
        scene.attach_component(rocket, Component::static_model("fusee.mdl", "fusee.xml"));

        rocket_pos
    }

    fn add_sun_lights(scene: &mut Scene) {
        let offsets = [
            Vec3::ZERO,
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        for (i, offset) in offsets.into_iter().enumerate() {
            let light = scene.create_child(None, &format!("SunLight{i}"));
            scene.set_object_translation(light, offset * SUN_RADIUS);
            scene.attach_component(light, Component::Light { brightness: 1.0 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: Vec3, expected: Vec3) {
        let distance = actual.distance(expected);
        assert!(distance < 1e-5, "{actual} != {expected}");
    }

    #[test]
    fn builds_named_frames() {
        let mut scene = Scene::new();
        let mut frames = OrbitFrames::new();
        let system = SolarSystem::build(&mut scene, &mut frames);

        let names = [
            SUN_POS,
            EARTH_POS,
            MARS_POS,
            JUPITER_POS,
            URANUS_POS,
            ROCKET_POS,
            TRANSFER_ANCHOR,
        ];
        for name in names {
            assert!(frames.frame(name).is_some(), "missing frame {name}");
        }

        assert_eq!(frames.frame(EARTH_POS), Some(system.transfer.origin));
        assert_eq!(frames.frame(MARS_POS), Some(system.transfer.destination));
        assert_eq!(frames.frame(ROCKET_POS), Some(system.transfer.vehicle));
    }

    #[test]
    fn initial_positions() {
        let mut scene = Scene::new();
        let mut frames = OrbitFrames::new();
        let system = SolarSystem::build(&mut scene, &mut frames);
        let bodies = system.transfer;

        let origin = scene.world_position(bodies.origin);
        let destination = scene.world_position(bodies.destination);
        let anchor = scene.world_position(bodies.anchor);
        let camera = scene.world_position(system.camera);

        assert_near(origin, Vec3::new(5.0, 0.0, 0.0));
        assert_near(destination, Vec3::new(7.5, 0.0, 0.0));
        assert_near(anchor, Vec3::new(-1.25, 0.0, 0.0));
        assert_eq!(scene.world_position(bodies.vehicle), origin);
        assert_near(camera, Vec3::new(0.0, 15.0, 0.0));
    }

    #[test]
    fn earth_and_mars_drift_apart() {
        let mut scene = Scene::new();
        let mut frames = OrbitFrames::new();
        let bodies = SolarSystem::build(&mut scene, &mut frames).transfer;

        frames.advance(&mut scene, 1.0);

        let angle = crate::orbit::detector::subtended_angle(
            scene.world_position(bodies.origin),
            scene.world_position(bodies.destination),
            scene.world_position(bodies.reference),
        );
        // 50 - 27.5 degrees of relative motion.
        assert_eq!(angle, Some(22));
    }
}
