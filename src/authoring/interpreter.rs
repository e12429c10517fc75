use glam::Vec3;

use crate::authoring::command::{AuthoringCommand, ObjectSpec};
use crate::authoring::registry::SceneRegistry;
use crate::error::NotFoundError;
use crate::scene_graph::{euler_degrees, Component, ObjectId, Scene};

/// Applies authoring commands to a scene and its symbol tables.
pub struct SceneAuthoring<'a> {
    scene: &'a mut Scene,
    registry: &'a mut SceneRegistry,
}

impl<'a> SceneAuthoring<'a> {
    pub fn new(scene: &'a mut Scene, registry: &'a mut SceneRegistry) -> Self {
        Self { scene, registry }
    }

    pub fn apply(&mut self, command: AuthoringCommand) -> Result<(), NotFoundError> {
        match command {
            AuthoringCommand::CreateObject { spec, position } => {
                self.create_object(&spec, position);
            }
            AuthoringCommand::CreateObjectAtPoint { spec, point } => {
                self.create_object_at_point(&spec, &point)?;
            }
            AuthoringCommand::CreatePoint { name, position } => {
                self.create_point(&name, position);
            }
            AuthoringCommand::MoveToPoint { name, point } => {
                self.move_object_to_point(&name, &point)?;
            }
        }

        Ok(())
    }

    /// Creates a world-level node with a model and registers it by name.
    pub fn create_object(&mut self, spec: &ObjectSpec, position: Vec3) -> ObjectId {
        let node = self.scene.create_child(None, &spec.name);
        self.scene
            .set_object_transform(node, position, euler_degrees(spec.rotation), spec.scale);
        self.scene
            .attach_component(node, Component::static_model(&spec.model, spec.material()));

        if let Some(previous) = self.registry.register_node(&spec.name, node) {
            log::warn!(
                "node name {:?} reused, {previous:?} is no longer addressable",
                spec.name
            );
        }
        log::debug!("created {:?} at {position}", spec.name);

        node
    }

    /// Like `create_object`, placed at a registered point. Nothing is
    /// created when the point is unknown.
    pub fn create_object_at_point(
        &mut self,
        spec: &ObjectSpec,
        point: &str,
    ) -> Result<ObjectId, NotFoundError> {
        let position = self.registry.point(point)?;
        Ok(self.create_object(spec, position))
    }

    pub fn create_point(&mut self, name: &str, position: Vec3) {
        self.registry.register_point(name, position);
        log::debug!("point {name:?} at {position}");
    }

    pub fn move_object_to_point(&mut self, name: &str, point: &str) -> Result<(), NotFoundError> {
        let node = self.registry.node(name)?;
        let position = self.registry.point(point)?;
        self.scene.set_object_translation(node, position);
        log::debug!("moved {name:?} to {point:?}");
        Ok(())
    }
}
