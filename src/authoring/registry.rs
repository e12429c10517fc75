use std::collections::HashMap;

use glam::Vec3;

use crate::error::NotFoundError;
use crate::scene_graph::ObjectId;

/// Symbol tables of the authoring commands: named nodes and named points.
/// Registering an existing name replaces the entry; an overwritten node
/// stays in the scene, it just can no longer be looked up.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    nodes: HashMap<String, ObjectId>,
    points: HashMap<String, Vec3>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node previously registered under `name`, if any.
    pub fn register_node(&mut self, name: &str, node: ObjectId) -> Option<ObjectId> {
        self.nodes.insert(name.to_string(), node)
    }

    pub fn register_point(&mut self, name: &str, position: Vec3) -> Option<Vec3> {
        self.points.insert(name.to_string(), position)
    }

    pub fn node(&self, name: &str) -> Result<ObjectId, NotFoundError> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| NotFoundError::Node(name.to_string()))
    }

    pub fn point(&self, name: &str) -> Result<Vec3, NotFoundError> {
        self.points
            .get(name)
            .copied()
            .ok_or_else(|| NotFoundError::Point(name.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
