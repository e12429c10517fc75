/// Resource paths are resolved relative to these roots.
pub const MODEL_ROOT: &str = "Models";
pub const MATERIAL_ROOT: &str = "Materials";

pub fn model_path(model: &str) -> String {
    format!("{MODEL_ROOT}/{model}")
}

pub fn material_path(material: &str) -> String {
    format!("{MATERIAL_ROOT}/{material}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    StaticModel { model: String, material: String },
    Skybox { model: String, material: String },
    Light { brightness: f32 },
    Camera,
}

impl Component {
    pub fn static_model(model: &str, material: &str) -> Self {
        Component::StaticModel {
            model: model_path(model),
            material: material_path(material),
        }
    }

    pub fn skybox(model: &str, material: &str) -> Self {
        Component::Skybox {
            model: model_path(model),
            material: material_path(material),
        }
    }

    /// Material of a drawable component, if it has one.
    pub fn material(&self) -> Option<&str> {
        match self {
            Component::StaticModel { material, .. } | Component::Skybox { material, .. } => {
                Some(material)
            }
            Component::Light { .. } | Component::Camera => None,
        }
    }
}
