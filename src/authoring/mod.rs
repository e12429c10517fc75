pub mod command;
pub mod interpreter;
pub mod registry;

pub use command::{AuthoringCommand, ObjectSpec, Verb};
pub use interpreter::SceneAuthoring;
pub use registry::SceneRegistry;
