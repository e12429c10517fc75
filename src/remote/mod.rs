pub mod camera;
pub mod command;
pub mod dispatcher;
pub mod endpoint;
pub mod protocol;
pub mod visuals;

pub use camera::{CameraAxis, CameraRig};
pub use command::Command;
pub use dispatcher::{
    ControlEffect, ControlTable, DispatchTarget, Dispatched, RemoteCommandDispatcher,
};
pub use endpoint::{ConnectionId, EndpointEvent, MessageEndpoint};
pub use protocol::{Frame, GAME_MESSAGE_ID};
pub use visuals::Visuals;
