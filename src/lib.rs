pub mod authoring;
pub mod config;
pub mod engine;
pub mod error;
pub mod orbit;
pub mod remote;
pub mod scene_graph;
pub mod simulation;
