pub mod batch;
pub mod ecs;
pub mod network;
