pub mod batch;
pub mod discovery;
pub mod ecs;
pub mod entry;
