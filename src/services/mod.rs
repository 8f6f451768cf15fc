pub mod publisher;
pub mod relay;
pub mod telemetry;
pub mod upstream;
