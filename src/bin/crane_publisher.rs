use craneiq_backend::{
    config::PublisherConfig,
    services::{
        publisher::{MqttSink, Publisher, drive_connection},
        telemetry::TelemetryGenerator,
    },
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PublisherConfig::from_env()?;
    info!("🚀 Starting Crane MQTT Publisher on {} (topic {})", config.broker_addr(), config.topic);

    let (sink, event_loop) = MqttSink::connect(&config);
    let mut publisher = Publisher::new(sink, TelemetryGenerator::new(), config.topic.clone(), config.interval);

    let result = tokio::select! {
        res = publisher.run() => res,
        res = drive_connection(event_loop) => res,
    };

    if let Err(e) = &result {
        error!("publisher stopped: {}", e);
    }
    result.map_err(Into::into)
}
