//! Publishes telemetry records to the broker on a fixed interval.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use tracing::{debug, info};

use crate::config::PublisherConfig;
use crate::error::PublishError;
use crate::services::telemetry::{TelemetryGenerator, TelemetryRecord};

/// Capacity of the request channel between the client and its event loop.
const REQUEST_CAPACITY: usize = 10;

/// Destination for serialized telemetry.
pub trait TelemetrySink {
    fn publish(
        &mut self,
        topic: &str,
        payload: String,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}

pub struct MqttSink {
    client: AsyncClient,
}

impl MqttSink {
    /// The returned event loop must be driven for publishes to reach the broker.
    pub fn connect(config: &PublisherConfig) -> (Self, EventLoop) {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(config.keep_alive);

        let (client, event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);
        (Self { client }, event_loop)
    }
}

impl TelemetrySink for MqttSink {
    async fn publish(&mut self, topic: &str, payload: String) -> Result<(), PublishError> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await?;
        Ok(())
    }
}

/// Polls the MQTT event loop until the connection fails. There is no reconnect.
pub async fn drive_connection(mut event_loop: EventLoop) -> Result<(), PublishError> {
    loop {
        let event = event_loop.poll().await?;
        debug!(?event, "mqtt event");
    }
}

pub struct Publisher<S, R> {
    sink: S,
    generator: TelemetryGenerator<R>,
    topic: String,
    interval: Duration,
}

impl<S: TelemetrySink, R: Rng> Publisher<S, R> {
    pub fn new(
        sink: S,
        generator: TelemetryGenerator<R>,
        topic: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            sink,
            generator,
            topic: topic.into(),
            interval,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Build, publish and log one record.
    pub async fn tick(&mut self) -> Result<TelemetryRecord, PublishError> {
        let record = self.generator.next_record();
        let payload = record.to_payload()?;
        self.sink.publish(&self.topic, payload).await?;
        log_record(&record);
        Ok(record)
    }

    /// Runs until a publish fails.
    pub async fn run(&mut self) -> Result<(), PublishError> {
        loop {
            self.tick().await?;
            tokio::time::sleep(self.interval).await;
        }
    }
}

fn log_record(record: &TelemetryRecord) {
    info!("✅ COUNTER VALUE: {}", record.counter());
    info!("   HOIST: ↑{} ↓{}", record.hoist_up, record.hoist_down);
    info!("   CT: ←{} →{}", record.ct_left, record.ct_right);
    info!("   LT: ↗{} ↙{}", record.lt_forward, record.lt_reverse);
    info!("   SWITCH: {}", record.switch);
    info!("   LOAD: {}kg", record.current_load);
    info!("   POWER: {}", if record.powered_on() { "ON" } else { "OFF" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[derive(Default)]
    struct RecordingSink {
        published: Vec<(String, String)>,
    }

    impl TelemetrySink for RecordingSink {
        async fn publish(&mut self, topic: &str, payload: String) -> Result<(), PublishError> {
            self.published.push((topic.to_string(), payload));
            Ok(())
        }
    }

    #[tokio::test]
    async fn tick_publishes_to_configured_topic() {
        let generator = TelemetryGenerator::with_rng(StdRng::seed_from_u64(1));
        let mut publisher = Publisher::new(
            RecordingSink::default(),
            generator,
            "crane/operations",
            Duration::from_millis(1),
        );

        let record = publisher.tick().await.unwrap();
        assert_eq!(record.counter(), 1);

        let (topic, payload) = &publisher.sink().published[0];
        assert_eq!(topic, "crane/operations");
        let parsed: TelemetryRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed, record);
    }

    #[tokio::test]
    async fn mqtt_options_follow_config() {
        let config = PublisherConfig {
            broker_host: "127.0.0.1".to_string(),
            ..PublisherConfig::default()
        };
        // Building the client does not touch the network.
        let (_sink, event_loop) = MqttSink::connect(&config);
        assert_eq!(event_loop.mqtt_options.broker_address(), ("127.0.0.1".to_string(), 1883));
        assert_eq!(event_loop.mqtt_options.keep_alive(), Duration::from_secs(60));
    }
}
