//! Logging and trace export.
//!
//! Console output always goes through the `fmt` layer filtered by `RUST_LOG`.
//! When an OTLP collector is configured and answers, spans and log events are
//! exported to it as well.

use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_SERVICE_NAME: &str = "pantry-server";

/// Keeps the exporters alive; dropping it flushes pending spans and logs.
#[derive(Default)]
pub struct TelemetryGuard {
    providers: Option<(SdkTracerProvider, SdkLoggerProvider)>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some((traces, logs)) = self.providers.take() {
            if let Err(e) = traces.shutdown() {
                eprintln!("Failed to shut down trace exporter: {e}");
            }
            if let Err(e) = logs.shutdown() {
                eprintln!("Failed to shut down log exporter: {e}");
            }
        }
    }
}

pub fn init_telemetry() -> TelemetryGuard {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    let Some(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return TelemetryGuard::default();
    };

    if !collector_reachable(&endpoint) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
        tracing::info!(%endpoint, "OpenTelemetry endpoint not reachable, using console logging only");
        return TelemetryGuard::default();
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    match build_providers(&endpoint, &service_name) {
        Ok((trace_provider, log_provider)) => {
            let tracer = trace_provider.tracer(DEFAULT_SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(trace_provider.clone());

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(OpenTelemetryTracingBridge::new(&log_provider))
                .init();

            tracing::info!(%endpoint, %service_name, "OpenTelemetry export enabled");
            TelemetryGuard {
                providers: Some((trace_provider, log_provider)),
            }
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
            tracing::warn!(error = %e, "Failed to set up OpenTelemetry export, using console logging only");
            TelemetryGuard::default()
        }
    }
}

fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

fn build_providers(
    endpoint: &str,
    service_name: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), String> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| format!("trace exporter: {e}"))?;

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| format!("log exporter: {e}"))?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}
