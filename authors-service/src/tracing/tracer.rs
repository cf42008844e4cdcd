use std::error::Error;

use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{SdkTracer, SdkTracerProvider},
};
use opentelemetry_stdout::SpanExporter;
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, fmt::format::Format, prelude::*, registry::LookupSpan};

use crate::config::{AppConfig, TracingConfig};

const DEFAULT_FILTER: &str = "info";

/// Tracer configuration and initialization.
///
/// Handles setting up logging and span export for the authors service.
pub struct Tracer;

impl Tracer {
    /// Installs the global subscriber according to `config.tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn install(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        if config.tracing == TracingConfig::Stdout {
            global::set_text_map_propagator(TraceContextPropagator::new());
        }

        Self::subscriber(config).try_init()?;

        Ok(())
    }

    /// Builds the subscriber without installing it.
    ///
    /// Events and spans are filtered by `RUST_LOG`, falling back to `info`.
    /// With [`TracingConfig::Stdout`] every span is also exported to stdout
    /// through OpenTelemetry.
    pub fn subscriber(config: &AppConfig) -> impl Subscriber + Send + Sync + 'static {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let span_layer = match config.tracing {
            TracingConfig::Stdout => Some(Self::stdout_span_layer(config)),
            TracingConfig::Memory => None,
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(span_layer)
            .with(tracing_subscriber::fmt::layer().event_format(Format::default().pretty()))
    }

    fn stdout_span_layer<S>(config: &AppConfig) -> OpenTelemetryLayer<S, SdkTracer>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let mut resource = Resource::builder().with_service_name(config.distribution.name.clone());
        if let Some(version) = config.distribution.version.clone() {
            resource = resource.with_attribute(KeyValue::new("version", version));
        }

        let provider = SdkTracerProvider::builder()
            .with_resource(resource.build())
            .with_simple_exporter(SpanExporter::default())
            .build();
        let tracer = provider.tracer(config.distribution.name.clone());
        global::set_tracer_provider(provider);

        tracing_opentelemetry::layer().with_tracer(tracer)
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry::trace::TraceContextExt as _;
    use tracing_opentelemetry::OpenTelemetrySpanExt as _;

    use super::*;
    use crate::config::{DistributionConfig, ServerConfig};

    fn config(tracing: TracingConfig) -> AppConfig {
        AppConfig {
            distribution: DistributionConfig {
                name: "authors-test".into(),
                version: Some("0.0.0".into()),
            },
            server: ServerConfig {
                http_address: "127.0.0.1:0".parse().unwrap(),
            },
            tracing,
        }
    }

    fn has_span_context(config: &AppConfig) -> bool {
        tracing::subscriber::with_default(Tracer::subscriber(config), || {
            let span = tracing::error_span!("lookup");
            let _entered = span.enter();
            let context = tracing::Span::current().context();
            context.span().span_context().is_valid()
        })
    }

    #[test]
    fn stdout_exports_spans() {
        assert!(has_span_context(&config(TracingConfig::Stdout)));
    }

    #[test]
    fn memory_keeps_spans_local() {
        assert!(!has_span_context(&config(TracingConfig::Memory)));
    }
}
