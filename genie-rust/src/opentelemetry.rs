use crate::{GenieResult, SamplingParams};
use opentelemetry::trace::Status;
use std::{future::Future, time::Instant};
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Clone, Copy)]
pub enum GenerationKind {
    Idea,
    Code,
}

impl GenerationKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Code => "code",
        }
    }
}

pub struct GenerationSpan {
    span: Span,
    start_time: Instant,
    params: SamplingParams,
}

impl GenerationSpan {
    pub fn new(
        kind: GenerationKind,
        provider: &str,
        model_id: &str,
        params: SamplingParams,
    ) -> Self {
        let span = match kind {
            GenerationKind::Idea => info_span!("genie_sdk.generate_idea"),
            GenerationKind::Code => info_span!("genie_sdk.generate_code"),
        };
        span.set_attribute("gen_ai.operation.name", "chat");
        span.set_attribute("gen_ai.provider.name", provider.to_string());
        span.set_attribute("gen_ai.request.model", model_id.to_string());
        span.set_attribute("genie_sdk.kind", kind.as_str());

        Self {
            span,
            start_time: Instant::now(),
            params,
        }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        self.span.set_attribute(
            "gen_ai.request.max_tokens",
            i64::from(self.params.max_tokens),
        );
        self.span
            .set_attribute("gen_ai.request.temperature", self.params.temperature);
        self.span.set_attribute(
            "genie_sdk.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

/// Runs a remote generation inside a `genie_sdk.generate_*` span. Code in
/// `future` can add attributes through `Span::current()`.
pub async fn trace_generation<T, Fut>(
    kind: GenerationKind,
    provider: &str,
    model_id: &str,
    params: SamplingParams,
    future: Fut,
) -> GenieResult<T>
where
    Fut: Future<Output = GenieResult<T>>,
{
    let mut span = GenerationSpan::new(kind, provider, model_id, params);
    let result = future.instrument(span.span()).await;

    if let Err(error) = &result {
        span.on_error(error);
    }

    span.on_end();
    result
}
