//! In-memory event capture for logging assertions in tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use outline_diff_core_types::schema::{FIELD_EVENT, FIELD_OP};

/// One recorded event; every field value is kept in its display form
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// True if this is the `event` phase of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct Fields(HashMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    // Integers and bools arrive here too, and their Debug form is the plain value.
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    buffer: Buffer,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let Fields(fields) = fields;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };
        lock(&self.buffer).push(captured);
    }
}

fn lock(buffer: &Buffer) -> MutexGuard<'_, Vec<CapturedEvent>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle on the captured events
#[derive(Clone, Default)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    /// Events logged under operation name `op`, oldest first
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        lock(&self.buffer)
            .iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .cloned()
            .collect()
    }

    /// Most recent `event` phase of operation `op`
    pub fn last(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        lock(&self.buffer).iter().rev().find(|e| e.is(op, event)).cloned()
    }

    pub fn clear(&self) {
        lock(&self.buffer).clear();
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber on first call
///
/// Every test in a process shares the handle, so assertions should filter
/// on an op name no other test uses.
///
/// # Example
///
/// ```
/// use outline_diff_core::logging_facility::test_capture::init_test_capture;
/// use outline_diff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// assert!(capture.last("doc_example_op", "start").is_some());
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let capture = TestCapture::default();
            let layer = CaptureLayer {
                buffer: capture.buffer.clone(),
            };
            // Another subscriber may already be installed; capture then stays empty.
            tracing_subscriber::registry().with(layer).try_init().ok();
            capture
        })
        .clone()
}
