// tests/common/mod.rs
#![allow(dead_code)]

use shopflow::{ContextData, FlowError, PipelineControl};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

/// Context used by most engine tests: a running unit tally plus the trail of
/// handlers that touched it.
#[derive(Clone, Debug, Default)]
pub struct TallyContext {
  pub units: i32,
  pub trail: String,
  pub steps_executed: Vec<String>,
  pub stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("shopflow error: {0}")]
  Flow(String),

  #[error("handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub fn counting_handler(step_name: &'static str, mark: &'static str) -> shopflow::Handler<TallyContext, TestError> {
  Box::new(move |ctx: ContextData<TallyContext>| {
    Box::pin(async move {
      HANDLER_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
      let mut guard = ctx.write();
      guard.units += 1;
      guard.trail.push_str(mark);
      guard.steps_executed.push(step_name.to_string());
      if guard.stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn failing_handler(step_name: &'static str, message: &'static str) -> shopflow::Handler<TallyContext, TestError> {
  Box::new(move |ctx: ContextData<TallyContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(message.to_string()))
    })
  })
}

use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub static HANDLER_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  HANDLER_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

pub fn handler_exec_count() -> usize {
  HANDLER_EXEC_COUNTER.load(Ordering::SeqCst)
}
