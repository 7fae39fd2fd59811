// shopflow/src/core/context.rs

//! The `Handler<TData, Err>` type shared by every hook phase.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

/// A boxed asynchronous step handler.
///
/// Handlers receive a clone of the run's `ContextData<TData>` handle. They must
/// drop any `read()`/`write()` guard before the next `.await`; the guards are
/// blocking `parking_lot` locks.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;
