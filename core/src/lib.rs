// shopflow/src/lib.rs

//! Shopflow: a small async, type-safe step pipeline engine.
//!
//! A pipeline is an ordered list of named steps over a shared context
//! (`ContextData<TData>`). Each step can carry `before`, `on` and `after`
//! handlers, be marked optional, or be skipped by a condition evaluated
//! against the context. Any handler may stop the run early by returning
//! `PipelineControl::Stop`, and the first handler error aborts the run.
//!
//! `Shopflow<E>` is a registry keyed by the context data type, so callers
//! only need to build the context and call `run`.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

pub use crate::core::context::Handler;
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{FlowError, FlowResult};

pub use crate::registry::Shopflow;
