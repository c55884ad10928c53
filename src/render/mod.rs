//! Rendering: the coalescing scheduler and the renderer hook.

pub mod renderer;
pub mod scheduler;

pub use renderer::{RenderOp, RenderSink, Renderer, ReplaceRenderer, StyleShim};
pub use scheduler::RenderScheduler;
