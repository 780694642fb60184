//! Strap Runtime
//!
//! Host event-loop plumbing shared by every widget: deferred tasks, outbound
//! notifications and two-way model bindings.
//! Execution is single-threaded and cooperative. Locks exist only so widget
//! handles can be shared with the timer tasks that call back into them.

mod binding;
mod classes;
mod emitter;
mod error;
mod input;
mod schedule;

pub use binding::{ModelBinding, SharedModel};
pub use classes::ClassSet;
pub use emitter::{Emitter, SubscriptionId};
pub use error::RuntimeError;
pub use input::InputEvent;
pub use schedule::{ManualScheduler, Scheduler, Task, TaskHandle, TokioScheduler};

pub type Result<T> = std::result::Result<T, RuntimeError>;
