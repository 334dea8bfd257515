//! Headless application core (controller, sensitivities, environment, REPL).

pub mod app;
pub mod environment;
pub mod repl;
pub mod sensitivity;
pub mod services;

pub use app::{App, CloseGuard, CloseOutcome, CommandHandler, EventLoop, ExecOutcome, LoopHandle};
pub use environment::{EnvironmentShadow, ShadowSettings, ShadowedEnv};
pub use repl::{EvalBinding, EvalStrategy, EvalValue};
pub use sensitivity::{Focussed, Sensitivity, SensitivityEngine, SensitivityEvent};
