//! 命令可用性
//!
//! Sensitivity 是挂在某类聚焦事件上的谓词；命令的可用状态等于它所有
//! sensitivity 当前值的与。事件到来时同步重算，返回前命令状态已是最新。

use crate::core::Command;
use crate::models::{Tab, Window};
use rustc_hash::FxHashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensitivityEvent {
    WindowFocussed,
    TabFocussed,
}

/// The newly focussed object handed to predicates.
#[derive(Clone, Copy)]
pub enum Focussed<'a> {
    Nothing,
    Window(&'a Window),
    Tab(&'a Tab),
}

pub type Predicate = Rc<dyn Fn(&Focussed<'_>) -> bool>;

#[derive(Clone)]
pub struct Sensitivity {
    name: String,
    events: Vec<SensitivityEvent>,
    default: bool,
    predicate: Predicate,
}

impl Sensitivity {
    pub fn new(
        name: impl Into<String>,
        default: bool,
        events: &[SensitivityEvent],
        predicate: impl Fn(&Focussed<'_>) -> bool + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            events: events.to_vec(),
            default,
            predicate: Rc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn listens_to(&self, event: SensitivityEvent) -> bool {
        self.events.contains(&event)
    }
}

struct SensitivityState {
    def: Sensitivity,
    active: bool,
}

struct CommandState {
    sensitivities: Vec<String>,
    enabled: bool,
}

#[derive(Default)]
pub struct SensitivityEngine {
    sensitivities: FxHashMap<String, SensitivityState>,
    commands: FxHashMap<Command, CommandState>,
}

impl SensitivityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a sensitivity. It holds its default value until
    /// one of its events fires.
    pub fn register(&mut self, sensitivity: Sensitivity) {
        let active = sensitivity.default;
        self.sensitivities.insert(
            sensitivity.name.clone(),
            SensitivityState {
                def: sensitivity,
                active,
            },
        );
        self.recompute();
    }

    /// Gates `command` on the named sensitivities. Names not registered yet
    /// count as inactive.
    pub fn sensitize(&mut self, command: Command, names: &[&str]) {
        let state = self.commands.entry(command).or_insert(CommandState {
            sensitivities: Vec::new(),
            enabled: true,
        });
        for name in names {
            if !state.sensitivities.iter().any(|n| n == name) {
                state.sensitivities.push(name.to_string());
            }
        }
        self.recompute();
    }

    pub fn is_active(&self, name: &str) -> Option<bool> {
        self.sensitivities.get(name).map(|s| s.active)
    }

    /// Commands nobody sensitized are always enabled.
    pub fn is_enabled(&self, command: &Command) -> bool {
        self.commands
            .get(command)
            .map(|state| state.enabled)
            .unwrap_or(true)
    }

    /// Re-evaluates every sensitivity listening to `event` against `focus`.
    /// Returns the commands whose enabled state flipped.
    pub fn notify(&mut self, event: SensitivityEvent, focus: &Focussed<'_>) -> Vec<Command> {
        for state in self.sensitivities.values_mut() {
            if state.def.listens_to(event) {
                state.active = (state.def.predicate)(focus);
            }
        }
        let changed = self.recompute();
        if !changed.is_empty() {
            tracing::debug!(?event, changed = changed.len(), "command sensitivity changed");
        }
        changed
    }

    fn recompute(&mut self) -> Vec<Command> {
        let sensitivities = &self.sensitivities;
        let mut changed = Vec::new();
        for (command, state) in self.commands.iter_mut() {
            let enabled = state.sensitivities.iter().all(|name| {
                sensitivities
                    .get(name)
                    .map(|s| s.active)
                    .unwrap_or(false)
            });
            if enabled != state.enabled {
                state.enabled = enabled;
                changed.push(command.clone());
            }
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/sensitivity.rs"]
mod tests;
