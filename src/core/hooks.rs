//! 钩子：具名扩展点
//!
//! 每个钩子持有一组有序的拦截器（before/after 成对出现）。`trigger` 把受保护的
//! 核心逻辑包在中间执行：before 按注册顺序，after 按相反顺序。

use super::error::ConfigurationError;
use rustc_hash::FxHashMap;
use std::rc::Rc;

pub const OPEN_WINDOW: &str = "open_window";
pub const CLOSE_WINDOW: &str = "close_window";
pub const SHUTDOWN: &str = "shutdown";

/// An observer wrapped around the protected operation of a hook.
///
/// Both phases receive the same context the operation itself mutates, so an
/// observer can inspect state before and after, or call back into it.
pub trait HookObserver<C> {
    fn before(&self, _cx: &mut C) {}

    fn after(&self, _cx: &mut C) {}
}

/// Closure pair adapter for [`HookObserver`].
pub struct Interceptor<B, A> {
    before: B,
    after: A,
}

impl<B, A> Interceptor<B, A> {
    pub fn new(before: B, after: A) -> Self {
        Self { before, after }
    }
}

impl<C, B, A> HookObserver<C> for Interceptor<B, A>
where
    B: Fn(&mut C),
    A: Fn(&mut C),
{
    fn before(&self, cx: &mut C) {
        (self.before)(cx)
    }

    fn after(&self, cx: &mut C) {
        (self.after)(cx)
    }
}

pub type ObserverRef<C> = Rc<dyn HookObserver<C>>;

pub struct HookRegistry<C> {
    hooks: FxHashMap<String, Vec<ObserverRef<C>>>,
}

impl<C> HookRegistry<C> {
    pub fn new() -> Self {
        Self {
            hooks: FxHashMap::default(),
        }
    }

    /// Declares `name` as an extension point. Registering twice keeps the
    /// observers already attached.
    pub fn register(&mut self, name: &str) {
        if !self.hooks.contains_key(name) {
            tracing::debug!(hook = name, "hook registered");
            self.hooks.insert(name.to_string(), Vec::new());
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Entry point for the plugin loader to hang an observer on a hook.
    pub fn attach(
        &mut self,
        name: &str,
        observer: ObserverRef<C>,
    ) -> Result<(), ConfigurationError> {
        let observers = self
            .hooks
            .get_mut(name)
            .ok_or_else(|| ConfigurationError::UnregisteredHook(name.to_string()))?;
        observers.push(observer);
        tracing::debug!(
            hook = name,
            observers = self.observer_count(name),
            "observer attached"
        );
        Ok(())
    }

    pub fn observer_count(&self, name: &str) -> usize {
        self.hooks.get(name).map(Vec::len).unwrap_or(0)
    }

    /// Snapshot of the observers for `name`, in registration order.
    ///
    /// Callers that own the registry inside the context they pass to the
    /// observers take the snapshot first and then run [`run_wrapped`].
    pub fn chain(&self, name: &str) -> Result<Vec<ObserverRef<C>>, ConfigurationError> {
        self.hooks
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnregisteredHook(name.to_string()))
    }

    pub fn trigger<T>(
        &self,
        cx: &mut C,
        name: &str,
        inner: impl FnOnce(&mut C) -> T,
    ) -> Result<T, ConfigurationError> {
        let chain = self.chain(name)?;
        tracing::trace!(hook = name, observers = chain.len(), "trigger");
        Ok(run_wrapped(cx, &chain, inner))
    }
}

impl<C> Default for HookRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_wrapped<C, T>(
    cx: &mut C,
    chain: &[ObserverRef<C>],
    inner: impl FnOnce(&mut C) -> T,
) -> T {
    for observer in chain {
        observer.before(cx);
    }
    let out = inner(cx);
    for observer in chain.iter().rev() {
        observer.after(cx);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/core/hooks.rs"]
mod tests;
