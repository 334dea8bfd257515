//! 配置总线：层级路径 → 值
//!
//! 路径以 `/` 分隔（如 `/zcore/appdata/execution`），后写覆盖先写，不做合并。
//! 写入与删除会同步通知订阅了祖先路径的监听者。

use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

pub type Subscriber = Rc<dyn Fn(&str, Option<&Value>)>;

pub struct ConfigBus {
    slots: BTreeMap<String, Value>,
    subscribers: Vec<(String, Subscriber)>,
}

impl ConfigBus {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.slots.get(&normalize(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.slots.contains_key(&normalize(path))
    }

    /// Stores `value` at `path`, returning the previous value.
    pub fn set(&mut self, path: &str, value: Value) -> Option<Value> {
        let path = normalize(path);
        let previous = self.slots.insert(path.clone(), value);
        self.notify(&path);
        previous
    }

    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let path = normalize(path);
        let previous = self.slots.remove(&path);
        if previous.is_some() {
            self.notify(&path);
        }
        previous
    }

    /// Entries below `prefix`, keyed relative to it.
    pub fn subtree(&self, prefix: &str) -> Vec<(String, Value)> {
        let prefix = normalize(prefix);
        self.slots
            .iter()
            .filter_map(|(path, value)| {
                relative_to(&prefix, path).map(|rel| (rel.to_string(), value.clone()))
            })
            .collect()
    }

    pub fn subscribe(&mut self, prefix: &str, subscriber: Subscriber) {
        self.subscribers.push((normalize(prefix), subscriber));
    }

    fn notify(&self, path: &str) {
        let value = self.slots.get(path);
        for (prefix, subscriber) in &self.subscribers {
            if prefix == path || relative_to(prefix, path).is_some() {
                subscriber(path, value);
            }
        }
    }
}

impl Default for ConfigBus {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

fn relative_to<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    if prefix == "/" {
        return path.strip_prefix('/').filter(|rel| !rel.is_empty());
    }
    path.strip_prefix(prefix)?
        .strip_prefix('/')
        .filter(|rel| !rel.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/core/config_bus.rs"]
mod tests;
