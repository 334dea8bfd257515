//! 磁盘缓存：`<cache_root>/<namespace>/<key>.dump`
//!
//! 同一 key 的并发生产者不做互斥，调用方都在 UI 线程上。

use crate::core::CacheError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub fn with_cache<T, F>(
    cache_root: &Path,
    namespace: &str,
    key: &str,
    producer: F,
) -> Result<T, CacheError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    let dir = cache_root.join(namespace);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    let blob = dir.join(format!("{}.dump", key));
    if blob.exists() {
        let data = std::fs::read(&blob)?;
        let value = serde_json::from_slice(&data)?;
        tracing::debug!(namespace, key, "cache hit");
        return Ok(value);
    }

    tracing::debug!(namespace, key, "cache miss");
    let value = producer();
    std::fs::write(&blob, serde_json::to_vec(&value)?)?;
    Ok(value)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/cache.rs"]
mod tests;
