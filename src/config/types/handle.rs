//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads from request worker threads.

use crate::config::HostConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<HostConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(HostConfig::default()));

#[inline]
pub fn cfg() -> Arc<HostConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: HostConfig) -> Arc<HostConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
