//! Module parameters
//!
//! `debug` меняется во время работы (module_param 0644), остальное — при init.
//! `debug` is writable at runtime (module_param 0644), the rest is fixed at init.

use core::sync::atomic::{AtomicBool, Ordering};

/// Маркер Miui/HyperOS / Miui/HyperOS marker file
pub const MIUI_FRAMEWORK: &str = "/system/framework/MiuiBooster.jar";

#[derive(Debug)]
pub struct Params {
    debug:  AtomicBool,
    marker: &'static str,
}

impl Params {
    pub const fn new() -> Self {
        Self { debug: AtomicBool::new(false), marker: MIUI_FRAMEWORK }
    }

    /// Другой путь маркера (для стендов) / Alternate marker path (for test rigs)
    pub fn with_marker(mut self, marker: &'static str) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_debug(self, on: bool) -> Self {
        self.set_debug(on);
        self
    }

    pub fn marker(&self) -> &'static str { self.marker }

    /// Без фичи `debug` диагностика вырезана, флаг всегда false.
    /// Without the `debug` feature diagnostics are compiled out and this is always false.
    pub fn debug(&self) -> bool {
        cfg!(feature = "debug") && self.debug.load(Ordering::Relaxed)
    }

    pub fn set_debug(&self, on: bool) {
        self.debug.store(on, Ordering::Relaxed);
    }
}

impl Default for Params {
    fn default() -> Self { Self::new() }
}
