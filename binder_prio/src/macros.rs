//! Макросы логирования / Logging macros
//!
//! Все записи идут под одним target, как pr_fmt("binder_prio: ") у хоста.
//! Every record goes under one target, like the host's pr_fmt("binder_prio: ").

macro_rules! pr_info {
    ($($arg:tt)*) => (::log::info!(target: $crate::LOG_TARGET, $($arg)*));
}

macro_rules! pr_warn {
    ($($arg:tt)*) => (::log::warn!(target: $crate::LOG_TARGET, $($arg)*));
}

macro_rules! pr_debug {
    ($($arg:tt)*) => (::log::debug!(target: $crate::LOG_TARGET, $($arg)*));
}
