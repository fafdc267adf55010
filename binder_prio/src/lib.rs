//! binder_prio — RT-буст для binder-транзакций / RT boost for binder transactions
//!
//! Политика смотрит на каждую исходящую binder-транзакцию и решает по
//! фиксированной таблице имён, получит ли поток-получатель SCHED_FIFO.
//! The policy inspects every outgoing binder transaction and decides, from a
//! fixed table of names, whether the receiving thread gets SCHED_FIFO.
//!
//! Слои / Layers:
//!   prio     — kernel prio → sched_param
//!   rules    — таблица правил / rule table
//!   classify — вердикт по транзакции / per-transaction verdict
//!   hooks    — три обработчика vendor hook'ов / the three hook handlers
//!   env      — проба варианта прошивки / ROM variant detection
//!   module   — init/exit и регистрация / init/exit and registration
//!   sim      — модель хоста без ядра / kernel-less host model
//!
//! Использование / Usage:
//!   let module = Module::init(&paths, &mut registry, Params::new());
//!   module.policy().on_set_priority(&sched, &t, task);

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod classify;
pub mod env;
pub mod hooks;
pub mod module;
pub mod params;
pub mod prio;
pub mod rules;
pub mod sched;
pub mod sim;

pub use classify::{classify, qualifies_for_boost, Boost};
pub use env::{detect, PathLookup, Variant};
#[cfg(any(test, feature = "std"))]
pub use env::StdLookup;
pub use hooks::BinderPrio;
pub use module::{HookRegistry, Module, VendorHook};
pub use params::{Params, MIUI_FRAMEWORK};
pub use prio::{to_user_priority, BOOST_PRIORITY};
pub use rules::{Rule, RuleGroups, RuleSet, RULES};
pub use sched::Scheduler;

/// log target всех записей модуля / log target of every module record
pub const LOG_TARGET: &str = "binder_prio";
