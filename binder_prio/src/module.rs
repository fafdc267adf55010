//! Module lifecycle — init / exit
//!
//! Порядок init / Init order:
//!   1. Проба маркера прошивки (один раз) / ROM marker lookup (once)
//!   2. Набор правил под вариант / Rule set for the variant
//!   3. Регистрация трёх vendor hook'ов / Register the three vendor hooks
//!
//! Init не падает никогда: ошибки только логируются.
//! Init never fails: errors are only logged.

use libbinder::Result;

use crate::env::{self, PathLookup, Variant};
use crate::hooks::BinderPrio;
use crate::params::Params;

/// Точки vendor hook'ов binder / Binder vendor hook points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorHook {
    /// → `BinderPrio::on_set_priority`
    SetPriority,
    /// → `BinderPrio::on_transaction`
    Trans,
    /// → `BinderPrio::on_priority_skip`
    PrioritySkip,
}

impl VendorHook {
    pub const ALL: [VendorHook; 3] = [VendorHook::SetPriority, VendorHook::Trans, VendorHook::PrioritySkip];

    pub const fn name(self) -> &'static str {
        match self {
            VendorHook::SetPriority  => "android_vh_binder_set_priority",
            VendorHook::Trans        => "android_vh_binder_trans",
            VendorHook::PrioritySkip => "android_vh_binder_priority_skip",
        }
    }
}

/// Реестр tracepoint-пробов хоста. После `register` хост направляет
/// событие в соответствующий метод `BinderPrio`.
/// Host tracepoint handler registry. After `register` the host routes the
/// event into the matching `BinderPrio` method.
pub trait HookRegistry {
    fn register(&mut self, hook: VendorHook) -> Result<()>;
    fn unregister(&mut self, hook: VendorHook);
}

#[derive(Debug)]
pub struct Module {
    policy: BinderPrio,
}

impl Module {
    pub fn init<P, R>(paths: &P, registry: &mut R, params: Params) -> Self
    where
        P: PathLookup + ?Sized,
        R: HookRegistry + ?Sized,
    {
        pr_info!("module init!");

        let variant = env::detect(paths, params.marker());
        pr_info!("{} rom detected!", variant.name());

        let policy = BinderPrio::new(variant, params);
        for hook in VendorHook::ALL {
            if let Err(err) = registry.register(hook) {
                pr_warn!("failed to register {}: {}", hook.name(), err);
            }
        }
        Self { policy }
    }

    pub fn policy(&self) -> &BinderPrio { &self.policy }

    pub fn variant(&self) -> Variant { self.policy.variant() }

    pub fn exit<R: HookRegistry + ?Sized>(self, registry: &mut R) {
        for hook in VendorHook::ALL {
            registry.unregister(hook);
        }
        pr_info!("module exit!");
    }
}
