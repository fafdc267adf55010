//! Программная модель хоста / Software model of the host
//!
//! Планировщик и реестр hook'ов без ядра: для стендов и тестов.
//! Scheduler and hook registry without a kernel: for test rigs and tests.
//! Таблица задач под spin::Mutex — обработчики зовутся из многих потоков.
//! The task table sits under spin::Mutex since handlers run on many threads.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use libbinder::sched::{DEFAULT_PRIO, MAX_RT_PRIO, MAX_USER_RT_PRIO};
use libbinder::{BinderPriority, Error, Pid, PolicyFlags, Result, SchedParam, SchedPolicy, TaskInfo};
use spin::Mutex;

use crate::module::{HookRegistry, VendorHook};
use crate::sched::Scheduler;

/// Один вызов sched_setscheduler_nocheck / One sched_setscheduler_nocheck call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCall {
    pub pid:    Pid,
    pub policy: SchedPolicy,
    pub flags:  PolicyFlags,
    pub param:  SchedParam,
}

pub struct SimScheduler {
    tasks: Mutex<BTreeMap<Pid, BinderPriority>>,
    calls: Mutex<Vec<SetCall>>,
    fail:  Mutex<Option<Error>>,
}

impl SimScheduler {
    pub const fn new() -> Self {
        Self {
            tasks: Mutex::new(BTreeMap::new()),
            calls: Mutex::new(Vec::new()),
            fail:  Mutex::new(None),
        }
    }

    pub fn add(&self, task: &TaskInfo, prio: BinderPriority) {
        self.tasks.lock().insert(task.pid, prio);
    }

    /// Все следующие set-вызовы вернут `err` (None — снова успех).
    /// Every following set call returns `err` (None restores success).
    pub fn fail_with(&self, err: Option<Error>) {
        *self.fail.lock() = err;
    }

    pub fn calls(&self) -> Vec<SetCall> { self.calls.lock().clone() }

    pub fn call_count(&self) -> usize { self.calls.lock().len() }
}

impl Default for SimScheduler {
    fn default() -> Self { Self::new() }
}

impl Scheduler for SimScheduler {
    /// Незарегистрированная задача — её policy из снимка, prio по умолчанию.
    /// An unregistered task reports its snapshot policy at the default prio.
    fn current(&self, task: &TaskInfo) -> BinderPriority {
        self.tasks
            .lock()
            .get(&task.pid)
            .copied()
            .unwrap_or(BinderPriority::new(task.policy, DEFAULT_PRIO))
    }

    fn setscheduler_nocheck(
        &self,
        task: &TaskInfo,
        policy: SchedPolicy,
        flags: PolicyFlags,
        param: SchedParam,
    ) -> Result<()> {
        self.calls.lock().push(SetCall { pid: task.pid, policy, flags, param });
        if let Some(err) = *self.fail.lock() {
            return Err(err);
        }

        let mut tasks = self.tasks.lock();
        let prio = if policy.is_rt() {
            if !(1..MAX_USER_RT_PRIO).contains(&param.sched_priority) {
                return Err(Error::InvalidArg);
            }
            MAX_RT_PRIO - 1 - param.sched_priority
        } else if policy.is_fair() || policy == SchedPolicy::Idle {
            if param.sched_priority != 0 {
                return Err(Error::InvalidArg);
            }
            // nice сохраняется / nice is kept
            match tasks.get(&task.pid) {
                Some(cur) if cur.prio >= MAX_RT_PRIO => cur.prio,
                _ => DEFAULT_PRIO,
            }
        } else {
            // DEADLINE требует sched_attr / DEADLINE needs sched_attr
            return Err(Error::InvalidArg);
        };
        tasks.insert(task.pid, BinderPriority::new(policy, prio));
        Ok(())
    }
}

/// Реестр hook'ов: помнит, что зарегистрировано.
/// Hook registry that remembers what is registered.
#[derive(Debug, Default)]
pub struct SimRegistry {
    registered: Vec<VendorHook>,
    reject:     Option<VendorHook>,
}

impl SimRegistry {
    pub fn new() -> Self { Self::default() }

    /// Регистрация `hook` будет падать / Registering `hook` will fail
    pub fn rejecting(hook: VendorHook) -> Self {
        Self { registered: Vec::new(), reject: Some(hook) }
    }

    pub fn registered(&self) -> &[VendorHook] { &self.registered }

    pub fn is_registered(&self, hook: VendorHook) -> bool { self.registered.contains(&hook) }
}

impl HookRegistry for SimRegistry {
    fn register(&mut self, hook: VendorHook) -> Result<()> {
        if self.reject == Some(hook) {
            return Err(Error::NoPermission);
        }
        if self.is_registered(hook) {
            return Err(Error::Unknown(-17)); // EEXIST
        }
        self.registered.push(hook);
        Ok(())
    }

    fn unregister(&mut self, hook: VendorHook) {
        self.registered.retain(|&h| h != hook);
    }
}
