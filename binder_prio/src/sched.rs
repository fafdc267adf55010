//! Scheduler capability — всё, что политике нужно от планировщика хоста.
//! Scheduler capability — all the policy needs from the host scheduler.
//!
//!   current()              — текущая (policy, prio) задачи / task's current pair
//!   setscheduler_nocheck() — sched_setscheduler_nocheck(), без проверки прав
//!                            without permission checks (trusted caller)

use libbinder::{BinderPriority, PolicyFlags, Result, SchedParam, SchedPolicy, TaskInfo};

pub trait Scheduler {
    /// (policy, prio) задачи в шкале ядра / task's pair on the kernel scale
    fn current(&self, task: &TaskInfo) -> BinderPriority;

    /// `param` — в пользовательской шкале (см. `prio::to_user_priority`).
    /// `param` is on the user scale (see `prio::to_user_priority`).
    fn setscheduler_nocheck(
        &self,
        task: &TaskInfo,
        policy: SchedPolicy,
        flags: PolicyFlags,
        param: SchedParam,
    ) -> Result<()>;
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn current(&self, task: &TaskInfo) -> BinderPriority { (**self).current(task) }

    fn setscheduler_nocheck(
        &self,
        task: &TaskInfo,
        policy: SchedPolicy,
        flags: PolicyFlags,
        param: SchedParam,
    ) -> Result<()> {
        (**self).setscheduler_nocheck(task, policy, flags, param)
    }
}
