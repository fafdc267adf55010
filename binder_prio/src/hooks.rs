//! Priority Decision Handlers — обработчики vendor hook'ов binder
//! Priority Decision Handlers — binder vendor hook callbacks
//!
//!   on_set_priority  — android_vh_binder_set_priority   (H1)
//!   on_transaction   — android_vh_binder_trans          (H2)
//!   on_priority_skip — android_vh_binder_priority_skip  (H3)
//!
//! Все обработчики синхронные и ничего не возвращают: ошибка = нет буста.
//! Every handler is synchronous and returns nothing: failure means no boost.

use libbinder::{
    BinderProc, BinderThread, PolicyFlags, SchedParam, TaskInfo, Transaction, TransactionData,
};

use crate::classify::classify;
use crate::env::Variant;
use crate::params::Params;
use crate::prio::{to_user_priority, BOOST_PRIORITY};
use crate::rules::{RuleSet, SURFACEFLINGER};
use crate::sched::Scheduler;

/// Политика: набор правил, зафиксированный при init, плюс параметры.
/// The policy: rule set fixed at init, plus parameters.
#[derive(Debug)]
pub struct BinderPrio {
    variant: Variant,
    rules:   RuleSet,
    params:  Params,
}

impl BinderPrio {
    pub fn new(variant: Variant, params: Params) -> Self {
        Self { variant, rules: RuleSet::new(variant), params }
    }

    pub fn variant(&self) -> Variant { self.variant }

    pub fn rules(&self) -> &RuleSet { &self.rules }

    pub fn params(&self) -> &Params { &self.params }

    pub fn qualifies_for_boost(&self, t: &Transaction<'_>) -> bool {
        match classify(&self.rules, t) {
            Some(boost) => {
                if self.params.debug() {
                    pr_info!("set_binder_rt_task: {}", boost);
                }
                true
            }
            None => false,
        }
    }

    /// H1: приоритет потока-получателя перед доставкой.
    /// H1: receiving thread priority before delivery.
    ///
    /// База — приоритет узла; буст заменяет её на FIFO/98. Планировщик
    /// вызывается, только если итог RT и policy потока ещё другая.
    /// Baseline is the node priority; a boost replaces it with FIFO/98. The
    /// scheduler is called only when the result is RT and the thread's policy
    /// still differs.
    pub fn on_set_priority<S>(&self, sched: &S, t: &Transaction<'_>, task: &TaskInfo)
    where
        S: Scheduler + ?Sized,
    {
        let desired = if self.qualifies_for_boost(t) {
            BOOST_PRIORITY
        } else {
            match t.target_node {
                Some(node) => node.priority(),
                None => return,
            }
        };

        let policy = desired.sched_policy;
        if !policy.is_rt() || sched.current(task).sched_policy == policy {
            return;
        }

        let param = SchedParam { sched_priority: to_user_priority(policy, desired.prio) };
        if let Err(err) = sched.setscheduler_nocheck(task, policy, PolicyFlags::RESET_ON_FORK, param) {
            pr_debug!("tid {}: setscheduler {:?}/{} failed: {}", task.pid, policy, param.sched_priority, err);
        }
    }

    /// H2: начало транзакции к surfaceflinger взводит default_priority
    /// процесса, чтобы его следующие потоки стартовали сразу с FIFO/98.
    /// H2: a transaction starting towards surfaceflinger arms the process
    /// default_priority so its next threads start at FIFO/98 straight away.
    pub fn on_transaction(
        &self,
        target_proc: Option<&mut BinderProc<'_>>,
        proc: Option<&BinderProc<'_>>,
        thread: Option<&BinderThread<'_>>,
        tr: Option<&TransactionData>,
    ) {
        let Some(target_proc) = target_proc else { return };
        let is_compositor = target_proc.tsk.is_some_and(|tsk| tsk.comm.starts_with(SURFACEFLINGER));
        if !is_compositor || proc.is_none() || tr.is_none() {
            return;
        }
        let Some(stack) = thread.and_then(|thread| thread.transaction_stack) else { return };
        if stack.is_one_way() {
            return;
        }
        target_proc.default_priority = BOOST_PRIORITY;
    }

    /// H3: RT-поток не опускаем обратно в fair коротким путём binder.
    /// H3: an RT thread is never dropped back to fair by binder's shortcut.
    ///
    /// Policy берётся у планировщика, как в H1: снимок задачи не видит
    /// буст, выданный через `setscheduler_nocheck`.
    /// Policy comes from the scheduler, as in H1: the task snapshot does not
    /// see a boost applied through `setscheduler_nocheck`.
    ///
    /// `skip` только выставляется в true, сброс — дело вызывающего.
    /// `skip` is only ever set to true; resetting it is the caller's job.
    pub fn on_priority_skip<S>(&self, sched: &S, task: Option<&TaskInfo>, skip: &mut bool)
    where
        S: Scheduler + ?Sized,
    {
        if task.is_some_and(|task| sched.current(task).sched_policy.is_rt()) {
            *skip = true;
        }
    }
}
