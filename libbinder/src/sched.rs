//! Scheduling classes and priority scales
//!
//! Две шкалы приоритета / Two priority scales:
//!   kernel — 0..99 RT (0 = highest), 100..139 fair (DEFAULT_PRIO = 120)
//!   user   — sched_priority 1..99 for RT, nice -20..19 for fair

use bitflags::bitflags;

pub const MAX_NICE:         i32 = 19;
pub const MIN_NICE:         i32 = -20;
pub const NICE_WIDTH:       i32 = MAX_NICE - MIN_NICE + 1;

pub const MAX_RT_PRIO:      i32 = 100;
pub const MAX_USER_RT_PRIO: i32 = 100;
pub const MAX_PRIO:         i32 = MAX_RT_PRIO + NICE_WIDTH;
pub const DEFAULT_PRIO:     i32 = MAX_RT_PRIO + NICE_WIDTH / 2;

/// kernel prio → nice (PRIO_TO_NICE)
pub const fn prio_to_nice(prio: i32) -> i32 { prio - DEFAULT_PRIO }

/// Класс планирования / Scheduling policy (SCHED_* values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum SchedPolicy {
    #[default]
    Normal   = 0,
    Fifo     = 1,
    Rr       = 2,
    Batch    = 3,
    Idle     = 5,
    Deadline = 6,
}

impl SchedPolicy {
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(SchedPolicy::Normal),
            1 => Some(SchedPolicy::Fifo),
            2 => Some(SchedPolicy::Rr),
            3 => Some(SchedPolicy::Batch),
            5 => Some(SchedPolicy::Idle),
            6 => Some(SchedPolicy::Deadline),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u32 { self as u32 }

    /// `fair_policy()`: NORMAL и BATCH. IDLE сюда не входит.
    /// `fair_policy()`: NORMAL and BATCH. IDLE is not included.
    pub const fn is_fair(self) -> bool {
        matches!(self, SchedPolicy::Normal | SchedPolicy::Batch)
    }

    /// `rt_policy()`: FIFO и RR / FIFO and RR
    pub const fn is_rt(self) -> bool {
        matches!(self, SchedPolicy::Fifo | SchedPolicy::Rr)
    }
}

bitflags! {
    /// Флаги, добавляемые к policy в sched_setscheduler.
    /// Flags or'ed into the policy passed to sched_setscheduler.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PolicyFlags: u32 {
        const RESET_ON_FORK = 0x4000_0000;
    }
}

/// struct sched_param — приоритет в пользовательской шкале.
/// struct sched_param — priority on the user-visible scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedParam {
    pub sched_priority: i32,
}

/// Пара (policy, prio) в шкале ядра / (policy, prio) pair on the kernel scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderPriority {
    pub sched_policy: SchedPolicy,
    pub prio:         i32,
}

impl BinderPriority {
    pub const fn new(sched_policy: SchedPolicy, prio: i32) -> Self {
        Self { sched_policy, prio }
    }

    pub const fn is_rt(&self) -> bool { self.sched_policy.is_rt() }
}

impl Default for BinderPriority {
    fn default() -> Self { Self::new(SchedPolicy::Normal, DEFAULT_PRIO) }
}
