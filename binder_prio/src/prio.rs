//! Priority scale conversion

use libbinder::sched::{prio_to_nice, MAX_USER_RT_PRIO};
use libbinder::{BinderPriority, SchedPolicy};

/// Единственный буст: SCHED_FIFO, prio 98 в шкале ядра.
/// The only boost there is: SCHED_FIFO at kernel prio 98.
pub const BOOST_PRIORITY: BinderPriority = BinderPriority::new(SchedPolicy::Fifo, 98);

/// Kernel prio → значение для sched_param / value for sched_param.
///
/// fair (NORMAL, BATCH): nice. Всё остальное, включая IDLE и DEADLINE,
/// считается как RT: `MAX_USER_RT_PRIO - 1 - prio`.
/// Fair (NORMAL, BATCH) maps to nice. Everything else, IDLE and DEADLINE
/// included, takes the RT branch: `MAX_USER_RT_PRIO - 1 - prio`.
pub const fn to_user_priority(policy: SchedPolicy, kernel_priority: i32) -> i32 {
    if policy.is_fair() {
        prio_to_nice(kernel_priority)
    } else {
        MAX_USER_RT_PRIO - 1 - kernel_priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libbinder::sched::{DEFAULT_PRIO, MAX_PRIO, MAX_RT_PRIO};

    #[test]
    fn fair_branch_is_nice() {
        assert_eq!(to_user_priority(SchedPolicy::Normal, DEFAULT_PRIO), 0);
        assert_eq!(to_user_priority(SchedPolicy::Normal, MAX_RT_PRIO), -20);
        assert_eq!(to_user_priority(SchedPolicy::Batch, MAX_PRIO - 1), 19);
    }

    #[test]
    fn rt_branch_inverts() {
        assert_eq!(to_user_priority(SchedPolicy::Fifo, BOOST_PRIORITY.prio), 1);
        assert_eq!(to_user_priority(SchedPolicy::Rr, 0), 99);
        assert_eq!(to_user_priority(SchedPolicy::Fifo, 99), 0);
    }

    #[test]
    fn idle_and_deadline_take_rt_branch() {
        assert_eq!(to_user_priority(SchedPolicy::Idle, DEFAULT_PRIO), -21);
        assert_eq!(to_user_priority(SchedPolicy::Deadline, -1), 100);
    }

    #[test]
    fn both_branches_are_affine() {
        for k1 in 0..MAX_PRIO {
            for k2 in [0, 17, 98, 120, 139] {
                let fair = to_user_priority(SchedPolicy::Normal, k1) - to_user_priority(SchedPolicy::Normal, k2);
                assert_eq!(fair, k1 - k2);
                let rt = to_user_priority(SchedPolicy::Fifo, k1) - to_user_priority(SchedPolicy::Fifo, k2);
                assert_eq!(rt, k2 - k1);
            }
        }
    }

    #[test]
    fn boost_is_fifo() {
        assert!(BOOST_PRIORITY.is_rt());
        assert_eq!(BOOST_PRIORITY.sched_policy, SchedPolicy::Fifo);
    }
}
