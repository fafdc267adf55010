//! Binder transaction descriptors
//!
//! Хозяин всех структур — IPC-подсистема; политика только читает их,
//! кроме `BinderProc::default_priority`.
//! The IPC subsystem owns every structure; the policy only reads them,
//! except for `BinderProc::default_priority`.

use bitflags::bitflags;

use crate::sched::{BinderPriority, SchedPolicy};
use crate::task::TaskInfo;

bitflags! {
    /// Флаги транзакции (TF_*) / Transaction flags (TF_*)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TransactionFlags: u32 {
        /// Без ответа / No reply expected
        const ONE_WAY     = 0x01;
        const ROOT_OBJECT = 0x04;
        const STATUS_CODE = 0x08;
        const ACCEPT_FDS  = 0x10;
        const CLEAR_BUF   = 0x20;
        const UPDATE_TXN  = 0x40;
    }
}

impl TransactionFlags {
    pub fn is_one_way(self) -> bool { self.contains(TransactionFlags::ONE_WAY) }
}

/// binder_thread
#[derive(Debug, Clone, Copy, Default)]
pub struct BinderThread<'a> {
    pub task: Option<&'a TaskInfo>,
    /// Флаги верхней транзакции в стеке потока, если стек не пуст.
    /// Flags of the top entry of the thread's transaction stack, if any.
    pub transaction_stack: Option<TransactionFlags>,
}

impl<'a> BinderThread<'a> {
    pub fn new(task: &'a TaskInfo) -> Self {
        Self { task: Some(task), transaction_stack: None }
    }

    pub fn with_stack(mut self, flags: TransactionFlags) -> Self {
        self.transaction_stack = Some(flags);
        self
    }
}

/// binder_proc
#[derive(Debug, Clone, Copy, Default)]
pub struct BinderProc<'a> {
    pub tsk: Option<&'a TaskInfo>,
    pub default_priority: BinderPriority,
}

impl<'a> BinderProc<'a> {
    pub fn new(tsk: &'a TaskInfo) -> Self {
        Self { tsk: Some(tsk), default_priority: BinderPriority::default() }
    }
}

/// binder_node — приоритет, заданный владельцем узла.
/// binder_node — priority configured by the node owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinderNode {
    pub sched_policy: SchedPolicy,
    pub min_priority: i32,
}

impl BinderNode {
    pub const fn new(sched_policy: SchedPolicy, min_priority: i32) -> Self {
        Self { sched_policy, min_priority }
    }

    pub const fn priority(&self) -> BinderPriority {
        BinderPriority::new(self.sched_policy, self.min_priority)
    }
}

/// binder_transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct Transaction<'a> {
    pub from:        Option<&'a BinderThread<'a>>,
    pub to_proc:     Option<&'a BinderProc<'a>>,
    /// `t->buffer->target_node`
    pub target_node: Option<&'a BinderNode>,
    pub flags:       TransactionFlags,
}

impl<'a> Transaction<'a> {
    pub fn new(from: &'a BinderThread<'a>, to_proc: &'a BinderProc<'a>) -> Self {
        Self {
            from: Some(from),
            to_proc: Some(to_proc),
            target_node: None,
            flags: TransactionFlags::empty(),
        }
    }

    pub fn with_node(mut self, node: &'a BinderNode) -> Self {
        self.target_node = Some(node);
        self
    }

    pub fn with_flags(mut self, flags: TransactionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Задача-отправитель (`t->from->task`) / Sending task
    pub fn sender(&self) -> Option<&'a TaskInfo> {
        self.from.and_then(|thread| thread.task)
    }

    /// Задача-получатель (`t->to_proc->tsk`) / Receiving process task
    pub fn receiver(&self) -> Option<&'a TaskInfo> {
        self.to_proc.and_then(|proc| proc.tsk)
    }

    pub fn is_one_way(&self) -> bool { self.flags.is_one_way() }
}

/// binder_transaction_data — то, что пришло из userspace.
/// binder_transaction_data — what userspace handed in.
///
/// Повторяет структуру хоста; H2 проверяет только наличие, поля не читает.
/// Mirrors the host struct; H2 only checks it is present, fields are unread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionData {
    pub code:      u32,
    pub flags:     TransactionFlags,
    pub data_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_nullable_links() {
        let sender = TaskInfo::leader(10, "droid.launcher3", SchedPolicy::Fifo);
        let target = TaskInfo::leader(20, "surfaceflinger", SchedPolicy::Fifo);
        let thread = BinderThread::new(&sender);
        let proc = BinderProc::new(&target);

        let t = Transaction::new(&thread, &proc);
        assert_eq!(t.sender().map(|t| t.pid), Some(10));
        assert_eq!(t.receiver().map(|t| t.pid), Some(20));

        let orphan = BinderThread::default();
        let t = Transaction { from: Some(&orphan), ..Transaction::default() };
        assert!(t.sender().is_none());
        assert!(t.receiver().is_none());
    }

    #[test]
    fn one_way_flag() {
        let t = Transaction::default().with_flags(TransactionFlags::ONE_WAY | TransactionFlags::ACCEPT_FDS);
        assert!(t.is_one_way());
        assert!(!Transaction::default().with_flags(TransactionFlags::ACCEPT_FDS).is_one_way());
    }

    #[test]
    fn node_priority_pair() {
        let node = BinderNode::new(SchedPolicy::Rr, 50);
        assert_eq!(node.priority(), BinderPriority::new(SchedPolicy::Rr, 50));
    }
}
