//! libbinder — описания binder-объектов хоста
//! Host-side binder descriptors consumed by the priority policy.
//!
//! Read-only снимки структур ядра: задачи, процессы, транзакции.
//! Read-only snapshots of kernel structures: tasks, procs, transactions.
//! Указатели, которые у хоста могут быть NULL, здесь `Option<&T>`.
//! Pointers the host may leave NULL are `Option<&T>` here.
//!
//! Использование / Usage:
//!   use libbinder::{Transaction, TransactionFlags};
//!   let one_way = t.flags.contains(TransactionFlags::ONE_WAY);

#![cfg_attr(not(test), no_std)]

use core::fmt;

pub mod sched;
pub mod task;
pub mod transaction;

pub use sched::{BinderPriority, PolicyFlags, SchedParam, SchedPolicy};
pub use task::{Comm, Pid, TaskInfo, TASK_COMM_LEN};
pub use transaction::{
    BinderNode, BinderProc, BinderThread, Transaction, TransactionData, TransactionFlags,
};

/// Ошибки примитивов хоста / Host primitive errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidArg,
    NoPermission,
    NotFound,
    Io,
    Unknown(isize),
}

impl Error {
    /// Отрицательный errno, как его вернул бы хост.
    /// Negative errno, as the host would return it.
    pub const fn errno(self) -> isize {
        match self {
            Error::NoPermission => -1, // EPERM
            Error::NotFound     => -2, // ENOENT
            Error::Io           => -5, // EIO
            Error::InvalidArg   => -22, // EINVAL
            Error::Unknown(e)   => e,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArg   => f.write_str("invalid argument"),
            Error::NoPermission => f.write_str("operation not permitted"),
            Error::NotFound     => f.write_str("no such file or directory"),
            Error::Io           => f.write_str("i/o error"),
            Error::Unknown(e)   => write!(f, "unknown error {e}"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
