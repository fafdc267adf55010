//! Task — снимок task_struct / task_struct snapshot
//!
//! Имя задачи (comm) хранится как у хоста: 16 байт, из них 15 значимых.
//! Task names (comm) are stored like the host does: 16 bytes, 15 significant.

use core::fmt;

use crate::sched::SchedPolicy;

/// Длина comm вместе с NUL / comm length including the NUL
pub const TASK_COMM_LEN: usize = 16;

pub type Pid = i32;

/// Имя задачи фиксированной длины / Fixed-size task name
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comm {
    buf: [u8; TASK_COMM_LEN],
    len: u8,
}

impl Comm {
    pub const fn empty() -> Self {
        Self { buf: [0; TASK_COMM_LEN], len: 0 }
    }

    /// Берёт байты до первого NUL и обрезает до 15, как `set_task_comm`.
    /// Takes bytes up to the first NUL and truncates to 15, like `set_task_comm`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let len = end.min(TASK_COMM_LEN - 1);
        let mut buf = [0; TASK_COMM_LEN];
        buf[..len].copy_from_slice(&bytes[..len]);
        Self { buf, len: len as u8 }
    }

    pub fn as_bytes(&self) -> &[u8] { &self.buf[..self.len as usize] }

    pub fn len(&self) -> usize { self.len as usize }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// `strncmp(comm, lit, strlen(lit)) == 0`
    pub fn starts_with(&self, literal: &str) -> bool {
        self.as_bytes().starts_with(literal.as_bytes())
    }

    /// `strstr(comm, needle) != NULL`
    pub fn contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        self.as_bytes().windows(needle.len()).any(|w| w == needle)
    }
}

impl Default for Comm {
    fn default() -> Self { Self::empty() }
}

impl From<&str> for Comm {
    fn from(name: &str) -> Self { Self::from_bytes(name.as_bytes()) }
}

impl fmt::Display for Comm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(s) => f.write_str(s),
            Err(_) => {
                for &b in self.as_bytes() {
                    write!(f, "{}", core::ascii::escape_default(b))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Comm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comm(\"{self}\")")
    }
}

/// Снимок задачи на момент решения / Task snapshot at decision time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskInfo {
    pub pid:               Pid,
    pub tgid:              Pid,
    pub comm:              Comm,
    /// comm лидера группы (главного потока процесса)
    /// comm of the group leader (the process main thread)
    pub group_leader_comm: Comm,
    pub policy:            SchedPolicy,
}

impl TaskInfo {
    /// Главный поток процесса: pid == tgid, лидер — он сам.
    /// Process main thread: pid == tgid, it is its own leader.
    pub fn leader(pid: Pid, comm: &str, policy: SchedPolicy) -> Self {
        let comm = Comm::from(comm);
        Self { pid, tgid: pid, comm, group_leader_comm: comm, policy }
    }

    /// Рабочий поток процесса `tgid` / Worker thread of process `tgid`
    pub fn thread(pid: Pid, tgid: Pid, comm: &str, leader_comm: &str, policy: SchedPolicy) -> Self {
        Self {
            pid,
            tgid,
            comm: Comm::from(comm),
            group_leader_comm: Comm::from(leader_comm),
            policy,
        }
    }

    pub fn is_group_leader(&self) -> bool { self.pid == self.tgid }
}
