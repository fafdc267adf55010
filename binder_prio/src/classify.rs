//! Transaction Classifier
//!
//! Буст только распространяет уже имеющийся RT через границу IPC:
//! отправитель обязан быть RT, транзакция — с ответом.
//! The boost only carries existing RT-ness across the IPC boundary:
//! the sender must already be RT and the transaction must expect a reply.

use core::fmt;

use libbinder::{TaskInfo, Transaction};

use crate::rules::{Rule, RuleSet, Subject};

/// Положительный вердикт с тем, что к нему привело.
/// Positive verdict plus what produced it.
#[derive(Debug, Clone, Copy)]
pub struct Boost<'a> {
    pub rule:   &'static Rule,
    pub sender: &'a TaskInfo,
    pub target: &'a TaskInfo,
}

impl fmt::Display for Boost<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tid: {}, from_task: {}, from_task_gl: {}; to_task: {} [{}]",
            self.sender.pid,
            self.sender.comm,
            self.sender.group_leader_comm,
            self.target.comm,
            self.rule.name,
        )
    }
}

/// Любая пустая ссылка в дескрипторе — просто "нет буста".
/// Any missing link in the descriptor is just "no boost".
pub fn classify<'a>(rules: &RuleSet, t: &Transaction<'a>) -> Option<Boost<'a>> {
    let sender = t.sender()?;
    let target = t.receiver()?;
    if t.is_one_way() || !sender.policy.is_rt() {
        return None;
    }
    let rule = rules.first_match(&Subject::new(sender, target))?;
    Some(Boost { rule, sender, target })
}

pub fn qualifies_for_boost(rules: &RuleSet, t: &Transaction<'_>) -> bool {
    classify(rules, t).is_some()
}
