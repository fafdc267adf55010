//! Rule Table — кому положен RT-буст / who gets the RT boost
//!
//! Правила проверяются по порядку, первое совпадение выигрывает.
//! Rules are tried in order, first match wins.
//!
//!   1. Miui:   com.miui.home/RenderThread → surfaceflinger, surfaceflinger/passBlur
//!   2. camera: cameraserver/C3Dev-*-ReqQ*
//!   3. shell:  wmshell.main*, ll.splashscreen* (любой процесс / any process)
//!   4. leader: главные потоки лаунчера, systemui, cameraserver (+ Miui)
//!
//! Все сравнения — префикс длиной в литерал, кроме `-ReqQ` (подстрока).
//! All comparisons are prefixes over the literal's length, except `-ReqQ` (substring).
//!
//! Правила shell не смотрят на процесс: поток с таким же именем в чужом
//! процессе тоже получит буст. Известный риск, поведение сохранено.
//! The shell rules ignore the process: a same-named thread in an unrelated
//! process is boosted too. Known over-broad match, kept as is.

use bitflags::bitflags;
use libbinder::{Comm, TaskInfo, TASK_COMM_LEN};

use crate::env::Variant;

use self::Field::{Comm as C, LeaderComm as L, TargetComm as T};

/// comm процесса-компоновщика / compositor process comm
pub const SURFACEFLINGER: &str = "surfaceflinger";

bitflags! {
    /// Группы правил, включаемые вариантом окружения.
    /// Rule groups enabled by the environment variant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleGroups: u8 {
        const BASE = 1 << 0;
        const MIUI = 1 << 1;
    }
}

/// Какое имя сравнивать / Which name to compare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// comm потока-отправителя / sending thread comm
    Comm,
    /// comm лидера группы отправителя / sender's group leader comm
    LeaderComm,
    /// comm процесса-получателя / receiving process comm
    TargetComm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Prefix,
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    pub field:   Field,
    pub kind:    MatchKind,
    pub literal: &'static str,
}

impl Matcher {
    pub const fn prefix(field: Field, literal: &'static str) -> Self {
        Self { field, kind: MatchKind::Prefix, literal }
    }

    pub const fn contains(field: Field, literal: &'static str) -> Self {
        Self { field, kind: MatchKind::Contains, literal }
    }

    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        let comm = subject.field(self.field);
        match self.kind {
            MatchKind::Prefix   => comm.starts_with(self.literal),
            MatchKind::Contains => comm.contains(self.literal),
        }
    }
}

/// Имена, против которых проверяются правила.
/// Names the rules are checked against.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    pub sender: &'a TaskInfo,
    pub target: &'a TaskInfo,
}

impl<'a> Subject<'a> {
    pub fn new(sender: &'a TaskInfo, target: &'a TaskInfo) -> Self {
        Self { sender, target }
    }

    pub fn field(&self, field: Field) -> &'a Comm {
        match field {
            Field::Comm       => &self.sender.comm,
            Field::LeaderComm => &self.sender.group_leader_comm,
            Field::TargetComm => &self.target.comm,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Rule {
    pub name:        &'static str,
    pub group:       RuleGroups,
    /// Только если отправитель — главный поток (pid == tgid).
    /// Only when the sender is its process main thread (pid == tgid).
    pub leader_only: bool,
    pub matchers:    &'static [Matcher],
}

impl Rule {
    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        if self.leader_only && !subject.sender.is_group_leader() {
            return false;
        }
        self.matchers.iter().all(|m| m.matches(subject))
    }
}

pub const RULES: &[Rule] = &[
    // ── Miui ─────────────────────────────────────────────────────────────────
    Rule {
        name:        "miui-home-render",
        group:       RuleGroups::MIUI,
        leader_only: false,
        matchers:    &[
            Matcher::prefix(L, "com.miui.home"),
            Matcher::prefix(C, "RenderThread"),
            Matcher::prefix(T, SURFACEFLINGER),
        ],
    },
    Rule {
        name:        "miui-sf-blur",
        group:       RuleGroups::MIUI,
        leader_only: false,
        matchers:    &[Matcher::prefix(L, SURFACEFLINGER), Matcher::prefix(C, "passBlur")],
    },
    // ── camera request queues ───────────────────────────────────────────────
    Rule {
        name:        "camera-reqq",
        group:       RuleGroups::BASE,
        leader_only: false,
        matchers:    &[
            Matcher::prefix(L, "cameraserver"),
            Matcher::prefix(C, "C3Dev-"),
            Matcher::contains(C, "-ReqQ"),
        ],
    },
    // ── WMShell (WMShellConcurrencyModule threads) ──────────────────────────
    Rule {
        name:        "wmshell-main",
        group:       RuleGroups::BASE,
        leader_only: false,
        matchers:    &[Matcher::prefix(C, "wmshell.main")],
    },
    Rule {
        name:        "wmshell-splash",
        group:       RuleGroups::BASE,
        leader_only: false,
        matchers:    &[Matcher::prefix(C, "ll.splashscreen")],
    },
    // ── main threads ────────────────────────────────────────────────────────
    Rule {
        name:        "launcher3",
        group:       RuleGroups::BASE,
        leader_only: true,
        matchers:    &[Matcher::prefix(C, "droid.launcher3")],
    },
    Rule {
        name:        "systemui",
        group:       RuleGroups::BASE,
        leader_only: true,
        matchers:    &[Matcher::prefix(C, "ndroid.systemui")],
    },
    Rule {
        name:        "cameraserver",
        group:       RuleGroups::BASE,
        leader_only: true,
        matchers:    &[Matcher::prefix(C, "cameraserver")],
    },
    Rule {
        name:        "miui-home",
        group:       RuleGroups::MIUI,
        leader_only: true,
        matchers:    &[Matcher::prefix(C, "com.miui.home")],
    },
    Rule {
        name:        "globallauncher",
        group:       RuleGroups::MIUI,
        leader_only: true,
        matchers:    &[Matcher::prefix(C, ".globallauncher")],
    },
    Rule {
        name:        "personalassistant",
        group:       RuleGroups::MIUI,
        leader_only: true,
        matchers:    &[Matcher::prefix(C, "rsonalassistant")],
    },
];

// Литерал длиннее comm не совпал бы никогда.
// A literal longer than a comm could never match.
const _: () = {
    let mut i = 0;
    while i < RULES.len() {
        let matchers = RULES[i].matchers;
        let mut j = 0;
        while j < matchers.len() {
            assert!(matchers[j].literal.len() < TASK_COMM_LEN, "rule literal longer than a task comm");
            j += 1;
        }
        i += 1;
    }
};

/// Активное подмножество таблицы, зафиксированное при init.
/// Active subset of the table, fixed at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    enabled: RuleGroups,
}

impl RuleSet {
    pub const fn new(variant: Variant) -> Self {
        Self { enabled: variant.rule_groups() }
    }

    pub fn enabled(&self) -> RuleGroups { self.enabled }

    pub fn iter(&self) -> impl Iterator<Item = &'static Rule> + '_ {
        RULES.iter().filter(move |rule| self.enabled.contains(rule.group))
    }

    pub fn first_match(&self, subject: &Subject<'_>) -> Option<&'static Rule> {
        self.iter().find(|rule| rule.matches(subject))
    }
}
