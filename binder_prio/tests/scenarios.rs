use std::sync::Arc;
use std::thread;

use binder_prio::sim::{SimRegistry, SimScheduler};
use binder_prio::{BinderPrio, Module, Params, Scheduler, Variant, BOOST_PRIORITY};
use libbinder::sched::DEFAULT_PRIO;
use libbinder::{
    BinderNode, BinderPriority, BinderProc, BinderThread, Error, Result, SchedPolicy, TaskInfo,
    Transaction, TransactionFlags,
};

fn policy(variant: Variant) -> BinderPrio {
    BinderPrio::new(variant, Params::new())
}

fn verdict(policy: &BinderPrio, sender: &TaskInfo, target: &str, flags: TransactionFlags) -> bool {
    let receiver = TaskInfo::leader(1000, target, SchedPolicy::Fifo);
    let thread = BinderThread::new(sender);
    let proc = BinderProc::new(&receiver);
    policy.qualifies_for_boost(&Transaction::new(&thread, &proc).with_flags(flags))
}

#[test]
fn launcher_main_thread_is_boosted() {
    let launcher = TaskInfo::leader(2000, "droid.launcher3", SchedPolicy::Fifo);
    assert!(verdict(&policy(Variant::Aosp), &launcher, "surfaceflinger", TransactionFlags::empty()));
}

#[test]
fn shell_thread_ignores_its_process() {
    let shell = TaskInfo::thread(2101, 2100, "wmshell.main-1", "some.other.app", SchedPolicy::Fifo);
    assert!(verdict(&policy(Variant::Aosp), &shell, "surfaceflinger", TransactionFlags::empty()));
}

#[test]
fn one_way_launcher_call_is_not_boosted() {
    let launcher = TaskInfo::leader(2000, "droid.launcher3", SchedPolicy::Fifo);
    assert!(!verdict(&policy(Variant::Aosp), &launcher, "surfaceflinger", TransactionFlags::ONE_WAY));
}

#[test]
fn miui_home_depends_on_variant() {
    let home = TaskInfo::leader(2200, "com.miui.home", SchedPolicy::Fifo);
    assert!(!verdict(&policy(Variant::Aosp), &home, "surfaceflinger", TransactionFlags::empty()));
    assert!(verdict(&policy(Variant::Miui), &home, "surfaceflinger", TransactionFlags::empty()));
}

#[test]
fn demotion_guard() {
    let policy = policy(Variant::Aosp);
    let sched = SimScheduler::new();

    let mut skip = false;
    policy.on_priority_skip(&sched, Some(&TaskInfo::leader(1, "surfaceflinger", SchedPolicy::Fifo)), &mut skip);
    assert!(skip);

    let mut skip = false;
    policy.on_priority_skip(&sched, Some(&TaskInfo::leader(2, "com.example", SchedPolicy::Normal)), &mut skip);
    assert!(!skip);
}

#[test]
fn prefix_boundary_is_exact() {
    let policy = policy(Variant::Aosp);
    let exact = TaskInfo::leader(1, "ndroid.systemui", SchedPolicy::Fifo);
    let short = TaskInfo::leader(2, "ndroid.systemu", SchedPolicy::Fifo);
    assert!(verdict(&policy, &exact, "surfaceflinger", TransactionFlags::empty()));
    assert!(!verdict(&policy, &short, "surfaceflinger", TransactionFlags::empty()));
}

#[test]
fn set_priority_is_idempotent() {
    let policy = policy(Variant::Aosp);
    let sched = SimScheduler::new();
    let launcher = TaskInfo::leader(10, "droid.launcher3", SchedPolicy::Fifo);
    let sf = TaskInfo::leader(20, "surfaceflinger", SchedPolicy::Fifo);
    let binder = TaskInfo::thread(21, 20, "binder:20_2", "surfaceflinger", SchedPolicy::Normal);
    sched.add(&binder, BinderPriority::default());

    let thread = BinderThread::new(&launcher);
    let proc = BinderProc::new(&sf);
    let node = BinderNode::new(SchedPolicy::Normal, DEFAULT_PRIO);
    let t = Transaction::new(&thread, &proc).with_node(&node);

    policy.on_set_priority(&sched, &t, &binder);
    policy.on_set_priority(&sched, &t, &binder);

    assert_eq!(sched.call_count(), 1);
    assert_eq!(sched.current(&binder), BOOST_PRIORITY);
}

#[test]
fn full_lifecycle_against_sim_host() {
    let mut registry = SimRegistry::new();
    let paths = |_: &str| -> Result<()> { Ok(()) };
    let module = Module::init(&paths, &mut registry, Params::new());
    assert_eq!(module.variant(), Variant::Miui);

    let sched = SimScheduler::new();
    let render = TaskInfo::thread(3001, 3000, "RenderThread", "com.miui.home", SchedPolicy::Fifo);
    let sf = TaskInfo::leader(500, "surfaceflinger", SchedPolicy::Fifo);
    let binder = TaskInfo::thread(501, 500, "binder:500_3", "surfaceflinger", SchedPolicy::Normal);

    let home_proc = BinderProc::new(&render);
    let thread = BinderThread::new(&render).with_stack(TransactionFlags::empty());
    let mut sf_proc = BinderProc::new(&sf);

    module.policy().on_transaction(Some(&mut sf_proc), Some(&home_proc), Some(&thread), Some(&Default::default()));
    assert_eq!(sf_proc.default_priority, BOOST_PRIORITY);

    let t = Transaction::new(&thread, &sf_proc);
    module.policy().on_set_priority(&sched, &t, &binder);
    assert_eq!(sched.current(&binder), BOOST_PRIORITY);

    let mut skip = false;
    module.policy().on_priority_skip(&sched, Some(&binder), &mut skip);
    assert!(skip);

    module.exit(&mut registry);
    assert!(registry.registered().is_empty());
}

#[test]
fn aosp_lifecycle_leaves_miui_threads_alone() {
    let mut registry = SimRegistry::new();
    let paths = |_: &str| -> Result<()> { Err(Error::NotFound) };
    let module = Module::init(&paths, &mut registry, Params::new());

    let sched = SimScheduler::new();
    let render = TaskInfo::thread(3001, 3000, "RenderThread", "com.miui.home", SchedPolicy::Fifo);
    let sf = TaskInfo::leader(500, "surfaceflinger", SchedPolicy::Fifo);
    let binder = TaskInfo::thread(501, 500, "binder:500_3", "surfaceflinger", SchedPolicy::Normal);

    let thread = BinderThread::new(&render);
    let sf_proc = BinderProc::new(&sf);
    let node = BinderNode::new(SchedPolicy::Normal, DEFAULT_PRIO);
    module.policy().on_set_priority(&sched, &Transaction::new(&thread, &sf_proc).with_node(&node), &binder);

    assert_eq!(sched.call_count(), 0);
    module.exit(&mut registry);
}

#[test]
fn concurrent_invocations_share_one_policy() {
    let policy = Arc::new(policy(Variant::Miui));
    let sched = Arc::new(SimScheduler::new());

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let policy = Arc::clone(&policy);
            let sched = Arc::clone(&sched);
            thread::spawn(move || {
                let pid = 100 + i * 10;
                let sender = TaskInfo::leader(pid, "rsonalassistant", SchedPolicy::Fifo);
                let sf = TaskInfo::leader(pid + 1, "surfaceflinger", SchedPolicy::Fifo);
                let binder = TaskInfo::thread(pid + 2, pid + 1, "binder", "surfaceflinger", SchedPolicy::Normal);
                sched.add(&binder, BinderPriority::default());

                let thread = BinderThread::new(&sender);
                let proc = BinderProc::new(&sf);
                let t = Transaction::new(&thread, &proc);
                for _ in 0..100 {
                    assert!(policy.qualifies_for_boost(&t));
                    policy.on_set_priority(&*sched, &t, &binder);
                }
                sched.current(&binder)
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), BOOST_PRIORITY);
    }
    assert_eq!(sched.call_count(), 8);
}
