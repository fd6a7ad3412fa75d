use super::*;

fn registry() -> Arc<LocalRegistry> {
    Arc::new(LocalRegistry::new())
}

#[test]
fn acquire_registers_move_and_up() {
    let reg = registry();
    let guard = ListenerGuard::acquire(reg.clone());
    assert_eq!(guard.ids().len(), 2);
    assert!(reg.is_listening(GlobalEvent::MouseMove));
    assert!(reg.is_listening(GlobalEvent::MouseUp));
    assert_eq!(reg.live_count(), 2);
}

#[test]
fn drop_deregisters_everything() {
    let reg = registry();
    {
        let _guard = ListenerGuard::acquire(reg.clone());
        assert_eq!(reg.live_count(), 2);
    }
    assert_eq!(reg.live_count(), 0);
    assert!(!reg.is_listening(GlobalEvent::MouseMove));
}

#[test]
fn repeated_acquire_release_does_not_leak() {
    let reg = registry();
    for _ in 0..5 {
        let guard = ListenerGuard::acquire(reg.clone());
        drop(guard);
    }
    assert_eq!(reg.live_count(), 0);
}

#[test]
fn ids_are_distinct_across_guards() {
    let reg = registry();
    let a = ListenerGuard::acquire(reg.clone());
    let b = ListenerGuard::acquire(reg.clone());
    for id in a.ids() {
        assert!(!b.ids().contains(id));
    }
    assert_eq!(reg.live_count(), 4);
    drop(a);
    assert_eq!(reg.live_count(), 2);
}

#[test]
fn removing_unknown_id_is_ignored() {
    let reg = registry();
    reg.remove_listener(ListenerId(42));
    assert_eq!(reg.live_count(), 0);
}
