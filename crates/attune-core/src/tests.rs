#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::COMPOSER;
    use crate::effects::*;
    use crate::error::ErrorBoundary;
    use crate::locals::*;
    use crate::runtime::*;
    use crate::scope::*;
    use crate::value::*;
    use crate::view::{View, ViewKind};

    #[test]
    fn value_basic() {
        let v = value(42);
        assert_eq!(v.get(), 42);

        v.set(100);
        assert_eq!(v.get(), 100);

        v.update(|n| *n += 1);
        assert_eq!(v.get(), 101);

        v.with(|n| assert_eq!(*n, 101));
    }

    #[test]
    fn listener_fires_synchronously() {
        let v = value(0);
        let fired = Rc::new(Cell::new(0u32));

        let fired2 = fired.clone();
        v.listen(move || fired2.set(fired2.get() + 1));

        v.set(1);
        assert_eq!(fired.get(), 1);
        v.update(|n| *n += 1);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn unlisten_is_idempotent() {
        let v = value(0);
        let fired = Rc::new(Cell::new(0u32));

        let fired2 = fired.clone();
        let key = v.listen(move || fired2.set(fired2.get() + 1));
        assert_eq!(v.listener_count(), 1);

        v.set(1);
        assert_eq!(fired.get(), 1);

        v.unlisten(key);
        v.unlisten(key);
        assert_eq!(v.listener_count(), 0);

        v.set(2);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn listener_reads_current_value_during_notification() {
        let v = value(10);
        let seen = Rc::new(Cell::new(0));

        let weak = v.downgrade();
        let seen2 = seen.clone();
        v.listen(move || {
            if let Some(v) = weak.upgrade() {
                seen2.set(v.get());
            }
        });

        v.set(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn listener_registered_during_notification_waits_a_round() {
        let v = value(0);
        let late_calls = Rc::new(Cell::new(0u32));

        let weak = v.downgrade();
        let registered = Rc::new(Cell::new(false));
        let late_calls2 = late_calls.clone();
        v.listen(move || {
            if !registered.get() {
                registered.set(true);
                if let Some(v) = weak.upgrade() {
                    let late_calls = late_calls2.clone();
                    v.listen(move || late_calls.set(late_calls.get() + 1));
                }
            }
        });

        v.set(1);
        assert_eq!(late_calls.get(), 0);
        v.set(2);
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn identity_is_not_value_equality() {
        let a = value(42);
        let b = value(42);
        assert_ne!(a.id(), b.id());
        assert!(!a.ptr_eq(&b));

        let a2 = a.clone();
        assert_eq!(a.id(), a2.id());
        assert!(a.ptr_eq(&a2));
    }

    #[test]
    fn weak_handle_does_not_keep_holder_alive() {
        let v = value(1);
        let weak = v.downgrade();
        assert!(weak.upgrade().is_some());
        drop(v);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn scope_disposal_runs_children_first() {
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let parent = Scope::new();
        let child = parent.child();

        let order2 = order.clone();
        child.add_disposer(move || order2.borrow_mut().push("child"));
        let order2 = order.clone();
        parent.add_disposer(move || order2.borrow_mut().push("parent"));

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn effect_runs_now_and_cleans_up_with_scope() {
        let ran = Rc::new(Cell::new(false));
        let cleaned = Rc::new(Cell::new(false));

        let scope = Scope::new();
        scope.run({
            let ran = ran.clone();
            let cleaned = cleaned.clone();
            move || {
                effect(move || {
                    ran.set(true);
                    on_unmount(move || cleaned.set(true))
                });
            }
        });

        assert!(ran.get());
        assert!(!cleaned.get());
        scope.dispose();
        assert!(cleaned.get());
    }

    #[test]
    fn keyed_slots_keep_first_value() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        let a = remember_with_key("k", || 42);
        let b = remember_with_key("k", || 100);
        assert_eq!(*a, 42);
        assert_eq!(*b, 42);

        let cell = remember_state_with_key("cell", || 3);
        *cell.borrow_mut() += 1;
        let again = remember_state_with_key("cell", || 0);
        assert_eq!(*again.borrow(), 4);
    }

    #[test]
    fn tick_recomposes_only_on_request() {
        let passes = Rc::new(Cell::new(0u32));
        let mut host = Scheduler::new();
        let mut build = {
            let passes = passes.clone();
            move || {
                side_effect(|| passes.set(passes.get() + 1));
                View::new(ViewKind::Group)
            }
        };

        host.mount(&mut build);
        assert_eq!(passes.get(), 1);

        assert!(host.tick(&mut build).is_none());
        assert_eq!(passes.get(), 1);

        request_rebuild();
        assert!(host.tick(&mut build).is_some());
        assert_eq!(passes.get(), 2);

        // the request was consumed
        assert!(host.tick(&mut build).is_none());
    }

    #[test]
    fn unmount_clears_slot_storage() {
        let mut host = Scheduler::new();

        let first = host.mount(|| {
            let n = remember(|| 5);
            View::new(ViewKind::Text {
                text: n.to_string(),
            })
        });
        assert_eq!(first.text_content(), "5");
        host.unmount();

        let second = host.mount(|| {
            let n = remember(|| 7);
            View::new(ViewKind::Text {
                text: n.to_string(),
            })
        });
        assert_eq!(second.text_content(), "7");
    }

    #[test]
    fn tick_without_mount_is_a_noop() {
        let mut host = Scheduler::new();
        request_rebuild();
        assert!(host.tick(|| View::new(ViewKind::Group)).is_none());
        assert!(!host.is_mounted());
    }

    #[test]
    fn disposable_effect_tracks_key_changes() {
        let events: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let key = Rc::new(Cell::new(1u64));
        let mut host = Scheduler::new();

        let mut build = {
            let events = events.clone();
            let key = key.clone();
            move || {
                let k = key.get();
                disposable_effect(k, {
                    let events = events.clone();
                    move || {
                        events.borrow_mut().push(format!("start {k}"));
                        let events = events.clone();
                        on_unmount(move || events.borrow_mut().push(format!("stop {k}")))
                    }
                });
                View::new(ViewKind::Group)
            }
        };

        host.mount(&mut build);
        assert_eq!(*events.borrow(), vec!["start 1"]);

        // same key: nothing to do
        request_rebuild();
        host.tick(&mut build);
        assert_eq!(*events.borrow(), vec!["start 1"]);

        key.set(2);
        request_rebuild();
        host.tick(&mut build);
        assert_eq!(*events.borrow(), vec!["start 1", "stop 1", "start 2"]);

        host.unmount();
        assert_eq!(
            *events.borrow(),
            vec!["start 1", "stop 1", "start 2", "stop 2"]
        );
    }

    #[test]
    fn locals_shadow_and_unwind() {
        #[derive(Clone, PartialEq, Debug)]
        struct Accent(&'static str);

        assert_eq!(local::<Accent>(), None);

        with_local(Accent("outer"), || {
            assert_eq!(local::<Accent>(), Some(Accent("outer")));
            with_local(Accent("inner"), || {
                assert_eq!(local::<Accent>(), Some(Accent("inner")));
            });
            assert_eq!(local::<Accent>(), Some(Accent("outer")));
        });
        assert_eq!(local::<Accent>(), None);

        let result = std::panic::catch_unwind(|| {
            with_local(Accent("doomed"), || panic!("boom"));
        });
        assert!(result.is_err());
        assert_eq!(local::<Accent>(), None);
    }

    #[test]
    fn local_or_default_falls_back() {
        #[derive(Clone, Default, PartialEq, Debug)]
        struct Indent(u32);

        assert_eq!(local_or_default::<Indent>(), Indent(0));
        with_local(Indent(4), || {
            assert_eq!(local_or_default::<Indent>(), Indent(4));
        });
    }

    #[test]
    fn boundary_disposes_scope_on_panic() {
        let cleaned = Rc::new(Cell::new(false));
        let trip = Rc::new(Cell::new(false));
        let mut host = Scheduler::new();

        let mut build = {
            let cleaned = cleaned.clone();
            let trip = trip.clone();
            move || {
                let cleaned = cleaned.clone();
                let trip = trip.clone();
                ErrorBoundary(
                    |info| {
                        View::new(ViewKind::Text {
                            text: info.message.clone(),
                        })
                    },
                    move || {
                        disposable_effect((), {
                            let cleaned = cleaned.clone();
                            move || on_unmount(move || cleaned.set(true))
                        });
                        if trip.get() {
                            panic!("kaboom");
                        }
                        View::new(ViewKind::Group)
                    },
                )
            }
        };

        host.mount(&mut build);
        assert!(!cleaned.get());

        trip.set(true);
        request_rebuild();
        let view = host.tick(&mut build).expect("boundary pass");
        assert_eq!(view.text_content(), "kaboom");
        assert!(cleaned.get());
    }
}
