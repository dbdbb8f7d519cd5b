use std::cell::{Cell, RefCell};
use std::rc::Weak;

use super::ViewDelegate;

/// Non-owning handle to the view's delegate.
///
/// Every relay upgrades the weak reference first; a dropped delegate turns the
/// call into a no-op. A delegate that is already borrowed (a re-entrant call
/// from inside one of its own callbacks) is skipped rather than panicking.
#[derive(Default)]
pub struct DelegateSlot {
    inner: Option<Weak<RefCell<dyn ViewDelegate>>>,
    reported_gone: Cell<bool>,
}

impl DelegateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, delegate: Weak<RefCell<dyn ViewDelegate>>) {
        self.inner = Some(delegate);
        self.reported_gone.set(false);
    }

    /// Returns `true` while a delegate is set and still alive.
    pub fn is_attached(&self) -> bool {
        self.inner.as_ref().is_some_and(|w| w.strong_count() > 0)
    }

    /// Runs `f` against the delegate, if one is attached and not borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn ViewDelegate) -> R) -> Option<R> {
        let weak = self.inner.as_ref()?;

        let Some(delegate) = weak.upgrade() else {
            if !self.reported_gone.replace(true) {
                log::info!("view delegate dropped; callbacks are no longer forwarded");
            }
            return None;
        };

        let Ok(mut guard) = delegate.try_borrow_mut() else {
            log::warn!("view delegate is already borrowed; skipping re-entrant callback");
            return None;
        };

        Some(f(&mut *guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::device::Drawable;
    use crate::time::FrameClock;
    use crate::view::RenderCtx;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<u64>,
    }

    impl ViewDelegate for Recorder {
        fn update_logic(&mut self, time: crate::time::FrameTime) {
            self.updates.push(time.frame_index);
        }

        fn render_objects(&mut self, _ctx: &RenderCtx<'_>, _drawable: &mut Drawable) {}
    }

    fn attach(slot: &mut DelegateSlot, delegate: &Rc<RefCell<Recorder>>) {
        let weak: Weak<RefCell<Recorder>> = Rc::downgrade(delegate);
        slot.set(weak);
    }

    #[test]
    fn empty_slot_forwards_nothing() {
        let slot = DelegateSlot::new();
        assert!(!slot.is_attached());
        assert_eq!(slot.with(|_| 1), None);
    }

    #[test]
    fn live_delegate_receives_each_update() {
        let delegate = Rc::new(RefCell::new(Recorder::default()));
        let mut slot = DelegateSlot::new();
        attach(&mut slot, &delegate);

        let mut clock = FrameClock::new();
        for _ in 0..3 {
            let time = clock.tick();
            assert!(slot.with(|d| d.update_logic(time)).is_some());
        }

        assert_eq!(delegate.borrow().updates, vec![0, 1, 2]);
    }

    #[test]
    fn slot_does_not_keep_delegate_alive() {
        let delegate = Rc::new(RefCell::new(Recorder::default()));
        let mut slot = DelegateSlot::new();
        attach(&mut slot, &delegate);
        assert!(slot.is_attached());

        drop(delegate);

        assert!(!slot.is_attached());
        assert_eq!(slot.with(|_| ()), None);
    }

    #[test]
    fn reentrant_borrow_is_skipped() {
        let delegate = Rc::new(RefCell::new(Recorder::default()));
        let mut slot = DelegateSlot::new();
        attach(&mut slot, &delegate);

        let _held = delegate.borrow_mut();
        assert_eq!(slot.with(|_| ()), None);
    }
}
