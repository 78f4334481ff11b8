//! Swipeable cell widget
//!
//! A list row whose content slides toward the leading edge to reveal an
//! action panel behind it. The cell provides:
//! - Offset tracking with resistance once the panel is fully revealed
//! - Release resolution to fully open or fully closed, by position or fling
//! - Fixed-duration settle transitions driven by the animation scheduler
//! - FSM-driven [`CellState`] with change notifications
//!
//! The host feeds [`GestureSample`]s into [`SwipeableCell::handle_gesture`] and
//! calls [`SwipeableCell::tick`] once per frame after ticking the scheduler.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::new_key_type;
use swipekit_animation::{AnimationScheduler, SpringId};
use swipekit_core::fsm::{EventId, StateMachine, StateTransitions, Transition};
use swipekit_core::gesture::{self, GesturePhase, GestureSample};

use crate::config::SwipeConfig;
use crate::host::CellHost;
use crate::observer::{ObserverId, Observers, SwipeDelegate};
use crate::offset;
use crate::panel::{self, Emphasis, PanelView};
use crate::settle::SettlePolicy;
use crate::state::{cell_events, CellState};

new_key_type! {
    pub struct CellId;
}

/// An in-flight settle transition
#[derive(Debug, Clone, Copy)]
struct Settle {
    from: f32,
    target: f32,
    elapsed: f32,
    duration: f32,
    /// Spring driving the transition; `None` for eased curves
    spring: Option<SpringId>,
}

/// Swipe-to-reveal list cell
pub struct SwipeableCell<H: CellHost, P: PanelView> {
    id: CellId,
    host: H,
    panel: Option<P>,
    panel_attached: bool,
    fsm: StateMachine<CellState>,
    offset: f32,
    settle: Option<Settle>,
    observers: Observers,
    /// Weak reference to the animation scheduler for settle springs
    scheduler: Weak<RefCell<AnimationScheduler>>,
    config: SwipeConfig,
}

impl<H: CellHost, P: PanelView> SwipeableCell<H, P> {
    /// Create a closed cell with no panel
    pub fn new(id: CellId, host: H, config: SwipeConfig) -> Self {
        Self {
            id,
            host,
            panel: None,
            panel_attached: false,
            fsm: StateMachine::default(),
            offset: 0.0,
            settle: None,
            observers: Observers::new(),
            scheduler: Weak::new(),
            config,
        }
    }

    /// Builder: set the panel revealed by swiping
    pub fn with_panel(mut self, panel: P) -> Self {
        self.panel = Some(panel);
        self
    }

    /// Builder: drive settle transitions from `scheduler`
    pub fn with_scheduler(mut self, scheduler: &Rc<RefCell<AnimationScheduler>>) -> Self {
        self.scheduler = Rc::downgrade(scheduler);
        self
    }

    /// Set the animation scheduler
    pub fn set_scheduler(&mut self, scheduler: &Rc<RefCell<AnimationScheduler>>) {
        self.scheduler = Rc::downgrade(scheduler);
    }

    /// Replace the panel, returning the old one.
    ///
    /// The cell is put back at rest first: any settle is dropped, the content
    /// returns to offset 0 and the state becomes Closed. Hosts call this when
    /// a row is reused for different content.
    pub fn set_panel(&mut self, panel: Option<P>) -> Option<P> {
        self.cancel_settle();
        if self.offset != 0.0 {
            self.offset = 0.0;
            self.host.set_offset(0.0);
        }
        self.transition(cell_events::SETTLED_CLOSED);
        std::mem::replace(&mut self.panel, panel)
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// Current reveal state
    pub fn state(&self) -> CellState {
        self.fsm.current_state()
    }

    /// Current content offset (never positive)
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn panel(&self) -> Option<&P> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut P> {
        self.panel.as_mut()
    }

    /// Whether the panel is currently in the host's hierarchy
    pub fn is_panel_attached(&self) -> bool {
        self.panel_attached
    }

    /// Whether a settle transition is running
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Recent state transitions, oldest first
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<CellState>> {
        self.fsm.history()
    }

    /// Register a state change callback
    pub fn on_state_change<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(CellId, CellState) + 'static,
    {
        self.observers.add(callback)
    }

    /// Register a delegate without keeping it alive
    pub fn observe_weak<T>(&mut self, delegate: &Rc<RefCell<T>>) -> ObserverId
    where
        T: SwipeDelegate + 'static,
    {
        self.observers.add_weak(delegate)
    }

    /// Unregister a state change callback
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Whether this cell should claim a drag that has moved `(dx, dy)`.
    /// Vertical-dominant drags belong to the host's scroller.
    pub fn should_begin(&self, dx: f32, dy: f32) -> bool {
        gesture::should_begin(dx, dy)
    }

    /// Handle one gesture sample
    pub fn handle_gesture(&mut self, sample: GestureSample) {
        match sample.phase {
            GesturePhase::Begin => self.on_begin(),
            GesturePhase::Change => self.on_change(sample.translation),
            GesturePhase::End | GesturePhase::Cancel => {
                self.on_release(sample.translation, sample.velocity)
            }
        }
    }

    /// Animate back to offset 0, whatever the current state
    pub fn close(&mut self) {
        if self.panel.is_none() {
            tracing::warn!(cell = ?self.id, "close requested without a panel");
            return;
        }
        self.start_settle(0.0);
    }

    /// Advance a running settle transition by `dt` seconds.
    ///
    /// Returns true while the transition is still running.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(mut settle) = self.settle.take() else {
            return false;
        };
        settle.elapsed += dt;
        let expired = settle.elapsed >= settle.duration;

        let frame = match settle.spring {
            Some(spring_id) => self.read_spring(spring_id),
            None => self
                .config
                .curve
                .eased_value(settle.from, settle.target, settle.elapsed / settle.duration)
                .map(|value| (value, false)),
        };

        match frame {
            Some((value, settled)) if !expired && !settled => {
                // Underdamped springs and overshooting curves pass the closed edge
                self.apply_frame(value.min(0.0));
                self.settle = Some(settle);
                true
            }
            _ => {
                self.finish_settle(settle);
                false
            }
        }
    }

    fn on_begin(&mut self) {
        // A new drag takes over from a running settle where it stands
        if self.settle.is_some() {
            tracing::debug!(cell = ?self.id, offset = self.offset, "settle interrupted by drag");
            self.cancel_settle();
        }

        if self.fsm.is_in(CellState::Closed) && self.panel.is_some() {
            self.attach_panel();
        }
    }

    fn on_change(&mut self, delta: f32) {
        if !self.panel_attached {
            return;
        }
        let width = self.panel_width();
        let next = offset::apply(self.offset, delta, width, self.config.resistance);
        tracing::trace!(cell = ?self.id, delta, offset = next, "drag");
        self.apply_frame(next);
    }

    fn on_release(&mut self, delta: f32, velocity: f32) {
        if !self.panel_attached {
            return;
        }
        let width = self.panel_width();
        let candidate = (self.offset + delta).min(0.0);
        let policy = SettlePolicy {
            velocity_scale: self.config.velocity_scale,
            open_threshold: self.config.open_threshold,
        };
        let target = policy.resolve(candidate, width, velocity);
        tracing::trace!(cell = ?self.id, candidate, velocity, target, "release");
        self.start_settle(target);
    }

    fn start_settle(&mut self, target: f32) {
        self.cancel_settle();

        let from = self.offset;
        let duration = self.config.settle_duration();
        let mut settle = Settle {
            from,
            target,
            elapsed: 0.0,
            duration,
            spring: None,
        };

        let Some(scheduler) = self.scheduler.upgrade() else {
            // No scheduler - snap to the target immediately
            self.finish_settle(settle);
            return;
        };

        if let Some(spring) = self.config.curve.spring(from, target, duration) {
            let Ok(mut scheduler) = scheduler.try_borrow_mut() else {
                tracing::warn!(cell = ?self.id, "scheduler busy, snapping settle");
                self.finish_settle(settle);
                return;
            };
            settle.spring = Some(scheduler.add_spring(spring));
        }

        tracing::debug!(cell = ?self.id, from, target, duration, "settle started");
        self.settle = Some(settle);
    }

    /// Current spring value and whether it has come to rest. `None` once
    /// the spring or the scheduler is gone.
    fn read_spring(&self, spring_id: SpringId) -> Option<(f32, bool)> {
        let scheduler = self.scheduler.upgrade()?;
        let scheduler = scheduler.try_borrow().ok()?;
        let spring = scheduler.get_spring(spring_id)?;
        Some((spring.value(), spring.is_settled()))
    }

    fn cancel_settle(&mut self) {
        let Some(settle) = self.settle.take() else {
            return;
        };
        self.release_spring(settle);
    }

    fn release_spring(&self, settle: Settle) {
        let Some(spring_id) = settle.spring else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            if let Ok(mut scheduler) = scheduler.try_borrow_mut() {
                scheduler.remove_spring(spring_id);
            }
        }
    }

    fn finish_settle(&mut self, settle: Settle) {
        self.release_spring(settle);
        self.apply_frame(settle.target.min(0.0));
        tracing::debug!(cell = ?self.id, target = settle.target, "settle finished");
        self.transition(CellState::settle_event(settle.target));
    }

    /// Move the content to `offset`, entering Moving if it actually moved
    fn apply_frame(&mut self, offset: f32) {
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        self.host.set_offset(offset);
        self.transition(cell_events::OFFSET_CHANGED);
        self.update_emphasis();
    }

    fn update_emphasis(&mut self) {
        let offset = self.offset;
        let floor = self.config.emphasis_floor;
        if let Some(panel) = self.panel.as_mut() {
            let width = panel.geometry().width;
            panel.set_emphasis(Emphasis::uniform(panel::emphasis(offset, width, floor)));
        }
    }

    fn panel_width(&self) -> f32 {
        self.panel
            .as_ref()
            .map(|panel| panel.geometry().width)
            .unwrap_or(0.0)
    }

    fn attach_panel(&mut self) {
        tracing::debug!(cell = ?self.id, "panel attached");
        self.host.attach_panel();
        self.panel_attached = true;
    }

    fn detach_panel(&mut self) {
        if !self.panel_attached {
            return;
        }
        tracing::debug!(cell = ?self.id, "panel detached");
        self.host.detach_panel();
        self.panel_attached = false;
    }

    /// The single state setter.
    ///
    /// Entering Closed detaches the panel, even when the state was already
    /// Closed. Observers run after the new value is in place and only when
    /// the value changed.
    fn transition(&mut self, event: EventId) {
        if self.fsm.current_state().on_event(event) == Some(CellState::Closed) {
            self.detach_panel();
        }
        if let Some(change) = self.fsm.send(event) {
            tracing::debug!(cell = ?self.id, from = ?change.from, to = ?change.to, "cell state");
            self.observers.notify(self.id, change.to);
        }
    }
}

impl<H: CellHost, P: PanelView> Drop for SwipeableCell<H, P> {
    fn drop(&mut self) {
        // Springs live in the shared scheduler; don't leak ours
        self.cancel_settle();
    }
}

impl<H: CellHost + std::fmt::Debug, P: PanelView> std::fmt::Debug for SwipeableCell<H, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeableCell")
            .field("id", &self.id)
            .field("host", &self.host)
            .field("state", &self.state())
            .field("offset", &self.offset)
            .field("panel_attached", &self.panel_attached)
            .field("settling", &self.settle.is_some())
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelGeometry;
    use swipekit_animation::{Easing, SettleCurve};

    #[derive(Debug, Default)]
    struct TestHost {
        attached: bool,
        attach_calls: usize,
        detach_calls: usize,
        offsets: Vec<f32>,
    }

    impl CellHost for TestHost {
        fn attach_panel(&mut self) {
            self.attached = true;
            self.attach_calls += 1;
        }

        fn detach_panel(&mut self) {
            self.attached = false;
            self.detach_calls += 1;
        }

        fn set_offset(&mut self, offset: f32) {
            self.offsets.push(offset);
        }
    }

    struct TestPanel {
        width: f32,
        emphasis: Option<Emphasis>,
    }

    impl PanelView for TestPanel {
        fn geometry(&self) -> PanelGeometry {
            PanelGeometry::new(self.width, 44.0)
        }

        fn set_emphasis(&mut self, emphasis: Emphasis) {
            self.emphasis = Some(emphasis);
        }
    }

    fn cell(width: f32) -> SwipeableCell<TestHost, TestPanel> {
        SwipeableCell::new(CellId::default(), TestHost::default(), SwipeConfig::default())
            .with_panel(TestPanel {
                width,
                emphasis: None,
            })
    }

    #[test]
    fn test_begin_attaches_panel_when_closed() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::begin());
        assert!(cell.is_panel_attached());
        assert!(cell.host().attached);
        assert_eq!(cell.state(), CellState::Closed);
    }

    #[test]
    fn test_change_moves_and_emphasizes() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::begin());
        cell.handle_gesture(GestureSample::change(-40.0));

        assert_eq!(cell.offset(), -40.0);
        assert_eq!(cell.state(), CellState::Moving);
        assert_eq!(cell.host().offsets, vec![-40.0]);
        let emphasis = cell.panel().and_then(|p| p.emphasis).map(|e| e.scale);
        assert!((emphasis.unwrap_or_default() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_change_that_does_not_move_is_ignored() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::begin());
        // Dragging toward the closed side from rest clamps to zero
        cell.handle_gesture(GestureSample::change(25.0));
        assert_eq!(cell.state(), CellState::Closed);
        assert!(cell.host().offsets.is_empty());
        assert!(cell.panel().and_then(|p| p.emphasis).is_none());
    }

    #[test]
    fn test_samples_without_begin_are_ignored() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::change(-40.0));
        cell.handle_gesture(GestureSample::end(-10.0, -500.0));
        assert_eq!(cell.offset(), 0.0);
        assert_eq!(cell.state(), CellState::Closed);
        assert!(!cell.is_settling());
    }

    #[test]
    fn test_release_without_scheduler_snaps() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::begin());
        cell.handle_gesture(GestureSample::change(-50.0));
        cell.handle_gesture(GestureSample::end(0.0, 0.0));

        assert!(!cell.is_settling());
        assert_eq!(cell.offset(), -80.0);
        assert_eq!(cell.state(), CellState::Open);
        assert!(cell.is_panel_attached());
    }

    #[test]
    fn test_release_below_threshold_closes_and_detaches() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::begin());
        cell.handle_gesture(GestureSample::change(-10.0));
        cell.handle_gesture(GestureSample::cancel());

        assert_eq!(cell.offset(), 0.0);
        assert_eq!(cell.state(), CellState::Closed);
        assert!(!cell.is_panel_attached());
        assert_eq!(cell.host().detach_calls, 1);
    }

    #[test]
    fn test_settle_runs_on_scheduler() {
        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        let mut cell = cell(80.0).with_scheduler(&scheduler);

        cell.handle_gesture(GestureSample::begin());
        cell.handle_gesture(GestureSample::change(-50.0));
        cell.handle_gesture(GestureSample::end(0.0, 0.0));
        assert!(cell.is_settling());
        assert_eq!(scheduler.borrow().spring_count(), 1);

        let mut frames = 0;
        loop {
            scheduler.borrow_mut().tick_by(0.016);
            frames += 1;
            if !cell.tick(0.016) {
                break;
            }
            assert_eq!(cell.state(), CellState::Moving);
        }

        // 300ms at 16ms per frame
        assert!(frames <= 19, "took {frames} frames");
        assert_eq!(cell.offset(), -80.0);
        assert_eq!(cell.state(), CellState::Open);
        assert_eq!(scheduler.borrow().spring_count(), 0);
    }

    #[test]
    fn test_close_without_panel_is_ignored() {
        let mut cell: SwipeableCell<TestHost, TestPanel> =
            SwipeableCell::new(CellId::default(), TestHost::default(), SwipeConfig::default());
        cell.close();
        assert!(!cell.is_settling());
        assert!(cell.host().offsets.is_empty());
    }

    #[test]
    fn test_set_panel_resets_cell() {
        let mut cell = cell(80.0);
        cell.handle_gesture(GestureSample::begin());
        cell.handle_gesture(GestureSample::change(-60.0));

        let old = cell.set_panel(Some(TestPanel {
            width: 120.0,
            emphasis: None,
        }));
        assert_eq!(old.map(|p| p.width), Some(80.0));
        assert_eq!(cell.offset(), 0.0);
        assert_eq!(cell.state(), CellState::Closed);
        assert!(!cell.host().attached);
    }

    #[test]
    fn test_drop_releases_spring() {
        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        {
            let mut cell = cell(80.0).with_scheduler(&scheduler);
            cell.handle_gesture(GestureSample::begin());
            cell.handle_gesture(GestureSample::change(-50.0));
            cell.handle_gesture(GestureSample::end(0.0, 0.0));
            assert_eq!(scheduler.borrow().spring_count(), 1);
        }
        assert_eq!(scheduler.borrow().spring_count(), 0);
    }

    /// Open a 90px cell without a scheduler, then close it on `curve`
    fn close_on_curve(curve: SettleCurve) -> SwipeableCell<TestHost, TestPanel> {
        let config = SwipeConfig {
            curve,
            ..SwipeConfig::default()
        };
        config.validate().unwrap();
        let mut cell = SwipeableCell::new(CellId::default(), TestHost::default(), config)
            .with_panel(TestPanel {
                width: 90.0,
                emphasis: None,
            });
        cell.handle_gesture(GestureSample::begin());
        cell.handle_gesture(GestureSample::change(-60.0));
        cell.handle_gesture(GestureSample::end(0.0, 0.0));
        assert_eq!(cell.offset(), -90.0);

        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        cell.set_scheduler(&scheduler);
        cell.close();
        for _ in 0..100 {
            scheduler.borrow_mut().tick_by(0.016);
            let running = cell.tick(0.016);
            assert!(cell.offset() <= 0.0, "offset {}", cell.offset());
            if !running {
                break;
            }
        }
        cell
    }

    #[test]
    fn test_underdamped_close_stays_at_closed_edge() {
        let cell = close_on_curve(SettleCurve::Spring {
            damping_ratio: 0.3,
            initial_velocity: 3.0,
        });
        assert!(cell.host().offsets.iter().all(|&o| o <= 0.0));
        // The clamp held the content at the edge while the spring overshot
        assert!(cell.host().offsets.contains(&0.0));
        assert_eq!(cell.state(), CellState::Closed);
        assert_eq!(cell.offset(), 0.0);
    }

    #[test]
    fn test_overshooting_curve_close_stays_at_closed_edge() {
        let cell = close_on_curve(SettleCurve::Eased {
            easing: Easing::CubicBezier(0.3, 0.0, 0.5, 1.6),
        });
        assert!(cell.host().offsets.iter().all(|&o| o <= 0.0));
        assert_eq!(cell.state(), CellState::Closed);
        assert_eq!(cell.offset(), 0.0);
    }
}
