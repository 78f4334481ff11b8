//! Scenario runner that drives a swipeable cell headlessly.
//!
//! Pointer steps are fed through a [`DragTracker`] exactly as live input
//! would be, and time advances in fixed frames that tick the animation
//! scheduler before the cell.

use crate::headless_host::HeadlessHost;
use crate::headless_report::{HeadlessReport, TransitionRecord};
use crate::headless_runtime::{HeadlessFrame, HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use anyhow::{bail, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipekit_animation::AnimationScheduler;
use swipekit_core::events::{event_types, Event, EventType};
use swipekit_core::DragTracker;
use swipekit_widgets::{ActionPanel, CellId, SwipeConfig, SwipeableCell};

/// Where a `begin` step puts the pointer down, in row coordinates
const TOUCH_ORIGIN: (f32, f32) = (300.0, 22.0);

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Logical time of the run
#[derive(Debug, Clone, Copy, Default)]
struct Clock {
    frames: u64,
    ms: u64,
}

/// A failed assertion
struct Failure {
    assertion: &'static str,
    message: String,
}

/// Execute scenario JSON with default timing and the scenario's own config.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, HeadlessRunConfig::default(), None)
}

/// Execute a pre-loaded scenario.
///
/// `config_override` replaces the scenario's own `config` when given.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
    config_override: Option<SwipeConfig>,
) -> Result<RunOutcome> {
    let mut runner = ScenarioRunner::new(scenario, runtime_cfg, config_override)?;
    runner.run(&scenario.steps)
}

/// A swipeable cell wired to a headless host, scheduler and drag tracker.
pub struct ScenarioRunner {
    cell: SwipeableCell<HeadlessHost, ActionPanel>,
    scheduler: Rc<RefCell<AnimationScheduler>>,
    tracker: DragTracker,
    pointer: (f32, f32),
    clock: Rc<Cell<Clock>>,
    transitions: Rc<RefCell<Vec<TransitionRecord>>>,
    runtime_cfg: HeadlessRunConfig,
}

impl ScenarioRunner {
    pub fn new(
        scenario: &HeadlessScenario,
        runtime_cfg: HeadlessRunConfig,
        config_override: Option<SwipeConfig>,
    ) -> Result<Self> {
        if runtime_cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        let config = config_override.or(scenario.config).unwrap_or_default();
        config.validate()?;

        let scheduler = Rc::new(RefCell::new(AnimationScheduler::new()));
        let mut cell = SwipeableCell::new(CellId::default(), HeadlessHost::default(), config)
            .with_panel(scenario.panel.build())
            .with_scheduler(&scheduler);

        let clock = Rc::new(Cell::new(Clock::default()));
        let transitions = Rc::new(RefCell::new(Vec::new()));
        {
            let clock = Rc::clone(&clock);
            let transitions = Rc::clone(&transitions);
            cell.on_state_change(move |_, state| {
                let now = clock.get();
                transitions.borrow_mut().push(TransitionRecord {
                    frame: now.frames,
                    elapsed_ms: now.ms,
                    state,
                });
            });
        }

        Ok(Self {
            cell,
            scheduler,
            tracker: DragTracker::new(config.drag),
            pointer: TOUCH_ORIGIN,
            clock,
            transitions,
            runtime_cfg,
        })
    }

    pub fn cell(&self) -> &SwipeableCell<HeadlessHost, ActionPanel> {
        &self.cell
    }

    /// Run `steps` in order, stopping at the first failed assertion.
    pub fn run(&mut self, steps: &[ScenarioStep]) -> Result<RunOutcome> {
        for (step_index, step) in steps.iter().enumerate() {
            tracing::debug!(step_index, ?step, "scenario step");
            if let Some(failure) = self.step(step)? {
                let clock = self.clock.get();
                let report = HeadlessReport::failed(
                    failure.assertion,
                    step_index,
                    failure.message,
                    clock.frames,
                    clock.ms,
                );
                return Ok(RunOutcome::Failed {
                    report: self.finish(report),
                });
            }
        }

        let clock = self.clock.get();
        let report = HeadlessReport::passed(clock.frames, clock.ms);
        Ok(RunOutcome::Passed {
            report: self.finish(report),
        })
    }

    fn finish(&self, report: HeadlessReport) -> HeadlessReport {
        report.with_cell(
            self.cell.state(),
            self.cell.offset(),
            self.transitions.borrow().clone(),
        )
    }

    fn step(&mut self, step: &ScenarioStep) -> Result<Option<Failure>> {
        match *step {
            ScenarioStep::Begin => {
                self.pointer = TOUCH_ORIGIN;
                self.send_pointer(event_types::POINTER_DOWN);
            }
            ScenarioStep::Drag { dx, dy, dt_ms } => {
                self.advance_ms(dt_ms)?;
                self.pointer.0 += dx;
                self.pointer.1 += dy;
                self.send_pointer(event_types::POINTER_MOVE);
            }
            ScenarioStep::Release => self.send_pointer(event_types::POINTER_UP),
            ScenarioStep::Cancel => self.send_pointer(event_types::POINTER_CANCEL),
            ScenarioStep::Close => self.cell.close(),
            ScenarioStep::Wait { ms } => self.advance_ms(ms)?,
            ScenarioStep::Tick { frames } => self.tick_frames(frames)?,
            ScenarioStep::AssertState { state } => {
                let actual = self.cell.state();
                if actual != state {
                    return Ok(Some(Failure {
                        assertion: "assert_state",
                        message: format!("expected state {state:?}, got {actual:?}"),
                    }));
                }
            }
            ScenarioStep::AssertOffset { value, tolerance } => {
                let actual = self.cell.offset();
                if (actual - value).abs() > tolerance {
                    return Ok(Some(Failure {
                        assertion: "assert_offset",
                        message: format!("expected offset {value} ± {tolerance}, got {actual}"),
                    }));
                }
            }
        }
        Ok(None)
    }

    fn send_pointer(&mut self, event_type: EventType) {
        let (x, y) = self.pointer;
        let mut event = Event::pointer(event_type, x, y, self.clock.get().ms);
        for sample in self.tracker.handle_event(&mut event) {
            self.cell.handle_gesture(sample);
        }
    }

    /// Advance by `ms`; the last frame may be short
    fn advance_ms(&mut self, ms: u64) -> Result<()> {
        let (clock, scheduler, cell) = (&self.clock, &self.scheduler, &mut self.cell);
        HeadlessRuntime::run_for(self.runtime_cfg, ms, |frame| {
            step_frame(frame, clock, scheduler, cell)
        })
    }

    fn tick_frames(&mut self, frames: u32) -> Result<()> {
        let (clock, scheduler, cell) = (&self.clock, &self.scheduler, &mut self.cell);
        HeadlessRuntime::run(self.runtime_cfg, frames, |frame| {
            step_frame(frame, clock, scheduler, cell)
        })
    }
}

/// Advance the clock, then the scheduler, then the cell
fn step_frame(
    frame: HeadlessFrame,
    clock: &Cell<Clock>,
    scheduler: &RefCell<AnimationScheduler>,
    cell: &mut SwipeableCell<HeadlessHost, ActionPanel>,
) {
    let now = clock.get();
    clock.set(Clock {
        frames: now.frames.saturating_add(1),
        ms: now.ms.saturating_add(frame.dt_ms),
    });

    let dt = frame.dt_seconds();
    scheduler.borrow_mut().tick_by(dt);
    cell.tick(dt);
}
