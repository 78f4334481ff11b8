//! Deterministic frame clock for headless runs.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self { tick_ms: 16 }
    }
}

/// One logical frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessFrame {
    /// Index within the current run call
    pub index: u32,
    /// Logical milliseconds covered by this frame
    pub dt_ms: u64,
}

impl HeadlessFrame {
    pub fn dt_seconds(&self) -> f32 {
        self.dt_ms as f32 / 1000.0
    }
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run `frames` full-length frames.
    pub fn run<F>(cfg: HeadlessRunConfig, frames: u32, mut on_frame: F) -> Result<()>
    where
        F: FnMut(HeadlessFrame),
    {
        check(cfg)?;
        for index in 0..frames {
            on_frame(HeadlessFrame {
                index,
                dt_ms: cfg.tick_ms,
            });
        }
        Ok(())
    }

    /// Cover `duration_ms` with frames; the last one is short when the
    /// duration is not a whole number of ticks.
    pub fn run_for<F>(cfg: HeadlessRunConfig, duration_ms: u64, mut on_frame: F) -> Result<()>
    where
        F: FnMut(HeadlessFrame),
    {
        check(cfg)?;
        let mut remaining = duration_ms;
        let mut index = 0;
        while remaining > 0 {
            let dt_ms = remaining.min(cfg.tick_ms);
            remaining -= dt_ms;
            on_frame(HeadlessFrame { index, dt_ms });
            index = index.saturating_add(1);
        }
        Ok(())
    }
}

fn check(cfg: HeadlessRunConfig) -> Result<()> {
    if cfg.tick_ms == 0 {
        bail!("headless tick_ms must be > 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_full_frames() {
        let mut seen = Vec::new();
        HeadlessRuntime::run(HeadlessRunConfig::default(), 3, |f| seen.push(f.dt_ms)).unwrap();
        assert_eq!(seen, vec![16, 16, 16]);
    }

    #[test]
    fn test_run_for_ends_with_short_frame() {
        let mut seen = Vec::new();
        HeadlessRuntime::run_for(HeadlessRunConfig::default(), 40, |f| seen.push((f.index, f.dt_ms)))
            .unwrap();
        assert_eq!(seen, vec![(0, 16), (1, 16), (2, 8)]);

        let mut count = 0;
        HeadlessRuntime::run_for(HeadlessRunConfig::default(), 0, |_| count += 1).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let cfg = HeadlessRunConfig { tick_ms: 0 };
        assert!(HeadlessRuntime::run(cfg, 1, |_| {}).is_err());
        assert!(HeadlessRuntime::run_for(cfg, 10, |_| {}).is_err());
    }
}
