use serde::{Deserialize, Serialize};

/// What a delay tick did to a [`TickedProgress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running; schedule another tick.
    Advanced(u8),
    /// Reached 100 on this tick.
    Completed,
    /// Tick from a run that is no longer current.
    Stale,
}

/// Percentage driven forward by fixed steps, one per shell delay.
///
/// Used by the quick scan, the SMS scan and the database sync. Each run gets
/// its own id; ticks carrying an older id are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickedProgress {
    percent: u8,
    running: bool,
    run: u64,
    completed_runs: u32,
}

impl TickedProgress {
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    /// Starts a run at 0 %. A run already in progress is left alone and
    /// `None` is returned.
    pub fn start(&mut self) -> Option<u64> {
        if self.running {
            return None;
        }
        self.running = true;
        self.percent = 0;
        self.run = self.run.wrapping_add(1);
        Some(self.run)
    }

    pub fn tick(&mut self, run: u64, step: u8) -> TickOutcome {
        if !self.running || run != self.run {
            return TickOutcome::Stale;
        }
        self.percent = self.percent.saturating_add(step.max(1)).min(100);
        if self.percent == 100 {
            self.running = false;
            self.completed_runs = self.completed_runs.saturating_add(1);
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced(self.percent)
        }
    }

    /// Abandons the current run; its pending tick becomes stale.
    pub fn cancel(&mut self) {
        self.running = false;
        self.percent = 0;
        self.run = self.run.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ten_percent_steps_complete_after_ten_ticks() {
        let mut progress = TickedProgress::default();
        let run = progress.start().unwrap();
        for i in 1..10u8 {
            assert_eq!(progress.tick(run, 10), TickOutcome::Advanced(i * 10));
        }
        assert_eq!(progress.tick(run, 10), TickOutcome::Completed);
        assert_eq!(progress.percent(), 100);
        assert!(!progress.is_running());
        assert_eq!(progress.completed_runs(), 1);
    }

    #[test]
    fn running_scan_is_not_restarted() {
        let mut progress = TickedProgress::default();
        let run = progress.start().unwrap();
        progress.tick(run, 20);
        assert!(progress.start().is_none());
        assert_eq!(progress.percent(), 20);
    }

    #[test]
    fn ticks_from_old_runs_are_stale() {
        let mut progress = TickedProgress::default();
        let first = progress.start().unwrap();
        progress.cancel();
        assert_eq!(progress.tick(first, 10), TickOutcome::Stale);
        let second = progress.start().unwrap();
        assert_ne!(first, second);
        assert_eq!(progress.tick(first, 10), TickOutcome::Stale);
        assert_eq!(progress.tick(second, 10), TickOutcome::Advanced(10));
    }

    #[test]
    fn finished_run_can_restart_from_zero() {
        let mut progress = TickedProgress::default();
        let run = progress.start().unwrap();
        assert_eq!(progress.tick(run, 100), TickOutcome::Completed);
        let again = progress.start().unwrap();
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.tick(run, 10), TickOutcome::Stale);
        assert_eq!(progress.tick(again, 10), TickOutcome::Advanced(10));
    }

    proptest! {
        #[test]
        fn always_terminates_at_hundred(step in 1u8..=100) {
            let mut progress = TickedProgress::default();
            let run = progress.start().unwrap();
            let mut ticks = 0;
            while progress.tick(run, step) != TickOutcome::Completed {
                ticks += 1;
                prop_assert!(ticks <= 100);
                prop_assert!(progress.percent() < 100);
            }
            prop_assert_eq!(progress.percent(), 100);
        }
    }
}
