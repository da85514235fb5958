/// Timer lifecycle for one game phase.
///
/// Everything armed here belongs to the phase it was armed for: re-arming or
/// dropping the scheduler cancels all of it, so no timer can outlive the
/// state it was meant to drive.
use tokio::time::{sleep_until, Instant};

use crate::core::game::{Cadence, TimerSpec};

#[derive(Debug)]
struct Armed<T> {
    id: T,
    cadence: Cadence,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    armed: Vec<Armed<T>>,
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self { armed: Vec::new() }
    }

    /// Cancel whatever is armed and arm `specs` relative to `now`
    pub fn arm(&mut self, specs: impl IntoIterator<Item = TimerSpec<T>>, now: Instant) {
        self.armed.clear();
        self.armed.extend(specs.into_iter().map(|spec| {
            let delay = match spec.cadence {
                Cadence::Every(period) => period,
                Cadence::After(delay) => delay,
            };
            Armed { id: spec.id, cadence: spec.cadence, deadline: now + delay }
        }));
    }

    pub fn cancel_all(&mut self) {
        self.armed.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.armed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    /// Wait for the earliest timer and fire it.
    ///
    /// Never resolves while nothing is armed. The scheduler is only touched
    /// after the sleep completes, so dropping this future early is harmless.
    pub async fn next(&mut self) -> T {
        let Some(index) = self.earliest() else {
            return std::future::pending().await;
        };
        sleep_until(self.armed[index].deadline).await;
        self.fire(index)
    }

    // min_by_key keeps the first of equal deadlines, i.e. schedule order
    fn earliest(&self) -> Option<usize> {
        self.armed
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| timer.deadline)
            .map(|(index, _)| index)
    }

    fn fire(&mut self, index: usize) -> T {
        let id = self.armed[index].id;
        match self.armed[index].cadence {
            Cadence::Every(period) => self.armed[index].deadline += period,
            Cadence::After(_) => {
                self.armed.remove(index);
            }
        }
        id
    }
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tick {
        Fast,
        Slow,
        Once,
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_timers_fire_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.arm(
            [TimerSpec::every(Tick::Slow, ms(300)), TimerSpec::every(Tick::Fast, ms(100))],
            Instant::now(),
        );

        let mut fired = Vec::new();
        for _ in 0..4 {
            fired.push(scheduler.next().await);
        }

        // At 300ms both are due; the earlier-scheduled one goes first
        assert_eq!(fired, vec![Tick::Fast, Tick::Fast, Tick::Slow, Tick::Fast]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_periodic_fire_is_one_period_after_arming() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.arm([TimerSpec::every(Tick::Fast, ms(100))], start);

        scheduler.next().await;
        assert_eq!(Instant::now() - start, ms(100));
        scheduler.next().await;
        assert_eq!(Instant::now() - start, ms(200));
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_disarms_after_firing() {
        let mut scheduler = Scheduler::new();
        scheduler.arm(
            [TimerSpec::every(Tick::Slow, ms(100)), TimerSpec::after(Tick::Once, ms(50))],
            Instant::now(),
        );

        assert_eq!(scheduler.next().await, Tick::Once);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next().await, Tick::Slow);
        assert_eq!(scheduler.next().await, Tick::Slow);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_scheduler_never_fires() {
        let mut scheduler: Scheduler<Tick> = Scheduler::new();
        assert!(scheduler.is_idle());

        let waited = tokio::time::timeout(Duration::from_secs(60), scheduler.next()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_cancels_previous_timers() {
        let mut scheduler = Scheduler::new();
        scheduler.arm([TimerSpec::every(Tick::Fast, ms(100))], Instant::now());
        scheduler.arm([TimerSpec::every(Tick::Slow, ms(300))], Instant::now());

        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next().await, Tick::Slow);

        scheduler.cancel_all();
        assert!(scheduler.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_next_early_keeps_deadline() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.arm([TimerSpec::every(Tick::Slow, ms(300))], start);

        tokio::select! {
            _ = scheduler.next() => panic!("timer fired too early"),
            _ = tokio::time::sleep(ms(120)) => {}
        }

        assert_eq!(scheduler.next().await, Tick::Slow);
        assert_eq!(Instant::now() - start, ms(300));
    }
}
