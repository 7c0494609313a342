use std::time::Duration;

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time};

/// Fixed auto-refresh period.
pub const AUTO_REFRESH: Duration = Duration::from_secs(60);

/// Owner of the single recurring refresh timer.
///
/// Resetting replaces the running timer; there is never more than one.
#[derive(Debug)]
pub struct RefreshSchedule {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::new(AUTO_REFRESH)
    }
}

impl RefreshSchedule {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Cancel any running timer and start a new one that sends `make_event()`
    /// every period, the first time one full period from now.
    pub fn reset<T, F>(&mut self, tx: UnboundedSender<T>, make_event: F)
    where
        T: Send + 'static,
        F: Fn() -> T + Send + 'static,
    {
        self.cancel();

        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(make_event()).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for RefreshSchedule {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::UnboundedReceiver<u32>) -> Vec<u32> {
        let mut out = Vec::new();
        while let Ok(v) = rx.try_recv() {
            out.push(v);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_before_first_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut schedule = RefreshSchedule::default();
        schedule.reset(tx, || 1u32);

        time::sleep(AUTO_REFRESH - Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(drain(&mut rx), [1]);
    }

    #[tokio::test(start_paused = true)]
    async fn double_reset_leaves_one_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut schedule = RefreshSchedule::default();

        schedule.reset(tx.clone(), || 1u32);
        schedule.reset(tx, || 2u32);
        assert!(schedule.is_active());

        time::sleep(AUTO_REFRESH + Duration::from_secs(1)).await;
        assert_eq!(drain(&mut rx), [2]);

        time::sleep(AUTO_REFRESH).await;
        assert_eq!(drain(&mut rx), [2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut schedule = RefreshSchedule::default();
        schedule.reset(tx, || 1u32);

        schedule.cancel();
        assert!(!schedule.is_active());

        time::sleep(AUTO_REFRESH * 3).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut schedule = RefreshSchedule::new(Duration::from_secs(5));
            schedule.reset(tx, || 7u32);
        }

        time::sleep(Duration::from_secs(30)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
