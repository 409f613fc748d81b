use super::cron_expr::parse_schedule;
use super::run_guard::RunGuard;
use anyhow::Result;
use chrono::{DateTime, Local};
use cron::Schedule;
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 等待下次觸發時檢查中斷訊號的間隔
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 一次觸發的處理結果
#[derive(Debug)]
pub enum Firing {
    Started(JoinHandle<()>),
    /// 上一次執行尚未結束，本次略過
    Skipped,
}

/// 依 cron 排程重複執行工作
///
/// 每次觸發在獨立執行緒上執行，並以 [`RunGuard`] 確保不會重疊
pub struct Scheduler {
    expression: String,
    schedule: Schedule,
    guard: RunGuard,
    shutdown_signal: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(expression: &str, shutdown_signal: Arc<AtomicBool>) -> Result<Self> {
        Ok(Self {
            expression: expression.trim().to_string(),
            schedule: parse_schedule(expression)?,
            guard: RunGuard::new(),
            shutdown_signal,
        })
    }

    /// 指定時間之後的下一次觸發時間
    #[must_use]
    pub fn next_after(&self, after: &DateTime<Local>) -> Option<DateTime<Local>> {
        self.schedule.after(after).next()
    }

    /// 觸發一次工作；若上一次仍在執行則略過
    pub fn fire<F>(&self, job: &Arc<F>) -> Firing
    where
        F: Fn() + Send + Sync + 'static,
    {
        let Some(permit) = self.guard.try_acquire() else {
            warn!("Previous run is still in flight, skipping this firing");
            return Firing::Skipped;
        };

        let job = Arc::clone(job);
        Firing::Started(thread::spawn(move || {
            let _permit = permit;
            job();
        }))
    }

    /// 持續依排程執行，直到收到中斷訊號
    pub fn run<F>(&self, job: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let job = Arc::new(job);
        let mut in_flight: Option<JoinHandle<()>> = None;
        info!("Scheduling job with cron pattern: {}", self.expression);

        while !self.shutdown_signal.load(Ordering::SeqCst) {
            let Some(next) = self.next_after(&Local::now()) else {
                warn!("Cron pattern '{}' has no upcoming firings", self.expression);
                break;
            };
            info!("Next run at {}", next.format("%Y-%m-%d %H:%M:%S %:z"));

            if !self.wait_until(next) {
                break;
            }

            if let Firing::Started(handle) = self.fire(&job) {
                in_flight = Some(handle);
            }
        }

        if let Some(handle) = in_flight.filter(|_| self.guard.is_busy()) {
            info!("Waiting for the in-flight run to finish");
            let _ = handle.join();
        }
        info!("Scheduler stopped");
    }

    /// 睡到指定時間；途中收到中斷訊號時回傳 `false`
    fn wait_until(&self, target: DateTime<Local>) -> bool {
        loop {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                return false;
            }
            let now = Local::now();
            if now >= target {
                return true;
            }
            let remaining = (target - now).to_std().unwrap_or(Duration::ZERO);
            thread::sleep(remaining.min(POLL_INTERVAL));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use std::sync::mpsc;

    fn scheduler(expression: &str) -> Scheduler {
        Scheduler::new(expression, Arc::new(AtomicBool::new(false))).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_expression() {
        assert!(Scheduler::new("every day", Arc::new(AtomicBool::new(false))).is_err());
    }

    #[test]
    fn test_default_pattern_fires_at_noon() {
        let scheduler = scheduler("0 12 * * *");
        let morning = Local.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).single().unwrap();

        let next = scheduler.next_after(&morning).unwrap();
        assert_eq!((next.hour(), next.minute(), next.second()), (12, 0, 0));
        assert_eq!(next.date_naive(), morning.date_naive());

        let following = scheduler.next_after(&next).unwrap();
        assert_eq!(following.date_naive(), next.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn test_fire_skips_while_previous_run_in_flight() {
        let scheduler = scheduler("* * * * *");
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = std::sync::Mutex::new(release_rx);
        let (started_tx, started_rx) = mpsc::channel::<()>();
        let started_tx = std::sync::Mutex::new(started_tx);

        let job = Arc::new(move || {
            started_tx.lock().unwrap().send(()).unwrap();
            release_rx.lock().unwrap().recv().unwrap();
        });

        let Firing::Started(first) = scheduler.fire(&job) else {
            panic!("first firing should start");
        };
        started_rx.recv().unwrap();

        assert!(matches!(scheduler.fire(&job), Firing::Skipped));

        release_tx.send(()).unwrap();
        first.join().unwrap();

        let Firing::Started(second) = scheduler.fire(&job) else {
            panic!("firing after completion should start");
        };
        started_rx.recv().unwrap();
        release_tx.send(()).unwrap();
        second.join().unwrap();
    }

    #[test]
    fn test_run_returns_when_already_shut_down() {
        let shutdown = Arc::new(AtomicBool::new(true));
        let scheduler = Scheduler::new("* * * * *", Arc::clone(&shutdown)).unwrap();
        let (tx, rx) = mpsc::channel::<()>();
        let tx = std::sync::Mutex::new(tx);

        scheduler.run(move || {
            let _ = tx.lock().unwrap().send(());
        });

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_run_fires_and_stops_on_signal() {
        let shutdown = Arc::new(AtomicBool::new(false));
        let scheduler = Scheduler::new("* * * * * *", Arc::clone(&shutdown)).unwrap();
        let (tx, rx) = mpsc::channel::<()>();
        let tx = std::sync::Mutex::new(tx);
        let stop = Arc::clone(&shutdown);

        scheduler.run(move || {
            let _ = tx.lock().unwrap().send(());
            stop.store(true, Ordering::SeqCst);
        });

        assert!(rx.try_recv().is_ok());
    }
}
