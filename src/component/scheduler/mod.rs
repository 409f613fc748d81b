//! 排程元件
//!
//! 依 cron 運算式重複觸發工作，同時間最多只有一次執行

mod cron_expr;
mod main;
mod run_guard;

pub use cron_expr::parse_schedule;
pub use main::{Firing, Scheduler};
pub use run_guard::{RunGuard, RunPermit};
