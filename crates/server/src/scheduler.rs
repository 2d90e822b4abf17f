// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fire-once summary timers.
//!
//! One task per future gameweek deadline. Jobs whose time has already
//! passed at start-up are never scheduled, so a restart does not resend
//! old summaries.

use chrono::{DateTime, Utc};
use four_to_score_api::Messenger;
use four_to_score_domain::SummaryJob;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::{error, info};

use crate::{AppState, send_period_summary};

/// Spawns a timer task for every summary job still in the future.
pub fn schedule_summaries<M>(state: &AppState<M>) -> Vec<JoinHandle<()>>
where
    M: Messenger + 'static,
{
    let now: DateTime<Utc> = (state.clock)();
    let jobs: Vec<SummaryJob> = state.context.schedule.summary_jobs(now);
    info!(jobs = jobs.len(), "Scheduling gameweek summaries");

    jobs.into_iter()
        .map(|job| {
            let delay: Duration = (job.fire_at - now).to_std().unwrap_or(Duration::ZERO);
            info!(job_id = %job.job_id(), fire_at = %job.fire_at, "Summary scheduled");
            let state: AppState<M> = state.clone();
            tokio::spawn(async move {
                tokio::time::sleep_until(Instant::now() + delay).await;
                run_summary_job(&state, job).await;
            })
        })
        .collect()
}

async fn run_summary_job<M: Messenger>(state: &AppState<M>, job: SummaryJob) {
    match send_period_summary(state, job.gameweek).await {
        Ok(report) => info!(
            job_id = %job.job_id(),
            sent = report.sent,
            failed = report.failures.len(),
            "Summary job finished"
        ),
        Err(err) => error!(job_id = %job.job_id(), error = %err, "Summary job failed"),
    }
}
