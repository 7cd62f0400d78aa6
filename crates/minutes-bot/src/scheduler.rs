//! Background job scheduler.
//!
//! The only job is the keep-alive self-ping against the service's own
//! `/health` endpoint.

use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler};

/// Builds and starts the scheduler.
///
/// Registers the self-ping job when `external_url` is set. The returned
/// [`JobScheduler`] must be kept alive for the lifetime of the process;
/// dropping it stops all jobs.
///
/// # Errors
///
/// Returns an error if the ping client cannot be built, the scheduler cannot
/// be initialised, the job cannot be registered, or the scheduler fails to
/// start.
pub async fn build_scheduler(
    external_url: Option<&str>,
    interval_secs: u64,
    timeout_secs: u64,
) -> anyhow::Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    match external_url {
        Some(url) => {
            register_self_ping_job(&scheduler, health_url(url), interval_secs, timeout_secs)
                .await?;
        }
        None => tracing::info!("RENDER_EXTERNAL_URL not set; self-ping disabled"),
    }

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register a repeated `GET {url}/health` every `interval_secs`.
///
/// The first ping fires one interval after startup. Failures are logged and
/// never unschedule the job.
async fn register_self_ping_job(
    scheduler: &JobScheduler,
    target: String,
    interval_secs: u64,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent("meeting-note-bot/0.1")
        .build()?;

    tracing::info!(target = %target, interval_secs, "scheduling self-ping");
    let job = Job::new_repeated_async(Duration::from_secs(interval_secs), move |_uuid, _lock| {
        let client = client.clone();
        let target = target.clone();

        Box::pin(async move {
            ping(&client, &target).await;
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

async fn ping(client: &reqwest::Client, target: &str) {
    match client.get(target).send().await {
        Ok(response) if response.status().is_success() => {
            tracing::debug!(status = response.status().as_u16(), "self-ping ok");
        }
        Ok(response) => {
            tracing::warn!(
                status = response.status().as_u16(),
                "self-ping returned non-success status"
            );
        }
        Err(e) => tracing::warn!(error = %e, "self-ping failed"),
    }
}

fn health_url(external_url: &str) -> String {
    format!("{}/health", external_url.trim_end_matches('/'))
}
