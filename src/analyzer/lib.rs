pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod solved;
pub mod window;

extern crate chrono;
extern crate log;

use aggregate::{aggregate, PeriodStats, TagReport};
use api::SubmissionSource;
use chrono::{DateTime, Utc};
use config::FetchConfig;
use error::{fetch_error, Error, Result};
use fetcher::{Fetcher, Progress};
use solved::{collect_first_accepted, SolvedMap};
use window::DateWindow;

pub struct Report {
    pub handle: String,
    pub window: DateWindow,
    pub solved: SolvedMap,
    pub tags: Vec<TagReport>,
    pub period: PeriodStats,
}

/// Trims the handle and drops one pair of surrounding `<>`.
pub fn normalize_handle(raw: &str) -> String {
    let h = raw.trim();
    match h.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => inner.trim().to_string(),
        None => h.to_string(),
    }
}

pub async fn analyze<S: SubmissionSource + ?Sized>(
    source: &S,
    handle: &str,
    from: Option<&str>,
    to: Option<&str>,
    config: &FetchConfig,
    progress: Option<&dyn Progress>,
) -> Result<Report> {
    analyze_at(source, handle, from, to, Utc::now(), config, progress).await
}

/// Same as [`analyze`] with an explicit clock for resolving the default window.
pub async fn analyze_at<S: SubmissionSource + ?Sized>(
    source: &S,
    handle: &str,
    from: Option<&str>,
    to: Option<&str>,
    now: DateTime<Utc>,
    config: &FetchConfig,
    progress: Option<&dyn Progress>,
) -> Result<Report> {
    let handle = normalize_handle(handle);
    if handle.is_empty() {
        return Err(Error::EmptyHandle);
    }
    let window = DateWindow::resolve(from, to, now)?;
    if let Some(p) = progress {
        p.report(&format!("Fetching for {} from {} ...", handle, window));
    }

    let fetcher = Fetcher::new(source, &handle, window, config, progress);
    let solved = collect_first_accepted(fetcher.into_stream())
        .await
        .map_err(|e| fetch_error(&handle, e))?;
    let mut result = aggregate(&solved, &window);

    match source.user_info(&handle).await {
        Ok(user) => {
            result.period.user_rating = user.rating;
            result.period.user_max_rating = user.max_rating;
        }
        Err(e) => {
            log::warn!("user.info lookup for {} failed: {}", handle, e);
            if let Some(p) = progress {
                p.report(&format!("Could not load user rating: {}", e));
            }
        }
    }
    if let Some(p) = progress {
        p.report(&format!(
            "Done. Unique OK problems in period: {}",
            solved.len()
        ));
    }

    Ok(Report {
        handle,
        window,
        solved,
        tags: result.tags,
        period: result.period,
    })
}
