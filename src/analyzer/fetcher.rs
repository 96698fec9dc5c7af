extern crate futures;
extern crate log;

use crate::{
    api::{Error, Result, Submission, SubmissionSource},
    config::FetchConfig,
    window::DateWindow,
};
use futures::stream::{self, Stream};
use std::{collections::VecDeque, fmt};

/// Receives human readable progress lines while a fetch runs.
pub trait Progress {
    fn report(&self, message: &str);
}
impl<F: Fn(&str)> Progress for F {
    fn report(&self, message: &str) {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Exhausted,
    PassedWindow,
    RequestLimit(usize),
}
impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => f.write_str("No more submissions returned by API."),
            Self::PassedWindow => {
                f.write_str("Oldest submission in page is older than From date -> stopping early.")
            }
            Self::RequestLimit(n) => write!(f, "Reached max_requests={}; stopping.", n),
        }
    }
}

/// Pulls in-window submissions page by page, newest first.
///
/// Pages are requested lazily from [`Fetcher::next`]. Once a page reaches past the start of
/// the window, or the listing runs dry, or the request budget is spent, no further request is
/// made. A fetcher is single use.
pub struct Fetcher<'a, S: SubmissionSource + ?Sized> {
    source: &'a S,
    handle: &'a str,
    window: DateWindow,
    page_size: usize,
    max_requests: usize,
    progress: Option<&'a dyn Progress>,
    offset: usize,
    requests: usize,
    yielded: usize,
    pending: VecDeque<Submission>,
    stop: Option<Stop>,
    finished: bool,
}

impl<'a, S: SubmissionSource + ?Sized> Fetcher<'a, S> {
    pub fn new(
        source: &'a S,
        handle: &'a str,
        window: DateWindow,
        config: &FetchConfig,
        progress: Option<&'a dyn Progress>,
    ) -> Self {
        Self {
            source,
            handle,
            window,
            page_size: config.page_size.max(1),
            max_requests: config.max_requests,
            progress,
            offset: 1,
            requests: 0,
            yielded: 0,
            pending: VecDeque::new(),
            stop: None,
            finished: false,
        }
    }
    pub fn requests(&self) -> usize {
        self.requests
    }
    pub fn stop_reason(&self) -> Option<Stop> {
        self.stop
    }

    fn report(&self, message: &str) {
        if let Some(p) = self.progress {
            p.report(message);
        }
    }
    fn finish(&mut self, stop: Stop) {
        log::info!(
            "stop fetching {} after {} requests: {:?}",
            self.handle,
            self.requests,
            stop
        );
        self.report(&stop.to_string());
        self.stop = Some(stop);
    }

    async fn fetch_page(&mut self) -> Result<()> {
        if self.requests >= self.max_requests {
            self.finish(Stop::RequestLimit(self.max_requests));
            return Ok(());
        }
        self.requests += 1;
        self.report(&format!(
            "API request #{}: from={} count={}",
            self.requests, self.offset, self.page_size
        ));
        log::debug!(
            "user.status handle={} from={} count={}",
            self.handle,
            self.offset,
            self.page_size
        );
        let page = self
            .source
            .user_status(self.handle, self.offset, self.page_size)
            .await?;
        if page.is_empty() {
            self.finish(Stop::Exhausted);
            return Ok(());
        }

        let oldest = page.iter().map(|s| s.creation_time_seconds).min();
        self.offset += page.len();
        let before = self.pending.len();
        let window = self.window;
        self.pending.extend(
            page.into_iter()
                .filter(|s| window.contains(s.creation_time_seconds)),
        );
        log::debug!(
            "page {} kept {} submissions, oldest at {:?}",
            self.requests,
            self.pending.len() - before,
            oldest
        );

        if matches!(oldest, Some(ts) if ts < window.from_timestamp()) {
            self.finish(Stop::PassedWindow);
        }
        Ok(())
    }

    /// The next in-window submission, or `None` once the fetch is over.
    pub async fn next(&mut self) -> Result<Option<Submission>> {
        loop {
            if let Some(s) = self.pending.pop_front() {
                self.yielded += 1;
                return Ok(Some(s));
            }
            if self.stop.is_some() {
                if !self.finished {
                    self.finished = true;
                    self.report(&format!(
                        "Finished fetching. Yielded {} submissions in period.",
                        self.yielded
                    ));
                }
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<Submission>> + 'a
    where
        S: 'a,
    {
        stream::try_unfold(self, |mut fetcher| async move {
            let next = fetcher.next().await?;
            Ok::<_, Error>(next.map(|s| (s, fetcher)))
        })
    }
}
