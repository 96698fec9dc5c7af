pub mod api {
    use std::time::Duration;
    pub const BASE_URL: &str = "https://codeforces.com/api";
    pub const PAGE_SIZE: usize = 1000;
    pub const MAX_REQUESTS: usize = 200;
    pub const TIMEOUT: Duration = Duration::from_secs(20);
}
pub mod window {
    pub const DEFAULT_DAYS: i64 = 30;
}
pub mod stats {
    pub const SECONDS_PER_DAY: f64 = 86400.0;
    pub const MIN_PERIOD_SECONDS: f64 = 1.0;
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub page_size: usize,
    pub max_requests: usize,
    pub timeout: std::time::Duration,
}
impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(api::BASE_URL),
            page_size: api::PAGE_SIZE,
            max_requests: api::MAX_REQUESTS,
            timeout: api::TIMEOUT,
        }
    }
}
