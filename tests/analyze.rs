use async_trait::async_trait;
use cf_tag_stats::{
    analyze_at,
    api::{self, Problem, Submission, SubmissionSource, User, Verdict},
    config::FetchConfig,
    error::Error,
    export::write_csv,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;

struct Remote {
    pages: Vec<Vec<Submission>>,
    status_calls: Mutex<Vec<usize>>,
    info_calls: Mutex<usize>,
    user: Option<User>,
    missing: bool,
}
impl Remote {
    fn new(pages: Vec<Vec<Submission>>) -> Self {
        Self {
            pages,
            status_calls: Mutex::new(Vec::new()),
            info_calls: Mutex::new(0),
            user: None,
            missing: false,
        }
    }
    fn with_user(mut self, rating: i32, max_rating: i32) -> Self {
        self.user = Some(User {
            handle: String::from("x"),
            rating: Some(rating),
            max_rating: Some(max_rating),
        });
        self
    }
    fn calls(&self) -> Vec<usize> {
        self.status_calls.lock().unwrap().clone()
    }
}
#[async_trait]
impl SubmissionSource for Remote {
    async fn user_status(
        &self,
        handle: &str,
        from: usize,
        _count: usize,
    ) -> api::Result<Vec<Submission>> {
        let page = {
            let mut calls = self.status_calls.lock().unwrap();
            calls.push(from);
            calls.len() - 1
        };
        if self.missing {
            return Err(api::Error::failed(format!(
                "handle: User with handle {} not found",
                handle
            )));
        }
        Ok(self.pages.get(page).cloned().unwrap_or_default())
    }
    async fn user_info(&self, _handle: &str) -> api::Result<User> {
        *self.info_calls.lock().unwrap() += 1;
        self.user
            .clone()
            .ok_or_else(|| api::Error::failed("Call limit exceeded"))
    }
}

fn submission(
    id: u64,
    ts: i64,
    verdict: Verdict,
    problem: (u32, &str),
    tags: &[&str],
    rating: Option<u32>,
) -> Submission {
    Submission {
        id,
        creation_time_seconds: ts,
        verdict: Some(verdict),
        problem: Problem {
            contest_id: Some(problem.0),
            index: problem.1.to_string(),
            name: format!("Problem {}{}", problem.0, problem.1),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            rating,
        },
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
}
fn at(day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .unwrap()
        .timestamp()
}
fn config(page_size: usize) -> FetchConfig {
    FetchConfig {
        page_size,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn earliest_accepted_scenario() {
    let remote = Remote::new(vec![vec![
        submission(3, at(20, 0), Verdict::WrongAnswer, (2, "B"), &["greedy"], None),
        submission(1, at(10, 0), Verdict::Ok, (1, "A"), &["dp"], Some(800)),
        submission(2, at(5, 0), Verdict::Ok, (1, "A"), &["dp"], Some(800)),
    ]])
    .with_user(1900, 2100);
    let report = analyze_at(
        &remote,
        "<x>",
        Some("2024-01-01"),
        Some("2024-01-31"),
        now(),
        &config(1000),
        None,
    )
    .await
    .unwrap();

    assert_eq!(report.handle, "x");
    assert_eq!(report.solved.len(), 1);
    assert_eq!(report.solved.get("1-A").unwrap().first_accepted, at(5, 0));
    assert_eq!(report.tags.len(), 1);
    let dp = &report.tags[0];
    assert_eq!((dp.tag.as_str(), dp.count), ("dp", 1));
    let r = dp.rating.unwrap();
    assert_eq!((r.min, r.max, r.average()), (800, 800, 800.0));
    assert_eq!(report.period.user_rating, Some(1900));
    assert_eq!(report.period.user_max_rating, Some(2100));
}

#[tokio::test]
async fn empty_history() {
    let remote = Remote::new(Vec::new());
    let report = analyze_at(&remote, "x", None, None, now(), &config(1000), None)
        .await
        .unwrap();
    assert!(report.solved.is_empty());
    assert!(report.tags.is_empty());
    assert_eq!(report.period.problem_count, 0);
    assert_eq!(report.period.solve_rate, 0.0);
    assert_eq!(report.period.avg_rating(), None);
    assert_eq!(remote.calls(), vec![1]);
}

#[tokio::test]
async fn invalid_input_makes_no_request() {
    let remote = Remote::new(Vec::new());
    let err = analyze_at(&remote, "x", Some("not-a-date"), None, now(), &config(1000), None)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::InvalidDateFormat(_)));

    let err = analyze_at(
        &remote,
        "x",
        Some("2024-02-01"),
        Some("2024-01-01"),
        now(),
        &config(1000),
        None,
    )
    .await
    .err()
    .unwrap();
    assert!(matches!(err, Error::InvalidRange { .. }));

    let err = analyze_at(&remote, "  <> ", None, None, now(), &config(1000), None)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::EmptyHandle));

    assert!(remote.calls().is_empty());
    assert_eq!(*remote.info_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn stops_once_page_passes_window() {
    let remote = Remote::new(vec![
        vec![
            submission(5, at(25, 0), Verdict::Ok, (5, "A"), &["math"], Some(1200)),
            submission(4, at(20, 0), Verdict::Ok, (4, "A"), &["math"], None),
        ],
        vec![
            submission(3, at(15, 0), Verdict::Ok, (3, "A"), &["dp"], Some(1400)),
            submission(2, at(10, 0), Verdict::Ok, (2, "A"), &["dp"], Some(1600)),
        ],
        vec![submission(1, at(5, 0), Verdict::Ok, (1, "A"), &["dp"], Some(800))],
    ]);
    let report = analyze_at(
        &remote,
        "x",
        Some("2024-01-12"),
        Some("2024-01-22"),
        now(),
        &config(2),
        None,
    )
    .await
    .unwrap();
    assert_eq!(remote.calls(), vec![1, 3]);
    let mut keys: Vec<_> = report.solved.iter().map(|(k, _)| k.to_string()).collect();
    keys.sort();
    assert_eq!(keys, vec!["3-A", "4-A"]);
    let tags: Vec<_> = report.tags.iter().map(|t| (t.tag.as_str(), t.count)).collect();
    assert_eq!(tags, vec![("dp", 1), ("math", 1)]);
    assert!(report.tags[1].rating.is_none());
    assert_eq!(report.period.avg_rating(), Some(1400.0));
    assert!((report.period.period_days - (10.0 + 86399.0 / 86400.0)).abs() < 1e-9);
}

#[tokio::test]
async fn missing_handle_is_reported() {
    let mut remote = Remote::new(Vec::new());
    remote.missing = true;
    let err = analyze_at(&remote, "ghost", None, None, now(), &config(1000), None)
        .await
        .err()
        .unwrap();
    match err {
        Error::UnknownHandle(h) => assert_eq!(h, "ghost"),
        other => panic!("unexpected error {}", other),
    }
    assert_eq!(*remote.info_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn user_info_failure_is_ignored() {
    let remote = Remote::new(vec![vec![submission(
        1,
        at(10, 0),
        Verdict::Ok,
        (1, "A"),
        &["dp"],
        Some(800),
    )]]);
    let lines = Mutex::new(Vec::new());
    let sink = |m: &str| lines.lock().unwrap().push(m.to_string());
    let report = analyze_at(&remote, "x", None, None, now(), &config(1000), Some(&sink))
        .await
        .unwrap();
    assert_eq!(report.solved.len(), 1);
    assert_eq!(report.period.user_rating, None);
    assert_eq!(report.period.user_max_rating, None);
    let lines = lines.into_inner().unwrap();
    assert!(lines
        .iter()
        .any(|l| l.starts_with("Could not load user rating")));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Done. Unique OK problems in period: 1")
    );
}

#[tokio::test]
async fn export_report() {
    let remote = Remote::new(vec![vec![
        submission(
            2,
            at(20, 6),
            Verdict::Ok,
            (7, "C"),
            &["graphs", "dfs and similar"],
            None,
        ),
        submission(1, at(3, 0), Verdict::Ok, (1, "A"), &["dp"], Some(800)),
    ]]);
    let report = analyze_at(&remote, "x", None, None, now(), &config(1000), None)
        .await
        .unwrap();
    let mut buf = Vec::new();
    write_csv(&mut buf, &report.solved).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "key,first_ac_mmdd,name,rating,tags\n\
         7-C,01-20,Problem 7C,,graphs;dfs and similar\n\
         1-A,01-03,Problem 1A,800,dp\n"
    );
}
