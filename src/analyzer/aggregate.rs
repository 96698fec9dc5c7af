use crate::{
    config::stats::{MIN_PERIOD_SECONDS, SECONDS_PER_DAY},
    solved::SolvedMap,
    window::DateWindow,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagStat {
    pub count: usize,
    pub ratings: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}
impl RatingSummary {
    pub fn of(ratings: &[u32]) -> Option<Self> {
        let min = *ratings.iter().min()?;
        let max = *ratings.iter().max()?;
        let sum: f64 = ratings.iter().map(|&r| f64::from(r)).sum();
        Some(Self {
            count: ratings.len(),
            min,
            max,
            mean: sum / ratings.len() as f64,
        })
    }
    /// Mean rounded to one decimal place.
    pub fn average(&self) -> f64 {
        round_to(self.mean, 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagReport {
    pub tag: String,
    pub count: usize,
    pub rating: Option<RatingSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodStats {
    pub problem_count: usize,
    pub period_days: f64,
    pub solve_rate: f64,
    pub ratings: Option<RatingSummary>,
    pub user_rating: Option<i32>,
    pub user_max_rating: Option<i32>,
}
impl PeriodStats {
    pub fn avg_rating(&self) -> Option<f64> {
        self.ratings.map(|r| r.average())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub tags: Vec<TagReport>,
    pub period: PeriodStats,
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

pub fn tag_stats(solved: &SolvedMap) -> HashMap<String, TagStat> {
    let mut stats: HashMap<String, TagStat> = HashMap::new();
    for record in solved.values() {
        for tag in &record.tags {
            let stat = stats.entry(tag.clone()).or_default();
            stat.count += 1;
            if let Some(r) = record.rating {
                stat.ratings.push(r);
            }
        }
    }
    stats
}

/// Tag counts and rating spread over `solved`, in display order.
pub fn aggregate(solved: &SolvedMap, window: &DateWindow) -> Aggregate {
    let mut tags: Vec<TagReport> = tag_stats(solved)
        .into_iter()
        .map(|(tag, stat)| TagReport {
            rating: RatingSummary::of(&stat.ratings),
            count: stat.count,
            tag,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    let ratings: Vec<u32> = solved.values().filter_map(|r| r.rating).collect();
    let problem_count = solved.len();
    let period_days = window.seconds().max(MIN_PERIOD_SECONDS) / SECONDS_PER_DAY;
    Aggregate {
        tags,
        period: PeriodStats {
            problem_count,
            period_days,
            solve_rate: problem_count as f64 / period_days,
            ratings: RatingSummary::of(&ratings),
            user_rating: None,
            user_max_rating: None,
        },
    }
}
