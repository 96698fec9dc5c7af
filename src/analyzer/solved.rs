extern crate futures;

use crate::api::{Problem, Submission};
use futures::{Stream, TryStreamExt};
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemKey(String);
impl ProblemKey {
    pub fn of(problem: &Problem) -> Self {
        match problem.contest_id {
            Some(contest) if !problem.index.is_empty() => {
                Self(format!("{}-{}", contest, problem.index))
            }
            _ if !problem.name.is_empty() => Self(format!("nopid-{}", problem.name)),
            _ => Self(String::from("nopid-unknown")),
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolvedRecord {
    pub first_accepted: i64,
    pub tags: Vec<String>,
    pub name: String,
    pub rating: Option<u32>,
}

/// Earliest accepted submission of every problem seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolvedMap(HashMap<ProblemKey, SolvedRecord>);

impl SolvedMap {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn observe(&mut self, submission: Submission) {
        if !submission.is_accepted() {
            return;
        }
        let ts = submission.creation_time_seconds;
        let record = |p: Problem| SolvedRecord {
            first_accepted: ts,
            tags: p.tags,
            name: p.name,
            rating: p.rating,
        };
        match self.0.entry(ProblemKey::of(&submission.problem)) {
            Entry::Vacant(e) => {
                e.insert(record(submission.problem));
            }
            Entry::Occupied(mut e) => {
                if ts < e.get().first_accepted {
                    e.insert(record(submission.problem));
                }
            }
        }
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, key: &str) -> Option<&SolvedRecord> {
        self.0.get(&ProblemKey(key.to_string()))
    }
    pub fn iter(&self) -> impl Iterator<Item = (&ProblemKey, &SolvedRecord)> {
        self.0.iter()
    }
    pub fn values(&self) -> impl Iterator<Item = &SolvedRecord> {
        self.0.values()
    }
    /// Most recent first; equal timestamps are ordered by key.
    pub fn by_recency(&self) -> Vec<(&ProblemKey, &SolvedRecord)> {
        let mut list: Vec<_> = self.0.iter().collect();
        list.sort_by(|(ka, a), (kb, b)| {
            b.first_accepted
                .cmp(&a.first_accepted)
                .then_with(|| ka.cmp(kb))
        });
        list
    }
}
impl Extend<Submission> for SolvedMap {
    fn extend<T: IntoIterator<Item = Submission>>(&mut self, iter: T) {
        iter.into_iter().for_each(|s| self.observe(s));
    }
}
impl FromIterator<Submission> for SolvedMap {
    fn from_iter<T: IntoIterator<Item = Submission>>(iter: T) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}

/// Reduces a submission stream; the first error aborts the whole reduction.
pub async fn collect_first_accepted<St, E>(stream: St) -> Result<SolvedMap, E>
where
    St: Stream<Item = Result<Submission, E>>,
{
    stream
        .try_fold(SolvedMap::new(), |mut solved, submission| async move {
            solved.observe(submission);
            Ok::<_, E>(solved)
        })
        .await
}
