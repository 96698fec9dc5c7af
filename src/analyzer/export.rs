extern crate chrono;
extern crate csv;

use crate::solved::SolvedMap;
use chrono::{TimeZone, Utc};
use std::io::Write;

pub const HEADER: [&str; 5] = ["key", "first_ac_mmdd", "name", "rating", "tags"];

/// `MM-DD` of an epoch timestamp in UTC, or an empty string when `ts` is outside the range
/// chrono can represent. The CSV cell is left blank rather than failing the whole export.
pub fn month_day(ts: i64) -> String {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|t| t.format("%m-%d").to_string())
        .unwrap_or_default()
}

pub fn write_csv<W: Write>(wtr: W, solved: &SolvedMap) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(HEADER)?;
    for (key, record) in solved.by_recency() {
        writer.write_record([
            key.to_string(),
            month_day(record.first_accepted),
            record.name.clone(),
            record.rating.map(|r| r.to_string()).unwrap_or_default(),
            record.tags.join(";"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Problem, Submission, Verdict};

    fn accepted(
        key: (u32, &str),
        name: &str,
        ts: i64,
        tags: &[&str],
        rating: Option<u32>,
    ) -> Submission {
        Submission {
            id: 0,
            creation_time_seconds: ts,
            verdict: Some(Verdict::Ok),
            problem: Problem {
                contest_id: Some(key.0),
                index: key.1.to_string(),
                name: name.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                rating,
            },
        }
    }

    #[test]
    fn month_day_is_utc() {
        // 2024-03-05T23:30:00Z
        assert_eq!(month_day(1709681400), "03-05");
        assert_eq!(month_day(0), "01-01");
    }

    #[test]
    fn unrepresentable_timestamp_is_blank() {
        assert_eq!(month_day(i64::MAX), "");
        assert_eq!(month_day(i64::MIN), "");
    }

    #[test]
    fn csv_rows_are_quoted_and_ordered() {
        let solved: SolvedMap = vec![
            accepted((1, "A"), "Theatre Square", 1704067200, &["math"], Some(1000)),
            accepted(
                (2, "B"),
                "Say \"Hello\", World",
                1706745600,
                &["dp", "greedy"],
                None,
            ),
        ]
        .into_iter()
        .collect();
        let mut buf = Vec::new();
        write_csv(&mut buf, &solved).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "key,first_ac_mmdd,name,rating,tags\n\
             2-B,02-01,\"Say \"\"Hello\"\", World\",,dp;greedy\n\
             1-A,01-01,Theatre Square,1000,math\n"
        );
    }

    #[test]
    fn empty_export_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &SolvedMap::new()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "key,first_ac_mmdd,name,rating,tags\n"
        );
    }
}
