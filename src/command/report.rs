extern crate termcolor;

use crate::write::write_result;
use cf_tag_stats::{aggregate::TagReport, export, Report};
use std::{fs::File, io::Write, path::Path};
use termcolor::{StandardStream, WriteColor};

fn tag_line(tag: &TagReport) -> String {
    match tag.rating {
        Some(r) => format!(
            "{}: Counter = {} | Min = {} | Max = {} | Avg = {:.1}",
            tag.tag,
            tag.count,
            r.min,
            r.max,
            r.average()
        ),
        None => format!(
            "{}: Counter = {} | Min = N/A | Max = N/A | Avg = N/A",
            tag.tag, tag.count
        ),
    }
}

#[allow(unused_must_use)]
fn print_tags(stdout: &mut StandardStream, report: &Report) {
    write_info!(stdout, "Tags", "{} distinct", report.tags.len());
    if report.tags.is_empty() {
        writeln!(stdout, "(none)");
    }
    for tag in &report.tags {
        writeln!(stdout, "{}", tag_line(tag));
    }
}

#[allow(unused_must_use)]
fn print_solved(stdout: &mut StandardStream, report: &Report) {
    write_info!(stdout, "Solved", "problems in detail");
    for (key, record) in report.solved.by_recency() {
        writeln!(
            stdout,
            "{}\t{}\t{}\t{}",
            key,
            export::month_day(record.first_accepted),
            record.rating.map(|r| r.to_string()).unwrap_or_default(),
            record.tags.join(",")
        );
    }
}

#[allow(unused_must_use)]
fn print_period(stdout: &mut StandardStream, report: &Report) {
    let period = &report.period;
    write_info!(stdout, "Stats", "{}", report.handle);
    writeln!(
        stdout,
        "Period: {} ({:.2} days)",
        report.window, period.period_days
    );
    writeln!(
        stdout,
        "Problems (unique OK in period): {}",
        period.problem_count
    );
    writeln!(stdout, "Solve rate: {:.3} problems/day", period.solve_rate);
    match period.avg_rating() {
        Some(avg) => writeln!(stdout, "Average problem rating: {:.1}", avg),
        None => writeln!(stdout, "Average problem rating: N/A (no rating fields)"),
    };
    if let Some(r) = period.user_rating {
        writeln!(stdout, "Current rating: {}", r);
    }
    if let Some(r) = period.user_max_rating {
        writeln!(stdout, "Max rating: {}", r);
    }
    match period.ratings {
        Some(r) => writeln!(
            stdout,
            "Problems solved have Rating: {} | Avg rating: {:.2} | Min: {} | Max: {}",
            r.count, r.mean, r.min, r.max
        ),
        None => writeln!(stdout, "No problems with ratings in this period."),
    };
}

#[allow(unused_must_use)]
pub fn print_report(stdout: &mut StandardStream, report: &Report) {
    write_info!(stdout, "Period", "{} ({})", report.window, report.handle);
    print_tags(stdout, report);
    writeln!(stdout);
    print_solved(stdout, report);
    writeln!(stdout);
    print_period(stdout, report);
    stdout.reset();
}

#[allow(unused_must_use)]
pub fn save_csv(stdout: &mut StandardStream, report: &Report, path: &Path) {
    if report.solved.is_empty() {
        write_info!(stdout, "Info", "No solved problems to save.");
        return;
    }
    write_result(
        stdout,
        File::create(path)
            .map_err(csv::Error::from)
            .and_then(|f| export::write_csv(f, &report.solved)),
        &format!("CSV saved to {}", path.display()),
    );
}
