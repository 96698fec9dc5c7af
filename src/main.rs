extern crate clap;
extern crate pretty_env_logger;
extern crate termcolor;
extern crate tokio;

use cf_tag_stats::{analyze, api::Client, config::FetchConfig};
use clap::{crate_description, crate_name, value_parser, Arg, ArgMatches, Command};
use pretty_env_logger::init_timed;
use std::{cell::RefCell, path::PathBuf, process::exit, time::Duration};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[macro_use]
mod color;
mod command {
    pub mod report;
}
mod write;

use command::report::{print_report, save_csv};

fn cli() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .version(get_version!("version"))
        .long_version(get_version!("long_version"))
        .arg(
            Arg::new("handle")
                .help("Codeforces handle, surrounding <> are ignored")
                .required(true),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .short('f')
                .value_name("DATE")
                .help("Start of the period, YYYY-MM-DD or ISO datetime [default: 30 days ago]"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .short('t')
                .value_name("DATE")
                .help("End of the period, a bare date includes that whole day [default: now]"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Save solved problems to a CSV file"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Submissions requested per API call"),
        )
        .arg(
            Arg::new("max-requests")
                .long("max-requests")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Upper bound on user.status calls"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Timeout of a single API call"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Codeforces API root"),
        )
}

fn fetch_config(matches: &ArgMatches) -> FetchConfig {
    let mut config = FetchConfig::default();
    if let Some(&v) = matches.get_one::<usize>("page-size") {
        config.page_size = v;
    }
    if let Some(&v) = matches.get_one::<usize>("max-requests") {
        config.max_requests = v;
    }
    if let Some(&v) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(v);
    }
    if let Some(v) = matches.get_one::<String>("base-url") {
        config.base_url = v.clone();
    }
    config
}

#[allow(unused_must_use)]
#[tokio::main]
async fn main() {
    init_timed();
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let matches = cli().get_matches();
    let config = fetch_config(&matches);
    let arg = |name: &str| matches.get_one::<String>(name).map(String::as_str);

    let client = match Client::new(&config) {
        Ok(v) => v,
        Err(e) => {
            write_error!(&mut stdout, "Error", "{}", e);
            stdout.reset();
            exit(1);
        }
    };
    let stderr = RefCell::new(StandardStream::stderr(ColorChoice::Auto));
    let progress = |message: &str| {
        let mut out = stderr.borrow_mut();
        write_progress!(&mut *out, "Status", "{}", message);
        out.reset();
    };

    match analyze(
        &client,
        arg("handle").unwrap_or_default(),
        arg("from"),
        arg("to"),
        &config,
        Some(&progress),
    )
    .await
    {
        Ok(report) => {
            print_report(&mut stdout, &report);
            if let Some(path) = matches.get_one::<PathBuf>("csv") {
                save_csv(&mut stdout, &report, path);
            }
        }
        Err(e) => {
            write_error!(&mut stdout, "Error", "{}", e);
            stdout.reset();
            exit(1);
        }
    }
    stdout.reset();
}
