//! Search worker speaking the host protocol over stdio.
//!
//! Usage: `tanuki-worker [--compound-moves] [--batch-size N]
//! [--progress-interval-ms MS] [--log-level LEVEL]`
//!
//! Reads one JSON command per line from stdin and writes one JSON event per
//! line to stdout. Logs go to stderr. On end of input the worker lets the
//! live search finish, then exits.

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, warn, LevelFilter};
use tanuki_host::config::HostConfig;
use tanuki_host::host::SearchHost;
use tanuki_host::protocol::{encode_event, is_search_request, parse_command, Event};
use tanuki_search::policy::{SearchPolicy, DEFAULT_BATCH_SIZE};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Also expand two-hint combinations as single moves.
    #[arg(long)]
    compound_moves: bool,

    /// Dequeues between yield points.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: u64,

    /// Minimum milliseconds between progress events.
    #[arg(long, default_value_t = 100)]
    progress_interval_ms: u64,

    /// Stderr log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

impl Args {
    fn host_config(&self) -> HostConfig {
        HostConfig {
            policy: SearchPolicy {
                compound_moves: self.compound_moves,
                batch_size: self.batch_size,
                progress_interval: Duration::from_millis(self.progress_interval_ms),
                ..SearchPolicy::default()
            },
        }
    }
}

fn print_events(rx: &Receiver<Event>) {
    let stdout = std::io::stdout();
    for event in rx {
        let line = match encode_event(&event) {
            Ok(line) => line,
            Err(e) => {
                error!("dropping unencodable event: {e}");
                continue;
            }
        };
        let mut out = stdout.lock();
        if writeln!(out, "{line}").and_then(|()| out.flush()).is_err() {
            error!("stdout closed, stopping event output");
            return;
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = tanuki_host::logging::init(args.log_level) {
        eprintln!("logger init failed: {e}");
    }

    let (mut host, rx) = SearchHost::new(args.host_config());
    let printer = match thread::Builder::new()
        .name("tanuki-events".into())
        .spawn(move || print_events(&rx))
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("failed to start event printer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut status = ExitCode::SUCCESS;
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("stdin read failed: {e}");
                status = ExitCode::FAILURE;
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if let Err(e) = host.handle(command) {
                    error!("{e}");
                    status = ExitCode::FAILURE;
                    break;
                }
            }
            Err(e) if is_search_request(&line) => host.reject_search(e.to_string()),
            Err(e) => warn!("ignoring command: {e}"),
        }
    }

    if let Err(e) = host.wait() {
        error!("{e}");
        status = ExitCode::FAILURE;
    }
    // Dropping the host closes the event channel and ends the printer.
    drop(host);
    if printer.join().is_err() {
        status = ExitCode::FAILURE;
    }
    status
}
