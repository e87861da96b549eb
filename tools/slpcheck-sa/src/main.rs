// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! slpcheck-sa - SLP Service Agent conformance runner
//!
//! Runs the registered conformance suite against one target device and
//! prints a per-test Passed/Failed/Error line plus summary counts.

use clap::Parser;
use colored::*;
use slpcheck::config::TesterConfig;
use slpcheck::suite::{register_default_suite, Outcome, TestRegistry, TestRunner};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Run the SLP Service Agent conformance suite
#[derive(Parser, Debug)]
#[command(name = "slpcheck-sa")]
#[command(version = "0.3.2")]
#[command(about = "Validate an SLP Service Agent (RDMnet device discovery)")]
struct Args {
    /// Target Service Agent IPv4 address
    target: Ipv4Addr,

    /// Destination UDP port for unicast and multicast requests
    #[arg(short, long, default_value = "427")]
    port: u16,

    /// Per-test reply deadline in milliseconds
    #[arg(short, long, default_value = "1000")]
    timeout: u64,

    /// Multicast TTL for multicast-class requests
    #[arg(long, default_value = "1")]
    multicast_ttl: u32,

    /// List registered tests and exit
    #[arg(long)]
    list: bool,

    /// Quiet mode - summary line only
    #[arg(long)]
    quiet: bool,
}

fn main() {
    // RUST_LOG drives protocol/runner debug output
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

/// Returns Ok(true) when every executed test passed.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut registry = TestRegistry::new();
    register_default_suite(&mut registry);

    if args.list {
        for case in registry.iter() {
            println!("{}", case.name());
        }
        return Ok(true);
    }

    let mut config = TesterConfig::new(args.target);
    config.port = args.port;
    config.timeout = Duration::from_millis(args.timeout);
    config.multicast_ttl = args.multicast_ttl;

    if !args.quiet {
        eprintln!(
            "{} SLP SA conformance run against {}:{} ({} tests, {}ms deadline)",
            ">>>".green().bold(),
            config.target,
            config.port,
            registry.len(),
            args.timeout
        );
    }

    let mut runner = TestRunner::new(config)?;

    // Ctrl+C finishes the current test's wait, then stops the run; the
    // report still covers everything completed so far.
    let abort = runner.abort_handle();
    ctrlc::set_handler(move || {
        abort.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    let report = runner.run(&registry)?;

    for result in report.results() {
        match &result.outcome {
            Outcome::Passed => {
                if !args.quiet {
                    println!("{:32} {}", result.name, "Passed".green());
                }
            }
            Outcome::Failed(reason) => {
                println!("{:32} {} ({})", result.name, "Failed".red().bold(), reason);
            }
            Outcome::Error(reason) => {
                println!(
                    "{:32} {} ({})",
                    result.name,
                    "Error".yellow().bold(),
                    reason
                );
            }
        }
    }

    let aborted = report.len() < registry.len();
    println!(
        "{} passed, {} failed, {} errors{}",
        report.passed().to_string().green(),
        report.failed().to_string().red(),
        report.errors().to_string().yellow(),
        if aborted {
            format!(" ({} of {} tests run)", report.len(), registry.len())
        } else {
            String::new()
        }
    );

    Ok(report.all_passed() && !aborted)
}
