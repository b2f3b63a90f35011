use std::io;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::*;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;

use shellprobe::cli::Args;
use shellprobe::probe::{ClientOptions, HttpProber};
use shellprobe::scan::{ScanSettings, Scanner};
use shellprobe::target::{self, HTTP_SCHEMES};
use shellprobe::{candidates, logger, wordlist};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose, args.quiet);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Setup failures go to stdout as plain text.
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let agents = wordlist::load_non_empty(&args.agents)?;
    let webshells = wordlist::load(&args.webshells)?;
    let directories = wordlist::load(&args.directories)?;
    let target = target::validate(&args.url, Some(HTTP_SCHEMES))?;

    let prober = HttpProber::new(&ClientOptions {
        proxy: args.proxy.clone(),
        insecure: args.insecure,
    })?;

    let settings = ScanSettings {
        max_runtime: args.max_runtime(),
        ..Default::default()
    };

    let stop = settings.stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupted, stopping scan (Ctrl-C again to exit immediately)");
        stop.trigger();
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(1);
        }
    });

    let mut scanner = Scanner::new(prober, StdRng::from_entropy(), settings);
    let agent = wordlist::choose_agent(&agents, scanner.rng_mut())
        .ok_or_else(|| anyhow!("No user agent available"))?
        .to_string();

    if !args.quiet {
        eprintln!("{}", "Starting webshell scan...".green());
        eprintln!("{}", format!("Target:      {}", target).cyan());
        eprintln!(
            "{}",
            format!(
                "Candidates:  {}",
                candidates::candidate_count(webshells.len(), directories.len())
            )
            .cyan()
        );
        eprintln!("{}", format!("User-Agent:  {}", agent).cyan());
        if let Some(ref proxy) = args.proxy {
            eprintln!("{}", format!("Proxy:       {}", proxy).cyan());
        }
        if args.insecure {
            eprintln!("{}", "TLS certificate verification disabled".yellow());
        }
    }

    let started = Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = scanner
        .run(&target, &webshells, &directories, &agent, &mut out)
        .await?;

    if !args.quiet {
        let status = if summary.interrupted {
            "Scan stopped early".yellow()
        } else {
            "Scan complete".green()
        };
        eprintln!(
            "\n{}: {} of {} probed, {} found, {} unreachable in {:.1}s",
            status,
            summary.probed,
            summary.candidates,
            summary.found,
            summary.failed,
            started.elapsed().as_secs_f64()
        );
    }
    Ok(())
}
