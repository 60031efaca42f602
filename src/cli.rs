// src/cli.rs
// Headless monitor: same engine as the GUI, observations printed as lines.
// Usage:
//   cli --region Europe --world Arrakis --sietch "Sietch Tabr"
//   cli -w Arrakis -s Tabr --once

use std::env;
use std::error::Error;
use std::time::Duration;

use crate::{
    config::consts::{POLL_PERIOD_SECS, REGIONS, WEBDRIVER_URL},
    config::options::{MonitorOptions, ServerKey},
    monitor::{CycleOutcome, Monitor},
    progress::Progress,
    query::WebDriverPage,
};

pub struct Params {
    pub region: String,
    pub world: String,
    pub sietch: String,
    pub period_secs: u64,
    pub once: bool,
}

impl Params {
    fn new() -> Self {
        Self {
            region: s!(REGIONS[0]),
            world: s!(),
            sietch: s!(),
            period_secs: POLL_PERIOD_SECS,
            once: false,
        }
    }
}

struct CliProgress;
impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn cycle_done(&mut self, cycle: usize, observed: bool) {
        if !observed {
            eprintln!("cycle {cycle}: no data");
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_cli()?;
    let key = ServerKey::new(&params.region, &params.world, &params.sietch);
    if !key.is_complete() {
        return Err("--world and --sietch are required".into());
    }

    let mut prog = CliProgress;
    crate::monitor::preflight(&key, Some(&mut prog))
        .map_err(|e| e.replace('\n', " "))?;
    eprintln!("Watching {}", key.title());

    let options = MonitorOptions {
        key,
        poll_period: Duration::from_secs(params.period_secs),
    };
    let mut page = WebDriverPage::connect(WEBDRIVER_URL)?;
    let mut monitor = Monitor::new(options.key);

    loop {
        let outcome = monitor.tick(&mut page);
        match (outcome, monitor.series().latest()) {
            (CycleOutcome::Observed, Some(obs)) => {
                println!(
                    "{:.1}%\t{}\t{}",
                    obs.occupancy_pct,
                    obs.mode,
                    if obs.locked { "LOCKED" } else { "UNLOCKED" }
                );
            }
            _ => prog.cycle_done(monitor.cycles(), false),
        }
        if params.once {
            return Ok(());
        }
        std::thread::sleep(options.poll_period);
    }
}

fn parse_cli() -> Result<Params, Box<dyn Error>> {
    let mut params = Params::new();
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-r" | "--region" => params.region = args.next().ok_or("Missing value for --region")?,
            "-w" | "--world" => params.world = args.next().ok_or("Missing value for --world")?,
            "-s" | "--sietch" => params.sietch = args.next().ok_or("Missing value for --sietch")?,
            "--period" => {
                let v: u64 = args.next().ok_or("Missing value for --period")?.parse()?;
                if v == 0 {
                    return Err("Period must be at least 1 second".into());
                }
                params.period_secs = v;
            }
            "--once" => params.once = true,
            "-h" | "--help" => {
                eprintln!(
                    "Usage: cli --world <name> --sietch <name> [--region <name>] \
                     [--period <secs>] [--once]"
                );
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(params)
}
