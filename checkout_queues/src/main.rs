use std::io::Write;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use env_logger::Builder;
use log::LevelFilter;

use checkout_queues::scenario::run_scenario;
use checkout_queues::{DEFAULT_CASHIERS, DEFAULT_HORIZON, DEFAULT_TELLERS};
use checkout_queues::{DepartureRule, SimResult, SimulationConfig};

/// Compare a bank's single shared line with a supermarket's per-cashier lines
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Customers arriving per minute (e.g. 0.32)
    #[arg(allow_negative_numbers = true)]
    arrival_rate: f64,

    /// Upper bound on a customer's service time, in minutes
    #[arg(allow_negative_numbers = true)]
    max_service_minutes: f64,

    /// Random seed (truncated to an integer)
    #[arg(allow_negative_numbers = true)]
    seed: f64,

    /// Number of bank tellers sharing one line
    #[arg(long, default_value_t = DEFAULT_TELLERS)]
    tellers: usize,

    /// Number of supermarket cashiers, each with its own line
    #[arg(long, default_value_t = DEFAULT_CASHIERS)]
    cashiers: usize,

    /// Simulation cutoff in seconds
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: usize,

    /// How routed supermarket customers are scheduled to leave
    #[arg(long, value_enum, default_value_t = DepartureRule::Cumulative)]
    grocery_departure: DepartureRule,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print simulation decisions
    #[arg(long, short)]
    debug: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            arrival_rate: self.arrival_rate,
            max_service_minutes: self.max_service_minutes,
            seed: SimulationConfig::seed_from_f64(self.seed),
            horizon: self.horizon,
            tellers: self.tellers,
            cashiers: self.cashiers,
            departure_rule: self.grocery_departure,
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .format(|buf, record| writeln!(buf, "{}", record.args()));
    if debug {
        builder
            .filter(Some("checkout_queues"), LevelFilter::Debug)
            .filter(Some("des"), LevelFilter::Debug);
    }
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(args: &Args) -> SimResult<()> {
    let result = run_scenario(&args.config())?;
    let report = result.report()?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_summary();
    }
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_positionals_reach_validation() {
        let args = Args::try_parse_from(["checkout_queues", "-1", "-2.5", "-3"]).unwrap();
        assert_eq!(args.arrival_rate, -1.0);
        assert_eq!(args.max_service_minutes, -2.5);
        assert_eq!(args.config().seed, 0);
        assert!(args.config().validate().is_err());
    }

    #[test]
    fn wrong_positional_count_is_a_parse_error() {
        assert!(Args::try_parse_from(["checkout_queues", "0.5", "6"]).is_err());
    }

    #[test]
    fn huge_arrival_rate_fails_validation_not_allocation() {
        let args = Args::try_parse_from(["checkout_queues", "1e20", "5", "1"]).unwrap();
        assert!(run(&args).is_err());
    }
}
