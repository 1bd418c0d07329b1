//! quitmath-sim - Run the Quit-Math models from the command line
//!
//! Unix-style access to the craving model, the task scheduler, the daily
//! Markov model and the eco calculator, with the same parameters the
//! terminal UI loads from its configuration file.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use libquitmath::logging::{self, LoggingConfig};
use libquitmath::service::{
    CravingOdeEngine, DailyMarkovModel, EcoBreakdown, EcoImpactService, OdePoint,
    SimulationRequest, TaskScheduler, TransitionProbabilities,
};
use libquitmath::{Config, DailyState, QuitMathError};

#[derive(Parser, Debug)]
#[command(name = "quitmath-sim")]
#[command(version)]
#[command(about = "Run the Quit-Math models from the command line")]
#[command(long_about = "\
quitmath-sim - Run the Quit-Math models from the command line

COMMANDS:
    simulate    Integrate the craving/attention/reward model
    suggest     Propose task times for the next hour
    markov      Next-day transition probabilities
    eco         Impact of avoided disposable vapes

USAGE EXAMPLES:
    # Two hours from a strong craving, one sample per minute
    quitmath-sim simulate --c0 0.8 --a0 0.3 --r0 0 --horizon 120 --dt 1

    # Same, as CSV for plotting
    quitmath-sim simulate --c0 0.8 --a0 0.3 --horizon 120 --format csv > run.csv

    # When should the next tasks be?
    quitmath-sim suggest --c 0.7 --a 0.2 --r 0

    # Tomorrow's odds after a hard withdrawal day
    quitmath-sim markov --state S1 --c 0.8 --a 0.3 --r 0.1

    # Ten disposables avoided
    quitmath-sim eco --avoided 10 --format json

CONFIGURATION:
    Model parameters come from ~/.config/quitmath/config.toml, or the file
    named by --config or QUITMATH_CONFIG. A missing file means defaults.

EXIT CODES:
    0 - Success
    1 - Operation failed
    3 - Invalid input (out-of-range value, bad state name, etc.)
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Integrate the craving model
    Simulate {
        /// Initial craving, 0-1
        #[arg(long)]
        c0: f64,

        /// Initial attention, 0-1
        #[arg(long, default_value_t = 0.5)]
        a0: f64,

        /// Initial reward, 0-1
        #[arg(long, default_value_t = 0.0)]
        r0: f64,

        /// Horizon in minutes (5-1440)
        #[arg(long, default_value_t = 60.0)]
        horizon: f64,

        /// Step in minutes (0-60]
        #[arg(long, default_value_t = 1.0)]
        dt: f64,
    },

    /// Propose task times from the current state
    Suggest {
        /// Current craving, 0-1
        #[arg(long)]
        c: f64,

        /// Current attention, 0-1
        #[arg(long, default_value_t = 0.5)]
        a: f64,

        /// Current reward, 0-1
        #[arg(long, default_value_t = 0.0)]
        r: f64,
    },

    /// Next-day transition probabilities
    Markov {
        /// Today's state: S0, S1 or S2
        #[arg(long)]
        state: DailyState,

        /// Average craving of the day, 0-1
        #[arg(long)]
        c: f64,

        /// Average attention of the day, 0-1
        #[arg(long)]
        a: f64,

        /// Average task reward of the day, 0-1
        #[arg(long, default_value_t = 0.0)]
        r: f64,
    },

    /// Eco impact of avoided disposables
    Eco {
        /// Number of disposables not bought
        #[arg(long)]
        avoided: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(3);
        }
        Err(e) => e.exit(),
    };

    // Initialize logging
    let log = LoggingConfig {
        verbose: cli.verbose,
        ..logging::config_from_env()
    };
    if let Err(e) = log.init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // Run the main logic and handle errors
    match run(&cli) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<QuitMathError>()
        .map(QuitMathError::exit_code)
        .unwrap_or(1)
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = Config::load_with(cli.config.as_deref())?;
    tracing::debug!(command = ?cli.command, "running");

    let output = match cli.command {
        Commands::Simulate {
            c0,
            a0,
            r0,
            horizon,
            dt,
        } => {
            let request = SimulationRequest {
                c0,
                a0,
                r0,
                horizon_minutes: horizon,
                dt_minutes: dt,
            };
            let points = CravingOdeEngine::new(config.ode)
                .run(&request)
                .map_err(QuitMathError::from)?;
            format_points(&points, cli.format)?
        }

        Commands::Suggest { c, a, r } => {
            check_unit("c", c)?;
            check_unit("a", a)?;
            check_unit("r", r)?;
            let offsets = TaskScheduler::new(config.ode, config.scheduler)
                .suggest_task_schedule(c, a, r)
                .map_err(QuitMathError::from)?;
            format_offsets(&offsets, cli.format)?
        }

        Commands::Markov { state, c, a, r } => {
            check_unit("c", c)?;
            check_unit("a", a)?;
            check_unit("r", r)?;
            let probs = DailyMarkovModel::new(config.markov).transition_probabilities(state, c, a, r);
            format_probabilities(state, &probs, cli.format)?
        }

        Commands::Eco { avoided } => {
            if !avoided.is_finite() || avoided < 0.0 {
                return Err(QuitMathError::InvalidInput(format!(
                    "avoided must be a non-negative number, got {}",
                    avoided
                ))
                .into());
            }
            let eco = EcoImpactService::new(config.eco).disposables_to_eco(avoided);
            format_eco(avoided, &eco, cli.format)?
        }
    };

    Ok(output)
}

fn check_unit(name: &str, value: f64) -> libquitmath::Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(QuitMathError::InvalidInput(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

fn format_points(points: &[OdePoint], format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => return to_json(points),
        OutputFormat::Csv => {
            out.push_str("t_min,c,a,r\n");
            for p in points {
                out.push_str(&format!("{},{:.6},{:.6},{:.6}\n", p.t_min, p.c, p.a, p.r));
            }
        }
        OutputFormat::Text => {
            out.push_str(&format!("{:>8}  {:>6}  {:>6}  {:>6}\n", "t (min)", "C", "A", "R"));
            for p in points {
                out.push_str(&format!(
                    "{:>8.1}  {:>6.3}  {:>6.3}  {:>6.3}\n",
                    p.t_min, p.c, p.a, p.r
                ));
            }
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct Schedule<'a> {
    minute_offsets: &'a [u32],
}

fn format_offsets(offsets: &[u32], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(&Schedule {
            minute_offsets: offsets,
        }),
        OutputFormat::Csv => {
            let mut out = String::from("minute_offset\n");
            for m in offsets {
                out.push_str(&format!("{}\n", m));
            }
            Ok(out)
        }
        OutputFormat::Text if offsets.is_empty() => {
            Ok("No craving peak expected; no tasks suggested.\n".to_string())
        }
        OutputFormat::Text => {
            let list: Vec<String> = offsets.iter().map(|m| format!("+{} min", m)).collect();
            Ok(format!("Suggested tasks at: {}\n", list.join(", ")))
        }
    }
}

#[derive(Serialize)]
struct Transition<'a> {
    from: DailyState,
    #[serde(flatten)]
    probabilities: &'a TransitionProbabilities,
    most_likely: DailyState,
}

fn format_probabilities(
    from: DailyState,
    probs: &TransitionProbabilities,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(&Transition {
            from,
            probabilities: probs,
            most_likely: probs.most_likely(),
        }),
        OutputFormat::Csv => {
            let mut out = String::from("from,to,probability\n");
            for to in DailyState::ALL {
                out.push_str(&format!("{},{},{:.6}\n", from, to, probs.get(to)));
            }
            Ok(out)
        }
        OutputFormat::Text => {
            let mut out = format!("From {} ({}):\n", from, from.label());
            for to in DailyState::ALL {
                out.push_str(&format!("  -> {} {:<10} {:.3}\n", to, to.label(), probs.get(to)));
            }
            out.push_str(&format!("Most likely: {}\n", probs.most_likely().label()));
            Ok(out)
        }
    }
}

#[derive(Serialize)]
struct EcoOutput<'a> {
    avoided_units: f64,
    #[serde(flatten)]
    breakdown: &'a EcoBreakdown,
}

fn format_eco(avoided: f64, eco: &EcoBreakdown, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(&EcoOutput {
            avoided_units: avoided,
            breakdown: eco,
        }),
        OutputFormat::Csv => Ok(format!(
            "avoided_units,plastic_g,battery_g,co2e_kg,karma\n{},{},{},{},{}\n",
            avoided, eco.plastic_g, eco.battery_g, eco.co2e_kg, eco.karma
        )),
        OutputFormat::Text => Ok(format!(
            "Disposables avoided: {}\n  Plastic:  {:.1} g\n  Battery:  {:.1} g\n  CO2e:     {:.3} kg\n  Karma:    {:.4}\n",
            avoided, eco.plastic_g, eco.battery_g, eco.co2e_kg, eco.karma
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_markov_state() {
        let cli = Cli::try_parse_from(["quitmath-sim", "markov", "--state", "s1", "--c", "0.5", "--a", "0.5"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Markov {
                state: DailyState::Withdrawal,
                ..
            }
        ));
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["quitmath-sim", "eco", "--avoided", "2", "--format", "csv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    #[test]
    fn test_out_of_range_is_invalid_input() {
        let err: anyhow::Error = check_unit("c", 1.5).unwrap_err().into();
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_points_csv_has_header_and_rows() {
        let points = [
            OdePoint { t_min: 0.0, c: 0.5, a: 0.5, r: 0.0 },
            OdePoint { t_min: 1.0, c: 0.55, a: 0.45, r: 0.0 },
        ];
        let csv = format_points(&points, OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "t_min,c,a,r");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("1,0.550000"));
    }

    #[test]
    fn test_empty_schedule_text() {
        let text = format_offsets(&[], OutputFormat::Text).unwrap();
        assert!(text.contains("no tasks"));
    }

    #[test]
    fn test_eco_json_is_flat() {
        let eco = EcoImpactService::default().disposables_to_eco(1.0);
        let json = format_eco(1.0, &eco, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["plastic_g"], 15.0);
        assert_eq!(value["avoided_units"], 1.0);
    }
}
