use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};

use boletim::config::{self, Config};
use boletim::error::{ExitCode, Field, UsageError};
use boletim::models::{AggregationRequest, Evaluation};
use boletim::scheme::{self, Period, SchoolLevel, Scheme};
use boletim::{engine, input, logging, report};

#[derive(Parser)]
#[command(name = "boletim", version)]
#[command(about = "Report-card average calculator with pass/fail verdict", long_about = None)]
struct Cli {
    /// Config file (defaults to ./boletim.toml when present)
    #[arg(long, global = true, env = "BOLETIM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level or filter directive (e.g. "trace", "boletim=debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Output {
    /// Override the pass threshold from the config
    #[arg(long)]
    threshold: Option<f64>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Also write a markdown report to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List school levels and evaluation periods
    Schemes,
    /// Compute the average of grades typed on the command line
    #[command(group(
        ArgGroup::new("scheme")
            .args(["level", "period"])
            .required(true)
            .multiple(false)
    ))]
    Calc {
        /// School level
        #[arg(long, value_enum)]
        level: Option<SchoolLevel>,
        /// Evaluation period
        #[arg(long, value_enum)]
        period: Option<Period>,
        /// Grades in scheme order (repeat the flag or separate with , or ;)
        #[arg(long, num_args = 1.., required = true, allow_negative_numbers = true)]
        grades: Vec<String>,
        /// Weights in scheme order, used with --weighted
        #[arg(long, num_args = 1.., allow_negative_numbers = true)]
        weights: Vec<String>,
        /// Use custom weights instead of equal weights
        #[arg(long)]
        weighted: bool,
        #[command(flatten)]
        output: Output,
    },
    /// Compute the average of grades read from a CSV file (label,grade[,weight])
    Import {
        #[arg(long)]
        csv: PathBuf,
        /// Require the row count of this level or period
        #[arg(long)]
        scheme: Option<String>,
        /// Use the weight column instead of equal weights
        #[arg(long)]
        weighted: bool,
        #[command(flatten)]
        output: Output,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logging is diagnostic only; the calculation still runs without it
    if let Err(err) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: failed to initialize logging: {err}");
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            match err.downcast_ref::<UsageError>() {
                Some(usage) => usage.exit_code(),
                None => ExitCode::Failure,
            }
        }
    };

    std::process::exit(code.into());
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Schemes => {
            for scheme in Scheme::ALL {
                println!(
                    "{} ({}): {} entries",
                    scheme.key(),
                    scheme.display_name(),
                    scheme.entry_count(&config)
                );
                println!("  {}", scheme.labels(&config).join(", "));
            }
            Ok(ExitCode::Success)
        }
        Commands::Calc {
            level,
            period,
            grades,
            weights,
            weighted,
            output,
        } => {
            let scheme = match (level, period) {
                (Some(level), None) => Scheme::Level(level),
                (None, Some(period)) => Scheme::Period(period),
                _ => {
                    return Err(UsageError::Other(
                        "exactly one of --level or --period is required".to_string(),
                    )
                    .into())
                }
            };
            let threshold = resolve_threshold(&config, output.threshold)?;
            let weights = input::split_values(&weights);
            if !weighted && !weights.is_empty() {
                tracing::warn!("--weights given without --weighted; using equal weights");
            }

            let request = scheme::build_request(
                scheme,
                &config,
                &input::split_values(&grades),
                &weights,
                weighted,
                threshold,
            )?;
            submit(Some(scheme.display_name()), &request, &output)
        }
        Commands::Import {
            csv,
            scheme,
            weighted,
            output,
        } => {
            let scheme = scheme.map(|value| value.parse::<Scheme>()).transpose()?;
            let threshold = resolve_threshold(&config, output.threshold)?;
            let entries = input::import_csv(&csv)?;

            if let Some(scheme) = scheme {
                let expected = scheme.entry_count(&config);
                if entries.len() != expected {
                    return Err(UsageError::EntryCountMismatch {
                        scheme: scheme.display_name().to_string(),
                        field: Field::Grade,
                        expected,
                        actual: entries.len(),
                    }
                    .into());
                }
            }

            let request = AggregationRequest::new(entries, weighted).with_threshold(threshold);
            submit(scheme.map(|s| s.display_name()), &request, &output)
        }
    }
}

fn resolve_threshold(config: &Config, flag: Option<f64>) -> anyhow::Result<f64> {
    match flag {
        Some(threshold) => {
            config::validate_threshold(threshold)
                .map_err(|err| UsageError::Other(err.to_string()))?;
            Ok(threshold)
        }
        None => Ok(config.pass_threshold),
    }
}

fn submit(
    scheme: Option<&str>,
    request: &AggregationRequest,
    output: &Output,
) -> anyhow::Result<ExitCode> {
    let Evaluation { entries, result } = match engine::evaluate(request) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            eprintln!("{}", report::error_message(&err));
            return Ok(err.exit_code());
        }
    };

    if output.json {
        println!("{}", report::build_json(scheme, &entries, &result)?);
    } else {
        println!("{}", report::verdict_message(&result));
    }

    if let Some(out) = &output.out {
        let today = chrono::Local::now().date_naive();
        write_report(out, &report::build_report(scheme, today, &entries, &result))?;
        if !output.json {
            println!("Report written to {}.", out.display());
        }
    }

    Ok(ExitCode::Success)
}

fn write_report(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
