//! MindGuard CLI - Command-line interface for the MindGuard engines
//!
//! Commands:
//! - predict: Assess one day of behavioral metrics
//! - analyze: Classify emotions in a journal entry
//! - batch: Store a series of entries and report history with a trend summary
//! - doctor: Diagnose configuration

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use mindguard::config::{EmotionConfig, ENV_API_KEY, ENV_TIMEOUT_SECS};
use mindguard::encoder::{ReportBody, ReportEncoder};
use mindguard::{BehavioralMetrics, EmotionAnalyzer, MindGuardError, Processor};
use mindguard::{MINDGUARD_VERSION, PRODUCER_NAME};

/// MindGuard - risk scoring and emotion inference for wellness self-monitoring
#[derive(Parser)]
#[command(name = "mindguard")]
#[command(version = MINDGUARD_VERSION)]
#[command(about = "Assess daily wellness signals and journal entries", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "json-pretty")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess one day of behavioral metrics
    Predict {
        /// JSON file with the metrics (use - for stdin)
        #[arg(short, long, conflicts_with = "sleep_hours")]
        input: Option<PathBuf>,

        #[command(flatten)]
        metrics: MetricArgs,
    },

    /// Classify emotions in a journal entry
    Analyze {
        /// Journal text
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// File containing the journal text (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Never call the remote classifier
        #[arg(long)]
        offline: bool,

        /// Remote model identifier (overrides OPENAI_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Remote call timeout in seconds (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },

    /// Store a series of entries and report their history and trend
    Batch {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Number of most recent entries to report
        #[arg(long, default_value = "7")]
        latest: usize,
    },

    /// Diagnose configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct MetricArgs {
    /// Hours slept (0-24)
    #[arg(long)]
    sleep_hours: Option<f64>,

    /// Mood score (1-10)
    #[arg(long)]
    mood: Option<u8>,

    /// Messages sent
    #[arg(long)]
    messages: Option<u32>,

    /// Step count
    #[arg(long)]
    steps: Option<u32>,

    /// App usage in hours (0-24)
    #[arg(long)]
    app_usage_hours: Option<f64>,
}

impl MetricArgs {
    fn into_metrics(self) -> Result<BehavioralMetrics, CliFailure> {
        match (
            self.sleep_hours,
            self.mood,
            self.messages,
            self.steps,
            self.app_usage_hours,
        ) {
            (Some(sleep), Some(mood), Some(messages), Some(steps), Some(usage)) => {
                Ok(BehavioralMetrics::new(sleep, mood, messages, steps, usage))
            }
            _ => Err(CliFailure::MissingMetrics),
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one entry per line)
    Ndjson,
    /// JSON array of entries
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliFailure> {
    let format = cli.format;
    match cli.command {
        Commands::Predict { input, metrics } => cmd_predict(input.as_deref(), metrics, &format),

        Commands::Analyze {
            text,
            input,
            offline,
            model,
            timeout_secs,
        } => cmd_analyze(text, input.as_deref(), offline, model, timeout_secs, &format),

        Commands::Batch {
            input,
            input_format,
            latest,
        } => cmd_batch(&input, input_format, latest, &format),

        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn cmd_predict(
    input: Option<&Path>,
    metrics: MetricArgs,
    format: &OutputFormat,
) -> Result<(), CliFailure> {
    let metrics = match input {
        Some(path) => serde_json::from_str::<BehavioralMetrics>(&read_input(path)?)?,
        None => metrics.into_metrics()?,
    };

    let assessment = Processor::new().predict(&metrics)?;
    emit(ReportBody::Risk(assessment), format)
}

fn cmd_analyze(
    text: Option<String>,
    input: Option<&Path>,
    offline: bool,
    model: Option<String>,
    timeout_secs: Option<u64>,
    format: &OutputFormat,
) -> Result<(), CliFailure> {
    let text = match (text, input) {
        (Some(text), _) => text,
        (None, Some(path)) => read_input(path)?,
        (None, None) => return Err(CliFailure::MissingText),
    };

    let analyzer = if offline {
        EmotionAnalyzer::offline()
    } else {
        let mut config = EmotionConfig::from_env()?;
        if let Some(model) = model {
            config.model = model;
        }
        if let Some(secs) = timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        EmotionAnalyzer::new(&config)
    };

    let result = Processor::with_analyzer(analyzer).analyze_text(text.trim_end_matches('\n'))?;
    emit(ReportBody::Emotion(result), format)
}

fn cmd_batch(
    input: &Path,
    input_format: InputFormat,
    latest: usize,
    format: &OutputFormat,
) -> Result<(), CliFailure> {
    let input_data = read_input(input)?;

    let records: Vec<BehavioralMetrics> = match input_format {
        InputFormat::Ndjson => input_data
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .map_err(|e| CliFailure::ParseError(format!("line {}: {}", i + 1, e)))
            })
            .collect::<Result<_, _>>()?,
        InputFormat::Json => serde_json::from_str(&input_data)?,
    };

    if records.is_empty() {
        return Err(CliFailure::NoEntries);
    }

    let processor = Processor::new().with_latest_window(latest);
    for (i, metrics) in records.into_iter().enumerate() {
        processor
            .submit(metrics)
            .map_err(|e| CliFailure::InvalidEntry(i + 1, e))?;
    }

    emit(
        ReportBody::History {
            entries: processor.history(),
            trend: processor.trend(),
        },
        format,
    )
}

fn cmd_doctor(json: bool) -> Result<(), CliFailure> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("MindGuard version {}", MINDGUARD_VERSION),
    });

    match EmotionConfig::from_env() {
        Ok(config) => {
            checks.push(if config.remote_enabled() {
                DoctorCheck {
                    name: "remote_classifier".to_string(),
                    status: CheckStatus::Ok,
                    message: format!(
                        "{} set; model {} at {}",
                        ENV_API_KEY,
                        config.model,
                        config.completions_url()
                    ),
                }
            } else {
                DoctorCheck {
                    name: "remote_classifier".to_string(),
                    status: CheckStatus::Warning,
                    message: format!("{} not set; keyword heuristic only", ENV_API_KEY),
                }
            });
            checks.push(DoctorCheck {
                name: "remote_timeout".to_string(),
                status: CheckStatus::Ok,
                message: format!("{}s", config.timeout.as_secs()),
            });
        }
        Err(e) => checks.push(DoctorCheck {
            name: "configuration".to_string(),
            status: CheckStatus::Error,
            message: format!("{} (check {})", e, ENV_TIMEOUT_SECS),
        }),
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (batch input ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: MINDGUARD_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("MindGuard Doctor Report");
        println!("=======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CliFailure::DoctorFailed)
    } else {
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String, CliFailure> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn emit(body: ReportBody, format: &OutputFormat) -> Result<(), CliFailure> {
    let encoder = ReportEncoder::new();
    let output = match format {
        OutputFormat::Json => encoder.encode_to_json(body)?,
        OutputFormat::JsonPretty => encoder.encode_to_json_pretty(body)?,
    };
    println!("{}", output);
    Ok(())
}

// Error types

#[derive(Debug)]
enum CliFailure {
    Io(io::Error),
    Engine(MindGuardError),
    Json(serde_json::Error),
    MissingMetrics,
    MissingText,
    NoEntries,
    DoctorFailed,
    InvalidEntry(usize, MindGuardError),
    ParseError(String),
}

impl From<io::Error> for CliFailure {
    fn from(e: io::Error) -> Self {
        CliFailure::Io(e)
    }
}

impl From<MindGuardError> for CliFailure {
    fn from(e: MindGuardError) -> Self {
        CliFailure::Engine(e)
    }
}

impl From<serde_json::Error> for CliFailure {
    fn from(e: serde_json::Error) -> Self {
        CliFailure::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CliFailure> for CliError {
    fn from(e: CliFailure) -> Self {
        match e {
            CliFailure::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CliFailure::Engine(MindGuardError::Validation(e)) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check value ranges: hours 0-24, mood 1-10, journal 10-2000 chars".to_string()),
            },
            CliFailure::Engine(MindGuardError::NoDataAvailable) => CliError {
                code: "NO_DATA".to_string(),
                message: MindGuardError::NoDataAvailable.to_string(),
                hint: Some("Submit data first".to_string()),
            },
            CliFailure::Engine(MindGuardError::Config(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'mindguard doctor' for details".to_string()),
            },
            CliFailure::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            CliFailure::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CliFailure::MissingMetrics => CliError {
                code: "MISSING_METRICS".to_string(),
                message: "All five metrics are required".to_string(),
                hint: Some(
                    "Pass --sleep-hours, --mood, --messages, --steps and --app-usage-hours, or --input"
                        .to_string(),
                ),
            },
            CliFailure::MissingText => CliError {
                code: "MISSING_TEXT".to_string(),
                message: "No journal text given".to_string(),
                hint: Some("Pass --text or --input".to_string()),
            },
            CliFailure::NoEntries => CliError {
                code: "NO_ENTRIES".to_string(),
                message: "No entries found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CliFailure::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            CliFailure::InvalidEntry(index, e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: format!("entry {}: {}", index, e),
                hint: Some("Fix the entry and retry".to_string()),
            },
            CliFailure::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_timeout(args: &[&str]) -> Result<Option<u64>, clap::Error> {
        let cli = Cli::try_parse_from(args)?;
        match cli.command {
            Commands::Analyze { timeout_secs, .. } => Ok(timeout_secs),
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_timeout_flag_accepts_positive() {
        let secs = analyze_timeout(&[
            "mindguard", "analyze", "--text", "hello there", "--timeout-secs", "3",
        ]);
        assert_eq!(secs.unwrap(), Some(3));
    }

    #[test]
    fn test_timeout_flag_rejects_zero() {
        let err = analyze_timeout(&[
            "mindguard", "analyze", "--text", "hello there", "--timeout-secs", "0",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
