//! Zembu CLI Application
//!
//! Checks every entry in a word list for domain availability via the
//! system `whois` command, paced to a bounded lookup rate, and saves the
//! results to a log file. This is a thin shell around zembu-lib: argument
//! parsing, option resolution, signal handling, and terminal output.

mod ui;

use clap::Parser;
use std::process;
use std::time::Duration;
use zembu_lib::{
    load_env_config, load_word_list, normalize_tlds, BatchRunner, CancelFlag, CheckConfig,
    ConfigManager, DefaultsConfig, DomainChecker, EnvConfig, OptionsSnapshot, ResultLogger,
    ZembuError,
};

/// Process exit code for fatal setup errors (unreadable or empty word
/// list, unwritable log target).
const EXIT_FATAL: i32 = 1;

/// Process exit code when the run was cancelled by the user.
const EXIT_CANCELLED: i32 = 2;

/// CLI arguments for zembu
#[derive(Parser, Debug)]
#[command(name = "zembu")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Checks all entries in a list of words for domain availability")]
#[command(
    long_about = "Checks all entries in a list of words for domain availability.\n\nWords are combined with each TLD and looked up through the system whois\ncommand at a bounded rate; the available domains are saved to a log file."
)]
pub struct Args {
    /// Path to the dictionary file to use. Must contain one word per line,
    /// or word;annotation;... lines for curated lists.
    #[arg(long = "dict", value_name = "FILE", help_heading = "Input")]
    pub dict: String,

    /// Top-level domains to check, e.g. "com,net" to check "<word>.com"
    /// and "<word>.net". (Default: "com")
    #[arg(long = "tlds", value_name = "LIST", help_heading = "Input")]
    pub tlds: Option<String>,

    /// Output every whois command we run instead of the progress bar.
    #[arg(long = "verbose", short = 'v', help_heading = "Output")]
    pub verbose: bool,

    /// File the list of available domain names is saved to.
    /// (Default: "zembu_output.log")
    #[arg(long = "log-file", value_name = "FILE", help_heading = "Output")]
    pub log_file: Option<String>,

    /// Maximum whois lookups per second. (Default: 1)
    #[arg(long = "rate", value_name = "N", help_heading = "Pacing")]
    pub rate: Option<u32>,

    /// Timeout for a single whois lookup, e.g. "15s" or "2m". (Default: "15s")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Pacing")]
    pub timeout: Option<String>,

    /// Retries before an undetermined lookup is written off as unknown.
    /// (Default: 0)
    #[arg(long = "retries", value_name = "N", help_heading = "Pacing")]
    pub retries: Option<u32>,

    /// Use a specific config file instead of automatic discovery.
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,
}

/// The effective options after merging CLI args, environment variables,
/// config files and built-in defaults.
#[derive(Debug, Clone)]
struct Resolved {
    dict: String,
    tlds: Vec<String>,
    verbose: bool,
    log_file: String,
    rate: u32,
    timeout: Duration,
    retries: u32,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Args::parse();
    match run(args).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("zembu: {}", e);
            process::exit(EXIT_FATAL);
        }
    }
}

/// Set up tracing output on stderr, filtered by the ZEMBU_LOG env var.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ZEMBU_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main checking logic. Returns the process exit code.
async fn run(args: Args) -> Result<i32, ZembuError> {
    // Merge config files, environment, and CLI args
    let manager = ConfigManager::new();
    let file_config = if let Some(path) = &args.config {
        manager.load_file(path)?
    } else if let Ok(path) = std::env::var("ZEMBU_CONFIG") {
        manager.load_file(path)?
    } else {
        manager.discover_and_load()?
    };
    let defaults = file_config.defaults.unwrap_or_default();
    let resolved = resolve_options(&args, load_env_config(), defaults)?;

    // Load the word list (fatal on unreadable or empty input)
    let words = load_word_list(&resolved.dict)?;

    // Ensure the log file is writable before we check 200,000 domains.
    let logger = ResultLogger::new(&resolved.log_file);
    logger.preflight()?;

    let snapshot = OptionsSnapshot {
        dict: resolved.dict.clone(),
        tlds: resolved.tlds.clone(),
        log_file: resolved.log_file.clone(),
        verbose: resolved.verbose,
        rate_per_second: resolved.rate,
        timeout_secs: resolved.timeout.as_secs(),
        retries: resolved.retries,
    };
    let runner = BatchRunner::new(words, resolved.tlds.clone(), snapshot);

    ui::print_intro(runner.total(), &resolved.log_file);

    let checker = DomainChecker::with_config(
        CheckConfig::default()
            .with_rate(resolved.rate)
            .with_timeout(resolved.timeout)
            .with_retries(resolved.retries),
    );

    // Catch the first interrupt and let the runner wind down cooperatively;
    // the log write below happens on this task, never mid-signal.
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let progress = ui::ProgressLine::new();
    let verbose = resolved.verbose;
    let summary = runner
        .run(&checker, &cancel, |event| {
            if verbose {
                ui::print_verbose_check(event);
                Ok(())
            } else {
                progress.update(event)
            }
        })
        .await;
    progress.finish();

    if summary.cancelled {
        eprintln!("Canceled.");
    }

    ui::print_available(&summary);
    println!("Saving output to {}...", resolved.log_file);
    logger.write(&summary)?;
    ui::print_summary(&summary);
    println!("Saved.");

    Ok(if summary.cancelled {
        EXIT_CANCELLED
    } else {
        0
    })
}

/// Merge CLI args, environment, and config-file defaults into the
/// effective options. Precedence: CLI > environment > config file >
/// built-in defaults.
fn resolve_options(
    args: &Args,
    env: EnvConfig,
    defaults: DefaultsConfig,
) -> Result<Resolved, ZembuError> {
    let tlds = effective_tlds(args.tlds.as_deref(), env.tlds, defaults.tlds);

    let rate = args
        .rate
        .or(env.rate_per_second)
        .or(defaults.rate_per_second)
        .unwrap_or(1);
    if rate == 0 {
        return Err(ZembuError::config("rate must be at least 1"));
    }

    let timeout_str = args
        .timeout
        .clone()
        .or(env.timeout)
        .or(defaults.timeout)
        .unwrap_or_else(|| "15s".to_string());
    let timeout = Duration::from_secs(parse_timeout_string(&timeout_str)?);

    let retries = args.retries.or(env.retries).or(defaults.retries).unwrap_or(0);

    let log_file = args
        .log_file
        .clone()
        .or(env.log_file)
        .or(defaults.log_file)
        .unwrap_or_else(|| "zembu_output.log".to_string());

    let verbose = args.verbose || defaults.verbose.unwrap_or(false);

    Ok(Resolved {
        dict: args.dict.clone(),
        tlds,
        verbose,
        log_file,
        rate,
        timeout,
        retries,
    })
}

/// Pick the TLD list by precedence, falling back to "com" when every
/// source is empty.
fn effective_tlds(
    cli: Option<&str>,
    env: Option<Vec<String>>,
    file: Option<Vec<String>>,
) -> Vec<String> {
    let tlds = if let Some(raw) = cli {
        normalize_tlds(raw)
    } else if let Some(env_tlds) = env {
        env_tlds
    } else if let Some(file_tlds) = file {
        file_tlds
            .iter()
            .flat_map(|tld| normalize_tlds(tld))
            .collect()
    } else {
        Vec::new()
    };

    if tlds.is_empty() {
        vec!["com".to_string()]
    } else {
        tlds
    }
}

/// Parse a timeout string like "15s", "30s", "2m" into seconds.
fn parse_timeout_string(timeout_str: &str) -> Result<u64, ZembuError> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let parsed = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    };

    match parsed {
        Some(0) | None => Err(ZembuError::config(format!(
            "invalid timeout '{}'",
            timeout_str
        ))),
        Some(secs) => Ok(secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> Args {
        Args {
            dict: "words.txt".to_string(),
            tlds: None,
            verbose: false,
            log_file: None,
            rate: None,
            timeout: None,
            retries: None,
            config: None,
        }
    }

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("15s").unwrap(), 15);
        assert_eq!(parse_timeout_string("2m").unwrap(), 120);
        assert_eq!(parse_timeout_string("45").unwrap(), 45);
        assert_eq!(parse_timeout_string(" 10S ").unwrap(), 10);

        assert!(parse_timeout_string("0s").is_err());
        assert!(parse_timeout_string("fast").is_err());
        assert!(parse_timeout_string("").is_err());
    }

    #[test]
    fn test_effective_tlds_precedence() {
        let cli = Some("org,io");
        let env = Some(vec!["net".to_string()]);
        let file = Some(vec!["dev".to_string()]);

        assert_eq!(
            effective_tlds(cli, env.clone(), file.clone()),
            vec!["org", "io"]
        );
        assert_eq!(effective_tlds(None, env, file.clone()), vec!["net"]);
        assert_eq!(effective_tlds(None, None, file), vec!["dev"]);
        assert_eq!(effective_tlds(None, None, None), vec!["com"]);
    }

    #[test]
    fn test_effective_tlds_empty_sources_fall_back_to_com() {
        assert_eq!(effective_tlds(Some(",, ,"), None, None), vec!["com"]);
        assert_eq!(effective_tlds(None, Some(vec![]), None), vec!["com"]);
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved =
            resolve_options(&bare_args(), EnvConfig::default(), DefaultsConfig::default())
                .unwrap();

        assert_eq!(resolved.tlds, vec!["com"]);
        assert_eq!(resolved.rate, 1);
        assert_eq!(resolved.timeout, Duration::from_secs(15));
        assert_eq!(resolved.retries, 0);
        assert_eq!(resolved.log_file, "zembu_output.log");
        assert!(!resolved.verbose);
    }

    #[test]
    fn test_resolve_cli_beats_env_and_file() {
        let mut args = bare_args();
        args.rate = Some(5);
        args.log_file = Some("cli.log".to_string());

        let env = EnvConfig {
            rate_per_second: Some(3),
            log_file: Some("env.log".to_string()),
            ..Default::default()
        };
        let defaults = DefaultsConfig {
            rate_per_second: Some(2),
            log_file: Some("file.log".to_string()),
            ..Default::default()
        };

        let resolved = resolve_options(&args, env, defaults).unwrap();
        assert_eq!(resolved.rate, 5);
        assert_eq!(resolved.log_file, "cli.log");
    }

    #[test]
    fn test_resolve_env_beats_file() {
        let env = EnvConfig {
            retries: Some(2),
            timeout: Some("30s".to_string()),
            ..Default::default()
        };
        let defaults = DefaultsConfig {
            retries: Some(4),
            timeout: Some("1m".to_string()),
            verbose: Some(true),
            ..Default::default()
        };

        let resolved = resolve_options(&bare_args(), env, defaults).unwrap();
        assert_eq!(resolved.retries, 2);
        assert_eq!(resolved.timeout, Duration::from_secs(30));
        assert!(resolved.verbose); // file default still applies where nothing overrides
    }

    #[test]
    fn test_resolve_rejects_zero_rate() {
        let env = EnvConfig {
            rate_per_second: Some(0),
            ..Default::default()
        };
        let err = resolve_options(&bare_args(), env, DefaultsConfig::default()).unwrap_err();
        assert!(matches!(err, ZembuError::ConfigError { .. }));
    }
}
