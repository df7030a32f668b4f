use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;

use trustscore::config::{load_config, validate_config, write_default_config};
use trustscore::credentials::resolve_api_key;
use trustscore::output;
use trustscore::{compute_report, handle_request, HttpProvider, ScoreError, ScoreRequest};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_UPSTREAM: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_NO_REVIEWS: i32 = 5;

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Domain of the business to score, e.g. example.com
    domain: Option<String>,

    /// Maximum number of counted reviews (defaults to default_limit from config)
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Print the response payload as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the trust score for a domain (default if no subcommand)
    Score(ScoreArgs),
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "trustscore")]
#[command(about = "Time-decayed trust score for a business domain", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/trustscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    score: ScoreArgs,
}

fn exit_code(error: &ScoreError) -> i32 {
    match error {
        ScoreError::InvalidArgument(_) => EXIT_CONFIG,
        ScoreError::NotFound(_) => EXIT_NOT_FOUND,
        ScoreError::Upstream(_) => EXIT_UPSTREAM,
        ScoreError::DegenerateInput => EXIT_NO_REVIEWS,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(EXIT_UPSTREAM);
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let args = match cli.command {
        Some(Commands::Init { force }) => {
            match write_default_config(config_path, force) {
                Ok(path) => println!("Wrote default config to {}", path.display()),
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Some(Commands::Score(args)) => args,
        None => cli.score,
    };

    let Some(domain) = args.domain else {
        eprintln!("Missing domain. Usage: trustscore <DOMAIN> [--limit N]");
        std::process::exit(EXIT_CONFIG);
    };

    let start_time = Instant::now();

    // Load config
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let api_key = match resolve_api_key(&config) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    let provider = match HttpProvider::from_config(&config, &api_key) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to create review provider client: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let limit = args.limit.or(Some(config.default_limit));

    if args.json {
        let request = ScoreRequest { domain, limit };
        let response = match handle_request(&provider, &request).await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(exit_code(&e));
            }
        };
        match output::format_json(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize response: {}", e);
                std::process::exit(EXIT_UPSTREAM);
            }
        }
        if cli.verbose {
            eprintln!();
            eprintln!("Scored {} in {:?}", response.domain, start_time.elapsed());
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let report = match compute_report(&provider, &domain, limit).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(exit_code(&e));
        }
    };

    let use_colors = output::should_use_colors();
    println!(
        "{}",
        output::format_score_line(domain.trim(), &report.score, use_colors)
    );
    if cli.verbose {
        println!("{}", output::format_breakdown(&report.breakdown));
        eprintln!();
        eprintln!(
            "Scored {} reviews in {:?}",
            report.breakdown.reviews_counted,
            start_time.elapsed()
        );
    }

    std::process::exit(EXIT_SUCCESS);
}
