//! Degree Window command line driver
//!
//! Streams edges from a file, or from a seeded synthetic generator, through
//! the window assigner and prints the resulting windows.

use clap::{Arg, ArgAction, ArgMatches, Command};
use degree_window::core::config::{Config, LambdaScope};
use degree_window::stream::{read_edges, SyntheticStream};
use degree_window::{Error, Result, StreamProcessor};
use tracing::info;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("degree-window")
        .version(degree_window::VERSION)
        .about("Degree-weighted adaptive window assignment for streaming graph edges.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help(
                    "Edge file, one `v u label timestamp` record per line \
                     (default: synthetic stream)",
                )
        )
        .arg(
            Arg::new("generator")
                .long("generator")
                .value_name("KIND")
                .help("Synthetic stream shape (simulation, dataset)")
        )
        .arg(
            Arg::new("edges")
                .short('n')
                .long("edges")
                .value_name("N")
                .help("Number of synthetic edges")
        )
        .arg(
            Arg::new("max-vertex")
                .long("max-vertex")
                .value_name("N")
                .help("Largest synthetic vertex number")
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .help("Seed for the synthetic stream")
        )
        .arg(Arg::new("alpha").long("alpha").value_name("X").help("Degree-weight exponent"))
        .arg(Arg::new("lambda").long("lambda").value_name("X").help("Base expiration amplitude"))
        .arg(Arg::new("gamma").long("gamma").value_name("X").help("Decay rate"))
        .arg(Arg::new("beta").long("beta").value_name("X").help("Amplitude correction sensitivity"))
        .arg(
            Arg::new("lambda-scope")
                .long("lambda-scope")
                .value_name("SCOPE")
                .help("Reach of amplitude corrections (per-edge, global, per-window)")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json", "none"])
                .help("Window report format")
        )
        .arg(
            Arg::new("print-assignments")
                .long("print-assignments")
                .action(ArgAction::SetTrue)
                .help("Print every edge with its expiration time")
        )
        .arg(
            Arg::new("print-graph")
                .long("print-graph")
                .action(ArgAction::SetTrue)
                .help("Print the final snapshot graph")
        )
        .get_matches();

    // Load configuration
    let mut config = if let Some(config_path) = matches.get_one::<String>("config") {
        let mut config = Config::from_file(config_path)?;
        config.apply_env_overrides()?;
        config
    } else {
        Config::load()?
    };

    // Apply CLI overrides
    apply_cli_overrides(&mut config, &matches)?;
    config.validate()?;

    degree_window::init_logging(&config.logging)?;
    info!(
        alpha = config.decay.alpha,
        lambda_base = config.decay.lambda_base,
        gamma = config.decay.gamma,
        beta = config.decay.beta,
        scope = ?config.decay.lambda_scope,
        "Window policy configured"
    );

    let mut processor = StreamProcessor::new(config.decay.clone())?;
    let print_assignments = matches.get_flag("print-assignments");
    let sink = |a: &degree_window::Assignment| {
        if print_assignments {
            println!("Processed {}, Expiration Time: {:.2}", a.edge, a.expiration);
        }
    };

    let summary = match &config.stream.input {
        Some(path) => {
            info!("Reading edges from {:?}", path);
            processor.run(read_edges(path)?, sink)?
        }
        None => {
            let stream = SyntheticStream::from_config(&config.stream)?;
            info!(edges = stream.len(), "Generating synthetic stream");
            processor.run(stream.map(Ok), sink)?
        }
    };

    match matches.get_one::<String>("report").map(String::as_str) {
        Some("json") => println!("{}", processor.report().to_json()?),
        Some("none") => {}
        _ => {
            println!("\nFinal State of Windows:");
            print!("{}", processor.report());
        }
    }

    if matches.get_flag("print-graph") {
        println!("\nFinal Snapshot Graph:");
        print!("{}", processor.snapshot());
    }

    info!(
        adjustments = summary.lambda_adjustments,
        effective_lambda = summary.effective_lambda,
        "Done"
    );
    Ok(())
}

/// Apply command line argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    if let Some(input) = matches.get_one::<String>("input") {
        config.stream.input = Some(input.into());
    }

    if let Some(kind) = matches.get_one::<String>("generator") {
        config.stream.generator = kind.parse()?;
    }

    if let Some(edges) = matches.get_one::<String>("edges") {
        config.stream.edges = parse_arg("edge count", edges)?;
    }

    if let Some(max_vertex) = matches.get_one::<String>("max-vertex") {
        config.stream.max_vertex = parse_arg("max vertex", max_vertex)?;
    }

    if let Some(seed) = matches.get_one::<String>("seed") {
        config.stream.seed = Some(parse_arg("seed", seed)?);
    }

    if let Some(alpha) = matches.get_one::<String>("alpha") {
        config.decay.alpha = parse_arg("alpha", alpha)?;
    }

    if let Some(lambda) = matches.get_one::<String>("lambda") {
        config.decay.lambda_base = parse_arg("lambda", lambda)?;
    }

    if let Some(gamma) = matches.get_one::<String>("gamma") {
        config.decay.gamma = parse_arg("gamma", gamma)?;
    }

    if let Some(beta) = matches.get_one::<String>("beta") {
        config.decay.beta = parse_arg("beta", beta)?;
    }

    if let Some(scope) = matches.get_one::<String>("lambda-scope") {
        config.decay.lambda_scope = scope.parse::<LambdaScope>()?;
    }

    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    Ok(())
}

fn parse_arg<T>(what: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| Error::config(format!("Invalid {}: {}", what, e)))
}
