#[macro_use]
extern crate serde_derive;

use anum_core::apply::ApplyInfo;
use anum_core::io::load_records;
use anum_core::trace::DenseProof;
use anum_core::*;
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::fs::File;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod batch;
mod configuration;
mod report;

use configuration::Configuration;

fn init_logging(verbosity: u64) -> Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Initializing logging: {}", e))
}

fn parse_arg(matches: &ArgMatches, name: &str) -> Result<Term> {
    let code = matches
        .value_of(name)
        .ok_or_else(|| anyhow!("Missing {}", name))?;
    parse_formula(code).with_context(|| format!("Parsing {} '{}'", name, code))
}

fn prove(configuration: &Configuration, matches: &ArgMatches) -> Result<bool> {
    let left = parse_arg(matches, "LEFT")?;
    let right = parse_arg(matches, "RIGHT")?;
    let rules = RuleSet::standard();

    info!("Proving {} ≡ {}", left, right);
    let result = Prover::new(&rules, configuration.budget()).prove(&left, &right)?;
    println!("{} ≡ {}: {}", left, right, result.state);
    if let Some(proof) = result.state.proof() {
        if !proof.is_empty() {
            proof.print();
        }
    }
    println!("\n{}", result.statistics);

    if let Some(filename) = matches.value_of("trace") {
        let file = File::create(filename).with_context(|| format!("Creating {}", filename))?;
        DenseProof::from_state(&left, &right, &result.state).write_yaml(file)?;
        debug!("Dumped proof to {}", filename);
    }
    Ok(result.state.is_proved())
}

fn normalize_command(configuration: &Configuration, matches: &ArgMatches) -> Result<bool> {
    let term = parse_arg(matches, "FORMULA")?;
    let rules = RuleSet::standard();
    let result = normalize(&rules, &term, configuration.normalize_steps)?;

    if !result.steps.is_empty() {
        ApplyInfo::print_header();
        for step in result.steps.iter() {
            step.print();
        }
        println!();
    }
    println!("{} => {}", term, result.term);
    if !result.reached_fixpoint {
        println!(
            "No fixed point within {} steps",
            configuration.normalize_steps
        );
    }
    Ok(result.reached_fixpoint)
}

fn convert(matches: &ArgMatches) -> Result<bool> {
    let code = matches
        .value_of("FORMULA")
        .ok_or_else(|| anyhow!("Missing FORMULA"))?;
    let term = parse_formula(code).with_context(|| format!("Parsing '{}'", code))?;
    let target = match matches.value_of("to") {
        Some("symbolic") => Notation::Symbolic,
        Some("abit") => Notation::Abit,
        Some(other) => return Err(anyhow!("Unknown notation {}", other)),
        None => match detect_notation(code) {
            Notation::Symbolic => Notation::Abit,
            Notation::Abit => Notation::Symbolic,
        },
    };
    let converted = match target {
        Notation::Symbolic => print_symbolic(&term),
        Notation::Abit => print_abit(&term)?,
    };
    println!("{}", converted);
    Ok(true)
}

fn run_batch(configuration: &Configuration, matches: &ArgMatches) -> Result<bool> {
    let filename = matches
        .value_of("FILE")
        .ok_or_else(|| anyhow!("Missing FILE"))?;
    let records = load_records(filename).with_context(|| format!("Loading {}", filename))?;
    if let Some(threads) = configuration.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let rules = RuleSet::standard();
    let outcomes = batch::evaluate(&rules, configuration.budget(), &records)?;

    report::print_header();
    for outcome in outcomes.iter() {
        report::print_outcome(outcome);
        if matches.is_present("trace") {
            if let Some(proof) = outcome.state.proof() {
                proof.print();
            }
        }
    }
    println!("\n{}", report::summary_line(&outcomes));

    if let Some(filename) = matches.value_of("report") {
        let file = File::create(filename).with_context(|| format!("Creating {}", filename))?;
        report::BatchReport::new(&outcomes).write_yaml(file)?;
        info!("Dumped report to {}", filename);
    }
    Ok(batch::passed_count(&outcomes) == outcomes.len())
}

fn run(matches: &ArgMatches) -> Result<bool> {
    let configuration = match matches.value_of("config") {
        Some(filename) => Configuration::load(filename)?,
        None => Configuration::default(),
    }
    .override_with(matches)?;
    debug!("Using {:?}", configuration);

    match matches.subcommand() {
        ("prove", Some(sub)) => prove(&configuration, sub),
        ("normalize", Some(sub)) => normalize_command(&configuration, sub),
        ("convert", Some(sub)) => convert(sub),
        ("batch", Some(sub)) => run_batch(&configuration, sub),
        (name, _) => Err(anyhow!("Unknown command '{}'", name)),
    }
}

fn main() {
    let matches = App::new("anum")
        .version("0.1.0")
        .about("Equivalence prover for the link algebra")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .takes_value(true)
                .help("Yaml file with the search budget"),
        )
        .arg(
            Arg::with_name("max-steps")
                .long("max-steps")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max-nodes")
                .long("max-nodes")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout-ms")
                .long("timeout-ms")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increases the log level, RUST_LOG takes precedence"),
        )
        .subcommand(
            SubCommand::with_name("prove")
                .about("Searches a proof of LEFT ≡ RIGHT")
                .arg(Arg::with_name("LEFT").required(true).index(1))
                .arg(Arg::with_name("RIGHT").required(true).index(2))
                .arg(
                    Arg::with_name("trace")
                        .long("trace")
                        .takes_value(true)
                        .help("Dumps the proof as yaml"),
                ),
        )
        .subcommand(
            SubCommand::with_name("normalize")
                .about("Rewrites with the directional axioms until a fixed point")
                .arg(Arg::with_name("FORMULA").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("convert")
                .about("Converts between symbolic and abit notation")
                .arg(Arg::with_name("FORMULA").required(true).index(1))
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .takes_value(true)
                        .possible_values(&["symbolic", "abit"]),
                ),
        )
        .subcommand(
            SubCommand::with_name("batch")
                .about("Checks every record of a formula file")
                .arg(Arg::with_name("FILE").required(true).index(1))
                .arg(
                    Arg::with_name("report")
                        .long("report")
                        .takes_value(true)
                        .help("Dumps all verdicts and proofs as yaml"),
                )
                .arg(
                    Arg::with_name("trace")
                        .long("trace")
                        .help("Prints the proof of each record"),
                ),
        )
        .get_matches();

    if let Err(error) = init_logging(matches.occurrences_of("verbose")) {
        eprintln!("{:#}", error);
    }

    match run(&matches) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(2);
        }
    }
}
