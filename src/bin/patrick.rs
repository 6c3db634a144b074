//! Patrick Logic Minimizer - Command Line Interface
//!
//! ```text
//! patrick --vars 3 --dc 2,6 F1=1,3,5 F2=3,5,7
//! ```

use clap::{ArgAction, Parser};
use patrick_logic::{
    Function, Minimizer, MinimizerConfig, MultiFunctionResult, SingleFunctionResult,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "patrick")]
#[command(about = "Exact two-level logic minimizer (Quine-McCluskey + Patrick's method)", long_about = None)]
#[command(version)]
struct Args {
    /// Functions as NAME=m1,m2,... (a bare list is named F)
    #[arg(value_name = "FUNCTION", required = true)]
    functions: Vec<String>,

    /// Number of input variables
    #[arg(short = 'n', long = "vars")]
    num_vars: usize,

    /// Variable names, most significant first
    #[arg(long = "names", value_delimiter = ',')]
    names: Vec<String>,

    /// Don't-care minterms shared by every function
    #[arg(short = 'd', long = "dc", value_delimiter = ',')]
    dont_cares: Vec<u32>,

    /// Largest candidate count searched by subset enumeration
    #[arg(long = "exhaustive-limit", default_value_t = 20)]
    exhaustive_limit: usize,

    /// Largest registry size searched by subset enumeration in joint mode
    #[arg(long = "joint-limit", default_value_t = 20)]
    joint_limit: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn parse_function(spec: &str) -> Result<Function, String> {
    let (name, list) = match spec.split_once('=') {
        Some((name, list)) => (name.trim(), list),
        None => ("F", spec),
    };
    if name.is_empty() {
        return Err(format!("missing function name in '{}'", spec));
    }
    let minterms = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|e| format!("invalid minterm '{}' in '{}': {}", s, spec, e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Function::new(name, &minterms))
}

fn print_single(name: &str, result: &SingleFunctionResult) {
    let vars = &result.variables;
    println!(
        "Prime implicants: {}",
        join(result.prime_implicants.iter().map(|pi| pi.to_algebraic(vars)))
    );
    println!(
        "Essential: {}",
        join(result.essentials.iter().map(|pi| pi.to_algebraic(vars)))
    );
    for (i, solution) in result.solutions.iter().enumerate() {
        println!(
            "Solution {}: {} = {} (cost {})",
            i + 1,
            name,
            solution.expression(vars),
            solution.cost()
        );
    }
}

fn print_multi(result: &MultiFunctionResult) {
    for shared in &result.shared_patterns {
        println!(
            "Shared: {} used by {} (cost {})",
            shared.pattern.to_algebraic(&result.variables),
            join(shared.used_by.iter().map(|n| n.to_string())),
            shared.cost
        );
    }
    for (i, joint) in result.joint_solutions.iter().enumerate() {
        println!("Solution {} (shared cost {}):", i + 1, joint.stage3_cost);
        for (name, solution) in &joint.per_function {
            println!("  {} = {}", name, solution.expression(&result.variables));
        }
    }
    println!("{}", result);
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let functions = match args
        .functions
        .iter()
        .map(|spec| parse_function(spec))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(functions) => functions,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut config = MinimizerConfig::new()
        .with_exhaustive_limit(args.exhaustive_limit)
        .with_joint_exhaustive_limit(args.joint_limit);
    if !args.names.is_empty() {
        config = config.with_variables(&args.names);
    }
    let mut minimizer = Minimizer::new(config);

    let outcome = match functions.as_slice() {
        [single] => minimizer
            .minimize_single_function(&single.minterms, &args.dont_cares, args.num_vars)
            .map(|result| print_single(&single.name, &result)),
        _ => minimizer
            .minimize_multiple_functions(&functions, &args.dont_cares, args.num_vars)
            .map(|result| print_multi(&result)),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
