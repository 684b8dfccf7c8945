//! calcpad CLI: the calculator from the command line
//!
//! ## Usage
//!
//! ```bash
//! calcpad eval "sin(30) + 2^3"            # Evaluate one expression
//! calcpad eval --base hex FF              # Read a hexadecimal literal
//! calcpad convert length 5 Mile Kilometer # Convert units
//! calcpad solve quadratic 1 -3 2          # Solve ax² + bx + c = 0
//! calcpad stats "1, 2, 3, 4"              # Descriptive statistics
//! calcpad geometry cone 3 4               # Volume and surface area
//! calcpad finance loan 100000 6 30        # Monthly loan payment
//! calcpad repl                            # Interactive session
//! ```

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use calcpad::formulas::{finance, geometry, parse_field, parse_samples, statistics};
use calcpad::units::{Category, Conversion};
use calcpad::{
    evaluate, format_in_base, solver, AngleMode, NumeralBase, Session, SessionBuilder,
};

/// calcpad: scientific, programmer and helper-tool calculator
#[derive(Parser, Debug)]
#[command(name = "calcpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate an expression
    Eval(EvalArgs),

    /// Convert a value between units of one category
    Convert(ConvertArgs),

    /// Solve an equation
    #[command(subcommand)]
    Solve(SolveCommand),

    /// Descriptive statistics of a comma-separated sample
    Stats(StatsArgs),

    /// Measures of a shape
    #[command(subcommand)]
    Geometry(GeometryCommand),

    /// Loans, compound interest and ROI
    #[command(subcommand)]
    Finance(FinanceCommand),

    /// Interactive session reading one line at a time
    Repl(ModeArgs),
}

/// Modes shared by `eval` and `repl`
#[derive(Args, Debug)]
struct ModeArgs {
    /// Angle unit for trigonometric functions (deg, rad)
    #[arg(long, env = "CALCPAD_ANGLE")]
    angle: Option<AngleMode>,

    /// Numeral base of input and results (dec, bin, oct, hex)
    #[arg(long, env = "CALCPAD_BASE")]
    base: Option<NumeralBase>,

    /// Number of history entries kept
    #[arg(long, env = "CALCPAD_HISTORY")]
    history: Option<usize>,
}

impl ModeArgs {
    fn builder(&self) -> SessionBuilder {
        let mut builder = SessionBuilder::new();
        if let Some(angle) = self.angle {
            builder = builder.with_angle_mode(angle);
        }
        if let Some(base) = self.base {
            builder = builder.with_base(base);
        }
        if let Some(capacity) = self.history {
            builder = builder.with_history_capacity(capacity);
        }
        builder
    }
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// Expression in calculator syntax
    #[arg(allow_hyphen_values = true)]
    expression: String,

    #[command(flatten)]
    modes: ModeArgs,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Category (length, weight, temperature, area, volume, speed)
    category: Category,

    /// Value to convert
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// Source unit, e.g. "Mile"
    from: String,

    /// Target unit, e.g. "Kilometer"
    to: String,
}

#[derive(Subcommand, Debug)]
enum SolveCommand {
    /// ax + b = 0
    Linear {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// ax² + bx + c = 0
    Quadratic {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
        #[arg(allow_hyphen_values = true)]
        c: String,
    },
    /// a1·x + b1·y = c1, a2·x + b2·y = c2
    Simultaneous {
        /// a1 b1 c1 a2 b2 c2
        #[arg(num_args = 6, allow_hyphen_values = true)]
        coefficients: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Comma-separated numbers; non-numeric items are skipped
    #[arg(allow_hyphen_values = true)]
    samples: String,
}

#[derive(Subcommand, Debug)]
enum GeometryCommand {
    Circle { radius: String },
    Rectangle { length: String, width: String },
    Triangle { base: String, height: String },
    Sphere { radius: String },
    Cylinder { radius: String, height: String },
    Cone { radius: String, height: String },
    Cube { side: String },
}

#[derive(Subcommand, Debug)]
enum FinanceCommand {
    /// Monthly payment of an amortized loan
    Loan {
        principal: String,
        /// Annual interest rate in percent
        rate: String,
        years: String,
    },
    /// Compound interest
    Compound {
        principal: String,
        /// Annual interest rate in percent
        rate: String,
        years: String,
        /// Compounding periods per year
        #[arg(long, default_value = "12")]
        compounds: String,
    },
    /// Return on investment
    Roi {
        initial: String,
        #[arg(allow_hyphen_values = true)]
        final_value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Eval(args) => run_eval(&args),
        Commands::Convert(args) => run_convert(&args),
        Commands::Solve(command) => run_solve(&command),
        Commands::Stats(args) => run_stats(&args),
        Commands::Geometry(command) => run_geometry(&command),
        Commands::Finance(command) => run_finance(&command),
        Commands::Repl(modes) => run_repl(&modes),
    }
}

fn run_eval(args: &EvalArgs) -> anyhow::Result<()> {
    let builder = args.modes.builder();
    let config = builder.config();
    let value = evaluate(&args.expression, config.base, config.angle)
        .with_context(|| format!("cannot evaluate \"{}\"", args.expression))?;
    println!("{}", format_in_base(value, config.base)?);
    Ok(())
}

fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let value = parse_field("value", &args.value)?;
    let conversion = Conversion::new(value, &args.from, &args.to, args.category)
        .with_context(|| format!("units of {} are: {}", args.category, args.category.units().join(", ")))?;
    println!("{conversion}");
    Ok(())
}

fn run_solve(command: &SolveCommand) -> anyhow::Result<()> {
    match command {
        SolveCommand::Linear { a, b } => {
            let solution = solver::solve_linear(parse_field("a", a)?, parse_field("b", b)?)?;
            println!("{solution}");
        },
        SolveCommand::Quadratic { a, b, c } => {
            let roots = solver::solve_quadratic(parse_field("a", a)?, parse_field("b", b)?, parse_field("c", c)?)?;
            println!("{roots}");
        },
        SolveCommand::Simultaneous { coefficients } => {
            let names = ["a1", "b1", "c1", "a2", "b2", "c2"];
            let values = names.iter().zip(coefficients)
                .map(|(name, text)| parse_field(name, text))
                .collect::<Result<Vec<_>, _>>()?;
            let [a1, b1, c1, a2, b2, c2] = values[..] else {
                bail!("expected 6 coefficients, got {}", values.len());
            };
            println!("{}", solver::solve_simultaneous(a1, b1, c1, a2, b2, c2)?);
        },
    }
    Ok(())
}

fn run_stats(args: &StatsArgs) -> anyhow::Result<()> {
    let samples = parse_samples(&args.samples);
    println!("{}", statistics::summarize(&samples)?);
    Ok(())
}

fn run_geometry(command: &GeometryCommand) -> anyhow::Result<()> {
    let text = match command {
        GeometryCommand::Circle { radius } => geometry::circle(parse_field("radius", radius)?)?.to_string(),
        GeometryCommand::Rectangle { length, width } => {
            geometry::rectangle(parse_field("length", length)?, parse_field("width", width)?)?.to_string()
        },
        GeometryCommand::Triangle { base, height } => {
            geometry::triangle(parse_field("base", base)?, parse_field("height", height)?)?.to_string()
        },
        GeometryCommand::Sphere { radius } => geometry::sphere(parse_field("radius", radius)?)?.to_string(),
        GeometryCommand::Cylinder { radius, height } => {
            geometry::cylinder(parse_field("radius", radius)?, parse_field("height", height)?)?.to_string()
        },
        GeometryCommand::Cone { radius, height } => {
            geometry::cone(parse_field("radius", radius)?, parse_field("height", height)?)?.to_string()
        },
        GeometryCommand::Cube { side } => geometry::cube(parse_field("side", side)?)?.to_string(),
    };
    println!("{text}");
    Ok(())
}

fn run_finance(command: &FinanceCommand) -> anyhow::Result<()> {
    let text = match command {
        FinanceCommand::Loan { principal, rate, years } => finance::loan_payment(
            parse_field("principal", principal)?,
            parse_field("rate", rate)?,
            parse_field("years", years)?,
        )?.to_string(),
        FinanceCommand::Compound { principal, rate, years, compounds } => finance::compound_interest(
            parse_field("principal", principal)?,
            parse_field("rate", rate)?,
            parse_field("years", years)?,
            parse_field("compounds", compounds)?,
        )?.to_string(),
        FinanceCommand::Roi { initial, final_value } => finance::roi(
            parse_field("initial", initial)?,
            parse_field("final", final_value)?,
        )?.to_string(),
    };
    println!("{text}");
    Ok(())
}

const REPL_HELP: &str = "\
expressions are evaluated; a line starting with * / ^ % continues from the result
=                      evaluate the buffer (after :mr or :recall)
:deg :rad              angle mode
:base <dec|bin|oct|hex> numeral base
:fact :not :shl :shr   act on the result
:ms :mr :m+ :m- :mc    memory
:history :recall <n> :clear-history
:ac :ce                clear all / clear entry
:help :quit";

fn run_repl(modes: &ModeArgs) -> anyhow::Result<()> {
    let mut session = modes.builder().build();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "{}> ", session.base())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        session.poll(Instant::now());

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, ":quit" | ":q" | ":exit") {
            break;
        }

        match repl_line(&mut session, line) {
            Ok(Some(text)) => println!("{text}"),
            Ok(None) => {},
            Err(e) => eprintln!("Error: {e}"),
        }
        let indicator = session.memory_indicator();
        if !indicator.is_empty() {
            println!("[{indicator}]");
        }
    }
    Ok(())
}

/// Runs one REPL line, returning what to print.
fn repl_line(session: &mut Session, line: &str) -> anyhow::Result<Option<String>> {
    if line == "=" {
        session.evaluate()?;
        return Ok(Some(session.result_display().to_string()));
    }

    let Some(command) = line.strip_prefix(':') else {
        if let Some(op) = line.chars().next().filter(|c| matches!(c, '*' | '/' | '^' | '%')) {
            session.input_operator(op)?;
            let continued = format!("{}{}", session.expression(), &line[op.len_utf8()..]);
            session.set_expression(&continued);
        } else {
            session.set_expression(line);
        }
        session.evaluate()?;
        return Ok(Some(session.result_display().to_string()));
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    match name {
        "deg" => session.set_angle_mode(AngleMode::Degrees),
        "rad" => session.set_angle_mode(AngleMode::Radians),
        "base" => {
            let base: NumeralBase = arg.context("usage: :base <dec|bin|oct|hex>")?.parse()?;
            session.set_base(base)?;
        },
        "fact" => session.factorial()?,
        "not" => session.bitwise_not()?,
        "shl" => session.shift_left()?,
        "shr" => session.shift_right()?,
        "ms" => session.memory_store()?,
        "mr" => {
            session.memory_recall()?;
            return Ok(Some(session.expression_display().to_string()));
        },
        "m+" => session.memory_add()?,
        "m-" => session.memory_subtract()?,
        "mc" => session.memory_clear(),
        "history" => {
            let lines: Vec<String> = session.history().iter()
                .enumerate()
                .map(|(i, entry)| format!("{i}: {entry}"))
                .collect();
            return Ok(Some(lines.join("\n")));
        },
        "recall" => {
            let index: usize = arg.context("usage: :recall <n>")?.parse()?;
            session.recall_history(index)?;
            return Ok(Some(session.expression_display().to_string()));
        },
        "clear-history" => session.clear_history(),
        "ac" => session.clear_all(),
        "ce" => session.clear_entry(),
        "help" => return Ok(Some(REPL_HELP.to_string())),
        other => bail!("unknown command :{other}, try :help"),
    }
    Ok(Some(session.result_display().to_string()))
}
