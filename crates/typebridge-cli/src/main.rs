//! typebridge CLI - inspect and exercise type-conversion tables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, Level};
use typebridge::{
    ConversionDescriptor, ConversionTable, ConvertError, TableConfig, TypeConversions, TypeRef,
    TypeSystem,
};

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(about = "Resolve type and value conversions between ABI, runtime and value types")]
#[command(version)]
struct Cli {
    /// Path to a YAML conversion table (default: built-in table)
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PairArgs {
    /// Source type system (abi, runtime, value)
    #[arg(long)]
    from: TypeSystem,

    /// Target type system (abi, runtime, value)
    #[arg(long)]
    to: TypeSystem,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the target type for a source type
    TypeFor {
        #[command(flatten)]
        pair: PairArgs,

        /// Source type name
        r#type: String,
    },

    /// Emit code converting a value of a source type
    Convert {
        #[command(flatten)]
        pair: PairArgs,

        /// Code fragment producing the value
        code: String,

        /// Source type name
        r#type: String,

        /// Extra type context handed to the converter
        #[arg(long)]
        context: Option<String>,
    },

    /// Emit code converting a value into a target type
    ConvertBack {
        #[command(flatten)]
        pair: PairArgs,

        /// Code fragment producing the value
        code: String,

        /// Target type name
        r#type: String,
    },

    /// Print the initialized default value for a type
    Init {
        #[command(flatten)]
        pair: PairArgs,

        /// Type name
        r#type: String,
    },

    /// List registered type-system pairs
    Pairs,
}

/// JSON output for a resolved lookup.
#[derive(Serialize)]
struct LookupOutput {
    from: TypeRef,
    to: TypeRef,
    result: String,
}

impl LookupOutput {
    fn new(descriptor: ConversionDescriptor, result: String) -> Self {
        Self {
            from: descriptor.from,
            to: descriptor.to,
            result,
        }
    }
}

#[derive(Serialize)]
struct PairOutput {
    from: TypeSystem,
    to: TypeSystem,
    rules: usize,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let loaded;
    let table: &ConversionTable = match &cli.table {
        Some(path) => {
            loaded = TableConfig::load(path)?.build()?;
            debug!("Loaded conversion table from {:?}", path);
            &loaded
        }
        None => typebridge::builtin(),
    };
    let api = TypeConversions::new(table);

    let output = match cli.command {
        Commands::TypeFor { pair, r#type } => {
            let result = api.type_for(pair.from, pair.to, &r#type)?;
            if !cli.output_json {
                println!("{}", result);
                return Ok(());
            }
            let d = api.find_from_type(pair.from, pair.to, &r#type)?;
            LookupOutput::new(d, result)
        }
        Commands::Convert {
            pair,
            code,
            r#type,
            context,
        } => {
            let d = api.find_from_type(pair.from, pair.to, &r#type)?;
            let result = d.convert(&code, context.as_deref());
            LookupOutput::new(d, result)
        }
        Commands::ConvertBack { pair, code, r#type } => {
            let d = api.find_to_type(pair.from, pair.to, &r#type)?;
            let result = d.convert(&code, None);
            LookupOutput::new(d, result)
        }
        Commands::Init { pair, r#type } => {
            let d = api.find_from_type(pair.from, pair.to, &r#type)?;
            let result = api.initialized_value(pair.from, pair.to, &r#type)?;
            LookupOutput::new(d, result)
        }
        Commands::Pairs => {
            let pairs = table
                .pairs()
                .into_iter()
                .map(|(from, to)| {
                    let rules = table.rules(from, to).map(<[_]>::len)?;
                    Ok(PairOutput { from, to, rules })
                })
                .collect::<Result<Vec<_>, ConvertError>>()?;

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&pairs)?);
            } else {
                for p in &pairs {
                    println!("{} → {} ({} rules)", p.from, p.to, p.rules);
                }
            }
            return Ok(());
        }
    };

    if cli.output_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.result);
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
