//! Command-line interface for rpsl
//! Re-formats registry files, compiles their schemas and exports records as
//! structured data.
//!
//! Usage:
//!   rpsl fmt `<path>` [--pad `<width>`]                                 - Re-emit records with aligned values
//!   rpsl export `<path>` [--schemas `<path>`] [--format `<format>`]    - Apply schemas and export records
//!   rpsl schemas `<path>`                                             - Print compiled schemas
//!   rpsl list-formats                                               - List export formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use rpsl::rpsl::formats::{JsonFormatter, RpslFormatter};
use rpsl::{parse_all, FormatRegistry, Loader, Object, Rpsl, RpslConfig};
use std::fs::File;
use std::io::BufReader;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("rpsl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for formatting and exporting RPSL registry records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("fmt")
                .about("Re-emit every record with aligned attribute values")
                .arg(
                    Arg::new("path")
                        .help("Path to the registry file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("pad")
                        .long("pad")
                        .short('p')
                        .value_parser(clap::value_parser!(usize))
                        .help("Minimum attribute name column"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Apply schemas and export records")
                .arg(
                    Arg::new("path")
                        .help("Path to the registry file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("schemas")
                        .long("schemas")
                        .short('s')
                        .help("File holding the schema records (defaults to the input itself)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'json', 'yaml', 'rpsl')"),
                ),
        )
        .subcommand(
            Command::new("schemas")
                .about("Print the schemas compiled from a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the file holding schema records")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available export formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });

    let result = match matches.subcommand() {
        Some(("fmt", fmt_matches)) => {
            let path = fmt_matches.get_one::<String>("path").unwrap();
            let pad = fmt_matches
                .get_one::<usize>("pad")
                .copied()
                .unwrap_or(config.formatting.pad_width);
            handle_fmt_command(path, pad)
        }
        Some(("export", export_matches)) => {
            let path = export_matches.get_one::<String>("path").unwrap();
            let schemas = export_matches.get_one::<String>("schemas");
            let format = export_matches
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| config.export.format.clone());
            handle_export_command(&config, path, schemas.map(String::as_str), &format)
        }
        Some(("schemas", schemas_matches)) => {
            let path = schemas_matches.get_one::<String>("path").unwrap();
            handle_schemas_command(path)
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command(&config);
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<RpslConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build()
}

fn read_objects(path: &str) -> rpsl::Result<Vec<Object>> {
    let objects = parse_all(BufReader::new(File::open(path)?))?;
    debug!(path, objects = objects.len(), "read registry file");
    Ok(objects)
}

fn formats(config: &RpslConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(RpslFormatter::new(config.formatting.pad_width));
    registry.register(JsonFormatter::new(config.export.pretty));
    registry
}

/// Handle the fmt command
fn handle_fmt_command(path: &str, pad: usize) -> rpsl::Result<()> {
    let objects = read_objects(path)?;
    print!("{}", rpsl::rpsl::object::join_objects(&objects, pad));
    Ok(())
}

/// Handle the export command
fn handle_export_command(
    config: &RpslConfig,
    path: &str,
    schemas: Option<&str>,
    format: &str,
) -> rpsl::Result<()> {
    let mut objects = read_objects(path)?;

    let mut rpsl = Rpsl::new();
    match schemas {
        Some(schemas) => rpsl.load_schemas(&read_objects(schemas)?)?,
        None => rpsl.load_schemas(&objects)?,
    }
    rpsl.apply(&mut objects);

    let output = formats(config).serialize(&objects, format)?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Handle the schemas command
fn handle_schemas_command(path: &str) -> rpsl::Result<()> {
    let mut rpsl = Rpsl::new();
    rpsl.load_schemas(&read_objects(path)?)?;

    for schema in rpsl.schemas().items() {
        println!("{}", schema);
        for key in schema.keys() {
            if let Some(spec) = schema.spec(key) {
                println!("  {} > {}", key, spec);
            }
        }
        println!();
    }
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &RpslConfig) {
    let registry = formats(config);
    println!("Available export formats:\n");
    for name in registry.list_formats() {
        println!("  {}", name);
        if let Some(description) = registry.get(&name).map(|f| f.description()) {
            println!("    {}", description);
        }
    }
}
