use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use miette::IntoDiagnostic;
use protogen_schema::{ApiRoot, Declaration, Location, Registry, TraversalOptions, TypeBearing};
use protogen_types::TypeResolver;
use tracing_subscriber::EnvFilter;

/// Resolve every type in a protocol description
#[derive(Parser, Debug)]
#[command(name = "protogen-check", about = "Check type resolution of a protocol JSON document")]
struct Cli {
    /// Path to the protocol JSON file (reads from stdin if omitted)
    file: Option<PathBuf>,

    /// Include hidden domains and declarations in --show-types output
    #[arg(long)]
    include_hidden: bool,

    /// Leave deprecated domains and declarations out of --show-types output
    #[arg(long)]
    exclude_deprecated: bool,

    /// Display the resolved classification of every declaration
    #[arg(long)]
    show_types: bool,
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protogen_schema=info,protogen_types=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("cli: {cli:?}");

    let root = match &cli.file {
        Some(path) => ApiRoot::from_reader(BufReader::new(File::open(path).into_diagnostic()?))?,
        None => ApiRoot::from_reader(io::stdin().lock())?,
    };
    let registry = Registry::build(root)?;
    tracing::info!(
        version = %registry.version(),
        domains = registry.domains().len(),
        types = registry.type_count(),
        "loaded protocol"
    );

    let resolver = TypeResolver::new(&registry);
    let errors = resolver.check();
    let error_count = errors.len();

    for error in errors {
        eprintln!("{:?}", miette::Report::new(error));
    }

    if cli.show_types {
        let options = TraversalOptions {
            include_hidden: cli.include_hidden,
            include_deprecated: !cli.exclude_deprecated,
        };
        print_declarations(&resolver, options);
    }

    if error_count == 0 {
        if !cli.show_types {
            println!("No resolution errors found.");
        }
        process::exit(0);
    } else {
        eprintln!(
            "\n{} resolution error{} found.",
            error_count,
            if error_count == 1 { "" } else { "s" }
        );
        process::exit(1);
    }
}

fn print_declarations(resolver: &TypeResolver<'_>, options: TraversalOptions) {
    let mut current_domain = None;

    for declaration in resolver.registry().declarations(options) {
        let domain = &declaration.domain().name;
        if current_domain != Some(domain) {
            println!("{}", domain.as_str().bold());
            current_domain = Some(domain);
        }

        let at = declaration.location();
        match declaration {
            Declaration::Type(handle) => {
                println!("  type {}: {}", handle.def.id, describe(resolver, handle.def, &at));
            }
            Declaration::Command(handle) => {
                println!("  command {}", handle.command.name.as_str().cyan());
                for parameter in &handle.command.parameters {
                    let at = at.member("parameters").member(parameter.name.clone());
                    let optional = if parameter.optional { "?" } else { "" };
                    println!("    {}{}: {}", parameter.name, optional, describe(resolver, parameter, &at));
                }
                for value in &handle.command.returns {
                    let at = at.member("returns").member(value.name.clone());
                    println!("    -> {}: {}", value.name, describe(resolver, value, &at));
                }
            }
            Declaration::Event(handle) => {
                println!("  event {}", handle.event.name.as_str().yellow());
                for parameter in &handle.event.parameters {
                    let at = at.member("parameters").member(parameter.name.clone());
                    println!("    {}: {}", parameter.name, describe(resolver, parameter, &at));
                }
            }
        }
    }
}

fn describe<'a, N>(resolver: &TypeResolver<'a>, node: &'a N, at: &Location) -> String
where
    N: TypeBearing + ?Sized,
{
    match resolver.classify(node, at) {
        Ok(classification) => classification.to_string(),
        Err(_) => "<unresolved>".red().to_string(),
    }
}
