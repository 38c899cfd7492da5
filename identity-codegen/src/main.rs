//! identity-gen
//!
//! Generates strongly typed identifier types from a TOML schema, or expands
//! single declarations for inspection. Meant to be run as a build step.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use identity_codegen::generate::{generate, rustfmt};
use identity_codegen::identifier::analyze::analyze;
use identity_codegen::schema::Schema;
use identity_codegen::{expand_str, DeclarationRequest, Error, Options, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "identity-gen")]
#[command(about = "Generate strongly typed identifier types", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Rust source file from an identifier schema
    Generate {
        /// Schema file
        #[arg(short, long, default_value = "identity.toml")]
        schema: PathBuf,

        /// Output file (defaults to the schema's `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail if the output file is out of date instead of writing it
        #[arg(long)]
        check: bool,

        /// Skip formatting the output with rustfmt
        #[arg(long)]
        no_format: bool,
    },

    /// Expand a single declaration, e.g. "pub OrderId, backing: Uuid, adopts: Ord"
    Expand {
        declaration: String,

        /// Path of the identity runtime crate in generated code
        #[arg(short, long, default_value = "::identity")]
        runtime: String,

        /// Skip formatting the output with rustfmt
        #[arg(long)]
        no_format: bool,
    },

    /// Print a declaration with every suggested fix applied
    Fix { declaration: String },
}

const DEFAULT_LOG: &str = "identity_codegen=info";

/// `RUST_LOG` replaces the default filter entirely when set.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    match rust_log.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG),
    }
}

fn init_tracing() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Rejected(rejections)) => {
            for rejection in rejections {
                eprintln!("in `{}`:", rejection.declaration);
                for diagnostic in rejection.diagnostics {
                    eprintln!("{}", diagnostic);
                }
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate {
            schema,
            output,
            check,
            no_format,
        } => {
            let loaded = Schema::load(&schema)?;
            let output = output
                .or_else(|| loaded.resolve_output(&schema))
                .ok_or_else(|| Error::Schema("no output file given".to_string()))?;
            debug!(schema = %schema.display(), output = %output.display(), "generating");
            generate(&loaded, &output, check, !no_format)
        }
        Commands::Expand {
            declaration,
            runtime,
            no_format,
        } => {
            let runtime = syn::parse_str(&runtime)
                .map_err(|e| Error::Syntax(runtime.clone(), e))?;
            let expansion = expand_str(&declaration, &Options::with_runtime(runtime))?;
            let source = expansion.rust.to_string();
            println!("// {}", expansion.signature);
            let source = if no_format { source } else { rustfmt(&source)? };
            println!("{}", source);
            Ok(())
        }
        Commands::Fix { declaration } => {
            let request = DeclarationRequest::parse_str(&declaration)
                .map_err(|e| Error::Syntax(declaration.clone(), e))?;
            let fixed = match analyze(request.clone()) {
                Ok(_) => request,
                Err(diagnostics) => request.apply_fix_its(&diagnostics),
            };
            println!("{}", fixed);
            // Expression problems have no mechanical fix.
            analyze(fixed.clone())
                .map(|_| ())
                .map_err(|diagnostics| Error::rejected(fixed.to_string(), diagnostics))
        }
    }
}
