use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};
use std::io::Write;

use route_docs::config::load_service;
use route_docs::format::Target;
use route_docs::generator::Generator;

/// Generates API documentation from the HTTP events of a Serverless service definition
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Service definition file (YAML, or JSON with a .json extension)
    #[arg(short, long, default_value = "serverless.yml", global = true)]
    config: String,

    /// Pretty-print the generated document
    #[arg(long, global = true)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a Swagger 2.0 document
    GenerateSwagger,

    /// Generate a Postman collection
    GeneratePostman,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the document
    let env = Env::default().filter_or("RUST_LOG", if cli.verbose { "debug" } else { "info" });
    env_logger::init_from_env(env);

    debug!("Starting route-docs...");

    let target = match cli.command {
        Commands::GenerateSwagger => Target::Swagger,
        Commands::GeneratePostman => Target::Postman,
    };

    let service = load_service(&cli.config)
        .with_context(|| format!("Failed to load service definition {}", cli.config))?;

    let generator = Generator::from_loaded(service);
    let document = generator
        .render(target, cli.pretty)
        .with_context(|| format!("Failed to generate {}", target))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", document).context("Failed to write document to stdout")?;

    info!("{} generated successfully", target);
    Ok(())
}
