use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use skiff_common::config::AppConfig;
use skiff_reader::{Environment, FunctionRegistry, ReaderRegistry, ReaderVariant};
use skiff_source::{Kwargs, SourceDescriptor, SourceKind};

#[derive(Parser)]
#[command(version, name = "skiff", about = "Capability-based dispatch for data source readers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the reader variants that can load the described source.
    Recommend {
        /// Source kind: parquet, csv, json, or query.
        kind: SourceKind,
        /// Primary URL of the source, or the query text for query sources.
        target: String,
        /// Constituent file URLs, in load order.
        #[arg(long = "file")]
        files: Vec<String>,
        /// Stored load keyword arguments, as a JSON object.
        #[arg(long)]
        kwargs: Option<String>,
        /// Only keep variants whose required packages are available.
        #[arg(long)]
        check_packages: bool,
    },
    /// List registered reader variants and their capabilities.
    Variants,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let registry = ReaderRegistry::new();
    let env = Environment::new(Arc::new(FunctionRegistry::new())).with_config(&config);

    match cli.command {
        Command::Recommend {
            kind,
            target,
            files,
            kwargs,
            check_packages,
        } => {
            let mut source = match kind {
                SourceKind::Query => SourceDescriptor::query(target),
                _ => SourceDescriptor::new(kind, target),
            };
            if !files.is_empty() {
                source = source.with_files(files);
            }
            if let Some(raw) = kwargs {
                source = source.with_kwargs(serde_json::from_str::<Kwargs>(&raw)?);
            }
            let check = check_packages || config.recommend.check_packages;
            let mut names: Vec<_> = registry
                .recommend(&source, check, &env)
                .iter()
                .map(|variant| variant.name())
                .collect();
            names.sort_unstable();
            for name in names {
                println!("{name}");
            }
        }
        Command::Variants => {
            let mut variants: Vec<_> = registry.variants().collect();
            variants.sort_unstable_by_key(|variant| variant.name());
            for variant in variants {
                let capability = variant.capability();
                let kinds: Vec<_> = capability
                    .implements
                    .iter()
                    .map(|kind| kind.to_string())
                    .collect();
                println!(
                    "{}: implements [{}], requires [{}] -> {}",
                    variant.name(),
                    kinds.join(", "),
                    capability.requires.join(", "),
                    capability.output_instance,
                );
            }
        }
    }
    Ok(())
}
