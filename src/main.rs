use clap::Parser;
use spmready::cli::Cli;
use spmready::config::Config;
use spmready::fetch::HttpFetcher;
use spmready::output::{self, ReportOutput};
use spmready::pipeline::{Pipeline, PipelineError, Report};
use spmready::resolve::{IndexResolver, PodSearchResolver, Resolve, ResolverKind};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout only carries the report. Level is controlled by:
/// 1. `--verbose` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spmready=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spmready=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    cli.apply(&mut config);

    let paths = cli.manifest_paths();
    tracing::debug!(?paths, resolver = %cli.resolver, "starting");

    let fetcher = HttpFetcher::new(config.timeout());
    let resolver: Box<dyn Resolve + '_> = match cli.resolver {
        ResolverKind::Index => Box::new(IndexResolver::new(&fetcher, &config.index_url)),
        ResolverKind::PodSearch => Box::new(PodSearchResolver::new(&config.pod_command)),
    };
    let pipeline = Pipeline::new(&config, &fetcher, resolver.as_ref());

    let inventory = match pipeline.collect(&paths) {
        Ok(inventory) => inventory,
        Err(PipelineError::NoLibrariesFound { manifests }) => {
            output::print_manifest_failures(&manifests);
            return Err(PipelineError::NoLibrariesFound { manifests }.into());
        }
    };

    output::print_manifest_failures(&inventory.manifests);

    if !cli.json {
        println!("{}", output::format_found(inventory.libraries.len()));
    }

    let mut libraries = Vec::with_capacity(inventory.libraries.len());
    for library in inventory.libraries {
        let library = pipeline.classify(library);
        if !cli.json {
            println!("{}", output::format_library(&library));
        }
        libraries.push(library);
    }

    let report = Report::new(inventory.manifests, libraries);

    if cli.json {
        output::print_json(&ReportOutput::from(&report));
    } else {
        for line in output::summary_lines(&report) {
            println!("{}", line);
        }
    }

    Ok(())
}
