use book_catalog::core::ConfigProvider;
use book_catalog::utils::{logger, validation::Validate};
use book_catalog::{
    CatalogEngine, CatalogError, CatalogReport, CliConfig, JsonCatalogPipeline, LocalStorage,
    TomlConfig,
};
use clap::Parser;

async fn run<C: ConfigProvider + Validate>(
    base_dir: String,
    config: C,
) -> Result<CatalogReport, CatalogError> {
    config.validate()?;

    let storage = LocalStorage::new(base_dir);
    let engine = CatalogEngine::new(JsonCatalogPipeline::new(storage, config));
    engine.run().await
}

fn print_report(report: &CatalogReport) -> anyhow::Result<()> {
    for failure in &report.failures {
        println!("⚠️  record {} skipped: {}", failure.index, failure.error);
    }

    if let Some(featured) = &report.featured {
        println!("{}", featured.title);
        for projection in &featured.projections {
            println!("{}", serde_json::to_string(projection)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config.base_dir().to_string(), config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli.base_dir.clone(), cli.clone()).await,
    };

    match result {
        Ok(report) => {
            tracing::info!(
                "✅ {} books validated, {} rejected",
                report.books.len(),
                report.failures.len()
            );
            print_report(&report)?;
            if let Some(path) = &report.output_path {
                println!("📁 Output saved to: {}", path);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Catalog validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
