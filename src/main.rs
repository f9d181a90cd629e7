use bincmp::core::ConfigProvider;
use bincmp::utils::{logger, monitor::SystemMonitor, validation::Validate};
use bincmp::{
    CliConfig, Command, CompareEngine, CompareError, EncodePipeline, FilePairPipeline,
    LocalStorage,
};
use clap::Parser;
use std::io::{BufWriter, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // The config file can turn monitoring on, so it is loaded before the logger starts.
    let loaded = config.load_config_file().and_then(|_| config.validate());
    logger::init_cli_logger(config.verbose, config.monitor);
    if let Err(e) = loaded {
        fail(&e);
    }

    tracing::info!("Starting bincmp");
    tracing::debug!("Effective config: {:?}", config);

    let storage = LocalStorage::new(config.base_dir());

    if let Some(Command::Encode(args)) = &config.command {
        let monitor = SystemMonitor::new(config.monitor);
        let pipeline = EncodePipeline::new(storage, args.input.as_str(), args.output.as_str());
        let summary = match pipeline.run().await {
            Ok(summary) => summary,
            Err(e) => fail(&e),
        };
        monitor.log_final_stats();
        println!("Compressed size: {}", summary.payload_len);
        println!("Total size: {}", summary.total_len);
        return Ok(());
    }

    tracing::debug!(
        "Comparing {} against {}",
        config.candidate_path(),
        config.reference_path()
    );
    let monitor_enabled = config.monitor;
    let pipeline = FilePairPipeline::new(storage, config);
    let engine = CompareEngine::new_with_monitoring(pipeline, monitor_enabled);

    let report = match engine.run().await {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report.write_to(&mut out)?;
    out.flush()?;

    Ok(())
}

fn fail(e: &CompareError) -> ! {
    tracing::debug!("Failed with {:?} (category {:?})", e, e.category());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
