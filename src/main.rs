use clap::Parser;
use smashing_wallpapers::domain::model::images_to_json;
use smashing_wallpapers::utils::{logger, validation::Validate};
use smashing_wallpapers::{
    CliConfig, EtlEngine, LocalStorage, RunSummary, WallpaperError, WallpaperPipeline,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("🚀 Starting smashing-wallpapers");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.app_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = match WallpaperPipeline::new(storage, config, cli.date, cli.resolution.clone()) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(&e),
    };

    tracing::info!(
        "📅 {} at {} -> {}",
        pipeline.request(),
        cli.resolution,
        pipeline.page_url()
    );

    let engine = EtlEngine::new(pipeline);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be downloaded");
        match engine.plan().await {
            Ok(images) => {
                if cli.json {
                    match images_to_json(&images) {
                        Ok(json) => println!("{}", json),
                        Err(e) => exit_with(&e),
                    }
                } else {
                    for image in &images {
                        println!("{}\t{}", image.file_name, image.source_url);
                    }
                }
            }
            Err(e) => exit_with(&e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(summary) => {
            if let Err(e) = print_summary(&summary, cli.json) {
                exit_with(&e);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, json: bool) -> smashing_wallpapers::Result<()> {
    if json {
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    println!("✅ Saved {} of {} wallpapers", summary.saved.len(), summary.matched);
    for file_name in &summary.saved {
        println!("   {}", file_name);
    }
    for failed in &summary.failed {
        eprintln!("⚠️  Skipped {}: {}", failed.file_name, failed.reason);
    }
    Ok(())
}

fn exit_with(e: &WallpaperError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼，致命錯誤一律非零
    std::process::exit(e.exit_code().max(1));
}
