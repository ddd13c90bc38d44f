use anyhow::{Context, Result};
use bloc_miner::config::{Args, Command, Settings};
use bloc_miner::utils::humanize_hashrate;
use bloc_miner::{logging, new_miner, Miner, ProcessingConfig};
use clap::Parser;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse();

    // 加载配置
    let mut settings = Settings::load(&args.config)?;
    if let Some(level) = &args.log_level {
        settings.logging.level = level.clone();
    }

    // 初始化日志系统，guard 需要保持到程序结束
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("🚀 Starting {} v{}", bloc_miner::NAME, bloc_miner::VERSION);
    info!("📋 Settings loaded from: {}", args.config);

    let mut miner = new_miner(settings.miner.kind, &settings.miner.config)?;

    match args.command {
        Command::WriteConfig => write_config(miner.as_mut(), &settings).await?,
        Command::Processing => {
            let processing = miner.processing_config().await;
            println!("{}", serde_json::to_string_pretty(&processing)?);
        }
        Command::Stats => {
            let stats = miner.get_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Watch { interval } => {
            watch(miner.as_mut(), Duration::from_secs(interval.max(1))).await?
        }
    }

    Ok(())
}

async fn write_config(miner: &mut dyn Miner, settings: &Settings) -> Result<()> {
    // 未指定线程数时沿用磁盘上的配置
    let threads = match settings.processing.threads {
        Some(threads) => threads,
        None => miner.processing_config().await.threads,
    };

    miner
        .write_config(
            &settings.pool.endpoint,
            &settings.pool.wallet,
            &settings.pool.algorithm,
            &ProcessingConfig::with_threads(threads),
        )
        .await
        .context("Failed to write miner config")?;

    info!("✅ {} config written", miner.name());
    Ok(())
}

async fn watch(miner: &mut dyn Miner, interval: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    info!("👀 Polling {} every {}s, Ctrl-C to stop", miner.name(), interval.as_secs());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match miner.get_stats().await {
                    Ok(stats) => {
                        info!(
                            "⛏️ {} | uptime {} | diff {} | shares {}/{}",
                            stats.hashrate_human,
                            stats.uptime_human,
                            stats.current_difficulty,
                            stats.shares_good,
                            stats.shares_bad,
                        );
                        if stats.has_inconsistent_shares() {
                            warn!("Miner reported more good shares than total shares");
                        }
                        for message in &stats.errors {
                            warn!("{}: {}", miner.name(), message);
                        }
                    }
                    Err(e) if e.is_stats_unavailable() => {
                        warn!(
                            "Stats unavailable: {}, last hashrate {}",
                            e,
                            humanize_hashrate(miner.last_hashrate())
                        );
                    }
                    Err(e) => {
                        error!("Failed to fetch stats: {}", e);
                        return Err(e.into());
                    }
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("Error waiting for signal")?;
                info!("🛑 Received shutdown signal");
                return Ok(());
            }
        }
    }
}
