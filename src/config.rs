use crate::logging::LogConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use miner_core::{MinerConfig, MinerKind};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file path
    #[arg(short, long, default_value = "bloc-miner.toml")]
    pub config: String,

    /// Log level, overrides the settings file
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write the miner's configuration files
    WriteConfig,
    /// Print the processing config recovered from disk
    Processing,
    /// Fetch one stats snapshot
    Stats,
    /// Poll stats until interrupted
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "10")]
        interval: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub miner: MinerSettings,
    pub pool: PoolSettings,
    #[serde(default)]
    pub processing: ProcessingSettings,
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerSettings {
    #[serde(default = "default_miner_kind")]
    pub kind: MinerKind,
    #[serde(flatten)]
    pub config: MinerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSettings {
    pub endpoint: String,
    pub wallet: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// CPU 线程数，未设置时沿用磁盘上已有的配置
    pub threads: Option<u16>,
}

fn default_miner_kind() -> MinerKind {
    MinerKind::XmrStak
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path))?;

        let settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path))?;

        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.miner.config.path.as_os_str().is_empty() {
            anyhow::bail!("miner.path must not be empty");
        }

        // 矿池字段原样写进带引号的配置文本，不能包含引号
        for (field, value) in [
            ("pool.endpoint", &self.pool.endpoint),
            ("pool.wallet", &self.pool.wallet),
            ("pool.algorithm", &self.pool.algorithm),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", field);
            }
            if value.contains('"') {
                anyhow::bail!("{} must not contain '\"': {}", field, value);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
