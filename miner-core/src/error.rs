//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 矿工适配器错误类型
///
/// 适配器从不重试也不吞掉 I/O、网络或解码错误，
/// 只有“尚不存在”类的情况才会静默使用默认值。
#[derive(Error, Debug)]
pub enum MinerError {
    #[error("配置错误: {message}")]
    Configuration { message: String },

    #[error("IO错误: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("传输错误: {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("解码错误: {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MinerError {
    /// 创建配置错误
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 创建IO错误
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建传输错误
    pub fn transport<S: Into<String>>(endpoint: S, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建解码错误
    pub fn decode<S: Into<String>>(endpoint: S, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 本轮统计不可用（传输或解码失败）
    ///
    /// 只关心“这一轮拿不到统计”的调用方可以把两者同等对待。
    pub fn is_stats_unavailable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }
}
