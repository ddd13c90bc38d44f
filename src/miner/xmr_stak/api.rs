//! xmr-stak HTTP API (`/api.json`) 响应结构

use crate::utils::{humanize_hashrate, humanize_time};
use miner_core::Stats;
use serde::{Deserialize, Deserializer, Serialize};

/// 缺失或为 `null` 的字段按默认值处理
///
/// 矿工在统计窗口尚未填满时会对数值字段输出 `null`。
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// xmr-stak 遥测响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmrStakResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hashrate: HashrateReport,
    #[serde(deserialize_with = "null_as_default")]
    pub results: ResultsReport,
    #[serde(deserialize_with = "null_as_default")]
    pub connection: ConnectionReport,
}

/// 算力报告，`total` 依次为 10 秒、60 秒、15 分钟窗口
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashrateReport {
    #[serde(deserialize_with = "null_as_default")]
    pub threads: Vec<Vec<Option<f64>>>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: Vec<Option<f64>>,
    #[serde(deserialize_with = "null_as_default")]
    pub highest: f64,
}

/// 份额结果报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsReport {
    #[serde(deserialize_with = "null_as_default")]
    pub diff_current: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub shares_good: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub shares_total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub avg_time: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hashes_total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub best: Vec<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub error_log: Vec<ResultError>,
}

/// 份额错误记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultError {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_seen: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

/// 矿池连接报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionReport {
    #[serde(deserialize_with = "null_as_default")]
    pub pool: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub ping: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub error_log: Vec<ConnectionError>,
}

/// 连接错误记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionError {
    #[serde(deserialize_with = "null_as_default")]
    pub last_seen: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

impl XmrStakResponse {
    /// 最短窗口的总算力，尚未完成一个统计周期时为 0
    pub fn current_hashrate(&self) -> f64 {
        self.hashrate.total.first().copied().flatten().unwrap_or(0.0)
    }

    /// 无效份额，不做截断
    ///
    /// 计数来自矿工，可能是任意值，溢出时回绕而不是 panic。
    pub fn bad_shares(&self) -> i64 {
        self.results.shares_total.wrapping_sub(self.results.shares_good)
    }

    /// 先列出连接错误原文，再列出带出现次数的份额错误
    pub fn error_messages(&self) -> Vec<String> {
        let connection_errors = self
            .connection
            .error_log
            .iter()
            .map(|entry| entry.text.clone());
        let result_errors = self
            .results
            .error_log
            .iter()
            .map(|entry| format!("({}) {}", entry.count, entry.text));

        connection_errors.chain(result_errors).collect()
    }

    /// 归一化为统计快照
    pub fn to_stats(&self) -> Stats {
        let hashrate = self.current_hashrate();
        Stats {
            hashrate,
            hashrate_human: humanize_hashrate(hashrate),
            current_difficulty: self.results.diff_current,
            uptime: self.connection.uptime,
            uptime_human: humanize_time(self.connection.uptime),
            shares_good: self.results.shares_good,
            shares_bad: self.bad_shares(),
            errors: self.error_messages(),
        }
    }
}
