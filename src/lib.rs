//! BLOC Miner - 第三方矿工程序的适配层
//!
//! 监管程序通过统一的 [`Miner`] 接口配置和监控结构各异的矿工程序：
//! - 把矿池、钱包、算法和线程数写成矿工自己的配置文件
//! - 从配置文件推算当前的处理配置
//! - 读取矿工的 HTTP 遥测并归一化为 [`Stats`]
//!
//! 进程的启动、停止和重启不在本库范围内。

pub mod config;
pub mod logging;
pub mod miner;
pub mod utils;

pub use config::Settings;
pub use miner::{new_miner, XmrStak};
pub use miner_core::{Miner, MinerConfig, MinerError, MinerKind, ProcessingConfig, Stats};

/// 程序版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 程序名称
pub const NAME: &str = "bloc-miner";
