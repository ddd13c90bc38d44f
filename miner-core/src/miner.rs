//! 矿工适配器特征定义

use crate::error::MinerError;
use crate::types::{ProcessingConfig, Stats};
use async_trait::async_trait;

/// 矿工适配器特征
///
/// 每种矿工程序一个实现，让监管程序以统一方式写配置、读取身份和统计。
/// 修改状态的操作需要 `&mut self`：同一实例同一时间只允许一个调用方，
/// 需要共享时由调用方自行加锁。
#[async_trait]
pub trait Miner: Send + Sync {
    /// 适配器名称
    fn name(&self) -> &str;

    /// 最近一次成功获取的算力，不会主动刷新
    fn last_hashrate(&self) -> f64;

    /// 在可执行文件目录写入矿工配置，成功后清零缓存的算力
    ///
    /// 文件按顺序写入且不是原子的，中途失败会留下部分写入的配置目录。
    async fn write_config(
        &mut self,
        pool_endpoint: &str,
        wallet_address: &str,
        coin_algorithm: &str,
        processing_config: &ProcessingConfig,
    ) -> Result<(), MinerError>;

    /// 从磁盘上的配置重新推算当前处理配置
    async fn processing_config(&self) -> ProcessingConfig;

    /// 获取一次遥测并归一化为统计快照
    ///
    /// 失败时不修改任何缓存状态。
    async fn get_stats(&mut self) -> Result<Stats, MinerError>;
}
