//! 矿工适配器实现

pub mod xmr_stak;

pub use miner_core::{Miner, MinerBase, MinerConfig, MinerError, MinerKind, ProcessingConfig, Stats};
pub use xmr_stak::XmrStak;

use tracing::info;

/// 按矿工类型创建适配器
///
/// 监管程序可以把不同类型的适配器放在同一个集合里统一轮询。
pub fn new_miner(kind: MinerKind, config: &MinerConfig) -> Result<Box<dyn Miner>, MinerError> {
    let miner: Box<dyn Miner> = match kind {
        MinerKind::XmrStak => Box::new(XmrStak::new(config)?),
    };

    info!("创建矿工适配器: {} ({})", miner.name(), config.path.display());
    Ok(miner)
}
