//! 实用工具模块
//!
//! 提供算力和运行时间的显示格式化

pub mod humanize;

// 重新导出常用函数
pub use humanize::{humanize_hashrate, humanize_time};

/// 算力显示宏
///
/// 使用示例：
/// ```
/// use bloc_miner::hashrate;
///
/// let rate = 1234567.0;
/// assert_eq!(hashrate!(rate), "1.23 MH/s");
/// ```
#[macro_export]
macro_rules! hashrate {
    ($hashrate:expr) => {
        $crate::utils::humanize_hashrate($hashrate)
    };
}
