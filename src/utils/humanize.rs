//! 算力和运行时间的显示格式化

const HASHRATE_UNITS: [&str; 6] = ["H/s", "KH/s", "MH/s", "GH/s", "TH/s", "PH/s"];

/// 格式化算力显示（智能单位自适应）
///
/// 选择使数值不小于 1 的最大单位，保留两位小数。
/// 零、负数和非有限值都显示为 `0.00 H/s`。
///
/// # 示例
/// ```
/// use bloc_miner::utils::humanize_hashrate;
///
/// assert_eq!(humanize_hashrate(1234.5), "1.23 KH/s");
/// assert_eq!(humanize_hashrate(987.0), "987.00 H/s");
/// ```
pub fn humanize_hashrate(hashrate: f64) -> String {
    if !hashrate.is_finite() || hashrate <= 0.0 {
        return "0.00 H/s".to_string();
    }

    let mut value = hashrate;
    let mut unit_index = 0;
    while value >= 1000.0 && unit_index < HASHRATE_UNITS.len() - 1 {
        value /= 1000.0;
        unit_index += 1;
    }

    format!("{:.2} {}", value, HASHRATE_UNITS[unit_index])
}

/// 格式化运行时间（秒）
///
/// # 示例
/// ```
/// use bloc_miner::utils::humanize_time;
///
/// assert_eq!(humanize_time(45), "45s");
/// assert_eq!(humanize_time(3607), "1h 0m 7s");
/// ```
pub fn humanize_time(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
