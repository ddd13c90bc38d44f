//! Miner Core - 矿工适配器特征和类型定义
//!
//! 这个库定义了所有矿工适配器必须实现的统一接口，
//! 让监管程序可以用同样的方式配置和监控结构各异的矿工程序。

pub mod error;
pub mod miner;
pub mod types;

// 重新导出常用类型
pub use error::MinerError;
pub use miner::Miner;
pub use types::{MinerBase, MinerConfig, ProcessingConfig, Stats};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 矿工类型标识符
///
/// 序列化为适配器名称，反序列化与 [`FromStr`](std::str::FromStr) 使用同样宽松的规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MinerKind {
    /// xmr-stak (https://github.com/fireice-uk/xmr-stak)
    XmrStak,
}

impl MinerKind {
    /// 所有已知的矿工类型
    pub const ALL: &[MinerKind] = &[MinerKind::XmrStak];

    /// 适配器名称
    pub fn name(&self) -> &'static str {
        match self {
            MinerKind::XmrStak => "xmr-stak",
        }
    }
}

impl std::fmt::Display for MinerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for MinerKind {
    type Err = MinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xmr-stak" | "xmrstak" | "xmr_stak" => Ok(MinerKind::XmrStak),
            _ => Err(MinerError::configuration(format!("未知的矿工类型: {}", s))),
        }
    }
}

impl TryFrom<String> for MinerKind {
    type Error = MinerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MinerKind> for String {
    fn from(kind: MinerKind) -> Self {
        kind.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_kind_round_trip_through_name() {
        for kind in MinerKind::ALL {
            assert_eq!(kind.to_string().parse::<MinerKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_kind_parse_is_lenient_on_case() {
        assert_eq!("XMR-Stak".parse::<MinerKind>().unwrap(), MinerKind::XmrStak);
        assert!(matches!(
            "xmrig".parse::<MinerKind>(),
            Err(MinerError::Configuration { .. })
        ));
    }

    #[test]
    fn test_kind_deserialize_matches_from_str() {
        for name in ["\"xmr-stak\"", "\"XMR-Stak\"", "\"xmr_stak\""] {
            let kind: MinerKind = serde_json::from_str(name).unwrap();
            assert_eq!(kind, MinerKind::XmrStak);
        }
        assert!(serde_json::from_str::<MinerKind>("\"xmrig\"").is_err());
        assert_eq!(serde_json::to_string(&MinerKind::XmrStak).unwrap(), "\"xmr-stak\"");
    }
}
