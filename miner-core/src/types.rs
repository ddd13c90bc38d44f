//! 适配器共享的值类型

use crate::error::MinerError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 矿工配置，由外部监管程序提供，构造后不可变
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerConfig {
    /// 矿工可执行文件路径（不要求已存在）
    pub path: PathBuf,
    /// 遥测 HTTP 地址，为空时由适配器使用默认地址
    #[serde(default)]
    pub endpoint: String,
}

impl MinerConfig {
    /// 创建新的矿工配置
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, endpoint: S) -> Self {
        Self {
            path: path.into(),
            endpoint: endpoint.into(),
        }
    }

    /// 返回实际使用的遥测地址
    pub fn endpoint_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.endpoint.is_empty() {
            default
        } else {
            &self.endpoint
        }
    }
}

/// 计算资源分配
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// 资源使用上限，含义由适配器决定，0 表示未设置
    pub max_usage: u16,
    /// 当前配置的线程数
    pub threads: u16,
    /// 主机逻辑处理器数量
    pub max_threads: u16,
    /// 适配器名称
    #[serde(rename = "type")]
    pub kind: String,
}

impl ProcessingConfig {
    /// 只携带线程数的处理配置，写配置时只会读取该字段
    pub fn with_threads(threads: u16) -> Self {
        Self {
            threads,
            ..Default::default()
        }
    }
}

/// 矿工统计快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// 瞬时算力，不可用时为 0
    pub hashrate: f64,
    /// 人类可读的算力
    pub hashrate_human: String,
    /// 当前难度
    pub current_difficulty: i64,
    /// 连接运行时间（秒）
    pub uptime: u64,
    /// 人类可读的运行时间
    pub uptime_human: String,
    /// 有效份额
    pub shares_good: i64,
    /// 无效份额 = 总份额 - 有效份额，不做截断，负数说明矿工计数本身不一致
    pub shares_bad: i64,
    /// 按固定顺序汇总的错误信息
    pub errors: Vec<String>,
}

impl Stats {
    /// 矿工计数是否自相矛盾（有效份额多于总份额）
    pub fn has_inconsistent_shares(&self) -> bool {
        self.shares_bad < 0
    }
}

/// 各适配器共享的基础身份信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerBase {
    executable_name: String,
    executable_dir: PathBuf,
}

impl MinerBase {
    /// 把可执行文件路径拆分为文件名和所在目录
    pub fn from_path(path: &Path) -> Result<Self, MinerError> {
        if path.as_os_str().is_empty() {
            return Err(MinerError::configuration("矿工可执行文件路径为空"));
        }

        // 以分隔符结尾的是目录而不是可执行文件
        if path.to_string_lossy().ends_with(std::path::is_separator) {
            return Err(MinerError::configuration(format!(
                "矿工路径指向目录而不是可执行文件: {}",
                path.display()
            )));
        }

        let executable_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                MinerError::configuration(format!("无法解析可执行文件名: {}", path.display()))
            })?;

        let executable_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            executable_name,
            executable_dir,
        })
    }

    /// 可执行文件名
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// 可执行文件所在目录，也是配置文件所在目录
    pub fn executable_dir(&self) -> &Path {
        &self.executable_dir
    }

    /// 配置目录下某个文件的完整路径
    pub fn config_file(&self, file_name: &str) -> PathBuf {
        self.executable_dir.join(file_name)
    }
}
