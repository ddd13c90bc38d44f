//! xmr-stak 适配器
//!
//! xmr-stak 通过可执行文件目录下的 `config.txt`、`pools.txt` 和 `cpu.txt`
//! 配置，通过内置 HTTP 服务器的 `/api.json` 提供遥测。

pub mod api;
pub mod templates;

pub use api::XmrStakResponse;

use async_trait::async_trait;
use miner_core::{Miner, MinerBase, MinerConfig, MinerError, MinerKind, ProcessingConfig, Stats};
use std::path::Path;
use tracing::{debug, info, warn};

/// 未指定遥测地址时使用的默认地址，端口与 `config.txt` 中的 `httpd_port` 一致
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:16000/api.json";

/// xmr-stak 矿工适配器
pub struct XmrStak {
    base: MinerBase,
    endpoint: String,
    client: reqwest::Client,
    last_hashrate: f64,
    result_stats_cache: Option<XmrStakResponse>,
}

impl XmrStak {
    /// 创建新的 xmr-stak 适配器
    ///
    /// 可执行文件不要求已经存在；遥测地址为空时使用 [`DEFAULT_ENDPOINT`]。
    pub fn new(config: &MinerConfig) -> Result<Self, MinerError> {
        let base = MinerBase::from_path(&config.path)?;
        let endpoint = config.endpoint_or(DEFAULT_ENDPOINT).to_string();
        validate_endpoint(&endpoint)?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MinerError::configuration(format!("无法创建 HTTP 客户端: {}", e)))?;

        debug!(
            "创建 xmr-stak 适配器: 可执行文件 {}，配置目录 {}，遥测地址 {}",
            base.executable_name(),
            base.executable_dir().display(),
            endpoint
        );

        Ok(Self {
            base,
            endpoint,
            client,
            last_hashrate: 0.0,
            result_stats_cache: None,
        })
    }

    /// 遥测地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 基础身份信息
    pub fn base(&self) -> &MinerBase {
        &self.base
    }

    /// 最近一次成功解码的原始遥测
    pub fn last_response(&self) -> Option<&XmrStakResponse> {
        self.result_stats_cache.as_ref()
    }

    /// 从 `cpu.txt` 推算 CPU 线程数
    ///
    /// xmr-stak 在遥测中把 CPU 和 GPU 线程混在一起，只能以配置文件为准。
    /// 文件不存在是正常的首次运行状态，返回 0。
    async fn cpu_thread_count(&self) -> u16 {
        let path = self.base.config_file(templates::CPU_CONFIG_FILE);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let threads = templates::count_thread_stanzas(&String::from_utf8_lossy(&bytes));
                debug!("{} 中配置了 {} 个 CPU 线程", path.display(), threads);
                threads
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                warn!("无法读取 {}: {}，按 0 个线程处理", path.display(), e);
                0
            }
        }
    }

    async fn fetch_response(&self) -> Result<XmrStakResponse, MinerError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| MinerError::transport(&self.endpoint, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| MinerError::transport(&self.endpoint, e))?;

        serde_json::from_slice(&body).map_err(|e| MinerError::decode(&self.endpoint, e))
    }
}

#[async_trait]
impl Miner for XmrStak {
    fn name(&self) -> &str {
        MinerKind::XmrStak.name()
    }

    fn last_hashrate(&self) -> f64 {
        self.last_hashrate
    }

    async fn write_config(
        &mut self,
        pool_endpoint: &str,
        wallet_address: &str,
        coin_algorithm: &str,
        processing_config: &ProcessingConfig,
    ) -> Result<(), MinerError> {
        let general_path = self.base.config_file(templates::GENERAL_CONFIG_FILE);
        write_file(&general_path, templates::general_config()).await?;

        let pool_path = self.base.config_file(templates::POOL_CONFIG_FILE);
        write_file(
            &pool_path,
            &templates::pool_config(pool_endpoint, wallet_address, coin_algorithm),
        )
        .await?;

        // cpu.txt 存在时 0 个线程表示停用 CPU 挖矿，不存在表示首次运行由矿工自动探测，
        // 所以只改写已有的文件
        let cpu_path = self.base.config_file(templates::CPU_CONFIG_FILE);
        let cpu_config_exists = tokio::fs::try_exists(&cpu_path)
            .await
            .map_err(|e| MinerError::io(&cpu_path, e))?;
        if cpu_config_exists {
            write_file(&cpu_path, &templates::cpu_config(processing_config.threads)).await?;
        } else {
            debug!("{} 不存在，保留首次运行的自动探测", cpu_path.display());
        }

        // 矿工会重启，旧的算力读数作废
        self.last_hashrate = 0.0;

        info!(
            "已写入 xmr-stak 配置: 目录 {}，矿池 {}，算法 {}，CPU 线程 {}",
            self.base.executable_dir().display(),
            pool_endpoint,
            coin_algorithm,
            if cpu_config_exists {
                processing_config.threads.to_string()
            } else {
                "自动".to_string()
            }
        );
        Ok(())
    }

    async fn processing_config(&self) -> ProcessingConfig {
        ProcessingConfig {
            max_usage: 0,
            threads: self.cpu_thread_count().await,
            max_threads: u16::try_from(num_cpus::get()).unwrap_or(u16::MAX),
            kind: self.name().to_string(),
        }
    }

    async fn get_stats(&mut self) -> Result<Stats, MinerError> {
        let response = self.fetch_response().await?;
        let stats = response.to_stats();

        debug!(
            "xmr-stak 统计: 算力 {}，有效份额 {}，无效份额 {}，错误 {} 条",
            stats.hashrate_human,
            stats.shares_good,
            stats.shares_bad,
            stats.errors.len()
        );

        self.last_hashrate = stats.hashrate;
        self.result_stats_cache = Some(response);
        Ok(stats)
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), MinerError> {
    let url = url::Url::parse(endpoint)
        .map_err(|e| MinerError::configuration(format!("无效的遥测地址 {}: {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(MinerError::configuration(format!(
            "遥测地址必须使用 http 或 https，实际为 {}: {}",
            scheme, endpoint
        ))),
    }
}

async fn write_file(path: &Path, content: &str) -> Result<(), MinerError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| MinerError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn miner_in(dir: &TempDir) -> XmrStak {
        let config = MinerConfig::new(dir.path().join("xmr-stak"), "");
        XmrStak::new(&config).unwrap()
    }

    #[test]
    fn test_new_uses_default_endpoint() {
        let miner = XmrStak::new(&MinerConfig::new("/opt/xmr-stak/xmr-stak", "")).unwrap();
        assert_eq!(miner.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(miner.name(), "xmr-stak");
        assert_eq!(miner.last_hashrate(), 0.0);
        assert!(miner.last_response().is_none());
        assert_eq!(miner.base().executable_dir(), Path::new("/opt/xmr-stak"));
    }

    #[test]
    fn test_default_endpoint_matches_httpd_port() {
        assert!(DEFAULT_ENDPOINT.contains(":16000/"));
        assert!(templates::general_config().contains("\"httpd_port\" : 16000,"));
    }

    #[test]
    fn test_new_rejects_bad_endpoint() {
        let result = XmrStak::new(&MinerConfig::new("/opt/xmr-stak/xmr-stak", "not a url"));
        assert!(matches!(result, Err(MinerError::Configuration { .. })));

        let result = XmrStak::new(&MinerConfig::new(
            "/opt/xmr-stak/xmr-stak",
            "ftp://127.0.0.1/api.json",
        ));
        assert!(matches!(result, Err(MinerError::Configuration { .. })));
    }

    #[test]
    fn test_new_rejects_empty_path() {
        let result = XmrStak::new(&MinerConfig::new("", ""));
        assert!(matches!(result, Err(MinerError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_first_run_does_not_create_cpu_config() {
        let dir = TempDir::new().unwrap();
        let mut miner = miner_in(&dir);

        miner
            .write_config(
                "pool.example.com:3333",
                "4Wallet",
                "monero",
                &ProcessingConfig::with_threads(4),
            )
            .await
            .unwrap();

        assert!(dir.path().join(templates::GENERAL_CONFIG_FILE).exists());
        assert!(dir.path().join(templates::POOL_CONFIG_FILE).exists());
        assert!(!dir.path().join(templates::CPU_CONFIG_FILE).exists());
        assert_eq!(miner.processing_config().await.threads, 0);
    }

    #[tokio::test]
    async fn test_existing_cpu_config_is_rewritten() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(templates::CPU_CONFIG_FILE),
            templates::cpu_config(1),
        )
        .unwrap();
        let mut miner = miner_in(&dir);

        for threads in [6u16, 0, 3] {
            miner
                .write_config(
                    "pool.example.com:3333",
                    "4Wallet",
                    "monero",
                    &ProcessingConfig::with_threads(threads),
                )
                .await
                .unwrap();
            let processing = miner.processing_config().await;
            assert_eq!(processing.threads, threads);
        }

        // 0 个线程写成空列表，文件仍然保留
        miner
            .write_config(
                "pool.example.com:3333",
                "4Wallet",
                "monero",
                &ProcessingConfig::with_threads(0),
            )
            .await
            .unwrap();
        assert!(dir.path().join(templates::CPU_CONFIG_FILE).exists());
    }

    #[tokio::test]
    async fn test_processing_config_reports_host() {
        let dir = TempDir::new().unwrap();
        let miner = miner_in(&dir);
        let processing = miner.processing_config().await;

        assert_eq!(processing.max_usage, 0);
        assert_eq!(processing.threads, 0);
        assert_eq!(processing.max_threads as usize, num_cpus::get().min(u16::MAX as usize));
        assert_eq!(processing.kind, "xmr-stak");
    }

    #[tokio::test]
    async fn test_write_config_fails_when_directory_missing() {
        let dir = TempDir::new().unwrap();
        let config = MinerConfig::new(dir.path().join("missing").join("xmr-stak"), "");
        let mut miner = XmrStak::new(&config).unwrap();

        let result = miner
            .write_config(
                "pool.example.com:3333",
                "4Wallet",
                "monero",
                &ProcessingConfig::default(),
            )
            .await;
        match result {
            Err(MinerError::Io { path, .. }) => {
                assert!(path.ends_with(templates::GENERAL_CONFIG_FILE));
            }
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
