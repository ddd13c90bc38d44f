//! xmr-stak 配置文件渲染与线程数推算
//!
//! xmr-stak 的配置是一种带注释、允许尾逗号的类 JSON 方言，没有现成的解析器，
//! 这里只做纯文本渲染，不涉及任何文件 I/O。

/// 通用设置文件名
pub const GENERAL_CONFIG_FILE: &str = "config.txt";
/// 矿池列表文件名
pub const POOL_CONFIG_FILE: &str = "pools.txt";
/// CPU 线程配置文件名
pub const CPU_CONFIG_FILE: &str = "cpu.txt";

/// 写入矿池列表的密码，用于向矿池标识本监管程序
pub const POOL_PASSWORD: &str = "BLOC GUI Miner";

const GENERAL_CONFIG: &str = r#"
/*
 * Network timeouts, in seconds.
 * call_timeout - drop the pool connection when a call takes longer than this.
 * retry_time   - wait this long before reconnecting.
 * giveup_limit - reconnect attempts before giving up, 0 means no limit.
 */
"call_timeout" : 10,
"retry_time" : 30,
"giveup_limit" : 0,

/*
 * Output control.
 * verbose_level - 0 silent, 1 connection events, 2 new jobs on difficulty change,
 *                 3 all jobs and results, 4 adds automatic hashrate reports.
 * print_motd    - show the pool operator's message of the day.
 * h_print_time  - seconds between automatic hashrate reports, verbose_level 4 only.
 */
"verbose_level" : 3,
"print_motd" : true,
"h_print_time" : 60,

/*
 * Hardware AES: true forces it, false disables it, null lets the miner decide.
 */
"aes_override" : null,

/*
 * Large pages: always, warn, no_mlck or never.
 * warn tries large pages first and falls back to slow memory.
 */
"use_slow_memory" : "warn",

/*
 * Only negotiate secure TLS algorithms.
 */
"tls_secure_algo" : true,

/*
 * Run without keyboard reports. flush_stdout flushes after every line when piped.
 */
"daemon_mode" : true,
"flush_stdout" : false,

/*
 * Copy all output to this file, empty disables it.
 */
"output_file" : "",

/*
 * Built-in web server serving the telemetry API, 0 switches it off.
 * An empty http_login disables authentication.
 */
"httpd_port" : 16000,
"http_login" : "",
"http_pass" : "",

/*
 * Prefer IPv4 when a host resolves to both address families.
 */
"prefer_ipv4" : true,
"#;

const CPU_CONFIG_HEADER: &str = r#"
/*
 * Per-thread settings, one entry per mining thread.
 * low_power_mode - true, or 1 to 5, trades cache usage for single thread speed.
 * no_prefetch    - skip prefetching, occasionally a few percent faster.
 * asm            - hash implementation, auto lets the miner pick.
 * affine_to_cpu  - false, or the index of the core this thread is pinned to.
 *
 * An empty list keeps CPU mining configured with no threads.
 * To switch CPU mining off entirely use:
 * "cpu_threads_conf" :
 * null,
 */

"cpu_threads_conf" :
[
"#;

const CPU_CONFIG_FOOTER: &str = "],\n";

/// 通用设置，固定模板，不含调用方提供的值
pub fn general_config() -> &'static str {
    GENERAL_CONFIG
}

/// 矿池列表
///
/// 三个参数原样嵌入双引号之间，不做转义，调用方不能传入含 `"` 的字符串。
pub fn pool_config(pool_endpoint: &str, wallet_address: &str, coin_algorithm: &str) -> String {
    format!(
        r#"
"pool_list" :
[
    {{"pool_address" : "{}", "wallet_address" : "{}", "rig_id" : "", "pool_password" : "{}", "use_nicehash" : false, "use_tls" : false, "tls_fingerprint" : "", "pool_weight" : 1 }},
],
"currency" : "{}",
"#,
        pool_endpoint, wallet_address, POOL_PASSWORD, coin_algorithm
    )
}

/// CPU 线程配置，每个线程一段，`affine_to_cpu` 为从 0 开始的线程序号
///
/// `threads == 0` 渲染为空列表，而不是关闭 CPU 挖矿的 `null`。
pub fn cpu_config(threads: u16) -> String {
    let mut config = String::from(CPU_CONFIG_HEADER);
    for index in 0..threads {
        config.push_str(&format!(
            "    {{ \"low_power_mode\" : false, \"no_prefetch\" : true, \"asm\" : \"auto\", \"affine_to_cpu\" : {} }},\n",
            index
        ));
    }
    config.push_str(CPU_CONFIG_FOOTER);
    config
}

/// 去掉注释：一行中遇到 `/` 或 `*` 后，该行剩余部分全部丢弃
///
/// 这是粗略的启发式处理，字符串里出现的 `/` 或 `*`（例如路径）同样会截断该行。
pub fn strip_comments(content: &str) -> String {
    let mut stripped = String::with_capacity(content.len());
    for line in content.lines() {
        for c in line.chars() {
            if c == '/' || c == '*' {
                break;
            }
            stripped.push(c);
        }
        stripped.push('\n');
    }
    stripped
}

/// 统计 CPU 配置中的线程段数量（近似值）
///
/// 去掉注释后，每个 `}` 计为一段，不检查是否有配对的 `{`。
/// 不是结构化解析：多余的 `}`、嵌套对象和格式错误都会让结果偏离真实线程数。
pub fn count_thread_stanzas(content: &str) -> u16 {
    let closing = strip_comments(content).matches('}').count();
    u16::try_from(closing).unwrap_or(u16::MAX)
}
