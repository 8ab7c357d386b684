use chrono::Local; // 用于获取本地时间
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// 初始化全局日志
///
/// 默认写到 stderr，格式带本地时间戳；
/// RUST_LOG 环境变量可以覆盖这里给的默认级别。
pub fn init(level: LevelFilter) {
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
