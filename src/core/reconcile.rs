//! 目录清理：删除目标目录中不在期望集合内的条目

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::event::{Event, EventBus};

/// 使目标目录的内容与期望文件名集合一致
///
/// - 目录不存在时连同父目录一起创建
/// - 只做非递归遍历，按文件名判断去留，不检查内容、大小或时间戳：
///   名字匹配的文件即使内容过期也原样保留
/// - 创建和删除失败都不上报任务，降级为警告日志
pub fn reconcile(dest_dir: &str, expected: &HashSet<String>, bus: &mut EventBus) {
    let dir = Path::new(dest_dir);
    if let Err(e) = fs::create_dir_all(dir) {
        log::warn!("创建下载目录失败: {}: {}", dest_dir, e);
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("读取下载目录失败: {}: {}", dest_dir, e);
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if expected.contains(&name) {
            continue;
        }

        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(e) = removed {
            log::warn!("删除过期条目失败: {}: {}", name, e);
        }

        // 面向用户的输出由监听器负责，核心只留调试日志
        log::debug!("移除过期条目: {}", name);
        bus.emit(Event::FilePruned { name });
    }
}
