//! Utils: 日志与输入校验工具模块

pub mod logger;
pub mod validator;
