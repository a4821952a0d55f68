use std::io;
use thiserror::Error;

/// 命令执行失败的分类
#[derive(Debug, Error)]
pub enum CommandError {
    /// 参数数量或重定向格式不对，尚未触碰文件系统
    #[error("{0}")]
    Usage(&'static str),
    /// 已经组织好措辞的校验或 I/O 错误
    #[error("{0}")]
    Failed(String),
    /// 写控制台失败，交给 REPL 处理
    #[error("console output failed: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    pub fn failed<T: Into<String>>(msg: T) -> Self {
        CommandError::Failed(msg.into())
    }
}
