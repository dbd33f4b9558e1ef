//! 应用级统一错误类型模块
//!
//! # 设计思路
//!
//! 核心只产生 `RecolorError`；文件解码、编码与设置加载等外围协作者的错误
//! 在这里与核心错误合并为 `AppError`，供二进制入口统一记录与退出。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `RecolorError` 与 `std::io::Error` 提供 `From` 转换，调用侧直接 `?`。

use crate::recolor::RecolorError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 重新着色核心错误（配置 / 尺寸 / 工作线程失败）
    #[error("{0}")]
    Recolor(#[from] RecolorError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 图片解码失败
    #[error("解码错误: {0}")]
    Decode(String),

    /// 图片编码或写出失败
    #[error("编码错误: {0}")]
    Encode(String),

    /// 超出资源限制
    #[error("资源限制: {0}")]
    ResourceLimit(String),

    /// 设置文件不可用
    #[error("设置错误: {0}")]
    Settings(String),
}
