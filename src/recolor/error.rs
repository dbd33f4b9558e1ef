//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 用单一枚举承载重新着色核心的全部错误，调用侧可按分支匹配。
//! 工作线程的失败不会被吞掉：调度器等待所有分带结束后，
//! 汇总为一个 `WorkerFault` 同步返回给调用方。

use std::fmt;

/// 单个分带的失败记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandFault {
    /// 分带序号（从 0 开始）。
    pub band: usize,
    /// 失败原因。
    pub reason: String,
}

impl fmt::Display for BandFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "分带 #{}：{}", self.band, self.reason)
    }
}

/// 重新着色核心的统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum RecolorError {
    #[error("配置无效：{0}")]
    InvalidConfiguration(String),

    #[error("源图与目标图尺寸不一致：{source_width}x{source_height} vs {destination_width}x{destination_height}")]
    DimensionMismatch {
        source_width: u32,
        source_height: u32,
        destination_width: u32,
        destination_height: u32,
    },

    #[error("区域行 [{region_top}, {region_bottom}) 超出分带范围 [{band_top}, {band_bottom})")]
    RegionOutsideBand {
        region_top: u32,
        region_bottom: u32,
        band_top: u32,
        band_bottom: u32,
    },

    #[error("线程池创建失败：{0}")]
    ThreadPool(String),

    #[error("{failed}/{total} 个分带处理失败，首个错误：{first}")]
    WorkerFault {
        failed: usize,
        total: usize,
        first: BandFault,
    },
}
