//! # 重新着色核心模块（recolor）
//!
//! ## 设计思路
//!
//! 将“像素编解码 → 颜色变换 → 区域处理 → 分带调度”按职责拆分为子模块：
//!
//! - `codec`：32 位 ARGB 与 RGB 三通道之间的打包/解包
//! - `transform`：灰色判定与偏暖着色
//! - `grid`：像素缓冲、矩形区域与独占分带视图
//! - `region`：对单个区域逐像素执行变换
//! - `dispatcher`：计算分带、派发工作线程、汇总结果
//! - `config/error`：配置与错误
//!
//! ## 调用链
//!
//! ```text
//! recolor_parallel / recolor_with_config
//!    ↓
//! dispatcher.rs（分带 + 线程池 + 汇总）
//!    ↓  每个分带一个任务
//! region.rs（裁剪 + 逐像素）
//!    ↓
//! transform.rs ←→ codec.rs
//! ```
//!
//! 源图与目标图的所有权始终在调用方，核心只读源图、只写目标图。

mod codec;
mod config;
mod dispatcher;
mod error;
mod grid;
mod region;
mod transform;

pub use codec::{pack, unpack, Rgb, OPAQUE_ALPHA};
pub use config::{
    ensure_worker_count, worker_count_from_i64, BandRemainder, RecolorConfig, RecolorSettings,
    DEFAULT_WORKER_COUNT,
};
pub use dispatcher::{
    partition_bands, recolor_parallel, recolor_sequential, recolor_with_config, RecolorSummary,
};
pub use error::{BandFault, RecolorError};
pub use grid::{BandMut, PixelGrid, Region};
pub use region::{process_region, process_region_in_grid};
pub use transform::{is_shade_of_gray, recolor_packed, recolor_pixel, GRAY_TOLERANCE};
