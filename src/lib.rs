//! # 灰色调重新着色工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 二进制入口 (main.rs)                      │
//! │   参数解析 · env_logger 初始化 · 阶段耗时日志             │
//! └───────┬──────────────────────────────────────┬───────────┘
//!         ↓ 解码 / 编码                           ↓ 核心调用
//! ┌───────┴───────────┐            ┌─────────────┴────────────┐
//! │ image_io          │ PixelGrid  │ recolor                  │
//! │  文件 ↔ ARGB 网格  │ ─────────→ │  ├─ dispatcher 分带+线程池 │
//! └───────────────────┘            │  ├─ region     区域处理    │
//!                                  │  ├─ transform  灰色着色    │
//!                                  │  └─ codec      ARGB 打包   │
//!                                  └──────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误 `AppError`，合并核心与 I/O 错误 |
//! | [`recolor`] | 分带并行重新着色核心（不做任何文件 I/O） |
//! | [`image_io`] | 图片文件与 `PixelGrid` 之间的解码/编码 |

pub mod error;
pub mod image_io;
pub mod recolor;

pub use error::AppError;
pub use recolor::{recolor_parallel, PixelGrid, RecolorConfig, RecolorError};
