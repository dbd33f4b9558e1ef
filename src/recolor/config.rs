//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有可调策略集中到 `RecolorConfig`：工作线程数、余数行策略、解码像素上限。
//! `RecolorSettings` 是面向设置文件的宽松形态（字段可缺省、允许负数输入），
//! 经 `into_config` 校验后才转为核心使用的 `RecolorConfig`。
//!
//! ## 实现思路
//!
//! - `Default` 提供可直接运行的配置（4 个工作线程，保留余数行不处理）。
//! - `BandRemainder` 负责策略字符串解析与反向输出。
//! - 设置文件为 JSON，解析失败时返回 `InvalidConfiguration`。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RecolorError;

/// 默认工作线程数。
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// 校验工作线程数，必须为正。
pub fn ensure_worker_count(worker_count: usize) -> Result<(), RecolorError> {
    if worker_count == 0 {
        return Err(RecolorError::InvalidConfiguration(
            "工作线程数必须大于 0".to_string(),
        ));
    }
    Ok(())
}

/// 将外部输入（设置文件、命令行）中的有符号线程数转换为 `usize`。
pub fn worker_count_from_i64(raw: i64) -> Result<usize, RecolorError> {
    if raw <= 0 {
        return Err(RecolorError::InvalidConfiguration(format!(
            "工作线程数必须大于 0（当前：{}）",
            raw
        )));
    }
    usize::try_from(raw)
        .map_err(|_| RecolorError::InvalidConfiguration(format!("工作线程数过大：{}", raw)))
}

/// 高度不能被工作线程数整除时，余下行的处理策略。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandRemainder {
    /// 余数行保持原样，不做处理。
    #[default]
    Leave,
    /// 最后一个分带吸收余数行。
    AbsorbIntoLastBand,
}

impl BandRemainder {
    /// 从外部字符串解析策略。
    pub fn from_str(policy: &str) -> Result<Self, RecolorError> {
        match policy.trim().to_lowercase().as_str() {
            "leave" => Ok(Self::Leave),
            "absorb_into_last_band" | "absorb" => Ok(Self::AbsorbIntoLastBand),
            other => Err(RecolorError::InvalidConfiguration(format!(
                "未知余数行策略：{}（可选：leave / absorb_into_last_band）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::AbsorbIntoLastBand => "absorb_into_last_band",
        }
    }
}

/// 重新着色配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecolorConfig {
    /// 工作线程数，同时也是分带数。
    pub worker_count: usize,
    /// 余数行策略。
    pub remainder: BandRemainder,
    /// 解码后的像素上限（`width * height`），仅 I/O 层使用。
    pub max_decoded_pixels: u64,
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            remainder: BandRemainder::Leave,
            max_decoded_pixels: 40_000_000,
        }
    }
}

impl RecolorConfig {
    /// 校验配置，工作线程数必须为正。
    pub fn validate(&self) -> Result<(), RecolorError> {
        ensure_worker_count(self.worker_count)?;
        if self.max_decoded_pixels == 0 {
            return Err(RecolorError::InvalidConfiguration(
                "max_decoded_pixels 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_remainder(mut self, remainder: BandRemainder) -> Self {
        self.remainder = remainder;
        self
    }
}

/// 设置文件形态。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecolorSettings {
    #[serde(default)]
    pub worker_count: Option<i64>,
    #[serde(default)]
    pub remainder: Option<String>,
    #[serde(default)]
    pub max_decoded_pixels: Option<u64>,
}

impl RecolorSettings {
    /// 从 JSON 文本解析设置。
    pub fn from_json(content: &str) -> Result<Self, RecolorError> {
        serde_json::from_str(content)
            .map_err(|e| RecolorError::InvalidConfiguration(format!("解析设置失败：{}", e)))
    }

    /// 从 JSON 文件读取设置。
    pub fn load(path: &Path) -> Result<Self, RecolorError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RecolorError::InvalidConfiguration(format!("读取设置文件 {} 失败：{}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// 合并到默认配置并校验。
    pub fn into_config(self) -> Result<RecolorConfig, RecolorError> {
        let mut config = RecolorConfig::default();

        if let Some(worker_count) = self.worker_count {
            config.worker_count = worker_count_from_i64(worker_count)?;
        }

        if let Some(remainder) = self.remainder.as_deref() {
            config.remainder = BandRemainder::from_str(remainder)?;
        }

        if let Some(max_decoded_pixels) = self.max_decoded_pixels {
            config.max_decoded_pixels = max_decoded_pixels;
        }

        config.validate()?;
        Ok(config)
    }
}
