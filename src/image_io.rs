//! # 图片读写模块
//!
//! ## 设计思路
//!
//! 核心只认识内存中的 `PixelGrid`。本模块负责两端的协作：
//! 文件 → 解码 → 像素上限检查 → 打包为 ARGB 网格；
//! 网格 → 不透明 RGB 图像 → 按扩展名编码写出。
//!
//! ## 实现思路
//!
//! 1. 先读 header 尺寸，按像素上限快速拒绝
//! 2. 完整解码并转换为 RGBA8
//! 3. 逐像素打包为 `0xAARRGGBB`
//! 4. 写出时丢弃 alpha，输出 RGB8

use std::fs;
use std::path::Path;

use image::{ImageReader, RgbImage, RgbaImage};

use crate::error::AppError;
use crate::recolor::{unpack, PixelGrid, RecolorConfig};

/// 从文件解码为像素网格。
pub fn load_pixel_grid(path: &Path, config: &RecolorConfig) -> Result<PixelGrid, AppError> {
    let (header_width, header_height) = inspect_dimensions(path)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = image::open(path)
        .map_err(|e| AppError::Decode(format!("图片解码失败 {}：{}", path.display(), e)))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    validate_pixel_limits(config, width, height)?;

    log::info!("🖼️ 图片解码成功 - 来源: {} 尺寸: {}x{}", path.display(), width, height);

    grid_from_rgba(&rgba)
}

/// 将像素网格编码写出，格式由扩展名决定。
pub fn save_pixel_grid(grid: &PixelGrid, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    rgb_from_grid(grid)?
        .save(path)
        .map_err(|e| AppError::Encode(format!("写出图片失败 {}：{}", path.display(), e)))?;

    log::info!(
        "💾 图片写出成功 - 目标: {} 尺寸: {}x{}",
        path.display(),
        grid.width(),
        grid.height()
    );

    Ok(())
}

/// RGBA8 图像打包为 ARGB 网格，保留原始 alpha。
pub fn grid_from_rgba(rgba: &RgbaImage) -> Result<PixelGrid, AppError> {
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [red, green, blue, alpha] = p.0;
            (u32::from(alpha) << 24) | (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue)
        })
        .collect();

    Ok(PixelGrid::from_pixels(width, height, pixels)?)
}

/// ARGB 网格展开为不透明 RGB8 图像。
pub fn rgb_from_grid(grid: &PixelGrid) -> Result<RgbImage, AppError> {
    let bytes: Vec<u8> = grid
        .pixels()
        .iter()
        .flat_map(|&argb| {
            let color = unpack(argb);
            [color.red, color.green, color.blue]
        })
        .collect();

    RgbImage::from_raw(grid.width(), grid.height(), bytes)
        .ok_or_else(|| AppError::Encode("像素数据长度异常".to_string()))
}

fn inspect_dimensions(path: &Path) -> Result<(u32, u32), AppError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| AppError::Decode(format!("无法读取图片尺寸 {}：{}", path.display(), e)))
}

fn validate_pixel_limits(config: &RecolorConfig, width: u32, height: u32) -> Result<(), AppError> {
    let pixels = u64::from(width) * u64::from(height);

    if pixels > config.max_decoded_pixels {
        return Err(AppError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}
