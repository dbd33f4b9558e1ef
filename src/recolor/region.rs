//! # 区域处理模块
//!
//! ## 设计思路
//!
//! 对矩形区域内的每个像素执行 读取 → 解包 → 变换 → 打包 → 写回。
//! 区域按源图实际边界裁剪，超出部分静默跳过；
//! 但区域落在图像内、却不属于当前分带视图的行属于调用方违约，返回错误。
//!
//! 只读共享源图 + 独占目标分带，保证多个区域可并发处理而无需同步。

use super::grid::{BandMut, PixelGrid, Region};
use super::transform::recolor_packed;
use super::RecolorError;

/// 处理一个区域，返回实际写入的像素数。
pub fn process_region(
    source: &PixelGrid,
    destination: &mut BandMut<'_>,
    region: Region,
) -> Result<usize, RecolorError> {
    if destination.width() != source.width() {
        return Err(RecolorError::InvalidConfiguration(format!(
            "目标分带宽度 {} 与源图宽度 {} 不一致",
            destination.width(),
            source.width()
        )));
    }

    if region.is_degenerate(source.width(), source.height()) {
        return Ok(0);
    }

    let rows = region.clipped_rows(source.height());
    let columns = region.clipped_columns(source.width());

    let top = region.top;
    let bottom = top + rows;
    let band_top = destination.top();
    let band_bottom = band_top + destination.rows();
    let outside_band = RecolorError::RegionOutsideBand {
        region_top: top,
        region_bottom: bottom,
        band_top,
        band_bottom,
    };

    if top < band_top || bottom > band_bottom {
        return Err(outside_band);
    }

    let left = region.left as usize;
    let right = left + columns as usize;

    for y in top..bottom {
        let src_row = source.row(y);
        let dst_row = destination.row_mut(y);
        let (Some(src_row), Some(dst_row)) = (src_row, dst_row) else {
            return Err(outside_band);
        };

        for (dst, &src) in dst_row[left..right].iter_mut().zip(&src_row[left..right]) {
            *dst = recolor_packed(src);
        }
    }

    Ok(rows as usize * columns as usize)
}

/// 整幅目标图作为单一视图时的便捷入口。
pub fn process_region_in_grid(
    source: &PixelGrid,
    destination: &mut PixelGrid,
    region: Region,
) -> Result<usize, RecolorError> {
    super::dispatcher::ensure_same_dimensions(source, destination)?;
    let mut band = destination.as_band_mut();
    process_region(source, &mut band, region)
}
