//! # 像素网格与区域模型
//!
//! ## 设计思路
//!
//! - `PixelGrid`：调用方持有的 W×H 像素缓冲（行优先，ARGB `u32`）。
//! - `Region`：左上角 + 宽高描述的矩形，处理时按图像边界裁剪。
//! - `BandMut`：目标缓冲中一段连续行的独占可变视图。
//!
//! ## 实现思路
//!
//! 分带通过连续的 `split_at_mut` 切出互不重叠的 `&mut [u32]`，
//! 由借用检查器保证各工作线程只写自己的行，无需加锁。

use super::RecolorError;

/// 行优先的 ARGB 像素缓冲。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelGrid {
    /// 以统一初值创建缓冲。
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![argb; width as usize * height as usize],
        }
    }

    /// 由现成像素数据构建，长度必须等于 `width * height`。
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, RecolorError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| RecolorError::InvalidConfiguration("图像尺寸溢出".to_string()))?;

        if pixels.len() != expected {
            return Err(RecolorError::InvalidConfiguration(format!(
                "像素数据长度异常：{}（期望 {}x{} = {}）",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// 读取 `(x, y)` 处的像素，越界返回 `None`。
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// 写入 `(x, y)` 处的像素，越界时静默忽略并返回 `false`。
    pub fn set(&mut self, x: u32, y: u32, argb: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = self.index(x, y);
        self.pixels[index] = argb;
        true
    }

    /// 取第 `y` 行的只读切片。
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.pixels[start..start + self.width as usize])
    }

    /// 把整幅图作为一个分带视图借出。
    pub fn as_band_mut(&mut self) -> BandMut<'_> {
        BandMut {
            top: 0,
            width: self.width,
            rows: self.height,
            pixels: &mut self.pixels,
        }
    }

    /// 按区域列表切出互不重叠的分带视图。
    ///
    /// 区域必须按 `top` 升序排列且行区间互不相交；
    /// 区域之间的空隙行（以及末尾未覆盖的行）不会出现在任何视图中。
    pub fn split_bands(&mut self, regions: &[Region]) -> Result<Vec<BandMut<'_>>, RecolorError> {
        let width = self.width;
        let height = self.height;
        let row_len = width as usize;

        let mut bands = Vec::with_capacity(regions.len());
        let mut rest: &mut [u32] = &mut self.pixels;
        let mut cursor = 0u32;

        for region in regions {
            let top = region.top.min(height);
            let rows = region.clipped_rows(height);

            if top < cursor {
                return Err(RecolorError::InvalidConfiguration(format!(
                    "分带重叠或未按顺序排列：top={} 早于已分配行 {}",
                    region.top, cursor
                )));
            }

            let skip = (top - cursor) as usize * row_len;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (band, tail) = tail.split_at_mut(rows as usize * row_len);
            rest = tail;
            cursor = top + rows;

            bands.push(BandMut {
                top,
                width,
                rows,
                pixels: band,
            });
        }

        Ok(bands)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// 矩形区域（像素坐标）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// 裁剪到 `image_height` 后实际覆盖的行数。
    pub fn clipped_rows(&self, image_height: u32) -> u32 {
        self.top
            .saturating_add(self.height)
            .min(image_height)
            .saturating_sub(self.top)
    }

    /// 裁剪到 `image_width` 后实际覆盖的列数。
    pub fn clipped_columns(&self, image_width: u32) -> u32 {
        self.left
            .saturating_add(self.width)
            .min(image_width)
            .saturating_sub(self.left)
    }

    /// 裁剪后是否不含任何像素。
    pub fn is_degenerate(&self, image_width: u32, image_height: u32) -> bool {
        self.clipped_rows(image_height) == 0 || self.clipped_columns(image_width) == 0
    }
}

/// 目标缓冲中 `[top, top + rows)` 行的独占可变视图。
#[derive(Debug)]
pub struct BandMut<'a> {
    top: u32,
    width: u32,
    rows: u32,
    pixels: &'a mut [u32],
}

impl BandMut<'_> {
    pub fn top(&self) -> u32 {
        self.top
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// 是否覆盖第 `y` 行（全图坐标）。
    pub fn contains_row(&self, y: u32) -> bool {
        y >= self.top && y < self.top + self.rows
    }

    /// 取全图坐标第 `y` 行的可变切片。
    pub(crate) fn row_mut(&mut self, y: u32) -> Option<&mut [u32]> {
        if !self.contains_row(y) {
            return None;
        }
        let start = (y - self.top) as usize * self.width as usize;
        self.pixels.get_mut(start..start + self.width as usize)
    }
}
