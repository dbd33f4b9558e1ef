//! # 颜色变换模块
//!
//! ## 设计思路
//!
//! 判定“接近灰色”的像素，并将其推向偏暖的红色调；非灰色像素原样透传。
//! 所有函数均为纯函数，可在任意工作线程中无锁调用。

use super::codec::{self, Rgb};

/// 灰色判定阈值：三通道两两差值都必须严格小于该值。
pub const GRAY_TOLERANCE: i16 = 30;

const RED_BOOST: i16 = 10;
const GREEN_CUT: i16 = 80;
const BLUE_CUT: i16 = 20;

/// 判断像素是否为灰色系（三通道强度接近，没有某一通道明显偏强）。
pub fn is_shade_of_gray(color: Rgb) -> bool {
    let red = i16::from(color.red);
    let green = i16::from(color.green);
    let blue = i16::from(color.blue);

    (red - green).abs() < GRAY_TOLERANCE
        && (red - blue).abs() < GRAY_TOLERANCE
        && (green - blue).abs() < GRAY_TOLERANCE
}

/// 计算像素的重新着色结果。
///
/// - 灰色系：红 +10（上限 255），绿 -80、蓝 -20（下限 0）
/// - 其他：原样返回
pub fn recolor_pixel(color: Rgb) -> Rgb {
    if !is_shade_of_gray(color) {
        return color;
    }

    Rgb {
        red: (i16::from(color.red) + RED_BOOST).min(255) as u8,
        green: (i16::from(color.green) - GREEN_CUT).max(0) as u8,
        blue: (i16::from(color.blue) - BLUE_CUT).max(0) as u8,
    }
}

/// 对打包后的 ARGB 值执行 解包 → 变换 → 打包。
#[inline]
pub fn recolor_packed(argb: u32) -> u32 {
    codec::pack(recolor_pixel(codec::unpack(argb)))
}
