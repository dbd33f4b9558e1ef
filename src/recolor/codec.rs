//! # 像素编解码模块
//!
//! ## 设计思路
//!
//! 像素在缓冲区中以 32 位 ARGB 整数存放（`0xAARRGGBB`）。
//! 本模块只做掩码与移位，不做任何钳制或校验：通道类型为 `u8`，
//! 越界值在类型层面无法构造。

/// 不透明 alpha 通道（写回时始终强制为 255）。
pub const OPAQUE_ALPHA: u32 = 0xFF00_0000;

/// 单个像素的 RGB 三通道值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// 从 ARGB 整数中拆出红、绿、蓝三个通道，忽略 alpha。
pub fn unpack(argb: u32) -> Rgb {
    Rgb {
        red: ((argb & 0x00FF_0000) >> 16) as u8,
        green: ((argb & 0x0000_FF00) >> 8) as u8,
        blue: (argb & 0x0000_00FF) as u8,
    }
}

/// 将三通道合成为 ARGB 整数，alpha 固定为 `0xFF`。
pub fn pack(color: Rgb) -> u32 {
    u32::from(color.blue) | (u32::from(color.green) << 8) | (u32::from(color.red) << 16) | OPAQUE_ALPHA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_reads_channels_by_byte_position() {
        assert_eq!(unpack(0x12_34_56_78), Rgb::new(0x34, 0x56, 0x78));
    }

    #[test]
    fn unpack_ignores_alpha() {
        assert_eq!(unpack(0x00_C8_C8_C8), unpack(0xFF_C8_C8_C8));
    }

    #[test]
    fn pack_forces_opaque_alpha() {
        assert_eq!(pack(Rgb::new(0, 0, 0)), 0xFF00_0000);
        assert_eq!(pack(Rgb::new(210, 120, 180)), 0xFF_D2_78_B4);
    }
}
