use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};

/// 常用的层排序值。符号决定在地表之上还是之下，绝对值越小越靠近地表。
pub mod ordering {
    pub const HIGH_SKY: i32 = 300;
    pub const MEDIUM_SKY: i32 = 200;
    pub const LOW_SKY: i32 = 100;
    pub const SURFACE: i32 = 0;
    pub const SHALLOW_UNDERGROUND: i32 = -100;
    pub const MEDIUM_UNDERGROUND: i32 = -200;
    pub const DEEP_UNDERGROUND: i32 = -300;
}

/// 层位于地表的哪一侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Aboveground,
    Underground,
}

impl Side {
    pub fn of(ordering: i32) -> Self {
        if ordering >= 0 { Side::Aboveground } else { Side::Underground }
    }

    /// +1 above the surface, -1 below it
    pub fn sign(self) -> i32 {
        match self {
            Side::Aboveground => 1,
            Side::Underground => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Aboveground => f.write_str("aboveground"),
            Side::Underground => f.write_str("underground"),
        }
    }
}

/// Stable handle of a layered zone inside its sibling group.
///
/// 在构建 zone stack 时分配一次，用来在排序后的兄弟列表中找到“自己”。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 一个层的配置：宽度范围与排序值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerDescriptor {
    min_width: i32,
    max_width: i32,
    ordering: i32,
}

impl LayerDescriptor {
    pub fn new(min_width: i32, max_width: i32, ordering: i32) -> Result<Self> {
        if min_width < 0 {
            return Err(ZoneError::NegativeWidth { min_width });
        }
        if min_width > max_width {
            return Err(ZoneError::InvalidWidth { min_width, max_width });
        }
        Ok(Self { min_width, max_width, ordering })
    }

    pub fn min_width(&self) -> i32 { self.min_width }

    pub fn max_width(&self) -> i32 { self.max_width }

    pub fn ordering(&self) -> i32 { self.ordering }

    pub fn side(&self) -> Side { Side::of(self.ordering) }

    pub fn is_underground(&self) -> bool { self.ordering < 0 }

    /// Distance rank from the surface: smaller is closer.
    pub fn depth_rank(&self) -> u32 { self.ordering.unsigned_abs() }

    /// 把 [-1, 1] 的噪声值映射为该层在某一列的宽度。
    ///
    /// 超出范围的噪声会被截断，NaN 按 0 处理；结果总在 `[min_width, max_width]` 内。
    pub fn width_for(&self, noise: f32) -> i32 {
        let noise = if noise.is_nan() { 0.0 } else { noise.clamp(-1.0, 1.0) };
        let t = (noise + 1.0) / 2.0;
        let span = (self.max_width - self.min_width) as f32;
        let width = (self.min_width as f32 + t * span + 0.5).floor() as i32;
        width.clamp(self.min_width, self.max_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_widths() {
        assert_eq!(
            LayerDescriptor::new(8, 4, ordering::SURFACE),
            Err(ZoneError::InvalidWidth { min_width: 8, max_width: 4 })
        );
        assert_eq!(
            LayerDescriptor::new(-1, 4, ordering::SURFACE),
            Err(ZoneError::NegativeWidth { min_width: -1 })
        );
        assert!(LayerDescriptor::new(5, 5, ordering::LOW_SKY).is_ok());
    }

    #[test]
    fn test_side_from_ordering() {
        assert_eq!(Side::of(ordering::SURFACE), Side::Aboveground);
        assert_eq!(Side::of(ordering::HIGH_SKY), Side::Aboveground);
        assert_eq!(Side::of(-1), Side::Underground);
        assert_eq!(Side::Underground.sign(), -1);
        assert_eq!(Side::Underground.to_string(), "underground");
    }

    #[test]
    fn test_width_for_noise_extremes() {
        let layer = LayerDescriptor::new(4, 8, ordering::SURFACE).unwrap();
        assert_eq!(layer.width_for(-1.0), 4);
        assert_eq!(layer.width_for(1.0), 8);
        assert_eq!(layer.width_for(0.0), 6);
        // 0.25 -> 4 + 0.625 * 4 = 6.5, rounds half up
        assert_eq!(layer.width_for(0.25), 7);
    }

    #[test]
    fn test_width_for_out_of_range_noise() {
        let layer = LayerDescriptor::new(10, 20, ordering::DEEP_UNDERGROUND).unwrap();
        assert_eq!(layer.width_for(3.5), 20);
        assert_eq!(layer.width_for(-7.0), 10);
        assert_eq!(layer.width_for(f32::NAN), 15);
        assert_eq!(layer.width_for(f32::INFINITY), 20);
    }

    #[test]
    fn test_depth_rank() {
        let shallow = LayerDescriptor::new(1, 2, ordering::SHALLOW_UNDERGROUND).unwrap();
        let deep = LayerDescriptor::new(1, 2, ordering::DEEP_UNDERGROUND).unwrap();
        assert!(shallow.depth_rank() < deep.depth_rank());
        assert!(deep.is_underground());
    }
}
