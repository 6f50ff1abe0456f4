use serde::{Deserialize, Serialize};

/// 层范围的单侧边界，`Unbounded` 表示这一侧没有限制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Bound {
    #[default]
    Unbounded,
    At(i32),
}

impl Bound {
    pub fn value(self) -> Option<i32> {
        match self {
            Bound::Unbounded => None,
            Bound::At(v) => Some(v),
        }
    }
}

impl From<Option<i32>> for Bound {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Bound::Unbounded, Bound::At)
    }
}

/// A half-open vertical span `[min, max)` of world heights.
///
/// 构造时使用 builder 风格的 setter；写入列缓存后视为不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerRange {
    pub min: Bound,
    pub max: Bound,
}

impl LayerRange {
    /// 两侧都不受限的范围
    pub const UNBOUNDED: LayerRange = LayerRange { min: Bound::Unbounded, max: Bound::Unbounded };

    pub fn new() -> Self {
        Self::UNBOUNDED
    }

    pub fn between(min: i32, max: i32) -> Self {
        Self { min: Bound::At(min), max: Bound::At(max) }
    }

    pub fn with_min(mut self, min: i32) -> Self {
        self.min = Bound::At(min);
        self
    }

    pub fn with_max(mut self, max: i32) -> Self {
        self.max = Bound::At(max);
        self
    }

    pub fn unset_min(mut self) -> Self {
        self.min = Bound::Unbounded;
        self
    }

    pub fn unset_max(mut self) -> Self {
        self.max = Bound::Unbounded;
        self
    }

    /// `min <= height < max`，未设置的边界视为满足
    #[inline]
    pub fn contains(&self, height: i32) -> bool {
        let satisfies_min = match self.min {
            Bound::Unbounded => true,
            Bound::At(min) => min <= height,
        };
        let satisfies_max = match self.max {
            Bound::Unbounded => true,
            Bound::At(max) => height < max,
        };
        satisfies_min && satisfies_max
    }

    /// Thickness of the span, `None` when either side is open.
    pub fn width(&self) -> Option<i32> {
        match (self.min, self.max) {
            (Bound::At(min), Bound::At(max)) => Some(max - min),
            _ => None,
        }
    }
}
