use std::fmt;

use once_cell::sync::OnceCell;
use tracing::{debug, error, trace};

use crate::cache::{ColumnCache, ColumnPos, DEFAULT_CACHE_CAPACITY};
use crate::error::{Result, ZoneError};
use crate::layer::{LayerDescriptor, LayerId, Side};
use crate::noise_source::{default_noise_factory, Noise3D, NoiseFactory};
use crate::range::LayerRange;
use crate::resolver::{LayerEntry, LayerGroup};
use crate::surface::SurfaceHeight;
use crate::zone::Zone;

/// 水平方向的噪声缩放
pub const NOISE_SCALE: f32 = 100.0;
/// 相邻层之间在噪声 y 轴上的间隔，使各层的噪声互不相关
pub const LAYER_NOISE_OFFSET: f32 = 10_000.0;

/// 判断一个方块是否属于某个 zone
pub trait ZoneRegionFunction: Send + Sync + fmt::Debug {
    fn apply(&self, x: i32, y: i32, z: i32, surface: &dyn SurfaceHeight, zone: &Zone) -> Result<bool>;

    /// 分层函数返回自身，其他实现不参与分层
    fn as_layered(&self) -> Option<&LayeredZoneRegionFunction> {
        None
    }
}

/// A zone stacked above or below its layered siblings.
///
/// Layers are ordered by the absolute value of their ordering; each layer's
/// thickness in a column is picked between `min_width` and `max_width` by
/// coherent noise, so layer boundaries undulate across the world. The
/// outermost layer on each side is open-ended: the highest sky layer has no
/// ceiling and the deepest underground layer has no floor.
pub struct LayeredZoneRegionFunction {
    id: LayerId,
    descriptor: LayerDescriptor,
    noise_factory: NoiseFactory,
    noise: OnceCell<Box<dyn Noise3D>>,
    group: LayerGroup,
    ranges: ColumnCache,
}

impl LayeredZoneRegionFunction {
    pub fn new(id: LayerId, descriptor: LayerDescriptor) -> Self {
        Self::with_noise(id, descriptor, default_noise_factory(), DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_noise(id: LayerId, descriptor: LayerDescriptor, noise_factory: NoiseFactory, cache_capacity: usize) -> Self {
        Self {
            id,
            descriptor,
            noise_factory,
            noise: OnceCell::new(),
            group: LayerGroup::new(),
            ranges: ColumnCache::with_capacity(cache_capacity),
        }
    }

    pub fn id(&self) -> LayerId { self.id }

    pub fn descriptor(&self) -> &LayerDescriptor { &self.descriptor }

    pub fn entry(&self) -> LayerEntry {
        LayerEntry { id: self.id, descriptor: self.descriptor }
    }

    pub fn group(&self) -> &LayerGroup { &self.group }

    pub fn cached_columns(&self) -> usize { self.ranges.len() }

    pub fn clear_cache(&self) { self.ranges.clear(); }

    /// 该层在 (x, z) 这一列的高度范围，先查列缓存
    pub fn range_for(&self, x: i32, z: i32, surface: &dyn SurfaceHeight, zone: &Zone) -> Result<LayerRange> {
        let pos = ColumnPos::new(x, z);
        if let Some(range) = self.ranges.get(pos) {
            return Ok(range);
        }
        let range = self.compute_range(pos, surface, zone)?;
        Ok(self.ranges.insert(pos, range))
    }

    fn noise(&self, zone: &Zone) -> &dyn Noise3D {
        let noise = self.noise.get_or_init(|| {
            debug!("Seeding layer {} noise for zone '{}' with seed {}", self.id, zone.name(), zone.seed());
            (self.noise_factory)(zone.seed())
        });
        &**noise
    }

    fn compute_range(&self, pos: ColumnPos, surface: &dyn SurfaceHeight, zone: &Zone) -> Result<LayerRange> {
        let side = self.descriptor.side();
        let layers = self.group.side(zone, side);
        if layers.is_empty() {
            error!("Zone '{}' has no {} layers, layer {} cannot be placed", zone.name(), side, self.id);
            return Err(ZoneError::EmptyLayerGroup { zone: zone.name().to_string(), side });
        }

        trace!("Computing layer {} range for column ({}, {})", self.id, pos.x, pos.z);
        let noise = self.noise(zone);
        let surface_height = surface.surface_height_at(pos.x, pos.z).floor() as i32;
        let sign = side.sign() as f32;

        // small: 比当前层更靠近地表的层的总宽度；large: 再加上当前层
        let mut cumulative_small: i32 = 0;
        let mut cumulative_large: i32 = 0;
        let overflow = || {
            error!("Layer {} for zone '{}' overflows at column ({}, {})", self.id, zone.name(), pos.x, pos.z);
            ZoneError::HeightOverflow { zone: zone.name().to_string(), layer: self.id.0, x: pos.x, z: pos.z }
        };
        for (i, layer) in layers.iter().enumerate() {
            let sample = noise.noise(
                pos.x as f32 / NOISE_SCALE,
                LAYER_NOISE_OFFSET * i as f32 * sign,
                pos.z as f32 / NOISE_SCALE,
            );
            let width = layer.descriptor.width_for(sample);
            cumulative_large = cumulative_large.checked_add(width).ok_or_else(overflow)?;

            if layer.id == self.id {
                let outermost = i == layers.len() - 1;
                // 开放的一侧不参与计算，最外层只检查靠近地表的边界
                let range = match side {
                    Side::Aboveground => {
                        let min = surface_height.checked_add(cumulative_small).ok_or_else(overflow)?;
                        if outermost {
                            LayerRange::new().with_min(min)
                        } else {
                            let max = surface_height.checked_add(cumulative_large).ok_or_else(overflow)?;
                            LayerRange::between(min, max)
                        }
                    }
                    Side::Underground => {
                        let max = surface_height.checked_sub(cumulative_small).ok_or_else(overflow)?;
                        if outermost {
                            LayerRange::new().with_max(max)
                        } else {
                            let min = surface_height.checked_sub(cumulative_large).ok_or_else(overflow)?;
                            LayerRange::between(min, max)
                        }
                    }
                };
                return Ok(range);
            }
            cumulative_small = cumulative_large;
        }

        error!("Layer {} for zone '{}' not found in list of {} layers", self.id, zone.name(), side);
        Err(ZoneError::LayerNotFound { zone: zone.name().to_string(), layer: self.id.0, side })
    }
}

impl ZoneRegionFunction for LayeredZoneRegionFunction {
    fn apply(&self, x: i32, y: i32, z: i32, surface: &dyn SurfaceHeight, zone: &Zone) -> Result<bool> {
        Ok(self.range_for(x, z, surface, zone)?.contains(y))
    }

    fn as_layered(&self) -> Option<&LayeredZoneRegionFunction> {
        Some(self)
    }
}

impl fmt::Debug for LayeredZoneRegionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredZoneRegionFunction")
            .field("id", &self.id)
            .field("descriptor", &self.descriptor)
            .field("cached_columns", &self.ranges.len())
            .finish()
    }
}

/// 固定高度区间的 zone，不随地表变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightBandRegionFunction {
    range: LayerRange,
}

impl HeightBandRegionFunction {
    pub fn new(range: LayerRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> LayerRange { self.range }
}

impl ZoneRegionFunction for HeightBandRegionFunction {
    fn apply(&self, _x: i32, y: i32, _z: i32, _surface: &dyn SurfaceHeight, _zone: &Zone) -> Result<bool> {
        Ok(self.range.contains(y))
    }
}
