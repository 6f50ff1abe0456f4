use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::{Result, ZoneError};
use crate::layer::{LayerDescriptor, LayerId};
use crate::noise_source::{default_noise_factory, Noise3D, NoiseFactory};
use crate::range::LayerRange;
use crate::region::{HeightBandRegionFunction, LayeredZoneRegionFunction, ZoneRegionFunction};
use crate::surface::SurfaceHeight;
use crate::zone::Zone;

/// 单次采样允许的最大方块数
pub const MAX_REGION_VOXELS: usize = 1 << 26;

/// 采样区域请求：以 origin 为起点、size 为尺寸的长方体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRequest {
    pub origin: [i32; 3],
    pub size: [u32; 3],
}

/// Dense per-voxel zone indices of a sampled region.
///
/// Index layout is x fastest, then z, then y. `None` means no zone of the
/// stack claims the voxel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMap {
    pub origin: [i32; 3],
    pub size: [u32; 3],
    pub data: Vec<Option<u16>>,
}

impl ZoneMap {
    #[inline]
    fn index(&self, dx: u32, dy: u32, dz: u32) -> usize {
        let [sx, _, sz] = self.size;
        ((dy as usize) * sz as usize + dz as usize) * sx as usize + dx as usize
    }

    /// 相对 origin 的坐标；越界时返回 None
    pub fn zone_index(&self, dx: u32, dy: u32, dz: u32) -> Option<u16> {
        let [sx, sy, sz] = self.size;
        if dx >= sx || dy >= sy || dz >= sz {
            return None;
        }
        self.data[self.index(dx, dy, dz)]
    }

    pub fn count(&self, zone_index: u16) -> usize {
        self.data.iter().filter(|v| **v == Some(zone_index)).count()
    }
}

enum PendingRegion {
    Layered(LayerDescriptor),
    Band(LayerRange),
}

pub struct ZoneStackBuilder {
    seed: u64,
    entries: Vec<(String, PendingRegion)>,
    noise_factory: NoiseFactory,
    cache_capacity: usize,
}

impl ZoneStackBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            entries: Vec::new(),
            noise_factory: default_noise_factory(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    pub fn layer(mut self, name: impl Into<String>, descriptor: LayerDescriptor) -> Self {
        self.entries.push((name.into(), PendingRegion::Layered(descriptor)));
        self
    }

    pub fn band(mut self, name: impl Into<String>, range: LayerRange) -> Self {
        self.entries.push((name.into(), PendingRegion::Band(range)));
        self
    }

    pub fn noise_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(u64) -> Box<dyn Noise3D> + Send + Sync + 'static,
    {
        self.noise_factory = Arc::new(factory);
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<ZoneStack> {
        if self.entries.len() > u16::MAX as usize {
            return Err(ZoneError::Config(format!("too many zones: {}", self.entries.len())));
        }
        let mut seen = HashSet::new();
        for (name, _) in &self.entries {
            if !seen.insert(name.as_str()) {
                return Err(ZoneError::DuplicateZone(name.clone()));
            }
        }

        // LayerId 即注册顺序，在同一组兄弟中唯一
        let functions: Vec<(String, Arc<dyn ZoneRegionFunction>)> = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, pending))| {
                let function: Arc<dyn ZoneRegionFunction> = match pending {
                    PendingRegion::Layered(descriptor) => Arc::new(LayeredZoneRegionFunction::with_noise(
                        LayerId(i as u32),
                        descriptor,
                        Arc::clone(&self.noise_factory),
                        self.cache_capacity,
                    )),
                    PendingRegion::Band(range) => Arc::new(HeightBandRegionFunction::new(range)),
                };
                (name, function)
            })
            .collect();

        let siblings: Arc<[Arc<dyn ZoneRegionFunction>]> =
            functions.iter().map(|(_, f)| Arc::clone(f)).collect::<Vec<_>>().into();
        let zones: Vec<Zone> = functions
            .into_iter()
            .map(|(name, function)| Zone::new(name, self.seed, function, Arc::clone(&siblings)))
            .collect();

        let layered = zones.iter().filter(|z| z.region_function().as_layered().is_some()).count();
        info!("Built zone stack with {} zones ({} layered), seed {}", zones.len(), layered, self.seed);
        for zone in &zones {
            debug!("  {:?}", zone);
        }

        Ok(ZoneStack { seed: self.seed, zones })
    }
}

/// 一组兄弟 zone，共享同一个种子
#[derive(Debug)]
pub struct ZoneStack {
    seed: u64,
    zones: Vec<Zone>,
}

impl ZoneStack {
    pub fn builder(seed: u64) -> ZoneStackBuilder {
        ZoneStackBuilder::new(seed)
    }

    pub fn seed(&self) -> u64 { self.seed }

    pub fn zones(&self) -> &[Zone] { &self.zones }

    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name() == name)
    }

    pub fn try_zone(&self, name: &str) -> Result<&Zone> {
        self.zone(name).ok_or_else(|| ZoneError::UnknownZone(name.to_string()))
    }

    /// 按注册顺序返回第一个包含该方块的 zone
    pub fn zone_at(&self, x: i32, y: i32, z: i32, surface: &dyn SurfaceHeight) -> Result<Option<&Zone>> {
        Ok(self.zone_index_at(x, y, z, surface)?.map(|i| &self.zones[i as usize]))
    }

    pub fn zone_index_at(&self, x: i32, y: i32, z: i32, surface: &dyn SurfaceHeight) -> Result<Option<u16>> {
        for (i, zone) in self.zones.iter().enumerate() {
            if zone.contains(x, y, z, surface)? {
                return Ok(Some(i as u16));
            }
        }
        Ok(None)
    }

    /// Classifies every voxel of `req`, one rayon task per column.
    pub fn sample_region(&self, req: &RegionRequest, surface: &dyn SurfaceHeight) -> Result<ZoneMap> {
        let [sx, sy, sz] = req.size.map(|s| s as usize);
        let total = sx
            .checked_mul(sy)
            .and_then(|n| n.checked_mul(sz))
            .filter(|n| *n <= MAX_REGION_VOXELS)
            .ok_or(ZoneError::RegionTooLarge(req.size))?;
        // 最后一个方块的坐标必须在 i32 范围内
        let fits = (0..3).all(|axis| {
            i32::try_from(req.origin[axis] as i64 + req.size[axis].saturating_sub(1) as i64).is_ok()
        });
        if !fits {
            return Err(ZoneError::RegionOutOfRange { origin: req.origin, size: req.size });
        }

        let [ox, oy, oz] = req.origin;
        let columns: Vec<Vec<Option<u16>>> = (0..sx * sz)
            .into_par_iter()
            .map(|c| {
                let x = ox + (c % sx) as i32;
                let z = oz + (c / sx) as i32;
                (0..sy)
                    .map(|dy| self.zone_index_at(x, oy + dy as i32, z, surface))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut data = vec![None; total];
        for (c, column) in columns.into_iter().enumerate() {
            let (dx, dz) = (c % sx, c / sx);
            for (dy, value) in column.into_iter().enumerate() {
                data[(dy * sz + dz) * sx + dx] = value;
            }
        }
        Ok(ZoneMap { origin: req.origin, size: req.size, data })
    }

    pub fn cached_columns(&self) -> usize {
        self.zones
            .iter()
            .filter_map(|z| z.region_function().as_layered())
            .map(|l| l.cached_columns())
            .sum()
    }

    /// 生成会话结束时丢弃所有列缓存
    pub fn clear_caches(&self) {
        for layered in self.zones.iter().filter_map(|z| z.region_function().as_layered()) {
            layered.clear_cache();
        }
    }
}
