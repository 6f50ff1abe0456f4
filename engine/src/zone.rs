use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::region::ZoneRegionFunction;
use crate::surface::SurfaceHeight;

/// A named region of the world, decided per voxel by its region function.
///
/// `siblings` holds the region functions of every zone sharing this zone's
/// parent, its own included. Zones are read-only once built.
#[derive(Clone)]
pub struct Zone {
    name: String,
    seed: u64,
    region_function: Arc<dyn ZoneRegionFunction>,
    siblings: Arc<[Arc<dyn ZoneRegionFunction>]>,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        seed: u64,
        region_function: Arc<dyn ZoneRegionFunction>,
        siblings: Arc<[Arc<dyn ZoneRegionFunction>]>,
    ) -> Self {
        Self { name: name.into(), seed, region_function, siblings }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn seed(&self) -> u64 { self.seed }

    pub fn region_function(&self) -> &Arc<dyn ZoneRegionFunction> { &self.region_function }

    pub fn sibling_region_functions(&self) -> &[Arc<dyn ZoneRegionFunction>] { &self.siblings }

    /// 方块 (x, y, z) 是否属于该 zone
    pub fn contains(&self, x: i32, y: i32, z: i32, surface: &dyn SurfaceHeight) -> Result<bool> {
        self.region_function.apply(x, y, z, surface, self)
    }
}

impl fmt::Debug for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Zone")
            .field("name", &self.name)
            .field("seed", &self.seed)
            .field("region_function", &self.region_function)
            .field("siblings", &self.siblings.len())
            .finish()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
