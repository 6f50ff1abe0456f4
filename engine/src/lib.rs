//! Layered terrain zones for voxel world generation.
//!
//! A [`ZoneStack`] holds sibling zones; layered zones are stacked above and
//! below the terrain surface with noise-perturbed thickness per column.

pub mod cache;
pub mod config;
pub mod error;
pub mod layer;
pub mod noise_source;
pub mod range;
pub mod region;
pub mod resolver;
pub mod stack;
pub mod surface;
pub mod zone;

pub use cache::{ColumnCache, ColumnPos};
pub use config::{NamedOrdering, OrderingSpec, ZoneConfig, ZoneKind, ZoneStackConfig};
pub use error::{Result, ZoneError};
pub use layer::{ordering, LayerDescriptor, LayerId, Side};
pub use noise_source::{BrownianSimplex, ConstantNoise, Noise3D, NoiseFactory};
pub use range::{Bound, LayerRange};
pub use region::{HeightBandRegionFunction, LayeredZoneRegionFunction, ZoneRegionFunction};
pub use stack::{RegionRequest, ZoneMap, ZoneStack, ZoneStackBuilder};
pub use surface::{FlatSurface, PerlinSurface, PerlinSurfaceConfig, SurfaceHeight};
pub use zone::Zone;
