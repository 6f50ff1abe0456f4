use thiserror::Error;

use crate::layer::Side;

/// 分层区域解析中可能出现的错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Layer {layer} for zone '{zone}' not found in list of {side} layers")]
    LayerNotFound { zone: String, layer: u32, side: Side },
    #[error("Zone '{zone}' has no {side} layers")]
    EmptyLayerGroup { zone: String, side: Side },
    #[error("Invalid layer width: min_width {min_width} is greater than max_width {max_width}")]
    InvalidWidth { min_width: i32, max_width: i32 },
    #[error("Invalid layer width: min_width {min_width} is negative")]
    NegativeWidth { min_width: i32 },
    #[error("Duplicate zone name '{0}'")]
    DuplicateZone(String),
    #[error("Unknown zone '{0}'")]
    UnknownZone(String),
    #[error("Layer {layer} of zone '{zone}' overflows the world height range at column ({x}, {z})")]
    HeightOverflow { zone: String, layer: u32, x: i32, z: i32 },
    #[error("Region of {0:?} voxels is too large to sample")]
    RegionTooLarge([u32; 3]),
    #[error("Region at origin {origin:?} with size {size:?} extends past the world coordinate range")]
    RegionOutOfRange { origin: [i32; 3], size: [u32; 3] },
    #[error("Zone stack config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ZoneError>;
