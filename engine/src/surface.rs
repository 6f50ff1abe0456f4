use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// 每一列的参考地表高度，由外部的世界生成流程提供
pub trait SurfaceHeight: Sync {
    fn surface_height_at(&self, x: i32, z: i32) -> f32;
}

impl<F> SurfaceHeight for F
where
    F: Fn(i32, i32) -> f32 + Sync,
{
    fn surface_height_at(&self, x: i32, z: i32) -> f32 {
        self(x, z)
    }
}

/// 平坦地表
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatSurface(pub f32);

impl SurfaceHeight for FlatSurface {
    fn surface_height_at(&self, _x: i32, _z: i32) -> f32 {
        self.0
    }
}

/// 地形高度配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerlinSurfaceConfig {
    pub seed: u32,
    pub min_height: i32,
    pub max_height: i32,
    pub scale: f64,
    pub octaves: usize,
}

impl Default for PerlinSurfaceConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            min_height: 0,
            max_height: 128,
            scale: 0.01,
            octaves: 4,
        }
    }
}

/// 多层 Perlin 噪声叠加得到的地表高度
pub struct PerlinSurface {
    terrain_noise: Perlin,
    config: PerlinSurfaceConfig,
}

impl PerlinSurface {
    pub fn new(config: PerlinSurfaceConfig) -> Self {
        Self { terrain_noise: Perlin::new(config.seed), config }
    }
}

impl SurfaceHeight for PerlinSurface {
    fn surface_height_at(&self, x: i32, z: i32) -> f32 {
        let mut height = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.config.scale;

        for _ in 0..self.config.octaves {
            height += self.terrain_noise.get([x as f64 * frequency, z as f64 * frequency]) * amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        // 叠加后的值可能略超出 [-1, 1]
        let normalized = ((height + 1.0) * 0.5).clamp(0.0, 1.0);
        let span = (self.config.max_height - self.config.min_height) as f64;
        (self.config.min_height as f64 + normalized * span) as f32
    }
}
