use std::fmt;
use std::sync::Arc;

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

/// 确定性的三维相干噪声，输出大致位于 [-1, 1]
pub trait Noise3D: Send + Sync {
    fn noise(&self, x: f32, y: f32, z: f32) -> f32;
}

/// 根据 zone 种子创建噪声源
pub type NoiseFactory = Arc<dyn Fn(u64) -> Box<dyn Noise3D> + Send + Sync>;

pub fn default_noise_factory() -> NoiseFactory {
    Arc::new(|seed: u64| -> Box<dyn Noise3D> { Box::new(BrownianSimplex::new(seed)) })
}

/// Two-octave fractal Brownian motion over OpenSimplex2.
pub struct BrownianSimplex {
    noise: FastNoiseLite,
    seed: u64,
}

impl BrownianSimplex {
    pub const OCTAVES: i32 = 2;

    pub fn new(seed: u64) -> Self {
        let mut noise = FastNoiseLite::with_seed(fold_seed(seed));
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::FBm));
        noise.set_fractal_octaves(Some(Self::OCTAVES));
        // 坐标在调用方已经缩放过
        noise.set_frequency(Some(1.0));
        Self { noise, seed }
    }
}

impl Noise3D for BrownianSimplex {
    fn noise(&self, x: f32, y: f32, z: f32) -> f32 {
        self.noise.get_noise_3d(x, y, z)
    }
}

impl fmt::Debug for BrownianSimplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrownianSimplex").field("seed", &self.seed).finish()
    }
}

/// 固定输出的噪声，用于预览和测试
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl Noise3D for ConstantNoise {
    fn noise(&self, _x: f32, _y: f32, _z: f32) -> f32 { self.0 }
}

/// 64 位种子折叠为噪声库使用的 32 位种子
pub fn fold_seed(seed: u64) -> i32 {
    ((seed >> 32) ^ (seed & 0xFFFF_FFFF)) as u32 as i32
}
