use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::range::LayerRange;

pub const CHUNK_SIZE_X: usize = 32;
pub const CHUNK_SIZE_Z: usize = 32;

/// 默认预分配：约 100 个区块的列
pub const DEFAULT_CACHE_CAPACITY: usize = CHUNK_SIZE_X * CHUNK_SIZE_Z * 100;

/// 水平方向上的一列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnPos {
    pub x: i32,
    pub z: i32,
}

impl ColumnPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Per-column memo of one layer's range.
///
/// Single entries are read and written atomically through the shard locks;
/// there is no whole-cache lock. Entries are never evicted while a session
/// runs because a column's range is fixed for a given seed.
#[derive(Debug, Default)]
pub struct ColumnCache {
    ranges: DashMap<ColumnPos, LayerRange>,
}

impl ColumnCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { ranges: DashMap::with_capacity(capacity) }
    }

    pub fn get(&self, pos: ColumnPos) -> Option<LayerRange> {
        self.ranges.get(&pos).map(|r| *r.value())
    }

    /// 写入并返回缓存中的值；并发写同一列时保留先写入的结果
    pub fn insert(&self, pos: ColumnPos, range: LayerRange) -> LayerRange {
        *self.ranges.entry(pos).or_insert(range).value()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&self) {
        self.ranges.clear();
    }
}
