use once_cell::sync::OnceCell;
use tracing::debug;

use crate::layer::{LayerDescriptor, LayerId, Side};
use crate::zone::Zone;

/// 兄弟层的快照：句柄 + 配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEntry {
    pub id: LayerId,
    pub descriptor: LayerDescriptor,
}

/// Lazily resolved view of the layered siblings of one zone.
///
/// Each list is computed on first access and kept for the lifetime of the
/// owner. Racing initializers all produce the same list; `OnceCell` keeps
/// exactly one of them. The sibling set of a zone must not change once
/// generation has started.
///
/// Ordering is a stable sort by `|ordering|`, so layers with equal distance
/// from the surface keep their registration order.
#[derive(Debug, Default)]
pub struct LayerGroup {
    siblings: OnceCell<Vec<LayerEntry>>,
    aboveground: OnceCell<Vec<LayerEntry>>,
    underground: OnceCell<Vec<LayerEntry>>,
}

impl LayerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有参与分层的兄弟层，按到地表的距离排序
    pub fn siblings(&self, zone: &Zone) -> &[LayerEntry] {
        self.siblings.get_or_init(|| {
            let mut layers: Vec<LayerEntry> = zone
                .sibling_region_functions()
                .iter()
                .filter_map(|f| f.as_layered())
                .map(|l| l.entry())
                .collect();
            layers.sort_by_key(|l| l.descriptor.depth_rank());
            debug!("Resolved {} layered siblings for zone '{}'", layers.len(), zone.name());
            layers
        })
    }

    pub fn aboveground(&self, zone: &Zone) -> &[LayerEntry] {
        self.aboveground.get_or_init(|| self.filtered(zone, Side::Aboveground))
    }

    pub fn underground(&self, zone: &Zone) -> &[LayerEntry] {
        self.underground.get_or_init(|| self.filtered(zone, Side::Underground))
    }

    pub fn side(&self, zone: &Zone, side: Side) -> &[LayerEntry] {
        match side {
            Side::Aboveground => self.aboveground(zone),
            Side::Underground => self.underground(zone),
        }
    }

    fn filtered(&self, zone: &Zone, side: Side) -> Vec<LayerEntry> {
        self.siblings(zone)
            .iter()
            .filter(|l| l.descriptor.side() == side)
            .copied()
            .collect()
    }
}
