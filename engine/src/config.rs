use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};
use crate::layer::{ordering, LayerDescriptor};
use crate::range::LayerRange;
use crate::stack::ZoneStack;

/// 预设的层位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedOrdering {
    HighSky,
    MediumSky,
    LowSky,
    Surface,
    ShallowUnderground,
    MediumUnderground,
    DeepUnderground,
}

impl NamedOrdering {
    pub fn value(self) -> i32 {
        match self {
            NamedOrdering::HighSky => ordering::HIGH_SKY,
            NamedOrdering::MediumSky => ordering::MEDIUM_SKY,
            NamedOrdering::LowSky => ordering::LOW_SKY,
            NamedOrdering::Surface => ordering::SURFACE,
            NamedOrdering::ShallowUnderground => ordering::SHALLOW_UNDERGROUND,
            NamedOrdering::MediumUnderground => ordering::MEDIUM_UNDERGROUND,
            NamedOrdering::DeepUnderground => ordering::DEEP_UNDERGROUND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderingSpec {
    Named(NamedOrdering),
    Value(i32),
}

impl OrderingSpec {
    pub fn value(self) -> i32 {
        match self {
            OrderingSpec::Named(named) => named.value(),
            OrderingSpec::Value(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Layered { min_width: i32, max_width: i32, ordering: OrderingSpec },
    Band {
        #[serde(default)]
        min: Option<i32>,
        #[serde(default)]
        max: Option<i32>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub kind: ZoneKind,
}

/// Serialized description of a zone stack (RON or JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStackConfig {
    pub seed: u64,
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

impl ZoneStackConfig {
    pub fn from_ron_str(s: &str) -> Result<Self> {
        ron::from_str(s).map_err(|e| ZoneError::Config(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| ZoneError::Config(e.to_string()))
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ZoneError::Config(e.to_string()))
    }
}

impl ZoneStack {
    pub fn from_config(config: &ZoneStackConfig) -> Result<ZoneStack> {
        let mut builder = ZoneStack::builder(config.seed);
        if let Some(capacity) = config.cache_capacity {
            builder = builder.cache_capacity(capacity);
        }
        for zone in &config.zones {
            builder = match zone.kind {
                ZoneKind::Layered { min_width, max_width, ordering } => {
                    builder.layer(zone.name.clone(), LayerDescriptor::new(min_width, max_width, ordering.value())?)
                }
                ZoneKind::Band { min, max } => {
                    builder.band(zone.name.clone(), LayerRange { min: min.into(), max: max.into() })
                }
            };
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Bound;

    const STACK_RON: &str = r#"(
        seed: 42,
        zones: [
            (name: "high_sky", kind: Layered(min_width: 30, max_width: 60, ordering: Named(HighSky))),
            (name: "surface", kind: Layered(min_width: 4, max_width: 8, ordering: Value(0))),
            (name: "caves", kind: Layered(min_width: 20, max_width: 40, ordering: Named(DeepUnderground))),
            (name: "lava_lake", kind: Band(min: Some(-80), max: Some(-60))),
        ],
    )"#;

    #[test]
    fn test_parse_ron() {
        let config = ZoneStackConfig::from_ron_str(STACK_RON).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.zones.len(), 4);
        assert_eq!(config.cache_capacity, None);
        assert_eq!(
            config.zones[0].kind,
            ZoneKind::Layered { min_width: 30, max_width: 60, ordering: OrderingSpec::Named(NamedOrdering::HighSky) }
        );
        assert_eq!(config.zones[3].kind, ZoneKind::Band { min: Some(-80), max: Some(-60) });
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "seed": 7,
            "cache_capacity": 128,
            "zones": [
                {"name": "sky", "kind": {"Layered": {"min_width": 5, "max_width": 10, "ordering": {"Named": "LowSky"}}}},
                {"name": "floor", "kind": {"Band": {"max": 0}}}
            ]
        }"#;
        let config = ZoneStackConfig::from_json_str(json).unwrap();
        assert_eq!(config.cache_capacity, Some(128));
        assert_eq!(config.zones[1].kind, ZoneKind::Band { min: None, max: Some(0) });

        let stack = ZoneStack::from_config(&config).unwrap();
        assert_eq!(stack.seed(), 7);
        assert!(stack.zone("sky").unwrap().region_function().as_layered().is_some());
    }

    #[test]
    fn test_stack_from_config() {
        let config = ZoneStackConfig::from_ron_str(STACK_RON).unwrap();
        let stack = ZoneStack::from_config(&config).unwrap();
        let names: Vec<&str> = stack.zones().iter().map(|z| z.name()).collect();
        assert_eq!(names, vec!["high_sky", "surface", "caves", "lava_lake"]);
        let caves = stack.zone("caves").unwrap().region_function().as_layered().unwrap();
        assert_eq!(caves.descriptor().ordering(), ordering::DEEP_UNDERGROUND);
    }

    #[test]
    fn test_invalid_width_in_config() {
        let mut config = ZoneStackConfig::from_ron_str(STACK_RON).unwrap();
        config.zones[1].kind = ZoneKind::Layered { min_width: 9, max_width: 3, ordering: OrderingSpec::Value(0) };
        assert_eq!(
            ZoneStack::from_config(&config).unwrap_err(),
            ZoneError::InvalidWidth { min_width: 9, max_width: 3 }
        );
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(ZoneStackConfig::from_ron_str("(seed: )"), Err(ZoneError::Config(_))));
        assert!(matches!(ZoneStackConfig::from_json_str("{\"seed\": -1}"), Err(ZoneError::Config(_))));
    }

    #[test]
    fn test_ron_output_parses_back() {
        let config = ZoneStackConfig::from_ron_str(STACK_RON).unwrap();
        let text = config.to_ron_string().unwrap();
        assert_eq!(ZoneStackConfig::from_ron_str(&text).unwrap(), config);
        let band = &config.zones[3].kind;
        if let ZoneKind::Band { min, max } = band {
            assert_eq!(Bound::from(*min), Bound::At(-80));
            assert_eq!(Bound::from(*max), Bound::At(-60));
        }
    }
}
