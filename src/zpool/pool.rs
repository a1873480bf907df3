use crate::{properties::Properties,
            zpool::properties::{self as props, Health}};
use std::{ops::Deref, path::PathBuf};

/// Snapshot of a pool and its properties at the moment it was queried. Getters return `None` when
/// the property wasn't requested, is blank or can't be parsed.
#[derive(Debug, Clone, PartialEq, Getters)]
#[get = "pub"]
pub struct Pool {
    name:       String,
    properties: Properties,
}

impl Pool {
    /// Keep only properties that belong to `name`.
    pub fn new<N: Into<String>>(name: N, properties: &Properties) -> Self {
        let name = name.into();
        let properties = properties.filtered(&name);
        Pool { name, properties }
    }

    pub fn read_only(&self) -> Option<bool> { self.properties.bool(props::READ_ONLY) }

    pub fn allocated(&self) -> Option<u64> { self.properties.bytes(props::ALLOCATED) }

    pub fn free(&self) -> Option<u64> { self.properties.bytes(props::FREE) }

    pub fn freeing(&self) -> Option<u64> { self.properties.bytes(props::FREEING) }

    pub fn leaked(&self) -> Option<u64> { self.properties.bytes(props::LEAKED) }

    pub fn size(&self) -> Option<u64> { self.properties.bytes(props::SIZE) }

    /// Uninitialized space within the pool or device that can be used to increase capacity.
    pub fn expand_size(&self) -> Option<u64> { self.properties.bytes(props::EXPAND_SIZE) }

    /// Used space in percent.
    pub fn capacity(&self) -> Option<u64> { self.properties.percent(props::CAPACITY) }

    pub fn fragmentation(&self) -> Option<u64> { self.properties.percent(props::FRAGMENTATION) }

    pub fn dedup_ratio(&self) -> Option<f64> { self.properties.ratio(props::DEDUP_RATIO) }

    /// Raw health as reported, e.g. `ONLINE`.
    pub fn health(&self) -> Option<&str> { self.properties.string(props::HEALTH) }

    /// Same as [`health`](#method.health) but parsed. Unknown states are `None`.
    pub fn health_state(&self) -> Option<Health> { self.health()?.parse().ok() }

    pub fn guid(&self) -> Option<u64> { self.properties.uint64(props::GUID) }

    pub fn alt_root(&self) -> Option<PathBuf> { self.properties.string(props::ALT_ROOT).map(PathBuf::from) }

    pub fn autoexpand(&self) -> Option<bool> { self.properties.bool(props::AUTO_EXPAND) }

    pub fn autoreplace(&self) -> Option<bool> { self.properties.bool(props::AUTO_REPLACE) }

    pub fn autotrim(&self) -> Option<bool> { self.properties.bool(props::AUTO_TRIM) }

    pub fn comment(&self) -> Option<&str> { self.properties.string(props::COMMENT) }

    /// Only `enabled` reads as `true`. `active` is `false` as well as `disabled`, check the raw
    /// value if the difference matters.
    pub fn feature(&self, name: &str) -> Option<bool> { self.properties.bool(&props::feature(name)) }
}

impl Deref for Pool {
    type Target = Properties;

    fn deref(&self) -> &Self::Target { &self.properties }
}
