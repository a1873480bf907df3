use crate::{properties::Properties,
            zfs::{properties as props, DatasetKind}};
use chrono::{DateTime, Utc};
use std::{ops::Deref, path::PathBuf};

/// Snapshot of a filesystem, volume, snapshot or bookmark and its properties at the moment it was
/// queried.
///
/// Every getter returns `None` when the property wasn't requested, is blank or can't be parsed.
/// Anything without a dedicated getter is reachable through [`Properties`] via `Deref`.
#[derive(Debug, Clone, PartialEq, Getters)]
#[get = "pub"]
pub struct Dataset {
    name:       String,
    properties: Properties,
}

impl Dataset {
    /// Keep only properties that belong to `name`. Properties of `tank/a/sub` never end up in
    /// `tank/a`.
    pub fn new<N: Into<String>>(name: N, properties: &Properties) -> Self {
        let name = name.into();
        let properties = properties.filtered(&name);
        Dataset { name, properties }
    }

    pub fn atime(&self) -> Option<bool> { self.properties.bool(props::ATIME) }

    /// `noauto` reads as `false`.
    pub fn can_mount(&self) -> Option<bool> { self.properties.bool(props::CAN_MOUNT) }

    pub fn devices(&self) -> Option<bool> { self.properties.bool(props::DEVICES) }

    pub fn exec(&self) -> Option<bool> { self.properties.bool(props::EXEC) }

    pub fn read_only(&self) -> Option<bool> { self.properties.bool(props::READ_ONLY) }

    pub fn rel_atime(&self) -> Option<bool> { self.properties.bool(props::REL_ATIME) }

    pub fn setuid(&self) -> Option<bool> { self.properties.bool(props::SETUID) }

    /// Reported as `yes`/`no` rather than `on`/`off`.
    pub fn mounted(&self) -> Option<bool> {
        self.properties
            .bool(props::MOUNTED)
            .map(|on| on || self.properties.string(props::MOUNTED) == Some("yes"))
    }

    pub fn available(&self) -> Option<u64> { self.properties.bytes(props::AVAILABLE) }

    pub fn quota(&self) -> Option<u64> { self.properties.bytes(props::QUOTA) }

    pub fn ref_quota(&self) -> Option<u64> { self.properties.bytes(props::REF_QUOTA) }

    pub fn ref_reservation(&self) -> Option<u64> { self.properties.bytes(props::REF_RESERVATION) }

    pub fn reservation(&self) -> Option<u64> { self.properties.bytes(props::RESERVATION) }

    pub fn vol_size(&self) -> Option<u64> { self.properties.bytes(props::VOL_SIZE) }

    pub fn logical_used(&self) -> Option<u64> { self.properties.bytes(props::LOGICAL_USED) }

    pub fn logical_referenced(&self) -> Option<u64> { self.properties.bytes(props::LOGICAL_REFERENCED) }

    pub fn used(&self) -> Option<u64> { self.properties.bytes(props::USED) }

    pub fn used_by_children(&self) -> Option<u64> { self.properties.bytes(props::USED_BY_CHILDREN) }

    pub fn used_by_dataset(&self) -> Option<u64> { self.properties.bytes(props::USED_BY_DATASET) }

    pub fn used_by_snapshots(&self) -> Option<u64> { self.properties.bytes(props::USED_BY_SNAPSHOTS) }

    pub fn used_by_ref_reservation(&self) -> Option<u64> {
        self.properties.bytes(props::USED_BY_REF_RESERVATION)
    }

    pub fn referenced(&self) -> Option<u64> { self.properties.bytes(props::REFERENCED) }

    pub fn written(&self) -> Option<u64> { self.properties.bytes(props::WRITTEN) }

    pub fn record_size(&self) -> Option<u64> { self.properties.bytes(props::RECORD_SIZE) }

    pub fn vol_block_size(&self) -> Option<u64> { self.properties.bytes(props::VOL_BLOCK_SIZE) }

    pub fn compress_ratio(&self) -> Option<f64> { self.properties.ratio(props::COMPRESS_RATIO) }

    pub fn ref_compress_ratio(&self) -> Option<f64> { self.properties.ratio(props::REF_COMPRESS_RATIO) }

    pub fn checksum(&self) -> Option<&str> { self.properties.string(props::CHECKSUM) }

    pub fn compression(&self) -> Option<&str> { self.properties.string(props::COMPRESSION) }

    pub fn sync(&self) -> Option<&str> { self.properties.string(props::SYNC) }

    /// Snapshot this dataset was cloned from.
    pub fn origin(&self) -> Option<&str> { self.properties.string(props::ORIGIN) }

    /// Mount point. `none` is an empty path: set, but not mounted anywhere.
    pub fn mountpoint(&self) -> Option<PathBuf> {
        self.properties.string(props::MOUNTPOINT).map(|mountpoint| match mountpoint {
            "none" => PathBuf::new(),
            path => PathBuf::from(path),
        })
    }

    pub fn creation(&self) -> Option<DateTime<Utc>> { self.properties.time(props::CREATION) }

    pub fn copies(&self) -> Option<u64> { self.properties.uint64(props::COPIES) }

    pub fn guid(&self) -> Option<u64> { self.properties.uint64(props::GUID) }

    /// Whatever `type` says. Unknown types come back as [`DatasetKind::Unknown`].
    pub fn kind(&self) -> Option<DatasetKind> {
        self.properties
            .string(props::TYPE)
            .map(|kind| kind.parse().unwrap_or_else(|_| DatasetKind::Unknown(kind.to_string())))
    }
}

impl Deref for Dataset {
    type Target = Properties;

    fn deref(&self) -> &Self::Target { &self.properties }
}
