//! Names of pool properties and pool health.
use strum_macros::{AsRefStr, Display, EnumString};

// Read-only.
pub static ALLOCATED: &str = "allocated";
pub static CAPACITY: &str = "capacity";
pub static DEDUP_RATIO: &str = "dedupratio";
pub static EXPAND_SIZE: &str = "expandsize";
pub static FRAGMENTATION: &str = "fragmentation";
pub static FREE: &str = "free";
pub static FREEING: &str = "freeing";
pub static LEAKED: &str = "leaked";
pub static HEALTH: &str = "health";
pub static GUID: &str = "guid";
pub static LOAD_GUID: &str = "load_guid";
pub static SIZE: &str = "size";

/// Creation and import time only.
pub static ALT_ROOT: &str = "altroot";

/// Import time only.
pub static READ_ONLY: &str = "readonly";

// Creation time, import time or later with `zpool set`.
pub static ASHIFT: &str = "ashift";
pub static AUTO_EXPAND: &str = "autoexpand";
pub static AUTO_REPLACE: &str = "autoreplace";
pub static AUTO_TRIM: &str = "autotrim";
/// `(unset)|pool[/dataset]`
pub static BOOTFS: &str = "bootfs";
/// `path|none`
pub static CACHEFILE: &str = "cachefile";
pub static COMMENT: &str = "comment";
/// `off|legacy|file[,file]...`
pub static COMPATIBILITY: &str = "compatibility";
pub static DEDUP_DITTO: &str = "dedupditto";
pub static DELEGATION: &str = "delegation";
/// `wait|continue|panic`
pub static FAIL_MODE: &str = "failmode";
pub static LIST_SNAPSHOTS: &str = "listsnapshots";
pub static MULTI_HOST: &str = "multihost";
pub static VERSION: &str = "version";

/// `feature@<name>`, e.g. `feature@async_destroy`.
pub fn feature(name: &str) -> String { format!("feature@{}", name) }

/// Health status of a pool or a vdev.
#[derive(AsRefStr, EnumString, Display, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Health {
    /// Healthy and operational
    #[strum(serialize = "ONLINE")]
    Online,
    /// Unhealthy, but operational.
    #[strum(serialize = "DEGRADED")]
    Degraded,
    /// Not operational
    #[strum(serialize = "FAULTED")]
    Faulted,
    /// Taken offline by admin
    #[strum(serialize = "OFFLINE")]
    Offline,
    /// Can't open device.
    #[strum(serialize = "UNAVAIL")]
    Unavailable,
    /// Physically removed while the system was running.
    #[strum(serialize = "REMOVED")]
    Removed,
}
