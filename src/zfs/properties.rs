//! Names of native dataset properties.
//!
//! Property names are plain strings everywhere in this crate, these constants only save typing.
//! Vendor specific properties and anything added to ZFS later work exactly the same way: pass the
//! name as a string.
//!
//! User properties follow `module:property` convention, see [`user`].

// Read-only statistics. Can be neither set nor inherited.
pub static AVAILABLE: &str = "available";
pub static COMPRESS_RATIO: &str = "compressratio";
pub static CREATE_TXG: &str = "createtxg";
pub static CREATION: &str = "creation";
pub static CLONES: &str = "clones";
pub static DEFER_DESTROY: &str = "defer_destroy";
pub static ENCRYPTION_ROOT: &str = "encryptionroot";
pub static FILESYSTEM_COUNT: &str = "filesystem_count";
pub static KEY_STATUS: &str = "keystatus";
pub static GUID: &str = "guid";
pub static LOGICAL_REFERENCED: &str = "logicalreferenced";
pub static LOGICAL_USED: &str = "logicalused";
pub static MOUNTED: &str = "mounted";
pub static OBJSET_ID: &str = "objsetid";
pub static ORIGIN: &str = "origin";
pub static RECEIVE_RESUME_TOKEN: &str = "receive_resume_token";
pub static REDACT_SNAPS: &str = "redact_snaps";
pub static REFERENCED: &str = "referenced";
pub static REF_COMPRESS_RATIO: &str = "refcompressratio";
pub static SNAPSHOT_COUNT: &str = "snapshot_count";
pub static TYPE: &str = "type";
pub static USED: &str = "used";
pub static USED_BY_CHILDREN: &str = "usedbychildren";
pub static USED_BY_DATASET: &str = "usedbydataset";
pub static USED_BY_REF_RESERVATION: &str = "usedbyrefreservation";
pub static USED_BY_SNAPSHOTS: &str = "usedbysnapshots";
pub static VOL_BLOCK_SIZE: &str = "volblocksize";
pub static WRITTEN: &str = "written";

// Settable.
/// `discard|noallow|restricted|passthrough|passthrough-x`
pub static ACL_INHERIT: &str = "aclinherit";
/// `discard|groupmask|passthrough|restricted`
pub static ACL_MODE: &str = "aclmode";
/// `off|nfsv4|posix`
pub static ACL_TYPE: &str = "acltype";
pub static ATIME: &str = "atime";
/// `on|off|noauto`
pub static CAN_MOUNT: &str = "canmount";
/// `on|off|fletcher2|fletcher4|sha256|noparity|sha512|skein|edonr`
pub static CHECKSUM: &str = "checksum";
/// `on|off|gzip|gzip-N|lz4|lzjb|zle|zstd|zstd-N|zstd-fast|zstd-fast-N`
pub static COMPRESSION: &str = "compression";
pub static CONTEXT: &str = "context";
pub static FS_CONTEXT: &str = "fscontext";
pub static DEF_CONTEXT: &str = "defcontext";
pub static ROOT_CONTEXT: &str = "rootcontext";
/// `1|2|3`
pub static COPIES: &str = "copies";
pub static DEVICES: &str = "devices";
pub static DEDUP: &str = "dedup";
/// `legacy|auto|1k|2k|4k|8k|16k`
pub static DNODE_SIZE: &str = "dnodesize";
pub static ENCRYPTION: &str = "encryption";
/// `raw|hex|passphrase`
pub static KEY_FORMAT: &str = "keyformat";
pub static KEY_LOCATION: &str = "keylocation";
pub static PBKDF2_ITERATIONS: &str = "pbkdf2iters";
pub static EXEC: &str = "exec";
pub static FILESYSTEM_LIMIT: &str = "filesystem_limit";
pub static SPECIAL_SMALL_BLOCKS: &str = "special_small_blocks";
/// `path|none|legacy`
pub static MOUNTPOINT: &str = "mountpoint";
pub static NBMAND: &str = "nbmand";
pub static OVERLAY: &str = "overlay";
/// `all|none|metadata`
pub static PRIMARY_CACHE: &str = "primarycache";
pub static QUOTA: &str = "quota";
pub static SNAPSHOT_LIMIT: &str = "snapshot_limit";
pub static READ_ONLY: &str = "readonly";
pub static RECORD_SIZE: &str = "recordsize";
/// `all|most`
pub static REDUNDANT_METADATA: &str = "redundant_metadata";
pub static REF_QUOTA: &str = "refquota";
/// `size|none|auto`
pub static REF_RESERVATION: &str = "refreservation";
pub static REL_ATIME: &str = "relatime";
pub static RESERVATION: &str = "reservation";
/// `all|none|metadata`
pub static SECONDARY_CACHE: &str = "secondarycache";
pub static SETUID: &str = "setuid";
pub static SHARE_SMB: &str = "sharesmb";
pub static SHARE_NFS: &str = "sharenfs";
/// `latency|throughput`
pub static LOG_BIAS: &str = "logbias";
/// `hidden|visible`
pub static SNAP_DEV: &str = "snapdev";
/// `hidden|visible`
pub static SNAP_DIR: &str = "snapdir";
/// `standard|always|disabled`
pub static SYNC: &str = "sync";
pub static VERSION: &str = "version";
pub static VOL_SIZE: &str = "volsize";
/// `default|full|geom|dev|none`
pub static VOL_MODE: &str = "volmode";
pub static VSCAN: &str = "vscan";
/// `on|off|sa`
pub static XATTR: &str = "xattr";
pub static JAILED: &str = "jailed";
pub static ZONED: &str = "zoned";

// Can only be set at creation time, inherited from the parent otherwise.
/// `sensitive|insensitive|mixed`
pub static CASE_SENSITIVITY: &str = "casesensitivity";
/// `none|formC|formD|formKC|formKD`
pub static NORMALIZATION: &str = "normalization";
pub static UTF8_ONLY: &str = "utf8only";

/// `userquota@<user>`
pub fn user_quota(user: &str) -> String { format!("userquota@{}", user) }

/// `userobjquota@<user>`
pub fn user_obj_quota(user: &str) -> String { format!("userobjquota@{}", user) }

/// `groupquota@<group>`
pub fn group_quota(group: &str) -> String { format!("groupquota@{}", group) }

/// `groupobjquota@<group>`
pub fn group_obj_quota(group: &str) -> String { format!("groupobjquota@{}", group) }

/// `projectquota@<project>`
pub fn project_quota(project: &str) -> String { format!("projectquota@{}", project) }

/// `projectobjquota@<project>`
pub fn project_obj_quota(project: &str) -> String { format!("projectobjquota@{}", project) }

/// Returns a function that prefixes property names with `<module>:`. Use reversed DNS name as
/// the module to avoid clashes with other software.
///
/// ```rust
/// use zetta_ctl::zfs::properties::user;
///
/// let backup = user("com.example.backup");
/// assert_eq!("com.example.backup:schedule", backup("schedule"));
/// ```
pub fn user(module: &str) -> impl Fn(&str) -> String {
    let module = module.to_string();
    move |property| format!("{}:{}", module, property)
}
