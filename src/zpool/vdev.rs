//! Vdev topology for `zpool create`.
use std::path::PathBuf;

/// Every vdev can be backed either by block device or sparse file.
#[derive(Debug, Clone, PartialEq)]
pub enum Disk {
    /// Sparse file based device.
    File(PathBuf),
    /// Block device.
    Disk(PathBuf),
}

impl Disk {
    /// Path exists. Doesn't mean zpool can use it.
    pub fn is_valid(&self) -> bool {
        match self {
            Disk::File(path) | Disk::Disk(path) => path.exists(),
        }
    }

    pub fn into_arg(self) -> String {
        match self {
            Disk::File(path) | Disk::Disk(path) => path.to_string_lossy().into_owned(),
        }
    }

    /// Make a reference to a block device.
    pub fn disk<O: Into<PathBuf>>(value: O) -> Disk { Disk::Disk(value.into()) }

    /// Make a reference to a sparse file.
    pub fn file<O: Into<PathBuf>>(value: O) -> Disk { Disk::File(value.into()) }
}

/// Basic building block of
/// [Zpool](https://www.freebsd.org/doc/handbook/zfs-term.html).
#[derive(Debug, Clone, PartialEq)]
pub enum Vdev {
    /// Just a single disk or file.
    Naked(Disk),
    /// A mirror of multiple vdevs
    Mirror(Vec<Disk>),
    /// ZFS implements [RAID-Z](https://blogs.oracle.com/ahl/what-is-raid-z), a
    /// variation on standard RAID-5 that offers better distribution of
    /// parity and eliminates the “RAID-5 write hole”.
    RaidZ(Vec<Disk>),
    /// The same as RAID-Z, but with 2 parity drives.
    RaidZ2(Vec<Disk>),
    /// The same as RAID-Z, but with 3 parity drives.
    RaidZ3(Vec<Disk>),
    /// Tokens passed to `zpool create` verbatim, e.g. `["log", "mirror", "ada3", "ada4"]`.
    Raw(Vec<String>),
}

impl Vdev {
    fn is_valid_raid(disks: &[Disk], min_disks: usize) -> bool {
        disks.len() >= min_disks && disks.iter().all(Disk::is_valid)
    }

    /// Check if given Vdev is valid.
    ///
    /// For Naked it means that what ever it points to exists.
    ///
    /// For Mirror it checks that it's at least two valid disks. RaidZ needs three, RaidZ2 five
    /// and RaidZ3 eight. Raw is valid as long as it isn't empty.
    pub fn is_valid(&self) -> bool {
        match self {
            Vdev::Naked(disk) => disk.is_valid(),
            Vdev::Mirror(disks) => Vdev::is_valid_raid(disks, 2),
            Vdev::RaidZ(disks) => Vdev::is_valid_raid(disks, 3),
            Vdev::RaidZ2(disks) => Vdev::is_valid_raid(disks, 5),
            Vdev::RaidZ3(disks) => Vdev::is_valid_raid(disks, 8),
            Vdev::Raw(tokens) => !tokens.is_empty(),
        }
    }

    fn conv_to_args(vdev_type: &str, disks: Vec<Disk>) -> Vec<String> {
        let mut ret = Vec::with_capacity(disks.len() + 1);
        ret.push(String::from(vdev_type));
        ret.extend(disks.into_iter().map(Disk::into_arg));
        ret
    }

    /// `[type] path...` as `zpool create` expects it.
    pub fn into_args(self) -> Vec<String> {
        match self {
            Vdev::Naked(disk) => vec![disk.into_arg()],
            Vdev::Mirror(disks) => Vdev::conv_to_args("mirror", disks),
            Vdev::RaidZ(disks) => Vdev::conv_to_args("raidz", disks),
            Vdev::RaidZ2(disks) => Vdev::conv_to_args("raidz2", disks),
            Vdev::RaidZ3(disks) => Vdev::conv_to_args("raidz3", disks),
            Vdev::Raw(tokens) => tokens,
        }
    }

    /// Short-cut to Vdev::Naked(Disk::Disk(disk))
    pub fn disk<O: Into<PathBuf>>(value: O) -> Vdev { Vdev::Naked(Disk::Disk(value.into())) }

    /// Short-cut to Vdev::Naked(Disk::File(disk))
    pub fn file<O: Into<PathBuf>>(value: O) -> Vdev { Vdev::Naked(Disk::File(value.into())) }
}
