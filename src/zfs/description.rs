use std::fmt;
use strum_macros::EnumString;

/// Type of a dataset as reported by the `type` property.
///
/// Parsing never fails: anything unrecognized ends up in `Unknown` so a newer ZFS doesn't make
/// datasets unreadable.
#[derive(EnumString, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Only meaningful as a query filter.
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "bookmark")]
    Bookmark,
    #[strum(serialize = "filesystem")]
    Filesystem,
    #[strum(serialize = "snapshot")]
    Snapshot,
    #[strum(serialize = "volume")]
    Volume,
    #[strum(default)]
    Unknown(String),
}

impl DatasetKind {
    pub fn as_str(&self) -> &str {
        match self {
            DatasetKind::All => "all",
            DatasetKind::Bookmark => "bookmark",
            DatasetKind::Filesystem => "filesystem",
            DatasetKind::Snapshot => "snapshot",
            DatasetKind::Volume => "volume",
            DatasetKind::Unknown(raw) => raw,
        }
    }

    /// Combine kinds into a filter for listing more than one kind at once. Order is kept, nothing
    /// is deduplicated.
    pub fn join<I>(kinds: I) -> TypeFilter
    where
        I: IntoIterator<Item = DatasetKind>,
    {
        let joined = kinds.into_iter().map(|kind| kind.as_str().to_string()).collect::<Vec<_>>();
        TypeFilter(joined.join(","))
    }
}

impl Default for DatasetKind {
    fn default() -> DatasetKind { DatasetKind::Filesystem }
}

impl AsRef<str> for DatasetKind {
    fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Value for `-t`. Unlike [`DatasetKind`] it can name several kinds, e.g. `filesystem,volume`,
/// so it never describes a single dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilter(String);

impl TypeFilter {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for TypeFilter {
    fn default() -> TypeFilter { TypeFilter::from(DatasetKind::All) }
}

impl From<DatasetKind> for TypeFilter {
    fn from(kind: DatasetKind) -> TypeFilter { TypeFilter(kind.as_str().to_string()) }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
