//! Datasets: filesystems, volumes, snapshots and bookmarks.
//!
//! [`ZfsEngine`] is what you program against, [`ZfsOpen3`] implements it on top of `zfs(8)`.
use std::collections::BTreeMap;

use bitflags::bitflags;

pub mod description;
pub use description::{DatasetKind, TypeFilter};

mod dataset;
pub use dataset::Dataset;

pub mod open3;
pub use open3::ZfsOpen3;

pub mod properties;

mod pathext;
pub use pathext::{join, NameExt};

pub static DATASET_NAME_MAX_LENGTH: usize = 255;

mod errors;

pub use errors::{Error, ErrorKind, Result, ValidationError, ValidationResult};

bitflags! {
    /// Flags for `zfs destroy`. Empty set is a plain destroy.
    #[derive(Default)]
    pub struct DestroyFlags: u32 {
        /// Destroy all children (`-r`).
        const RECURSIVE = 1 << 0;
        /// Destroy all dependents, including clones outside of the hierarchy (`-R`).
        const RECURSIVE_CLONES = 1 << 1;
        /// Mark snapshots for deferred destruction instead of failing when they are busy (`-d`).
        const DEFER_DELETION = 1 << 2;
        /// Forcibly unmount file systems (`-f`).
        const FORCE_UNMOUNT = 1 << 3;
    }
}

impl DestroyFlags {
    /// Command line flags, always in the same order regardless of how the set was built.
    pub fn to_args(self) -> Vec<String> {
        [
            (DestroyFlags::RECURSIVE, "-r"),
            (DestroyFlags::RECURSIVE_CLONES, "-R"),
            (DestroyFlags::DEFER_DELETION, "-d"),
            (DestroyFlags::FORCE_UNMOUNT, "-f"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, arg)| String::from(*arg))
        .collect()
    }
}

pub trait ZfsEngine {
    /// Raw value of a single property, e.g. `quota` of `tank/home`. `all` is not a property.
    fn get_dataset_property(&self, name: &str, property: &str) -> Result<String>;

    /// Set a single property.
    fn set_dataset_property(&self, name: &str, property: &str, value: &str) -> Result<()>;

    /// Set several properties in one go. Empty set is an error.
    fn set_dataset_properties<I, K, V>(&self, name: &str, properties: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>;

    /// Clear a local value so it's inherited from the parent again. Works for user properties as
    /// well.
    fn inherit_dataset_property(&self, name: &str, property: &str, recursive: bool) -> Result<()>;

    /// Create a new filesystem or volume.
    fn create_dataset(&self, request: &CreateDatasetRequest) -> Result<()>;

    /// Get dataset with requested properties. No properties means all of them.
    fn get_dataset(&self, name: &str, properties: &[&str]) -> Result<Dataset>;

    /// Datasets under `filter` (or everything if `None`), sorted by name.
    ///
    ///  * `depth` - how deep to descend, `0` means all the way down.
    ///  * `types` - a single [`DatasetKind`] or several of them via [`DatasetKind::join`].
    ///  * `properties` - properties to fetch, empty means all of them.
    fn list_datasets<T: Into<TypeFilter>>(
        &self,
        filter: Option<&str>,
        depth: u64,
        types: T,
        properties: &[&str],
    ) -> Result<Vec<Dataset>>;

    /// Same as [`list_datasets`](#tymethod.list_datasets), but only names.
    fn list_dataset_names<T: Into<TypeFilter>>(
        &self,
        filter: Option<&str>,
        depth: u64,
        types: T,
    ) -> Result<Vec<String>>;

    /// Destroy a dataset.
    fn destroy_dataset(&self, name: &str, flags: DestroyFlags) -> Result<()>;
}

/// Everything needed to create a dataset. Setting `volume_size` makes it a volume, otherwise it's
/// a filesystem.
///
/// ```rust
/// use zetta_ctl::zfs::CreateDatasetRequest;
///
/// let request = CreateDatasetRequest::builder()
///     .name("tank/vm/disk0")
///     .volume_size("10G")
///     .sparse(true)
///     .property("compression", "lz4")
///     .build()
///     .unwrap();
/// assert!(request.is_volume());
/// ```
#[derive(Default, Builder, Debug, Clone, Getters)]
#[builder(setter(into))]
#[get = "pub"]
pub struct CreateDatasetRequest {
    /// Name of the dataset. First component is the pool.
    name:           String,
    /// Properties to set at creation (`-o`). Some of them (`casesensitivity`, `normalization`,
    /// `utf8only`) can't be changed later.
    #[builder(default)]
    properties:     BTreeMap<String, String>,
    /// Create missing parents (`-p`).
    #[builder(default)]
    create_parents: bool,
    /// Don't mount the new filesystem (`-u`). Ignored for volumes.
    #[builder(default)]
    unmounted:      bool,
    /// Logical size of the volume (`-V`), e.g. `10G`.
    #[builder(setter(into, strip_option), default)]
    volume_size:    Option<String>,
    /// Volume block size (`-b`). Ignored for filesystems.
    #[builder(setter(into, strip_option), default)]
    block_size:     Option<String>,
    /// Don't reserve space for the volume (`-s`). Ignored for filesystems.
    #[builder(default)]
    sparse:         bool,
}

impl CreateDatasetRequest {
    pub fn builder() -> CreateDatasetRequestBuilder { CreateDatasetRequestBuilder::default() }

    pub fn is_volume(&self) -> bool { self.volume_size.is_some() }

    pub fn validate(&self) -> Result<()> {
        validators::validate_name(&self.name)?;
        if let Some(size) = &self.volume_size {
            if size.is_empty() {
                return Err(Error::InvalidCreateOptions(String::from("volume size is empty")));
            }
        }
        Ok(())
    }

    /// Arguments for `zfs create`, without the subcommand itself.
    pub(crate) fn to_args(&self) -> Result<Vec<String>> {
        self.validate()?;
        let mut args = Vec::new();
        if self.create_parents {
            args.push(String::from("-p"));
        }
        match &self.volume_size {
            Some(_) => {
                if let Some(block_size) = &self.block_size {
                    args.push(String::from("-b"));
                    args.push(block_size.clone());
                }
                if self.sparse {
                    args.push(String::from("-s"));
                }
            },
            None => {
                if self.unmounted {
                    args.push(String::from("-u"));
                }
            },
        }
        args.extend(crate::properties::property_map_flags("-o", &self.properties)?);
        if let Some(size) = &self.volume_size {
            args.push(String::from("-V"));
            args.push(size.clone());
        }
        args.push(self.name.clone());
        Ok(args)
    }
}

impl CreateDatasetRequestBuilder {
    /// Add a single property. Can be called multiple times.
    pub fn property<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.properties.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }
}

pub(crate) mod validators {
    use crate::zfs::{errors::ValidationResult, ValidationError, DATASET_NAME_MAX_LENGTH};

    pub fn validate_name(name: &str) -> ValidationResult {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }
        if name.starts_with('/') {
            return Err(ValidationError::MissingPool(name.to_owned()));
        }
        if name.ends_with('/') {
            return Err(ValidationError::MissingName(name.to_owned()));
        }
        let last = name.rsplit('/').next().unwrap_or(name);
        if last.len() > DATASET_NAME_MAX_LENGTH {
            return Err(ValidationError::NameTooLong(name.to_owned()));
        }
        Ok(())
    }
}
