//! Everything you need to work with zpools. Since there is no public library to work with zpool,
//! the default impl will call to `zpool(8)`.
use crate::{parsers::stderr::{self, Failure},
            properties::{property_map_flags, PropertyError},
            runner::CommandOutput};
use std::{collections::BTreeMap, io};

pub mod open3;
pub use open3::ZpoolOpen3;

mod pool;
pub use pool::Pool;

pub mod properties;
pub use properties::Health;

pub mod vdev;
pub use vdev::{Disk, Vdev};

quick_error! {
    /// Error kinds. This type will be used across zpool module.
    #[derive(Debug)]
    pub enum ZpoolError {
        /// `zpool` not found in the PATH.
        CmdNotFound {
            display("zpool command not found")
        }
        Io(err: std::io::Error) {
            cause(err)
            display("failed to run zpool: {}", err)
        }
        /// Pool names can't be empty or contain `/`.
        InvalidName(name: String) {
            display("invalid pool name: '{}'", name)
        }
        InvalidProperty(err: PropertyError) {
            cause(err)
            from()
            display("invalid property: {}", err)
        }
        InvalidCreateOptions(reason: String) {
            display("invalid create options: {}", reason)
        }
        /// Trying to manipulate non-existent pool.
        PoolNotFound(pool: String) {
            display("pool '{}' does not exist", pool)
        }
        /// Non-zero exit that doesn't mean anything more specific.
        CommandFailed(code: Option<i32>, stderr: String) {
            display("zpool failed (exit code {:?}): {}", code, stderr)
        }
    }
}

impl From<io::Error> for ZpoolError {
    #[allow(clippy::wildcard_enum_match_arm)]
    fn from(err: io::Error) -> ZpoolError {
        match err.kind() {
            io::ErrorKind::NotFound => ZpoolError::CmdNotFound,
            _ => ZpoolError::Io(err),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ZpoolErrorKind {
    CmdNotFound,
    Io,
    InvalidName,
    InvalidProperty,
    InvalidCreateOptions,
    PoolNotFound,
    CommandFailed,
}

impl ZpoolError {
    pub fn kind(&self) -> ZpoolErrorKind {
        match self {
            ZpoolError::CmdNotFound => ZpoolErrorKind::CmdNotFound,
            ZpoolError::Io(_) => ZpoolErrorKind::Io,
            ZpoolError::InvalidName(_) => ZpoolErrorKind::InvalidName,
            ZpoolError::InvalidProperty(_) => ZpoolErrorKind::InvalidProperty,
            ZpoolError::InvalidCreateOptions(_) => ZpoolErrorKind::InvalidCreateOptions,
            ZpoolError::PoolNotFound(_) => ZpoolErrorKind::PoolNotFound,
            ZpoolError::CommandFailed(..) => ZpoolErrorKind::CommandFailed,
        }
    }

    pub fn is_not_found(&self) -> bool { self.kind() == ZpoolErrorKind::PoolNotFound }

    pub(crate) fn from_output(out: &CommandOutput) -> Self {
        let stderr = stderr::clean_up(&out.stderr);
        match stderr::classify(&stderr) {
            Failure::PoolNotFound(name) => ZpoolError::PoolNotFound(name),
            Failure::DatasetNotFound(_) | Failure::Other => ZpoolError::CommandFailed(out.code, stderr),
        }
    }
}

impl PartialEq for ZpoolError {
    fn eq(&self, other: &Self) -> bool { self.kind() == other.kind() }
}

/// Type alias to `Result<T, ZpoolError>`.
pub type ZpoolResult<T> = Result<T, ZpoolError>;

/// Non-empty and no `/`.
pub fn validate_name(name: &str) -> ZpoolResult<()> {
    if name.is_empty() || name.contains('/') {
        return Err(ZpoolError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Generic interface to manage zpools. Using trait here, so it can be mocked in unit tests.
pub trait ZpoolEngine {
    /// Raw value of a single property. `all` is not a property.
    fn get_pool_property(&self, name: &str, property: &str) -> ZpoolResult<String>;

    /// Set a single property.
    fn set_pool_property(&self, name: &str, property: &str, value: &str) -> ZpoolResult<()> {
        self.set_pool_properties(name, vec![(property, value)])
    }

    /// Set several properties in one go. Empty set is an error.
    fn set_pool_properties<I, K, V>(&self, name: &str, properties: I) -> ZpoolResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>;

    /// Create a new pool.
    fn create_pool(&self, request: &CreateZpoolRequest) -> ZpoolResult<()>;

    /// Pool with requested properties. No properties means all of them.
    fn get_pool(&self, name: &str, properties: &[&str]) -> ZpoolResult<Pool>;

    /// Every imported pool with requested properties, sorted by name.
    fn list_pools(&self, properties: &[&str]) -> ZpoolResult<Vec<Pool>>;

    /// Names of every imported pool.
    fn list_pool_names(&self) -> ZpoolResult<Vec<String>>;

    /// Destroy a pool. `force` unmounts busy datasets.
    fn destroy_pool(&self, name: &str, force: bool) -> ZpoolResult<()>;

    /// Import a pool. Without a name every pool found gets imported.
    fn import_pool(&self, request: &ImportZpoolRequest) -> ZpoolResult<()>;

    /// Export a pool. `force` unmounts busy datasets.
    fn export_pool(&self, name: &str, force: bool) -> ZpoolResult<()>;
}

/// Everything needed to create a pool.
///
/// ```rust
/// use zetta_ctl::zpool::{CreateZpoolRequest, Disk, Vdev};
///
/// let request = CreateZpoolRequest::builder()
///     .name("tank")
///     .vdev(Vdev::Mirror(vec![Disk::disk("/dev/ada1"), Disk::disk("/dev/ada2")]))
///     .property("ashift", "12")
///     .filesystem_property("compression", "lz4")
///     .build()
///     .unwrap();
/// assert_eq!("tank", request.name());
/// ```
#[derive(Default, Builder, Debug, Clone, Getters)]
#[builder(setter(into))]
#[get = "pub"]
pub struct CreateZpoolRequest {
    /// Name to give new zpool.
    name:                  String,
    /// Vdevs that make up the pool. At least one is required.
    #[builder(default)]
    vdevs:                 Vec<Vdev>,
    /// Pool properties (`-o`).
    #[builder(default)]
    properties:            BTreeMap<String, String>,
    /// Properties of the root dataset (`-O`).
    #[builder(default)]
    filesystem_properties: BTreeMap<String, String>,
    /// Mount point of the root dataset (`-m`).
    #[builder(setter(into, strip_option), default)]
    mount_point:           Option<String>,
    /// Alternate root (`-R`).
    #[builder(setter(into, strip_option), default)]
    alt_root:              Option<String>,
    /// Use vdevs even if they appear to be in use (`-f`).
    #[builder(default)]
    force:                 bool,
    /// Don't enable any features (`-d`).
    #[builder(default)]
    disable_features:      bool,
    /// Extra arguments placed right before the pool name.
    #[builder(default)]
    args:                  Vec<String>,
}

impl CreateZpoolRequest {
    pub fn builder() -> CreateZpoolRequestBuilder { CreateZpoolRequestBuilder::default() }

    pub fn validate(&self) -> ZpoolResult<()> {
        validate_name(&self.name)?;
        if self.vdevs.is_empty() {
            return Err(ZpoolError::InvalidCreateOptions(String::from("no vdevs specified")));
        }
        Ok(())
    }

    /// Arguments for `zpool create`, without the subcommand itself.
    pub(crate) fn to_args(&self) -> ZpoolResult<Vec<String>> {
        self.validate()?;
        let mut args = Vec::new();
        if let Some(mount_point) = &self.mount_point {
            args.push(String::from("-m"));
            args.push(mount_point.clone());
        }
        if let Some(alt_root) = &self.alt_root {
            args.push(String::from("-R"));
            args.push(alt_root.clone());
        }
        if self.force {
            args.push(String::from("-f"));
        }
        if self.disable_features {
            args.push(String::from("-d"));
        }
        args.extend(property_map_flags("-o", &self.properties)?);
        args.extend(property_map_flags("-O", &self.filesystem_properties)?);
        args.extend(self.args.iter().cloned());
        args.push(self.name.clone());
        args.extend(self.vdevs.iter().cloned().flat_map(Vdev::into_args));
        Ok(args)
    }
}

impl CreateZpoolRequestBuilder {
    /// Add vdev to request.
    pub fn vdev(&mut self, vdev: Vdev) -> &mut CreateZpoolRequestBuilder {
        self.vdevs.get_or_insert_with(Vec::new).push(vdev);
        self
    }

    /// Add pool property (`-o`).
    pub fn property<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.properties.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }

    /// Add root dataset property (`-O`).
    pub fn filesystem_property<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.filesystem_properties.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }
}

/// Everything needed to import a pool.
#[derive(Default, Builder, Debug, Clone, Getters)]
#[builder(setter(into), default)]
#[get = "pub"]
pub struct ImportZpoolRequest {
    /// Pool to import. Without it every pool found is imported.
    #[builder(setter(into, strip_option))]
    name:       Option<String>,
    /// Pool properties (`-o`).
    properties: BTreeMap<String, String>,
    /// Import even if the pool looks in use (`-f`).
    force:      bool,
    /// Directories or devices to search (`-d`).
    dirs:       Vec<String>,
    /// Extra arguments placed right before the pool name.
    args:       Vec<String>,
}

impl ImportZpoolRequest {
    pub fn builder() -> ImportZpoolRequestBuilder { ImportZpoolRequestBuilder::default() }

    /// Arguments for `zpool import`, without the subcommand itself.
    pub(crate) fn to_args(&self) -> ZpoolResult<Vec<String>> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        let mut args = Vec::new();
        if self.force {
            args.push(String::from("-f"));
        }
        args.extend(property_map_flags("-o", &self.properties)?);
        for dir in &self.dirs {
            args.push(String::from("-d"));
            args.push(dir.clone());
        }
        args.extend(self.args.iter().cloned());
        if let Some(name) = &self.name {
            args.push(name.clone());
        }
        Ok(args)
    }
}

impl ImportZpoolRequestBuilder {
    /// Add directory or device to search (`-d`).
    pub fn dir<S: Into<String>>(&mut self, dir: S) -> &mut Self {
        self.dirs.get_or_insert_with(Vec::new).push(dir.into());
        self
    }

    /// Add pool property (`-o`).
    pub fn property<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        self.properties.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }
}
