//! `zfs(8)` driven [`ZfsEngine`].
use crate::{parsers::{first_fields, parse_tabular, Record},
            properties::{self, from_records, PropertyError},
            runner::{Runner, SystemRunner},
            zfs::{validators, CreateDatasetRequest, Dataset, DestroyFlags, Error, Result, TypeFilter,
                  ZfsEngine},
            GlobalLogger};
use slog::Logger;
use std::{fmt, sync::Arc};

static PROPERTY_COLUMNS: &str = "name,property,value,source";

/// Runs `zfs` (or whatever `ZFS_CMD` points to) and parses its scripted output.
#[derive(Clone)]
pub struct ZfsOpen3 {
    cmd_name: String,
    logger:   Logger,
    runner:   Arc<dyn Runner>,
}

impl ZfsOpen3 {
    /// Engine that runs `ZFS_CMD` from the environment, or `zfs` if it isn't set, and logs to
    /// [`GlobalLogger`].
    pub fn new() -> Self {
        let cmd_name = std::env::var("ZFS_CMD").unwrap_or_else(|_| String::from("zfs"));
        ZfsOpen3 {
            cmd_name,
            logger: GlobalLogger::engine("zfs", "open3"),
            runner: Arc::new(SystemRunner::new()),
        }
    }

    /// Use a different executable.
    pub fn with_cmd<S: Into<String>>(mut self, cmd_name: S) -> Self {
        self.cmd_name = cmd_name.into();
        self
    }

    /// Log to a child of `logger` instead of the global logger.
    pub fn with_logger(mut self, logger: &Logger) -> Self {
        self.logger = logger.new(o!("zetta_module" => "zfs", "zetta_impl" => "open3"));
        self
    }

    /// Run commands through `runner`, e.g. [`SystemRunner::sudo`].
    pub fn with_runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn logger(&self) -> &Logger { &self.logger }

    pub fn cmd_name(&self) -> &str { &self.cmd_name }

    fn zfs(&self, args: Vec<String>) -> Result<Vec<Record>> {
        debug!(self.logger, "executing"; "cmd" => &self.cmd_name, "args" => format_args!("{:?}", args));
        let out = self.runner.run(&self.cmd_name, &args)?;
        if out.success() {
            Ok(parse_tabular(&out.stdout))
        } else {
            let err = Error::from_output(&out);
            warn!(self.logger, "command failed"; "cmd" => &self.cmd_name, "code" => ?out.code, "error" => %err);
            Err(err)
        }
    }
}

impl Default for ZfsOpen3 {
    fn default() -> Self { ZfsOpen3::new() }
}

impl fmt::Debug for ZfsOpen3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZfsOpen3").field("cmd_name", &self.cmd_name).field("runner", &self.runner).finish()
    }
}

fn args(parts: &[&str]) -> Vec<String> { parts.iter().map(|part| String::from(*part)).collect() }

/// `-d N` or `-r` when `depth` is zero.
fn depth_args(depth: u64) -> Vec<String> {
    if depth > 0 {
        vec![String::from("-d"), depth.to_string()]
    } else {
        vec![String::from("-r")]
    }
}

fn property_list(properties: &[&str]) -> String {
    if properties.is_empty() {
        String::from(properties::ALL)
    } else {
        properties.join(",")
    }
}

impl ZfsEngine for ZfsOpen3 {
    fn get_dataset_property(&self, name: &str, property: &str) -> Result<String> {
        validators::validate_name(name)?;
        properties::validate_name(property)?;

        let records = self.zfs(args(&["get", "-Hp", "-o", "value", property, name]))?;
        Ok(records.into_iter().next().and_then(|record| record.into_iter().next()).unwrap_or_default())
    }

    fn set_dataset_property(&self, name: &str, property: &str, value: &str) -> Result<()> {
        validators::validate_name(name)?;
        properties::validate_name(property)?;

        self.zfs(vec![String::from("set"), format!("{}={}", property, value), String::from(name)])?;
        Ok(())
    }

    fn set_dataset_properties<I, K, V>(&self, name: &str, properties: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        validators::validate_name(name)?;
        let pairs = properties::property_pairs(properties)?;
        if pairs.is_empty() {
            return Err(PropertyError::NoProperties.into());
        }

        let mut z = Vec::with_capacity(pairs.len() + 2);
        z.push(String::from("set"));
        z.extend(pairs);
        z.push(String::from(name));
        self.zfs(z)?;
        Ok(())
    }

    fn inherit_dataset_property(&self, name: &str, property: &str, recursive: bool) -> Result<()> {
        validators::validate_name(name)?;
        if property.is_empty() {
            return Err(PropertyError::EmptyName.into());
        }

        let mut z = args(&["inherit"]);
        if recursive {
            z.push(String::from("-r"));
        }
        z.push(String::from(property));
        z.push(String::from(name));
        self.zfs(z)?;
        Ok(())
    }

    fn create_dataset(&self, request: &CreateDatasetRequest) -> Result<()> {
        let mut z = args(&["create"]);
        z.extend(request.to_args()?);
        self.zfs(z)?;
        Ok(())
    }

    fn get_dataset(&self, name: &str, properties: &[&str]) -> Result<Dataset> {
        validators::validate_name(name)?;

        let z = args(&["get", "-Hp", "-o", PROPERTY_COLUMNS, &property_list(properties), name]);
        let mut entities = from_records(self.zfs(z)?);
        let properties = entities.remove(name).unwrap_or_default();
        Ok(Dataset::new(name, &properties))
    }

    fn list_datasets<T: Into<TypeFilter>>(
        &self,
        filter: Option<&str>,
        depth: u64,
        types: T,
        properties: &[&str],
    ) -> Result<Vec<Dataset>> {
        let mut z = args(&["get", "-Hp", "-o", PROPERTY_COLUMNS]);
        z.extend(depth_args(depth));
        z.push(String::from("-t"));
        z.push(types.into().to_string());
        z.push(property_list(properties));
        if let Some(filter) = filter.filter(|filter| !filter.is_empty()) {
            z.push(String::from(filter));
        }

        let entities = from_records(self.zfs(z)?);
        Ok(entities.iter().map(|(name, properties)| Dataset::new(name.as_str(), properties)).collect())
    }

    fn list_dataset_names<T: Into<TypeFilter>>(
        &self,
        filter: Option<&str>,
        depth: u64,
        types: T,
    ) -> Result<Vec<String>> {
        let mut z = args(&["list", "-H", "-o", "name"]);
        z.extend(depth_args(depth));
        z.push(String::from("-t"));
        z.push(types.into().to_string());
        if let Some(filter) = filter.filter(|filter| !filter.is_empty()) {
            z.push(String::from(filter));
        }

        Ok(first_fields(self.zfs(z)?))
    }

    fn destroy_dataset(&self, name: &str, flags: DestroyFlags) -> Result<()> {
        validators::validate_name(name)?;

        let mut z = args(&["destroy"]);
        z.extend(flags.to_args());
        z.push(String::from(name));
        self.zfs(z)?;
        Ok(())
    }
}
