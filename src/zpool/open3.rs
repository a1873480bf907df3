//! Open3 implementation of [`ZpoolEngine`](../trait.ZpoolEngine.html).
//!
//! Easy way - [`ZpoolOpen3::default()`](struct.ZpoolOpen3.html#impl-Default). It will look for
//! `ZPOOL_CMD` in runtime environment, if not found it will use `zpool`. If you want to run
//! everything through sudo, hand it [`SystemRunner::sudo`](../../runner/struct.SystemRunner.html).
use crate::{parsers::{first_fields, parse_tabular, Record},
            properties::{self, from_records, PropertyError},
            runner::{Runner, SystemRunner},
            zpool::{validate_name, CreateZpoolRequest, ImportZpoolRequest, Pool, ZpoolEngine, ZpoolError,
                    ZpoolResult},
            GlobalLogger};
use slog::Logger;
use std::{fmt, sync::Arc};

static PROPERTY_COLUMNS: &str = "name,property,value,source";

/// Open3 implementation of [`ZpoolEngine`](../trait.ZpoolEngine.html).
#[derive(Clone)]
pub struct ZpoolOpen3 {
    cmd_name: String,
    logger:   Logger,
    runner:   Arc<dyn Runner>,
}

impl ZpoolOpen3 {
    /// Create new using supplied path as zpool cmd and the global logger.
    pub fn new() -> Self {
        let cmd_name = std::env::var("ZPOOL_CMD").unwrap_or_else(|_| String::from("zpool"));
        ZpoolOpen3 {
            cmd_name,
            logger: GlobalLogger::engine("zpool", "open3"),
            runner: Arc::new(SystemRunner::new()),
        }
    }

    pub fn with_cmd<S: Into<String>>(mut self, cmd_name: S) -> Self {
        self.cmd_name = cmd_name.into();
        self
    }

    pub fn with_logger(mut self, logger: &Logger) -> Self {
        self.logger = logger.new(o!("zetta_module" => "zpool", "zetta_impl" => "open3"));
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn Runner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn logger(&self) -> &Logger { &self.logger }

    pub fn cmd_name(&self) -> &str { &self.cmd_name }

    fn zpool(&self, args: Vec<String>) -> ZpoolResult<Vec<Record>> {
        debug!(self.logger, "executing"; "cmd" => &self.cmd_name, "args" => format_args!("{:?}", args));
        let out = self.runner.run(&self.cmd_name, &args)?;
        if out.success() {
            Ok(parse_tabular(&out.stdout))
        } else {
            let err = ZpoolError::from_output(&out);
            warn!(self.logger, "command failed"; "cmd" => &self.cmd_name, "code" => ?out.code, "error" => %err);
            Err(err)
        }
    }

    /// `<subcommand> [-f] <name>`
    fn forced(&self, subcommand: &str, name: &str, force: bool) -> ZpoolResult<()> {
        validate_name(name)?;
        let mut z = vec![String::from(subcommand)];
        if force {
            z.push(String::from("-f"));
        }
        z.push(String::from(name));
        self.zpool(z)?;
        Ok(())
    }

    fn get_args(properties: &[&str]) -> Vec<String> {
        let list = if properties.is_empty() { String::from(properties::ALL) } else { properties.join(",") };
        vec![String::from("get"), String::from("-Hp"), String::from("-o"), String::from(PROPERTY_COLUMNS), list]
    }
}

impl Default for ZpoolOpen3 {
    fn default() -> Self { ZpoolOpen3::new() }
}

impl fmt::Debug for ZpoolOpen3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZpoolOpen3").field("cmd_name", &self.cmd_name).field("runner", &self.runner).finish()
    }
}

impl ZpoolEngine for ZpoolOpen3 {
    fn get_pool_property(&self, name: &str, property: &str) -> ZpoolResult<String> {
        validate_name(name)?;
        properties::validate_name(property)?;

        let z = vec![
            String::from("get"),
            String::from("-Hp"),
            String::from("-o"),
            String::from("value"),
            String::from(property),
            String::from(name),
        ];
        let records = self.zpool(z)?;
        Ok(records.into_iter().next().and_then(|record| record.into_iter().next()).unwrap_or_default())
    }

    fn set_pool_properties<I, K, V>(&self, name: &str, properties: I) -> ZpoolResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        validate_name(name)?;
        let pairs = properties::property_pairs(properties)?;
        if pairs.is_empty() {
            return Err(PropertyError::NoProperties.into());
        }

        let mut z = Vec::with_capacity(pairs.len() + 2);
        z.push(String::from("set"));
        z.extend(pairs);
        z.push(String::from(name));
        self.zpool(z)?;
        Ok(())
    }

    fn create_pool(&self, request: &CreateZpoolRequest) -> ZpoolResult<()> {
        let mut z = vec![String::from("create")];
        z.extend(request.to_args()?);
        self.zpool(z)?;
        Ok(())
    }

    fn get_pool(&self, name: &str, properties: &[&str]) -> ZpoolResult<Pool> {
        validate_name(name)?;

        let mut z = ZpoolOpen3::get_args(properties);
        z.push(String::from(name));
        let mut entities = from_records(self.zpool(z)?);
        let properties = entities.remove(name).unwrap_or_default();
        Ok(Pool::new(name, &properties))
    }

    fn list_pools(&self, properties: &[&str]) -> ZpoolResult<Vec<Pool>> {
        let entities = from_records(self.zpool(ZpoolOpen3::get_args(properties))?);
        Ok(entities.iter().map(|(name, properties)| Pool::new(name.as_str(), properties)).collect())
    }

    fn list_pool_names(&self) -> ZpoolResult<Vec<String>> {
        let z = vec![String::from("list"), String::from("-Hp"), String::from("-o"), String::from("name")];
        Ok(first_fields(self.zpool(z)?))
    }

    fn destroy_pool(&self, name: &str, force: bool) -> ZpoolResult<()> { self.forced("destroy", name, force) }

    fn import_pool(&self, request: &ImportZpoolRequest) -> ZpoolResult<()> {
        let mut z = vec![String::from("import")];
        z.extend(request.to_args()?);
        self.zpool(z)?;
        Ok(())
    }

    fn export_pool(&self, name: &str, force: bool) -> ZpoolResult<()> { self.forced("export", name, force) }
}
