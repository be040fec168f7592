use std::borrow::Cow;
use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use crate::utils::{path_str, read_file};

/// Env var pointing at the settings file when none is given explicitly
pub const CONFIG_ENV: &str = "APKFP_CONFIG";

#[derive(Debug)]
pub enum Error {
    InvalidType,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::InvalidType => "InvalidType",
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Typed view over a (possibly nested) TOML table that knows where it came
/// from for error messages
pub struct ConfigMap<'c> {
    path: &'c Path,
    name: Option<Cow<'c, str>>,
    table: &'c Table,
}

pub fn parse_config<R, F>(file: &Path, f: F) -> crate::Result<R>
where
    F: FnOnce(&ConfigMap) -> crate::Result<R>,
{
    let as_str = read_file(file)?;
    parse_config_str(file, &as_str, f)
}

/// Same as [parse_config] for already read content, `file` is only used in
/// errors
pub fn parse_config_str<R, F>(file: &Path, content: &str, f: F) -> crate::Result<R>
where
    F: FnOnce(&ConfigMap) -> crate::Result<R>,
{
    let table: Table = match toml::from_str(content) {
        Ok(v) => v,
        Err(e) => return Err(crate::Error::new_cfg(file, &e)),
    };

    let base = ConfigMap {
        name: None,
        path: file,
        table: &table,
    };

    f(&base)
}

impl<'c> ConfigMap<'c> {
    fn get_full_path(&self) -> Option<&str> {
        self.name.as_ref().map(|it| it.as_ref())
    }

    fn key_path<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self.get_full_path() {
            None => Cow::Borrowed(key),
            Some(v) => Cow::Owned(format!("{}.{}", v, key)),
        }
    }

    /// Helper to create a crate::Error for an invalid key
    pub fn invalid_key(&self, key: &str, expected: &str) -> crate::Error {
        let path = self.key_path(key);
        crate::Error::InvalidConfig(
            path_str(self.path).into_owned(),
            format!(
                "invalid value for key: {} (expected type: {})",
                path, expected
            ),
        )
    }

    fn get(&self, key: &str) -> Option<&'c Value> {
        self.table.get(key)
    }

    pub fn maybe_get_int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            Some(v) => match v.as_integer() {
                Some(v) => Ok(Some(v)),
                None => Err(Error::InvalidType),
            },
            None => Ok(None),
        }
    }

    pub fn maybe_get_int_typecheck(&self, key: &str) -> crate::Result<Option<i64>> {
        self.maybe_get_int(key)
            .map_err(|_| self.invalid_key(key, "int"))
    }

    pub fn maybe_get_str(&self, key: &str) -> Result<Option<&'c str>> {
        match self.get(key) {
            Some(v) => match v.as_str() {
                Some(v) => Ok(Some(v)),
                None => Err(Error::InvalidType),
            },
            None => Ok(None),
        }
    }

    pub fn maybe_get_str_typecheck(&self, key: &str) -> crate::Result<Option<&'c str>> {
        self.maybe_get_str(key)
            .map_err(|_| self.invalid_key(key, "string"))
    }

    pub fn maybe_get_bool_typecheck(&self, key: &str) -> crate::Result<Option<bool>> {
        match self.get(key) {
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid_key(key, "bool")),
            None => Ok(None),
        }
    }

    pub fn maybe_get_map(&'c self, key: &'c str) -> Result<Option<ConfigMap<'c>>> {
        match self.get(key) {
            Some(v) => match v.as_table() {
                Some(table) => {
                    let name = match &self.get_full_path() {
                        Some(parents) => Cow::Owned(format!("{parents}.{key}")),
                        None => Cow::Borrowed(key),
                    };
                    Ok(Some(Self {
                        name: Some(name),
                        path: self.path,
                        table,
                    }))
                }
                None => Err(Error::InvalidType),
            },
            None => Ok(None),
        }
    }

    pub fn maybe_get_map_typecheck(&'c self, key: &'c str) -> crate::Result<Option<ConfigMap<'c>>> {
        self.maybe_get_map(key)
            .map_err(|_| self.invalid_key(key, "table"))
    }
}

/// `[log]` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace
    pub level: Option<u8>,
    /// flexi_logger log spec, wins over `level`
    pub spec: Option<String>,
    pub file: Option<PathBuf>,
}

/// Settings file contents, every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Device id put into exported records when none is given
    pub device_id: Option<String>,
    /// Pretty print exported JSON
    pub pretty: bool,
    pub log: LogSettings,
}

impl Settings {
    pub fn from_map(cfg: &ConfigMap) -> crate::Result<Self> {
        let mut settings = Settings {
            device_id: cfg.maybe_get_str_typecheck("device_id")?.map(String::from),
            ..Default::default()
        };

        if let Some(output) = cfg.maybe_get_map_typecheck("output")? {
            settings.pretty = output.maybe_get_bool_typecheck("pretty")?.unwrap_or(false);
        }

        if let Some(log) = cfg.maybe_get_map_typecheck("log")? {
            settings.log.level = match log.maybe_get_int_typecheck("level")? {
                None => None,
                Some(v) => Some(u8::try_from(v).map_err(|_| log.invalid_key("level", "0-255"))?),
            };
            settings.log.spec = log.maybe_get_str_typecheck("spec")?.map(String::from);
            settings.log.file = log.maybe_get_str_typecheck("file")?.map(PathBuf::from);
        }

        Ok(settings)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        log::debug!("reading settings from {}", path_str(path));
        parse_config(path, Self::from_map)
    }

    /// Load the explicitly given file, else the one named by [CONFIG_ENV],
    /// else fall back to defaults
    pub fn discover(explicit: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match env::var(CONFIG_ENV) {
            Ok(v) if !v.is_empty() => Self::load(Path::new(&v)),
            Ok(_) => Ok(Self::default()),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(crate::Error::InvalidEnv(CONFIG_ENV.into(), e.to_string())),
        }
    }
}
