//! Loader orchestration.
//!
//! Responsibilities:
//! - Hold the loader configuration (prefixes, disabled stages, file list).
//! - Run the four stages in their fixed order against a record.
//! - Expose the naming rules (`env_name`, `flag_name`, `fields`) and clap flag
//!   registration.
//!
//! Does NOT handle:
//! - Looking up individual sources (see `env.rs`, `flag.rs`, `file.rs`).
//! - Coercion rules (see `coerce`).
//!
//! Invariants / Assumptions:
//! - Prefix separators are appended exactly once, in `Loader::new`.
//! - Stage order is Defaults → File → Environment → Flag; a disabled stage is
//!   skipped without affecting the others.
//! - Descriptors hold mutable borrows of the record, so each per-field stage
//!   walks the record again; the walk is deterministic.

use std::fmt;
use std::path::PathBuf;

use clap::Command;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::defaults::apply_defaults;
use super::env::{self, EnvSource, ProcessEnv};
use super::error::LoadError;
use super::file::apply_file;
use super::flag::{self, FlagSource};
use crate::constants::{ENV_SEPARATOR, FLAG_SEPARATOR};
use crate::schema::{FieldInfo, FieldSet, Settings};

/// Options controlling which sources a [`Loader`] consults.
///
/// The zero value enables every stage with no prefixes and no files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub skip_defaults: bool,
    pub skip_file: bool,
    pub skip_env: bool,
    pub skip_flag: bool,

    /// Prefix of environment variable names (`APP` → `APP_PORT`).
    pub env_prefix: String,
    /// Prefix of flag names (`app` → `app.port`).
    pub flag_prefix: String,

    /// Candidate configuration files; only the first one is read.
    pub files: Vec<PathBuf>,
}

impl LoaderConfig {
    /// Set the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Set the flag prefix.
    pub fn with_flag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.flag_prefix = prefix.into();
        self
    }

    /// Append a configuration file.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Disable one stage.
    pub fn skip(mut self, stage: Stage) -> Self {
        *self.skip_flag_for(stage) = true;
        self
    }

    /// Whether `stage` is disabled.
    pub fn is_skipped(&self, stage: Stage) -> bool {
        match stage {
            Stage::Defaults => self.skip_defaults,
            Stage::File => self.skip_file,
            Stage::Environment => self.skip_env,
            Stage::Flag => self.skip_flag,
        }
    }

    fn skip_flag_for(&mut self, stage: Stage) -> &mut bool {
        match stage {
            Stage::Defaults => &mut self.skip_defaults,
            Stage::File => &mut self.skip_file,
            Stage::Environment => &mut self.skip_env,
            Stage::Flag => &mut self.skip_flag,
        }
    }
}

/// One source in the precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Defaults,
    File,
    Environment,
    Flag,
}

impl Stage {
    /// All stages, in the order they are applied.
    pub const ALL: [Stage; 4] = [Stage::Defaults, Stage::File, Stage::Environment, Stage::Flag];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Defaults => "default",
            Stage::File => "file",
            Stage::Environment => "environment",
            Stage::Flag => "flag",
        })
    }
}

/// Hydrates [`Settings`] records from layered sources.
///
/// ```
/// use std::collections::HashMap;
/// use layercfg::{Loader, LoaderConfig};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct App {
///     port: u16,
///     tags: Vec<String>,
/// }
/// layercfg::impl_settings!(App { port = "8080", tags = "a, b" });
///
/// let env = HashMap::from([("DEMO_PORT".to_string(), "9090".to_string())]);
/// let loader = Loader::new(LoaderConfig::default().with_env_prefix("DEMO")).with_env(env);
///
/// let mut app = App::default();
/// loader.load(&mut app).unwrap();
/// assert_eq!(app.port, 9090);
/// assert_eq!(app.tags, ["a", "b"]);
/// ```
pub struct Loader {
    config: LoaderConfig,
    env: Box<dyn EnvSource + Send + Sync>,
    flags: Option<Box<dyn FlagSource + Send + Sync>>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("config", &self.config)
            .field("flags", &self.flags.is_some())
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// Create a loader reading the process environment and no flags.
    pub fn new(mut config: LoaderConfig) -> Self {
        if !config.env_prefix.is_empty() {
            config.env_prefix.push(ENV_SEPARATOR);
        }
        if !config.flag_prefix.is_empty() {
            config.flag_prefix.push(FLAG_SEPARATOR);
        }
        Self {
            config,
            env: Box::new(ProcessEnv),
            flags: None,
        }
    }

    /// Replace the environment source.
    pub fn with_env(mut self, env: impl EnvSource + Send + Sync + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Provide the parsed flag set consulted by the flag stage.
    ///
    /// Without one, the flag stage finds no values.
    pub fn with_flags(mut self, flags: impl FlagSource + Send + Sync + 'static) -> Self {
        self.flags = Some(Box::new(flags));
        self
    }

    /// Configuration with normalized prefixes.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Environment variable consulted for the dotted field name `field`.
    pub fn env_name(&self, field: &str) -> String {
        env::env_name(&self.config.env_prefix, field)
    }

    /// Flag consulted for the dotted field name `field`.
    pub fn flag_name(&self, field: &str) -> String {
        flag::flag_name(&self.config.flag_prefix, field)
    }

    /// Describe every field of `T` with its derived source names.
    pub fn fields<T: Settings + Default>(&self) -> Vec<FieldInfo> {
        let mut scratch = T::default();
        FieldSet::collect(&mut scratch)
            .iter()
            .map(|field| FieldInfo {
                name: field.name().to_string(),
                kind: field.kind(),
                default: field.default_value().to_string(),
                env: self.env_name(field.name()),
                flag: self.flag_name(field.name()),
            })
            .collect()
    }

    /// Add one `--<flag>` option per field of `T` to `command`.
    pub fn register_flags<T: Settings + Default>(&self, command: Command) -> Command {
        self.fields::<T>()
            .iter()
            .fold(command, |command, info| command.arg(flag::field_arg(info)))
    }

    /// Populate `into` from every enabled source.
    ///
    /// On error the record keeps whatever earlier stages (and earlier fields of
    /// the failing stage) already wrote.
    ///
    /// The file stage round-trips the record through serde, hence the
    /// `Serialize + DeserializeOwned` bound even when that stage is disabled.
    /// Records without serde support use [`Loader::load_without_file`].
    pub fn load<T>(&self, into: &mut T) -> Result<(), LoadError>
    where
        T: Settings + Serialize + DeserializeOwned,
    {
        self.run_stages(into, |stage, into| match stage {
            Stage::File => {
                if let Some(path) = apply_file(&self.config.files, into)? {
                    tracing::debug!(%stage, path = %path.display(), "config file applied");
                }
                Ok(())
            }
            _ => self.apply_field_stage(stage, into),
        })
    }

    /// Populate `into` from defaults, environment and flags.
    ///
    /// Same as [`Loader::load`] with the file stage always disabled, so the
    /// record only needs to implement [`Settings`]. Configured files are
    /// ignored.
    pub fn load_without_file<T: Settings + ?Sized>(&self, into: &mut T) -> Result<(), LoadError> {
        self.run_stages(into, |stage, into| match stage {
            Stage::File => {
                if !self.config.files.is_empty() {
                    tracing::debug!(
                        %stage,
                        ignored = self.config.files.len(),
                        "file stage unavailable for this record"
                    );
                }
                Ok(())
            }
            _ => self.apply_field_stage(stage, into),
        })
    }

    fn run_stages<T: Settings + ?Sized>(
        &self,
        into: &mut T,
        mut apply: impl FnMut(Stage, &mut T) -> Result<(), LoadError>,
    ) -> Result<(), LoadError> {
        tracing::debug!(
            fields = FieldSet::collect(&mut *into).len(),
            env_prefix = %self.config.env_prefix,
            flag_prefix = %self.config.flag_prefix,
            "loading configuration"
        );

        for stage in Stage::ALL {
            if self.config.is_skipped(stage) {
                tracing::debug!(%stage, "stage disabled");
                continue;
            }
            if let Err(error) = apply(stage, &mut *into) {
                tracing::debug!(%stage, %error, "configuration load failed");
                return Err(error);
            }
        }
        Ok(())
    }

    /// Run one per-field stage. The file stage is handled by the callers.
    fn apply_field_stage<T: Settings + ?Sized>(
        &self,
        stage: Stage,
        into: &mut T,
    ) -> Result<(), LoadError> {
        match stage {
            Stage::Defaults => {
                let mut fields = FieldSet::collect(into);
                apply_defaults(&mut fields)
                    .map_err(|(field, source)| LoadError::Field {
                        stage,
                        field,
                        source,
                    })
            }
            Stage::File => Ok(()),
            Stage::Environment => apply_values(stage, into, |field| {
                let name = self.env_name(field);
                let value = self.env.lookup(&name);
                (name, value)
            }),
            Stage::Flag => match &self.flags {
                Some(flags) => apply_values(stage, into, |field| {
                    let name = self.flag_name(field);
                    let value = flags.lookup(&name);
                    (name, value)
                }),
                None => Ok(()),
            },
        }
    }
}

/// Coerce every value `lookup` finds into its field.
///
/// `lookup` maps a dotted field name to the source key it consulted and the
/// value found there, if any.
fn apply_values<T: Settings + ?Sized>(
    stage: Stage,
    into: &mut T,
    lookup: impl Fn(&str) -> (String, Option<String>),
) -> Result<(), LoadError> {
    let mut applied = 0usize;
    for mut field in FieldSet::collect(into) {
        let (key, value) = lookup(field.name());
        let Some(value) = value else {
            continue;
        };
        tracing::debug!(%stage, field = field.name(), %key, "applying value");
        field.set(&value).map_err(|source| LoadError::Field {
            stage,
            field: field.name().to_string(),
            source,
        })?;
        applied += 1;
    }
    tracing::debug!(%stage, applied, "stage complete");
    Ok(())
}
