//! File-backed config handler.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::{ConfigReader, ConfigWriter, ParserRegistry};
use crate::settings::CodecSettings;
use crate::tree::Config;

use super::{ConfigOwner, HandlerError, LoadOutcome};

type Listener = Box<dyn Fn() + Send + Sync>;

/// Owns a [`Config`] and the file it is stored in.
///
/// Loading and saving are whole-file and blocking. The handler does no
/// locking; callers run at most one load or save at a time.
///
/// # Atomic Writes
///
/// [`Self::save`] writes `{path}.tmp` and renames it over the target, so the
/// file is either fully written or left as it was.
pub struct ConfigHandler {
    config: Config,
    path: PathBuf,
    registry: ParserRegistry,
    writer: ConfigWriter,
    listeners: Vec<Listener>,
}

impl ConfigHandler {
    /// Creates a handler storing `config` at `path`.
    #[must_use]
    pub fn new(config: Config, path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            path: path.into(),
            registry: ParserRegistry::default(),
            writer: ConfigWriter::default(),
            listeners: Vec::new(),
        }
    }

    /// Creates a handler at `<base>/<subfolder>/<name>.cfg` with the layout
    /// from `settings`.
    #[must_use]
    pub fn from_settings(config: Config, settings: &CodecSettings) -> Self {
        let path = settings.config_path(config.name());
        Self::new(config, path).with_writer(settings.writer())
    }

    /// Replaces the parser registry used for unknown keys.
    #[must_use]
    pub fn with_registry(mut self, registry: ParserRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the writer.
    #[must_use]
    pub const fn with_writer(mut self, writer: ConfigWriter) -> Self {
        self.writer = writer;
        self
    }

    /// The config.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The config, for registering sections and changing values.
    pub const fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Consumes the handler, returning its config.
    #[must_use]
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Path of the config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parser registry.
    #[must_use]
    pub const fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Registers a callback run after every successful load.
    pub fn add_loaded_listener<F>(&mut self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Reads the file into the config.
    ///
    /// Malformed lines are logged and skipped. After a successful read every
    /// entry is snapshotted and the loaded listeners run.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Read`] if the file exists but cannot be read.
    pub fn load(&mut self) -> Result<LoadOutcome, HandlerError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No config file yet");
                return Ok(LoadOutcome::NotFound);
            }
            Err(source) => {
                return Err(HandlerError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let report = ConfigReader::new(&self.registry).read(&mut self.config, &text);
        self.config.snapshot_all();
        info!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Config loaded"
        );

        for listener in &self.listeners {
            listener();
        }
        Ok(LoadOutcome::Loaded(report))
    }

    /// Renders the config without touching the file.
    #[must_use]
    pub fn render(&self) -> String {
        self.config.serialize(&self.writer)
    }

    /// Writes the config to its file, creating parent directories first.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::CreateDir`] or [`HandlerError::Write`] on I/O
    /// failure; the previous file is left intact.
    pub fn save(&self) -> Result<(), HandlerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| HandlerError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));
        let write_error = |source| HandlerError::Write {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&temp_path, self.render()).map_err(write_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_error)?;

        debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }

    /// Runs the first lifecycle of the config.
    ///
    /// Lets `owner` populate the config, loads the file, saves it back so new
    /// entries and regenerated comments reach disk, then hands the handler
    /// to `owner` for reload and sync registration.
    ///
    /// # Errors
    ///
    /// Returns the first [`HandlerError`] from loading or saving; `owner`
    /// registration is skipped in that case.
    pub fn init(&mut self, owner: &mut dyn ConfigOwner) -> Result<LoadOutcome, HandlerError> {
        owner.on_config_created(self);
        let outcome = self.load()?;
        self.save()?;
        owner.register_config_handler(self);
        owner.register_sync_handler(self);
        Ok(outcome)
    }
}

impl fmt::Debug for ConfigHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigHandler")
            .field("config", &self.config.name())
            .field("path", &self.path)
            .field("registry", &self.registry)
            .field("writer", &self.writer)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
