// driver/engine.rs
// Dataset engine boundary and the libzetta-backed implementation

use super::error::DriverError;
use libzetta::zfs::{
    CreateDatasetRequest, DatasetKind, DelegatingZfsEngine, Properties, ZfsEngine,
};
use std::collections::HashMap;
use std::path::PathBuf;

/// Operations the driver needs from the underlying dataset engine.
///
/// The production implementation is [`ZettaEngine`]; tests substitute an
/// in-memory engine. All durable state lives behind this boundary.
pub trait DatasetEngine: Send + Sync {
    fn exists(&self, name: &str) -> Result<bool, DriverError>;

    /// Create `name`, creating any missing ancestor datasets below the pool.
    /// The option map is applied to the leaf dataset only.
    fn create_recursive(
        &self,
        name: &str,
        options: &HashMap<String, String>,
    ) -> Result<(), DriverError>;

    /// Filesystems below `root`, excluding `root` itself.
    fn list_descendants(&self, root: &str) -> Result<Vec<String>, DriverError>;

    /// Mountpoint path of a dataset. A dataset without a mountpoint
    /// property resolves to the empty string, which is legitimate.
    fn mountpoint(&self, name: &str) -> Result<String, DriverError>;

    /// Creation time of a dataset as Unix seconds.
    fn creation(&self, name: &str) -> Result<i64, DriverError>;

    /// Destroy a single dataset. Not recursive.
    fn destroy(&self, name: &str) -> Result<(), DriverError>;
}

/// Dataset engine backed by libzetta's `DelegatingZfsEngine`.
pub struct ZettaEngine {
    engine: DelegatingZfsEngine,
}

impl ZettaEngine {
    pub fn new() -> Result<Self, DriverError> {
        let engine = DelegatingZfsEngine::new()
            .map_err(|e| DriverError::Engine(format!("failed to initialize ZFS engine: {}", e)))?;
        Ok(ZettaEngine { engine })
    }

    fn create_one(&self, name: &str, options: &HashMap<String, String>) -> Result<(), DriverError> {
        let user_properties = if options.is_empty() {
            None
        } else {
            Some(options.clone())
        };
        let request = CreateDatasetRequest::builder()
            .name(PathBuf::from(name))
            .kind(DatasetKind::Filesystem)
            .user_properties(user_properties)
            .build()
            .map_err(|e| {
                DriverError::Engine(format!("failed to build create request for '{}': {}", name, e))
            })?;

        self.engine
            .create(request)
            .map_err(|e| DriverError::Engine(format!("failed to create dataset '{}': {}", name, e)))?;
        Ok(())
    }

    fn read_properties(&self, name: &str) -> Result<Properties, DriverError> {
        self.engine.read_properties(PathBuf::from(name)).map_err(|e| {
            DriverError::Engine(format!("failed to read properties of '{}': {}", name, e))
        })
    }
}

impl DatasetEngine for ZettaEngine {
    fn exists(&self, name: &str) -> Result<bool, DriverError> {
        self.engine
            .exists(PathBuf::from(name))
            .map_err(|e| DriverError::Engine(format!("failed to check dataset '{}': {}", name, e)))
    }

    fn create_recursive(
        &self,
        name: &str,
        options: &HashMap<String, String>,
    ) -> Result<(), DriverError> {
        let mut components = name.split('/').filter(|c| !c.is_empty());
        let pool = components
            .next()
            .ok_or_else(|| DriverError::Engine(format!("invalid dataset name: '{}'", name)))?;

        // `zfs create` cannot bring a pool into existence
        if !self.exists(pool)? {
            return Err(DriverError::Engine(format!("pool '{}' does not exist", pool)));
        }

        let mut current = pool.to_string();
        let mut components = components.peekable();
        while let Some(part) = components.next() {
            current.push('/');
            current.push_str(part);
            let is_leaf = components.peek().is_none();
            if is_leaf {
                self.create_one(&current, options)?;
            } else if !self.exists(&current)? {
                self.create_one(&current, &HashMap::new())?;
            }
        }

        Ok(())
    }

    fn list_descendants(&self, root: &str) -> Result<Vec<String>, DriverError> {
        let datasets = self
            .engine
            .list_filesystems(root)
            .map_err(|e| DriverError::Engine(format!("failed to list datasets: {}", e)))?;

        Ok(datasets
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|name| name != root)
            .collect())
    }

    fn mountpoint(&self, name: &str) -> Result<String, DriverError> {
        match self.read_properties(name)? {
            Properties::Filesystem(fs) => Ok(fs
                .mount_point()
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default()),
            _ => Err(DriverError::Engine(format!(
                "dataset '{}' is not a filesystem",
                name
            ))),
        }
    }

    fn creation(&self, name: &str) -> Result<i64, DriverError> {
        match self.read_properties(name)? {
            Properties::Filesystem(fs) => Ok(*fs.creation()),
            _ => Err(DriverError::Engine(format!(
                "dataset '{}' is not a filesystem",
                name
            ))),
        }
    }

    fn destroy(&self, name: &str) -> Result<(), DriverError> {
        self.engine
            .destroy(PathBuf::from(name))
            .map_err(|e| {
                DriverError::Engine(format!("failed to destroy dataset '{}': {}", name, e))
            })?;
        Ok(())
    }
}
