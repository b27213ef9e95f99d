// driver/volumes.rs
// ZfsDriver: volume lifecycle operations over a root dataset subtree

use super::engine::{DatasetEngine, ZettaEngine};
use super::error::DriverError;
use super::namespace::Namespace;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Driver-level view of a volume. `created_at` is RFC 3339 and best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeInfo {
    pub name: String,
    pub mountpoint: String,
    pub created_at: Option<String>,
}

/// Volume driver scoped to a single root dataset.
///
/// Stateless beyond the bound root name; all consistency is delegated to
/// the dataset engine. The engine's exists-then-create sequence is not
/// atomic, so two concurrent Creates for the same name can race inside the
/// engine. That window is a known limitation of this layer.
pub struct ZfsDriver<E = ZettaEngine> {
    engine: Arc<E>,
    namespace: Namespace,
}

impl<E> Clone for ZfsDriver<E> {
    fn clone(&self) -> Self {
        ZfsDriver {
            engine: self.engine.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl ZfsDriver<ZettaEngine> {
    /// Build a driver bound to `root`, talking to the live ZFS engine.
    pub fn new(root: &str) -> Result<Self, DriverError> {
        Self::with_engine(Arc::new(ZettaEngine::new()?), root)
    }
}

impl<E: DatasetEngine> ZfsDriver<E> {
    /// Bind to `root`, creating it recursively if absent. Any failure here
    /// is fatal to driver construction.
    pub fn with_engine(engine: Arc<E>, root: &str) -> Result<Self, DriverError> {
        let namespace = Namespace::new(root);

        if !engine.exists(namespace.root())? {
            info!(root = namespace.root(), "root dataset absent, creating");
            engine.create_recursive(namespace.root(), &HashMap::new())?;
        }
        // bind only once the engine confirms the root is present
        if !engine.exists(namespace.root())? {
            return Err(DriverError::Engine(format!(
                "root dataset '{}' missing after create",
                namespace.root()
            )));
        }

        Ok(ZfsDriver { engine, namespace })
    }

    /// Create a dataset for a new volume, forwarding the caller's option
    /// map verbatim to the engine.
    pub async fn create(
        &self,
        name: &str,
        options: HashMap<String, String>,
    ) -> Result<(), DriverError> {
        debug!(name, "create volume");
        let qualified = self.namespace.qualify(name);

        if self.engine.exists(&qualified)? {
            return Err(DriverError::AlreadyExists(name.to_string()));
        }

        self.engine.create_recursive(&qualified, &options)
    }

    /// List every volume under the root. An entry whose mountpoint cannot
    /// be resolved is logged and skipped, never surfaced as an error.
    pub async fn list(&self) -> Result<Vec<VolumeInfo>, DriverError> {
        debug!("list volumes");
        let mut volumes = Vec::new();

        for dataset in self.engine.list_descendants(self.namespace.root())? {
            let mountpoint = match self.engine.mountpoint(&dataset) {
                Ok(mp) => mp,
                Err(e) => {
                    error!(dataset = %dataset, error = %e, "failed to get mountpoint, skipping");
                    continue;
                }
            };
            volumes.push(VolumeInfo {
                name: self.namespace.unqualify(&dataset)?,
                mountpoint,
                created_at: None,
            });
        }

        Ok(volumes)
    }

    /// Describe one volume. The mountpoint is mandatory; the creation
    /// timestamp is omitted if its property lookup fails.
    pub async fn get(&self, name: &str) -> Result<VolumeInfo, DriverError> {
        debug!(name, "get volume");
        let qualified = self.namespace.qualify(name);

        if !self.engine.exists(&qualified)? {
            return Err(DriverError::NotFound(name.to_string()));
        }
        let mountpoint = self.engine.mountpoint(&qualified)?;

        let created_at = match self.engine.creation(&qualified) {
            Ok(secs) => format_creation(secs),
            Err(e) => {
                error!(dataset = %qualified, error = %e, "failed to get creation time");
                None
            }
        };

        Ok(VolumeInfo {
            name: self.namespace.unqualify(&qualified)?,
            mountpoint,
            created_at,
        })
    }

    /// Destroy the volume's dataset. Fails closed: an engine error (e.g.
    /// dataset busy) leaves the dataset intact and is propagated verbatim.
    pub async fn remove(&self, name: &str) -> Result<(), DriverError> {
        debug!(name, "remove volume");
        let qualified = self.namespace.qualify(name);

        if !self.engine.exists(&qualified)? {
            return Err(DriverError::NotFound(name.to_string()));
        }

        self.engine.destroy(&qualified)
    }

    /// Mountpoint of an existing volume. Backs both Path and Mount: the
    /// engine keeps every dataset mounted, so Mount only reports the path.
    pub async fn mountpoint(&self, name: &str) -> Result<String, DriverError> {
        debug!(name, "resolve mountpoint");
        let qualified = self.namespace.qualify(name);

        if !self.engine.exists(&qualified)? {
            return Err(DriverError::NotFound(name.to_string()));
        }

        self.engine.mountpoint(&qualified)
    }

    /// No-op. Datasets are never explicitly unmounted by this driver; the
    /// engine manages persistent mounting. Always succeeds.
    pub async fn unmount(&self, name: &str) -> Result<(), DriverError> {
        debug!(name, "unmount (no-op)");
        Ok(())
    }
}

fn format_creation(secs: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(secs, 0).map(|ts| ts.to_rfc3339())
}
