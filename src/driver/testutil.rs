// driver/testutil.rs
// In-memory dataset engine for unit tests, with injectable property failures

use super::engine::DatasetEngine;
use super::error::DriverError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

pub const MOCK_CREATION_SECS: i64 = 1_600_000_000;

#[derive(Debug, Clone, Default)]
pub struct MockDataset {
    pub mountpoint: String,
    pub creation: i64,
    pub options: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub datasets: BTreeMap<String, MockDataset>,
    pub fail_mountpoint: Vec<String>,
    pub fail_creation: Vec<String>,
    pub fail_destroy: Vec<String>,
    pub calls: Vec<String>,
}

/// Mock engine keyed by qualified dataset name. Mountpoints follow the ZFS
/// default of `/<dataset>`.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub state: Mutex<MockState>,
}

impl MockEngine {
    pub fn seed(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.datasets.insert(
            name.to_string(),
            MockDataset {
                mountpoint: format!("/{}", name),
                creation: MOCK_CREATION_SECS,
                options: HashMap::new(),
            },
        );
    }

    pub fn fail_mountpoint(&self, name: &str) {
        self.state.lock().unwrap().fail_mountpoint.push(name.to_string());
    }

    pub fn fail_creation(&self, name: &str) {
        self.state.lock().unwrap().fail_creation.push(name.to_string());
    }

    pub fn fail_destroy(&self, name: &str) {
        self.state.lock().unwrap().fail_destroy.push(name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().unwrap().datasets.contains_key(name)
    }

    pub fn dataset_names(&self) -> Vec<String> {
        self.state.lock().unwrap().datasets.keys().cloned().collect()
    }

    pub fn options_of(&self, name: &str) -> Option<HashMap<String, String>> {
        self.state
            .lock()
            .unwrap()
            .datasets
            .get(name)
            .map(|ds| ds.options.clone())
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl DatasetEngine for MockEngine {
    fn exists(&self, name: &str) -> Result<bool, DriverError> {
        self.record(format!("exists {}", name));
        Ok(self.contains(name))
    }

    fn create_recursive(
        &self,
        name: &str,
        options: &HashMap<String, String>,
    ) -> Result<(), DriverError> {
        self.record(format!("create_recursive {}", name));
        let mut state = self.state.lock().unwrap();
        if state.datasets.contains_key(name) {
            return Err(DriverError::Engine(format!(
                "failed to create dataset '{}': dataset already exists",
                name
            )));
        }

        let mut current = String::new();
        for part in name.split('/').filter(|c| !c.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            let is_leaf = current == name;
            state
                .datasets
                .entry(current.clone())
                .or_insert_with(|| MockDataset {
                    mountpoint: format!("/{}", current),
                    creation: MOCK_CREATION_SECS,
                    options: if is_leaf {
                        options.clone()
                    } else {
                        HashMap::new()
                    },
                });
        }
        Ok(())
    }

    fn list_descendants(&self, root: &str) -> Result<Vec<String>, DriverError> {
        self.record(format!("list_descendants {}", root));
        let prefix = format!("{}/", root);
        Ok(self
            .state
            .lock()
            .unwrap()
            .datasets
            .keys()
            .filter(|name| name.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn mountpoint(&self, name: &str) -> Result<String, DriverError> {
        self.record(format!("mountpoint {}", name));
        let state = self.state.lock().unwrap();
        if state.fail_mountpoint.iter().any(|n| n == name) {
            return Err(DriverError::Engine(format!(
                "failed to read properties of '{}': I/O error",
                name
            )));
        }
        state
            .datasets
            .get(name)
            .map(|ds| ds.mountpoint.clone())
            .ok_or_else(|| DriverError::Engine(format!("dataset '{}' does not exist", name)))
    }

    fn creation(&self, name: &str) -> Result<i64, DriverError> {
        self.record(format!("creation {}", name));
        let state = self.state.lock().unwrap();
        if state.fail_creation.iter().any(|n| n == name) {
            return Err(DriverError::Engine(format!(
                "failed to read properties of '{}': I/O error",
                name
            )));
        }
        state
            .datasets
            .get(name)
            .map(|ds| ds.creation)
            .ok_or_else(|| DriverError::Engine(format!("dataset '{}' does not exist", name)))
    }

    fn destroy(&self, name: &str) -> Result<(), DriverError> {
        self.record(format!("destroy {}", name));
        let mut state = self.state.lock().unwrap();
        if state.fail_destroy.iter().any(|n| n == name) {
            return Err(DriverError::Engine(format!(
                "failed to destroy dataset '{}': dataset is busy",
                name
            )));
        }
        if state.datasets.remove(name).is_none() {
            return Err(DriverError::Engine(format!(
                "failed to destroy dataset '{}': dataset not found",
                name
            )));
        }
        Ok(())
    }
}
