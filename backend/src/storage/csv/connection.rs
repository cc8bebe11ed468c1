use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use super::{
    BudgetRepository, CategoryRepository, GoalRepository, SettingsRepository, ShortcutRepository,
    TransactionRepository,
};
use crate::storage::traits::Connection;
use crate::storage::Gateway;

/// Folder created under the user's documents directory by default
pub const DEFAULT_DATA_FOLDER: &str = "Finance Tracker";

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// CsvConnection manages the data directory and the files inside it
///
/// Clones share one write lock. Repositories hold it across each
/// read-modify-write so concurrent requests never lose each other's rows.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Serialize writers to the data directory until the guard is dropped
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Default data directory: `~/Documents/Finance Tracker`, or the home
    /// directory when the platform has no documents folder
    pub fn default_directory() -> Result<PathBuf> {
        let documents = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(documents.join(DEFAULT_DATA_FOLDER))
    }

    /// Create a new CSV connection in the default data directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_directory()?)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of a file inside the data directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Fresh temp path next to `file_name`, unique per write
    fn temp_path(&self, file_name: &str) -> PathBuf {
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.file_path(&format!(".{}.{}.{}.tmp", file_name, std::process::id(), sequence))
    }

    /// Ensure a CSV file exists with the given header line
    pub fn ensure_csv_file(&self, file_name: &str, header: &str) -> Result<PathBuf> {
        let file_path = self.file_path(file_name);
        if !file_path.exists() {
            fs::write(&file_path, format!("{}\n", header))?;
            debug!("Created CSV file: {:?}", file_path);
        }
        Ok(file_path)
    }

    /// Read every record of a CSV file, skipping rows that fail to parse
    pub fn read_records<R: DeserializeOwned>(&self, file_name: &str, header: &str) -> Result<Vec<R>> {
        let file_path = self.ensure_csv_file(file_name, header)?;
        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ::csv::Reader::from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (index, result) in csv_reader.deserialize().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Failed to parse row {} of {}: {}. Skipping.", index + 1, file_name, e);
                }
            }
        }
        Ok(records)
    }

    /// Replace a CSV file with `records`, writing to a temp file first
    pub fn write_records<R: Serialize>(&self, file_name: &str, header: &str, records: &[R]) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_file_path = self.temp_path(file_name);

        {
            let temp_file = File::create(&temp_file_path)?;
            let mut csv_writer = ::csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(temp_file));

            // Header is written by hand so empty files still carry it
            csv_writer.write_record(header.split(','))?;
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }

        // Atomically replace the original file
        fs::rename(&temp_file_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!("Wrote {} records to {:?}", records.len(), file_path);
        Ok(())
    }

    /// Read a YAML file, returning `None` when it does not exist yet
    pub fn read_yaml<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let file_path = self.file_path(file_name);
        if !file_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        let value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;
        Ok(Some(value))
    }

    /// Write a YAML file through a temp file
    pub fn write_yaml<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_file_path = self.temp_path(file_name);

        let content = serde_yaml::to_string(value)?;
        fs::write(&temp_file_path, content)?;
        fs::rename(&temp_file_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!("Wrote {:?}", file_path);
        Ok(())
    }
}

impl Connection for CsvConnection {
    fn create_gateway(&self) -> Gateway {
        let transactions = TransactionRepository::new(self.clone());
        let budgets = BudgetRepository::new(self.clone());
        Gateway {
            categories: Arc::new(CategoryRepository::new(
                self.clone(),
                transactions.clone(),
                budgets.clone(),
            )),
            transactions: Arc::new(transactions),
            budgets: Arc::new(budgets),
            goals: Arc::new(GoalRepository::new(self.clone())),
            shortcuts: Arc::new(ShortcutRepository::new(self.clone())),
            settings: Arc::new(SettingsRepository::new(self.clone())),
        }
    }
}
