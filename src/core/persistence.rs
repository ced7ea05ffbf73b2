use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::codec::Snapshot;
use crate::domain::ports::Storage;
use crate::utils::error::{RegistryError, Result};

/// Outcome of a flat load. `existed == false` means the file was absent
/// and the empty list is a fallback, not a read of an empty file.
#[derive(Debug, Clone)]
pub struct FlatLoad<R> {
    pub records: Vec<R>,
    pub existed: bool,
}

/// File persistence for both serialization forms, generic over the
/// storage port so tests can run against an in-memory backend.
pub struct PersistenceGateway<S: Storage> {
    storage: S,
}

impl<S: Storage> PersistenceGateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 寫入一種實體的平面檔。空集合不寫檔,既有檔案保持原樣。
    pub fn save_flat<R: Serialize>(&self, rows: &[R], path: &str) -> Result<()> {
        if rows.is_empty() {
            tracing::debug!("No rows for {}, file left untouched", path);
            return Ok(());
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| RegistryError::IoError(e.into_error()))?;

        self.storage.write_file(path, &data)?;
        tracing::debug!("Wrote {} rows to {}", rows.len(), path);
        Ok(())
    }

    /// 讀回一種實體的平面檔。檔案不存在時回傳空集合並留下診斷。
    pub fn load_flat<R: DeserializeOwned>(&self, path: &str) -> Result<FlatLoad<R>> {
        let data = match self.storage.read_file(path) {
            Ok(data) => data,
            Err(RegistryError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No file named {}, starting with an empty list", path);
                return Ok(FlatLoad {
                    records: Vec::new(),
                    existed: false,
                });
            }
            Err(e) => return Err(e),
        };

        let mut reader = csv::Reader::from_reader(data.as_slice());
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }

        Ok(FlatLoad {
            records,
            existed: true,
        })
    }

    /// 將整體狀態寫成單一 JSON 文件。
    pub fn save_document(&self, snapshot: &Snapshot, path: &str) -> Result<()> {
        let data = serde_json::to_vec(snapshot)?;
        self.storage.write_file(path, &data)?;
        tracing::debug!("Wrote document to {}", path);
        Ok(())
    }

    /// 讀回整體狀態文件。檔案不存在時回傳 `None`。
    pub fn load_document(&self, path: &str) -> Result<Option<Snapshot>> {
        let data = match self.storage.read_file(path) {
            Ok(data) => data,
            Err(RegistryError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No file named {}, nothing to load", path);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let snapshot = serde_json::from_slice(&data)?;
        Ok(Some(snapshot))
    }
}
