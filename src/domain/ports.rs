use crate::utils::error::Result;

/// Byte-level storage seam between the persistence gateway and the host
/// filesystem. Implementations are synchronous; the core runs one
/// operation at a time on the calling thread.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
