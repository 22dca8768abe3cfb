mod local;
mod memory;

pub use local::LocalFileReader;
pub use memory::MemoryReader;

use async_trait::async_trait;

use crate::error::{Result, WadError};

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;

    /// Read the whole source into memory.
    ///
    /// Archives are always decoded from a complete buffer, so this is the
    /// only way the reader consumes a source.
    async fn read_all(&self) -> Result<Vec<u8>> {
        let size = usize::try_from(self.size())
            .map_err(|_| WadError::format("source is too large to load into memory"))?;
        let mut buf = vec![0u8; size];

        let mut filled = 0;
        while filled < size {
            let n = self.read_at(filled as u64, &mut buf[filled..]).await?;
            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("source ended after {filled} of {size} bytes"),
                )
                .into());
            }
            filled += n;
        }

        Ok(buf)
    }
}
