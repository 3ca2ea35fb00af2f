//! JSON persistence of a computed [`FrequentMap`], so that maps can be
//! redrawn without recomputing headways.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{FrequencyError, Result};
use crate::pipeline::FrequentMap;

impl FrequentMap {
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| FrequencyError::CacheIo {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(|source| FrequencyError::CacheFormat {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;

        tracing::info!("Saved {} polylines to {}", self.chains.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| FrequencyError::CacheIo {
            path: path.to_path_buf(),
            source,
        })?;
        let map: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            FrequencyError::CacheFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::info!("Loaded {} polylines from {}", map.chains.len(), path.display());
        Ok(map)
    }
}
