// ==============================================================================
// validator.rs - Input File Validation
// ==============================================================================
// Description: Checks the input table before conversion (type, compression, hash)
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConversionError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub path: PathBuf,
    pub size: u64,
    /// Gzip magic number found at the start of the file
    pub compressed: bool,
    pub hash_sha256: String,
    pub validated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, path: &Path) -> Result<ValidatedInput> {
        info!("Validating input file: {:?}", path);
        let unreadable = |source: io::Error| ConversionError::UnreadableInput {
            path: path.to_path_buf(),
            source,
        };

        // 1. Regular, non-empty file
        let metadata = std::fs::metadata(path).map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        if metadata.len() == 0 {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input file is empty",
            )));
        }
        debug!("Size check passed: {} bytes", metadata.len());

        // 2. Magic number decides whether to decompress
        let magic = self.read_magic_number(path).map_err(unreadable)?;
        let compressed = magic == GZIP_MAGIC;
        debug!("Gzip compressed: {}", compressed);

        // 3. SHA-256 for the run report
        let hash = self.compute_sha256(path).map_err(unreadable)?;
        debug!("SHA-256: {}", hash);

        Ok(ValidatedInput {
            path: path.to_path_buf(),
            size: metadata.len(),
            compressed,
            hash_sha256: hash,
            validated_at: chrono::Utc::now(),
        })
    }

    fn read_magic_number(&self, path: &Path) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(GZIP_MAGIC.len());
        File::open(path)?
            .take(GZIP_MAGIC.len() as u64)
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn compute_sha256(&self, path: &Path) -> io::Result<String> {
        let mut hasher = Sha256::new();
        io::copy(&mut File::open(path)?, &mut hasher)?;
        Ok(format!("{:x}", hasher.finalize()))
    }
}
