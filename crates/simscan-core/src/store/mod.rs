//! Encrypted store: per-document ciphertext management and the transient
//! plaintext lifecycle.
//!
//! Ciphertext lives in SQLite, one row per document with its IV alongside,
//! so any holder of the key can decrypt a row standalone. Plaintext only
//! ever exists as a `Plaintext` handle (zeroized on drop) or as an
//! explicitly exported scratch file, which `cleanup` removes.

pub mod crypto;
pub mod models;
mod queries;
mod sqlite;

pub use crypto::{DecryptError, MasterKey, Plaintext, IV_LEN};
pub use models::{DocumentMeta, EncryptedDocument};
pub use sqlite::Database;

use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub struct DocumentStore {
    db: Database,
    scratch_dir: PathBuf,
}

/// Result of a `cleanup` pass. Failures are collected rather than hidden;
/// removal of residual plaintext takes precedence over stopping early.
#[derive(Debug, Default)]
pub struct CleanupOutcome {
    pub removed: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl DocumentStore {
    pub fn open(db_path: &str, scratch_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        Ok(DocumentStore {
            db: Database::open(db_path)?,
            scratch_dir: scratch_dir.into(),
        })
    }

    pub fn open_in_memory(scratch_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        Ok(DocumentStore {
            db: Database::open_in_memory()?,
            scratch_dir: scratch_dir.into(),
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Encrypt `plaintext` under `key` with a fresh random IV and persist
    /// it. The caller's plaintext is not retained.
    pub fn encrypt_and_store(
        &self,
        key: &MasterKey,
        plaintext: &str,
        original_filename: &str,
    ) -> Result<EncryptedDocument, Error> {
        let (iv, ciphertext) = crypto::encrypt(key, plaintext.as_bytes());
        let id = self.db.insert_document(original_filename, &iv, &ciphertext)?;
        debug!(
            "Stored '{}' as document {} ({} ciphertext bytes)",
            original_filename,
            id,
            ciphertext.len()
        );
        let document = self
            .db
            .get_document(id)?
            .ok_or(Error::DocumentNotFound(id))?;
        Ok(document)
    }

    /// Decrypt a single document to a transient handle.
    pub fn decrypt(&self, key: &MasterKey, id: i64) -> Result<Plaintext, Error> {
        let document = self
            .db
            .get_document(id)?
            .ok_or(Error::DocumentNotFound(id))?;
        let plaintext = crypto::decrypt(key, &document.iv, &document.ciphertext)?;
        Ok(plaintext)
    }

    /// Stream every document's plaintext through `sink` in insertion
    /// order, one at a time — at no point is more than one decrypted
    /// document held here. A document that fails to decrypt is passed to
    /// the sink as an error instead of aborting the stream.
    pub fn decrypt_all(
        &self,
        key: &MasterKey,
        mut sink: impl FnMut(&EncryptedDocument, Result<Plaintext, DecryptError>),
    ) -> Result<(), Error> {
        for document in self.db.snapshot_documents()? {
            let outcome = crypto::decrypt(key, &document.iv, &document.ciphertext);
            sink(&document, outcome);
        }
        Ok(())
    }

    /// Point-in-time snapshot of all ciphertext rows for a report run.
    /// Writes and deletes after the snapshot do not affect the run.
    pub fn snapshot(&self) -> Result<Vec<EncryptedDocument>, Error> {
        Ok(self.db.snapshot_documents()?)
    }

    pub fn list(&self) -> Result<Vec<DocumentMeta>, Error> {
        Ok(self.db.list_documents()?)
    }

    pub fn delete(&self, id: i64) -> Result<bool, Error> {
        Ok(self.db.delete_document(id)?)
    }

    /// Delete every stored document. Returns the number removed.
    pub fn purge(&self) -> Result<usize, Error> {
        let count = self.db.count_documents()?;
        self.db.truncate_all()?;
        info!("Purged {} documents", count);
        Ok(count)
    }

    /// Decrypt one document into the scratch directory for inspection.
    /// The artifact is transient; `cleanup` removes it.
    pub fn export_plaintext(&self, key: &MasterKey, id: i64) -> Result<PathBuf, Error> {
        let document = self
            .db
            .get_document(id)?
            .ok_or(Error::DocumentNotFound(id))?;
        let plaintext = crypto::decrypt(key, &document.iv, &document.ciphertext)?;

        fs::create_dir_all(&self.scratch_dir)?;
        let target = self.scratch_dir.join(&document.original_filename);
        fs::write(&target, plaintext.as_str())?;
        info!("Exported document {} to {}", id, target.display());
        Ok(target)
    }

    /// Remove every residual plaintext artifact from the scratch
    /// directory. Idempotent: calling it with nothing pending removes
    /// nothing and succeeds. Per-file failures are reported loudly,
    /// never silently swallowed.
    pub fn cleanup(&self) -> Result<CleanupOutcome, Error> {
        let mut outcome = CleanupOutcome::default();

        let entries = match fs::read_dir(&self.scratch_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Scratch directory does not exist, nothing to clean");
                return Ok(outcome);
            }
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Removed {}", path.display());
                    outcome.removed += 1;
                }
                Err(err) => {
                    error!("Failed to remove {}: {}", path.display(), err);
                    outcome.failed.push((path, err.to_string()));
                }
            }
        }

        info!(
            "Cleanup removed {} plaintext artifacts ({} failures)",
            outcome.removed,
            outcome.failed.len()
        );
        Ok(outcome)
    }
}
