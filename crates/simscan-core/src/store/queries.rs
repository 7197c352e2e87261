use super::crypto::IV_LEN;
use super::models::{DocumentMeta, EncryptedDocument};
use super::sqlite::Database;
use rusqlite::{params, Result};

fn row_to_document(
    id: i64,
    original_filename: String,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    created_at: String,
) -> Result<EncryptedDocument> {
    let iv: [u8; IV_LEN] = iv.try_into().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Blob,
            format!("IV column must be {IV_LEN} bytes").into(),
        )
    })?;
    Ok(EncryptedDocument {
        id,
        original_filename,
        iv,
        ciphertext,
        created_at,
    })
}

impl Database {
    pub fn insert_document(
        &self,
        original_filename: &str,
        iv: &[u8; IV_LEN],
        ciphertext: &[u8],
    ) -> Result<i64> {
        let now = chrono::Utc::now().to_rfc3339();
        self.connection().execute(
            "INSERT INTO document (original_filename, iv, ciphertext, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![original_filename, iv.as_slice(), ciphertext, now],
        )?;
        Ok(self.connection().last_insert_rowid())
    }

    pub fn get_document(&self, id: i64) -> Result<Option<EncryptedDocument>> {
        match self.connection().query_row(
            "SELECT id, original_filename, iv, ciphertext, created_at \
             FROM document WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Vec<u8>>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        ) {
            Ok((id, name, iv, ciphertext, created_at)) => {
                Ok(Some(row_to_document(id, name, iv, ciphertext, created_at)?))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// All documents in insertion order. This is the comparator's input
    /// order and the snapshot a report run works from.
    pub fn snapshot_documents(&self) -> Result<Vec<EncryptedDocument>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, original_filename, iv, ciphertext, created_at \
             FROM document ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Vec<u8>>(2)?,
                row.get::<_, Vec<u8>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, name, iv, ciphertext, created_at) = row?;
            documents.push(row_to_document(id, name, iv, ciphertext, created_at)?);
        }
        Ok(documents)
    }

    /// Listing rows, newest first.
    pub fn list_documents(&self) -> Result<Vec<DocumentMeta>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, original_filename, LENGTH(ciphertext), created_at \
             FROM document ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DocumentMeta {
                id: row.get(0)?,
                original_filename: row.get(1)?,
                ciphertext_len: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    pub fn delete_document(&self, id: i64) -> Result<bool> {
        let affected = self
            .connection()
            .execute("DELETE FROM document WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    pub fn count_documents(&self) -> Result<usize> {
        let count: i64 =
            self.connection()
                .query_row("SELECT COUNT(*) FROM document", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
