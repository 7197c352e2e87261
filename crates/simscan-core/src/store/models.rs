use super::crypto::IV_LEN;

/// A stored document: ciphertext plus its per-document IV. Immutable once
/// written; exists until explicitly deleted.
#[derive(Debug, Clone)]
pub struct EncryptedDocument {
    pub id: i64,
    pub original_filename: String,
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
    pub created_at: String,
}

/// Listing row: everything about a document except its ciphertext.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub id: i64,
    pub original_filename: String,
    pub ciphertext_len: i64,
    pub created_at: String,
}
