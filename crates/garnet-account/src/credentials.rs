use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlEntry, KdlNode};
use once_cell::sync::OnceCell;
use tempfile::NamedTempFile;

use crate::AccountError;

/// Name of the entry used when no host-specific or explicitly selected key
/// applies.
pub const DEFAULT_KEY_NAME: &str = "rubygems_api_key";

/// API keys, keyed by name, backed by a KDL file:
///
/// ```kdl
/// rubygems_api_key "KEY"
/// "https://gems.example.com" "EXAMPLEKEY"
/// ```
///
/// The file is read on first access. Every mutation rewrites it atomically,
/// and nodes that weren't touched keep their original text.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    document: OnceCell<KdlDocument>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the backing file if that hasn't happened yet. A missing or empty
    /// file is an empty set of credentials.
    pub fn load(&self) -> Result<&KdlDocument, AccountError> {
        self.document
            .get_or_try_init(|| read_document(&self.path))
    }

    pub fn get(&self, name: &str) -> Result<Option<String>, AccountError> {
        Ok(self
            .load()?
            .get(name)
            .and_then(|node| node.get(0))
            .and_then(|value| value.as_string())
            .map(String::from))
    }

    /// Inserts or overwrites `name` and persists the whole set.
    pub fn set(&mut self, name: &str, token: &str) -> Result<(), AccountError> {
        let mut document = self.take_document()?;
        if let Some(node) = document.get_mut(name) {
            node.entries_mut().clear();
            node.push(KdlEntry::new(token));
        } else {
            let mut node = KdlNode::new(name);
            node.push(KdlEntry::new(token));
            document.nodes_mut().push(node);
        }
        self.persist(document)
    }

    /// Deletes `name` and persists the rest. Returns whether anything was
    /// removed; the file is left alone if not.
    pub fn remove(&mut self, name: &str) -> Result<bool, AccountError> {
        let mut document = self.take_document()?;
        let before = document.nodes().len();
        document
            .nodes_mut()
            .retain(|node| node.name().value() != name);
        if document.nodes().len() == before {
            self.document = OnceCell::from(document);
            return Ok(false);
        }
        self.persist(document)?;
        Ok(true)
    }

    fn take_document(&mut self) -> Result<KdlDocument, AccountError> {
        match self.document.take() {
            Some(document) => Ok(document),
            None => read_document(&self.path),
        }
    }

    // The in-memory copy is only replaced once the file is on disk. If the
    // write fails, the next access re-reads whatever the file still holds.
    fn persist(&mut self, document: KdlDocument) -> Result<(), AccountError> {
        write_document(&self.path, &document)
            .map_err(|e| AccountError::CredentialsWriteError(self.path.clone(), e))?;
        tracing::debug!("Wrote credentials to {}", self.path.display());
        self.document = OnceCell::from(document);
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<KdlDocument, AccountError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text.parse()?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(KdlDocument::new()),
        Err(e) => Err(AccountError::CredentialsReadError(path.to_owned(), e)),
    }
}

fn write_document(path: &Path, document: &KdlDocument) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    // Temp files are created owner-readable only, and rename keeps that.
    let mut tmpfile = NamedTempFile::new_in(dir)?;
    tmpfile.write_all(document.to_string().as_bytes())?;
    tmpfile.as_file().sync_all()?;
    tmpfile.persist(path).map_err(|e| e.error)?;
    Ok(())
}
