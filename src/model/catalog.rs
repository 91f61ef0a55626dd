//! Catalog types: what a bucket listing resolves to

/// What kind of node a catalog entry is.
///
/// Files carry their signed URL so a file without a URL (or a folder with
/// one) cannot be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File { url: String },
}

/// One row of a listing: a sub-folder or a playable file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: EntryKind,
    /// Full storage path; for folders this is the sub-prefix to descend into.
    pub key: String,
    pub title: String,
}

impl CatalogEntry {
    pub fn folder(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Folder,
            key: key.into(),
            title: title.into(),
        }
    }

    pub fn file(key: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File { url: url.into() },
            key: key.into(),
            title: title.into(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { url } => Some(url),
            EntryKind::Folder => None,
        }
    }

    /// The playable track behind this entry, `None` for folders.
    pub fn track(&self) -> Option<Track> {
        self.url().map(|url| Track {
            key: self.key.clone(),
            url: url.to_string(),
            title: self.title.clone(),
        })
    }
}

/// A file entry selected for playback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub key: String,
    pub url: String,
    pub title: String,
}

/// A file that was left out of a listing because its URL could not be signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningFailure {
    pub key: String,
    pub reason: String,
}

/// Result of resolving one prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// The decoded prefix that was listed.
    pub prefix: String,
    /// Folders first, then files, each in store order.
    pub entries: Vec<CatalogEntry>,
    pub signing_failures: Vec<SigningFailure>,
}

impl Listing {
    pub fn folders(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| e.is_folder())
    }

    pub fn files(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| !e.is_folder())
    }
}
