// Copyright (C) 2026 Access Card Contributors
// SPDX-License-Identifier: LGPL-3.0-only

//! Where the card gets its credential from.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{constants::CARD_FILE, Credential, Error};

/// Source of the credential used to answer a broadcast.
///
/// Called once for every broadcast frame, implementations must return the credential as it is
/// currently stored.
pub trait CredentialStore {
    fn load(&mut self) -> Result<Credential, Error>;
}

impl<F> CredentialStore for F
where
    F: FnMut() -> Result<Credential, Error>,
{
    fn load(&mut self) -> Result<Credential, Error> {
        self()
    }
}

/// Directory of named card resources.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Store reading the default credential resource.
    pub fn card_file(&self) -> FileStore {
        FileStore::new(self.path(CARD_FILE))
    }

    /// Caching store on the default credential resource.
    pub fn cached_card_file(&self) -> CachedStore {
        CachedStore::new(self.path(CARD_FILE))
    }
}

fn resource_name(path: &Path) -> String {
    path.display().to_string()
}

/// Reads the first line of a resource, without its line terminator.
pub fn load_resource(path: &Path) -> Result<String, Error> {
    let name = resource_name(path);
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::ResourceNotFound(name.clone()),
        _ => Error::ResourceIo {
            name: name.clone(),
            reason: err.to_string(),
        },
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|err| Error::ResourceIo {
            name: name.clone(),
            reason: err.to_string(),
        })?;

    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(Error::ResourceEmpty(name));
    }
    Ok(line.to_owned())
}

/// Reads and decodes the resource on every load.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn load(&mut self) -> Result<Credential, Error> {
        debug!("loading credential from {}", self.path.display());
        Credential::decode(&load_resource(&self.path)?)
    }
}

// Files changed more recently than this may be rewritten within the same timestamp tick.
const RACY_WINDOW: Duration = Duration::from_secs(1);

/// Identity of one version of a resource file.
///
/// On unix the inode and change time are part of it. Rewriting a file always updates its change
/// time, even when the modification time is restored afterwards. Elsewhere a rewrite keeping the
/// length and restoring the modification time goes unnoticed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Marker {
    modified: SystemTime,
    len: u64,
    #[cfg(unix)]
    inode: u64,
    #[cfg(unix)]
    changed: (i64, i64),
}

impl Marker {
    fn of(path: &Path) -> Option<Self> {
        #[cfg(unix)]
        use std::os::unix::fs::MetadataExt;

        let metadata = std::fs::metadata(path).ok()?;
        Some(Self {
            modified: metadata.modified().ok()?,
            len: metadata.len(),
            #[cfg(unix)]
            inode: metadata.ino(),
            #[cfg(unix)]
            changed: (metadata.ctime(), metadata.ctime_nsec()),
        })
    }

    fn last_change(&self) -> SystemTime {
        #[cfg(unix)]
        {
            let (secs, nanos) = self.changed;
            if let (Ok(secs), Ok(nanos)) = (u64::try_from(secs), u32::try_from(nanos)) {
                return UNIX_EPOCH + Duration::new(secs, nanos);
            }
        }
        self.modified
    }

    /// Too recent a change and the marker may not change with the next write.
    fn is_settled(&self) -> bool {
        SystemTime::now()
            .duration_since(self.last_change())
            .map_or(false, |age| age >= RACY_WINDOW)
    }
}

/// Keeps the last credential until the resource file changes.
///
/// Resources without readable metadata, or changed less than a second ago, are re-read on
/// every load.
#[derive(Debug)]
pub struct CachedStore {
    inner: FileStore,
    cached: Option<(Marker, Credential)>,
}

impl CachedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: FileStore::new(path),
            cached: None,
        }
    }

    /// Drops the cached credential, the next load reads the resource.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl CredentialStore for CachedStore {
    fn load(&mut self) -> Result<Credential, Error> {
        let marker = Marker::of(self.inner.path());
        if let (Some(marker), Some((cached_marker, credential))) = (marker, &self.cached) {
            if marker == *cached_marker {
                return Ok(credential.clone());
            }
        }

        // a failed reload must not leave a stale credential behind
        self.cached = None;
        let credential = self.inner.load()?;
        if let Some(marker) = marker.filter(Marker::is_settled) {
            self.cached = Some((marker, credential.clone()));
        }
        Ok(credential)
    }
}

/// Credential line held in memory, decoded on every load.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InlineStore {
    line: String,
}

impl InlineStore {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

impl CredentialStore for InlineStore {
    fn load(&mut self) -> Result<Credential, Error> {
        if self.line.trim().is_empty() {
            return Err(Error::ResourceEmpty("inline".into()));
        }
        Credential::decode(&self.line)
    }
}
