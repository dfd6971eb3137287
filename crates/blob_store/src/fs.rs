//! Filesystem capability consumed by the store walker.
//!
//! The walker never touches `std::fs` directly. Everything it needs from
//! the outside world is expressed by [`BlobFs`]: list a directory, open a
//! file, read a few bytes at a known offset. Production code injects
//! [`OsFs`]; tests inject an in-memory double that records its invocations.

use std::{fs, io, path::Path};

/// Read-only filesystem access for the blob store.
///
/// Implementations must tolerate concurrent read calls from independent
/// walks; the walker itself only ever issues reads.
pub trait BlobFs {
    /// Positional-read handle produced by [`open`](BlobFs::open).
    type File: FileReadAt;

    /// Open the file at `path` for positional reads.
    fn open(&self, path: &Path) -> io::Result<Self::File>;

    /// Snapshot the entry names of the directory at `path`.
    ///
    /// No ordering is guaranteed; callers treat the returned order as
    /// unspecified but stable for the lifetime of the snapshot.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// A file handle supporting reads at absolute offsets.
///
/// Handles close deterministically when dropped.
pub trait FileReadAt {
    /// Fill `buf` with the bytes starting at `offset`, failing if the file
    /// ends before the buffer is full.
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()>;
}

/// The operating-system filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFs;

impl BlobFs for OsFs {
    type File = fs::File;

    fn open(&self, path: &Path) -> io::Result<fs::File> {
        fs::File::open(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

impl FileReadAt for fs::File {
    #[cfg(unix)]
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        std::os::unix::fs::FileExt::read_exact_at(self, buf, offset)
    }

    #[cfg(not(unix))]
    fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        use std::io::{Read, Seek, SeekFrom};

        let mut file = self;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)
    }
}

#[cfg(test)]
pub(crate) mod mem {
    //! In-memory filesystem double that records capability invocations.

    use std::{
        cell::Cell,
        collections::{BTreeMap, BTreeSet},
        io,
        path::{Path, PathBuf},
        rc::Rc,
    };

    use super::{BlobFs, FileReadAt};

    /// Test double backed by path-keyed byte vectors.
    ///
    /// `opens` and `reads` count capability invocations so tests can assert
    /// how often the walker actually touched file contents.
    #[derive(Default)]
    pub(crate) struct MemFs {
        files: BTreeMap<PathBuf, Rc<Vec<u8>>>,
        dirs: BTreeSet<PathBuf>,
        pub(crate) opens: Cell<usize>,
        pub(crate) reads: Rc<Cell<usize>>,
    }

    impl MemFs {
        pub(crate) fn add_dir(&mut self, path: impl AsRef<Path>) {
            let mut cur = path.as_ref().to_path_buf();
            loop {
                self.dirs.insert(cur.clone());
                match cur.parent() {
                    Some(parent) => cur = parent.to_path_buf(),
                    None => break,
                }
            }
        }

        pub(crate) fn add_file(&mut self, path: impl AsRef<Path>, bytes: Vec<u8>) {
            let path = path.as_ref().to_path_buf();
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.files.insert(path, Rc::new(bytes));
        }
    }

    impl BlobFs for MemFs {
        type File = MemFile;

        fn open(&self, path: &Path) -> io::Result<MemFile> {
            self.opens.set(self.opens.get() + 1);
            let data = self.files.get(path).cloned().ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no file {}", path.display()))
            })?;
            Ok(MemFile { data, reads: Rc::clone(&self.reads) })
        }

        fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
            if !self.dirs.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no directory {}", path.display()),
                ));
            }
            let mut names = BTreeSet::new();
            for child in self.files.keys().chain(self.dirs.iter()) {
                if let Ok(rest) = child.strip_prefix(path) {
                    if let Some(first) = rest.components().next() {
                        names.insert(first.as_os_str().to_string_lossy().into_owned());
                    }
                }
            }
            Ok(names.into_iter().collect())
        }
    }

    pub(crate) struct MemFile {
        data: Rc<Vec<u8>>,
        reads: Rc<Cell<usize>>,
    }

    impl FileReadAt for MemFile {
        fn read_exact_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
            self.reads.set(self.reads.get() + 1);
            let start = usize::try_from(offset).map_err(|_| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "offset beyond file end")
            })?;
            let end = start
                .checked_add(buf.len())
                .filter(|end| *end <= self.data.len())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::UnexpectedEof, "read past end of file")
                })?;
            buf.copy_from_slice(&self.data[start..end]);
            Ok(())
        }
    }
}
