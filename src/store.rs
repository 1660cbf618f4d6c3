use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: String,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Filesystem capability used by the pipeline.
///
/// `commit` writes a batch of files as one step: implementations must not
/// touch any target unless every file in the batch could be prepared.
pub trait FileStore: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn commit(&self, files: &[OutputFile]) -> io::Result<()>;
}

/// Local disk store. Each file is staged next to its target and renamed into
/// place once the whole batch has been staged.
#[derive(Debug, Clone, Default)]
pub struct FsStore;

impl FileStore for FsStore {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn commit(&self, files: &[OutputFile]) -> io::Result<()> {
        let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
        for file in files {
            match stage(file) {
                Ok(tmp) => staged.push((tmp, file.path.as_path())),
                Err(err) => {
                    for (tmp, _) in &staged {
                        let _ = fs::remove_file(tmp);
                    }
                    return Err(err);
                }
            }
        }

        // Renames are not atomic as a group; a failure here can leave
        // earlier targets already replaced.
        for (idx, (tmp, target)) in staged.iter().enumerate() {
            if let Err(err) = fs::rename(tmp, target) {
                for (rest, _) in &staged[idx..] {
                    let _ = fs::remove_file(rest);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

fn stage(file: &OutputFile) -> io::Result<PathBuf> {
    if let Some(parent) = file.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = staging_path(&file.path);
    fs::write(&tmp, &file.contents)?;
    Ok(tmp)
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    target.with_file_name(format!(".{name}.tmp-{}", std::process::id()))
}

#[cfg(test)]
pub use memory::MemoryStore;
