//! Input file discovery and whole-file reads.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{AnalysisError, AnalysisResult};
use crate::stream::decode_lossy;

/// Expand command-line paths into the list of files to analyze.
///
/// Directories are walked recursively and every regular file beneath them
/// is included. Any other path is kept as given, so a missing file still
/// produces its own per-file error later on. The result is sorted and free
/// of duplicates.
#[tracing::instrument(skip(paths), fields(inputs = paths.len()))]
pub fn collect_files<P: AsRef<Utf8Path>>(paths: &[P]) -> Vec<Utf8PathBuf> {
    let mut files = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            files.insert(path.to_path_buf());
            continue;
        }

        for entry in WalkDir::new(path).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(%path, error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(file) => {
                    files.insert(file);
                }
                Err(raw) => warn!(path = %raw.display(), "skipping non-UTF-8 path"),
            }
        }
    }

    files.into_iter().collect()
}

/// Read a whole file as text, dropping invalid UTF-8 and folding `\r\n`
/// and bare `\r` line endings to `\n`.
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] when the file cannot be read.
pub fn read_text(path: &Utf8Path) -> AnalysisResult<String> {
    let bytes = std::fs::read(path).map_err(|e| AnalysisError::io(path, e))?;
    let text = decode_lossy(&bytes);
    if text.contains('\r') {
        return Ok(text.replace("\r\n", "\n").replace('\r', "\n"));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn walks_directories_recursively() {
        let tmp = TempDir::new().unwrap();
        let root = root(&tmp);
        fs::create_dir_all(root.join("part1/ch1")).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("part1/a.txt"), "a").unwrap();
        fs::write(root.join("part1/ch1/c.txt"), "c").unwrap();

        let files = collect_files(&[root.clone()]);
        assert_eq!(
            files,
            vec![root.join("b.txt"), root.join("part1/a.txt"), root.join("part1/ch1/c.txt")]
        );
    }

    #[test]
    fn missing_paths_are_kept() {
        let tmp = TempDir::new().unwrap();
        let missing = root(&tmp).join("missing.txt");
        assert_eq!(collect_files(&[missing.clone()]), vec![missing]);
    }

    #[test]
    fn duplicates_are_removed_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let root = root(&tmp);
        fs::write(root.join("z.txt"), "z").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();

        let files = collect_files(&[root.join("z.txt"), root.clone(), root.join("a.txt")]);
        assert_eq!(files, vec![root.join("a.txt"), root.join("z.txt")]);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(collect_files(&[root(&tmp)]).is_empty());
    }

    #[test]
    fn read_text_is_lossy() {
        let tmp = TempDir::new().unwrap();
        let path = root(&tmp).join("bad.txt");
        fs::write(&path, b"caf\xe9 ok").unwrap();
        assert_eq!(read_text(&path).unwrap(), "caf ok");
    }

    #[test]
    fn read_text_folds_crlf() {
        let tmp = TempDir::new().unwrap();
        let path = root(&tmp).join("dos.txt");
        fs::write(&path, "one.\r\ntwo.\rthree.\r").unwrap();
        assert_eq!(read_text(&path).unwrap(), "one.\ntwo.\nthree.\n");
    }

    #[test]
    fn read_text_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(read_text(&root(&tmp).join("nope.txt")).is_err());
    }
}
