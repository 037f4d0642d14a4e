//! Line-by-line reading of text files.
//!
//! [`LineStream`] reads one line at a time so large books never need to be
//! held in memory whole. Bytes that are not valid UTF-8 are dropped rather
//! than failing the file, and each line is normalized before it is yielded.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{AnalysisError, AnalysisResult};
use crate::normalize::Normalization;

/// A lazy, single-pass sequence of normalized lines from one file.
///
/// Line terminators are kept, with `\r\n` and a bare `\r` both folded to
/// `\n`. To read the file again, open a new stream.
#[derive(Debug)]
pub struct LineStream {
    path: Utf8PathBuf,
    reader: BufReader<File>,
    normalization: Normalization,
    buf: Vec<u8>,
    skip_lf: bool,
}

impl LineStream {
    /// Open `path` for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Io`] when the file cannot be opened (missing,
    /// permission denied) or is a directory.
    pub fn open(path: &Utf8Path, normalization: Normalization) -> AnalysisResult<Self> {
        let file = File::open(path.as_std_path()).map_err(|e| AnalysisError::io(path, e))?;
        let metadata = file.metadata().map_err(|e| AnalysisError::io(path, e))?;
        if metadata.is_dir() {
            return Err(AnalysisError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::IsADirectory, "is a directory"),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            normalization,
            buf: Vec::with_capacity(256),
            skip_lf: false,
        })
    }

    /// Read one line into `buf`, ending it with `\n` whatever the terminator.
    /// Returns 0 at end of file.
    fn read_line(&mut self) -> std::io::Result<usize> {
        let mut read = 0;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(read);
            }
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    self.skip_lf = available[i] == b'\r';
                    self.buf.extend_from_slice(&available[..i]);
                    self.buf.push(b'\n');
                    self.reader.consume(i + 1);
                    return Ok(read + i + 1);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                    read += len;
                }
            }
        }
    }
}

impl Iterator for LineStream {
    type Item = AnalysisResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.read_line() {
            Ok(0) => None,
            Ok(_) => {
                let line = decode_lossy(&self.buf);
                Some(Ok(self.normalization.apply(&line).into_owned()))
            }
            Err(e) => Some(Err(AnalysisError::io(self.path.clone(), e))),
        }
    }
}

/// Open a file as a stream of normalized lines. See [`LineStream`].
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] when the file cannot be opened.
pub fn stream_lines(path: &Utf8Path, normalization: Normalization) -> AnalysisResult<LineStream> {
    LineStream::open(path, normalization)
}

/// Decode UTF-8, skipping invalid byte sequences instead of replacing them.
pub(crate) fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizationForm;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().join(name)).unwrap()
    }

    #[test]
    fn yields_one_chunk_per_line() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "book.txt");
        fs::write(&path, "first\nsecond\nthird").unwrap();

        let lines: Vec<String> = stream_lines(&path, Normalization::default())
            .unwrap()
            .collect::<AnalysisResult<_>>()
            .unwrap();
        assert_eq!(lines, vec!["first\n", "second\n", "third"]);
    }

    #[test]
    fn normalizes_each_line() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "u.txt");
        fs::write(&path, "Café\nüber").unwrap();

        let normalization = Normalization::new(NormalizationForm::Nfkd, true);
        let lines: Vec<String> = stream_lines(&path, normalization)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines[0].trim(), "Cafe");
        assert_eq!(lines[1].trim(), "uber");
    }

    #[test]
    fn invalid_utf8_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "bad.txt");
        fs::write(&path, b"ab\xff\xfecd\n").unwrap();

        let lines: Vec<String> = stream_lines(&path, Normalization::default())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["abcd\n"]);
    }

    #[test]
    fn crlf_is_folded() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "dos.txt");
        fs::write(&path, "one\r\ntwo\r\n").unwrap();

        let lines: Vec<String> = stream_lines(&path, Normalization::default())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["one\n", "two\n"]);
    }

    #[test]
    fn bare_cr_ends_a_line() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "mac.txt");
        fs::write(&path, "one\rtwo\r\rthree\r\nfour").unwrap();

        let lines: Vec<String> = stream_lines(&path, Normalization::default())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["one\n", "two\n", "\n", "three\n", "four"]);
    }

    #[test]
    fn cr_split_across_reads_is_one_terminator() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "split.txt");
        let mut contents = "a".repeat(8191);
        contents.push_str("\r\nb\n");
        fs::write(&path, &contents).unwrap();

        let lines: Vec<String> = stream_lines(&path, Normalization::default())
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("a\n"));
        assert_eq!(lines[1], "b\n");
    }

    #[test]
    fn missing_file_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_path(&tmp, "nope.txt");
        let err = stream_lines(&path, Normalization::default()).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn directory_errors() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert!(stream_lines(&path, Normalization::default()).is_err());
    }

    #[test]
    fn decode_lossy_keeps_valid_text() {
        assert_eq!(decode_lossy("naïve".as_bytes()), "naïve");
    }
}
