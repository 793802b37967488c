//! Reading input lines and writing results.
//!
//! Lines keep their terminators (`\n` or `\r\n`) so that writing the kept
//! lines back reproduces the original layout byte for byte. A final line
//! without a terminator stays unterminated.
//!
//! # Example
//!
//! ```
//! use linedupe::io::split_lines;
//!
//! let lines = split_lines("one\r\ntwo\nthree");
//! assert_eq!(lines, vec!["one\r\n", "two\n", "three"]);
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DedupError;
use crate::report::ReportFormat;

/// Split text into lines, keeping each line's terminator.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Read a UTF-8 text file into lines.
///
/// # Errors
///
/// - `DedupError::Io` if the file cannot be read
/// - `DedupError::Decode` if the content is not valid UTF-8
pub fn read_lines(path: &Path) -> Result<Vec<String>, DedupError> {
    let bytes = fs::read(path).map_err(|e| DedupError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| DedupError::Decode {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })?;
    Ok(split_lines(&text))
}

/// Write lines verbatim, in order.
///
/// # Errors
///
/// Returns `DedupError::Io` if the file cannot be created or written.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), DedupError> {
    let file = File::create(path).map_err(|e| DedupError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer
            .write_all(line.as_ref().as_bytes())
            .map_err(|e| DedupError::io(path, e))?;
    }
    writer.flush().map_err(|e| DedupError::io(path, e))
}

/// Write a rendered report.
///
/// # Errors
///
/// Returns `DedupError::Io` if the file cannot be written.
pub fn write_report(path: &Path, report: &str) -> Result<(), DedupError> {
    fs::write(path, report).map_err(|e| DedupError::io(path, e))
}

/// Create a directory and its parents if missing.
///
/// # Errors
///
/// Returns `DedupError::Io` if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), DedupError> {
    fs::create_dir_all(dir).map_err(|e| DedupError::io(dir, e))
}

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// File to deduplicate
    pub input: PathBuf,
    /// Deduplicated copy
    pub deduplicated: PathBuf,
    /// Duplicates report
    pub report: PathBuf,
}

impl RunPaths {
    /// Resolve run paths from a file name and the configured folders.
    ///
    /// `filename` is looked up inside `input_dir` unless it already names an
    /// existing file. Outputs are named after the input:
    /// `{stem}_deduplicated{.ext}` and `{stem}_duplicates_report.{txt|json|csv}`.
    ///
    /// # Example
    ///
    /// ```
    /// use linedupe::io::RunPaths;
    /// use linedupe::report::ReportFormat;
    /// use std::path::{Path, PathBuf};
    ///
    /// let paths = RunPaths::resolve("_chat.txt", Path::new("input"), Path::new("output"), ReportFormat::Text);
    /// assert_eq!(paths.input, PathBuf::from("input/_chat.txt"));
    /// assert_eq!(paths.deduplicated, PathBuf::from("output/_chat_deduplicated.txt"));
    /// assert_eq!(paths.report, PathBuf::from("output/_chat_duplicates_report.txt"));
    /// ```
    #[must_use]
    pub fn resolve(
        filename: &str,
        input_dir: &Path,
        output_dir: &Path,
        format: ReportFormat,
    ) -> Self {
        let given = Path::new(filename);
        let input = if given.is_file() && !input_dir.join(given).is_file() {
            given.to_path_buf()
        } else {
            input_dir.join(given)
        };

        let stem = given
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.to_string());
        let extension = given
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self {
            input,
            deduplicated: output_dir.join(format!("{stem}_deduplicated{extension}")),
            report: output_dir.join(format!(
                "{stem}_duplicates_report.{}",
                format.extension()
            )),
        }
    }
}
