//! File I/O utilities: stdin prompts, pack files and report directories.
//!
//! Functions return `Result` types with plain `String` messages so commands
//! can wrap them in the error variant that fits their context.

use std::io::BufRead;
use std::path::Path;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Trims surrounding whitespace and returns `None` on EOF or read errors.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use fourfold_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Read a text file, stripping a leading UTF-8 BOM if present.
pub fn read_text(path: &Path) -> Result<String, String> {
    let mut content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

/// Create `dir` if needed and delete report files left there by an earlier
/// game (`player<n>_output.txt`, `deck<n>_output.txt`). Other files are left
/// alone. Returns how many files were removed.
pub fn prepare_report_dir(dir: &Path) -> Result<usize, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    let entries = std::fs::read_dir(dir).map_err(|e| e.to_string())?;
    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| e.to_string())?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_report_file(name) {
            std::fs::remove_file(entry.path())
                .map_err(|e| format!("Failed to remove {}: {}", entry.path().display(), e))?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn is_report_file(name: &str) -> bool {
    ["player", "deck"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix("_output.txt"))
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    })
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
