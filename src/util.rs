/// Shared utility helpers.
pub mod fs {
    use std::fs;
    use std::io;

    use camino::Utf8Path;

    /// Ensure a directory exists, creating it recursively if needed.
    pub fn ensure_dir(path: &Utf8Path) -> io::Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    pub fn path_exists(path: &Utf8Path) -> bool {
        path.exists()
    }

    pub fn read_text(path: &Utf8Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Write the full content in one call. Callers compute the final text in
    /// memory first, so a failure here never leaves a half-rewritten file.
    pub fn write_text(path: &Utf8Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}
