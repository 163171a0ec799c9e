use std::path::Path;

/// Path shown to the user: relative to the search root when possible.
pub fn display_path(root: &Path, file: &Path) -> String {
    if root.is_file() {
        return file.display().to_string();
    }
    file.strip_prefix(root)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(file)
        .display()
        .to_string()
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}
