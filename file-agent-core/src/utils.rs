//! Small helpers shared by the file operations and the terminal front end.

use std::path::Path;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable byte count, base 1024 with one decimal (`1536 -> "1.5 KB"`)
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} {}", SIZE_UNITS[SIZE_UNITS.len() - 1])
}

/// Language hint for syntax highlighting, derived from the file extension
pub fn language_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("py") => "python",
        Some("js") => "javascript",
        Some("ts") => "typescript",
        Some("html") => "html",
        Some("css") => "css",
        Some("json") => "json",
        Some("md") => "markdown",
        Some("yaml") | Some("yml") => "yaml",
        Some("toml") => "toml",
        Some("sh") => "bash",
        Some("rs") => "rust",
        Some("go") => "go",
        Some("java") => "java",
        Some("cpp") => "cpp",
        Some("c") => "c",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes_with_binary_units() {
        assert_eq!(format_file_size(0), "0.0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1.0 MB");
        assert_eq!(format_file_size(1_073_741_824), "1.0 GB");
        assert_eq!(format_file_size(1_099_511_627_776), "1.0 TB");
        assert_eq!(format_file_size(2 * 1_125_899_906_842_624), "2048.0 TB");
    }

    #[test]
    fn maps_known_extensions() {
        assert_eq!(language_for_path(Path::new("main.rs")), "rust");
        assert_eq!(language_for_path(Path::new("config.yml")), "yaml");
        assert_eq!(language_for_path(Path::new("README.MD")), "markdown");
        assert_eq!(language_for_path(Path::new("script.sh")), "bash");
        assert_eq!(language_for_path(Path::new("notes")), "text");
        assert_eq!(language_for_path(Path::new("archive.tar.gz")), "text");
    }
}
