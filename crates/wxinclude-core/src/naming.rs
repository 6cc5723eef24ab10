//! Identifier derivation from file paths.
//!
//! The identifier is the file's base name without its extension,
//! optionally lowercased and optionally suffixed with the extension.
//! No further sanitization happens: a file named `1-icon.png` yields
//! `1-icon`, which is not a valid C identifier.

use std::path::Path;

/// Derives the array identifier for a file
///
/// ```
/// use std::path::Path;
/// use wxinclude_core::derive_name;
///
/// assert_eq!(derive_name(Path::new("img/Logo.PNG"), false, true), "logo_png");
/// assert_eq!(derive_name(Path::new("img/Logo.PNG"), true, false), "Logo");
/// ```
pub fn derive_name(path: &Path, respect_case: bool, append_type: bool) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    compose_name(&stem, &extension_of(path), respect_case, append_type)
}

/// Builds an identifier from a base name and an extension
///
/// `extension` may carry its leading dot; it is stripped before joining.
pub fn compose_name(stem: &str, extension: &str, respect_case: bool, append_type: bool) -> String {
    let mut name = if append_type {
        format!("{}_{}", stem, extension.trim_start_matches('.'))
    } else {
        stem.to_string()
    };

    if !respect_case {
        name = name.to_lowercase();
    }

    name
}

/// Returns the extension of a path including its leading dot
///
/// Returns an empty string when the path has no extension.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(derive_name(Path::new("logo.png"), false, false), "logo");
        assert_eq!(derive_name(Path::new("dir/sub/logo.png"), false, false), "logo");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(derive_name(Path::new("MyImage.PNG"), false, false), "myimage");
        assert_eq!(derive_name(Path::new("MyImage.PNG"), true, false), "MyImage");
    }

    #[test]
    fn test_append_type() {
        assert_eq!(derive_name(Path::new("logo.png"), false, true), "logo_png");
        assert_eq!(derive_name(Path::new("Logo.PNG"), false, true), "logo_png");
        assert_eq!(derive_name(Path::new("Logo.PNG"), true, true), "Logo_PNG");
    }

    #[test]
    fn test_append_type_without_extension() {
        assert_eq!(derive_name(Path::new("README"), false, true), "readme_");
        assert_eq!(derive_name(Path::new("README"), false, false), "readme");
    }

    #[test]
    fn test_only_last_extension_is_stripped() {
        assert_eq!(derive_name(Path::new("data.tar.gz"), false, false), "data.tar");
        assert_eq!(derive_name(Path::new("data.tar.gz"), false, true), "data.tar_gz");
    }

    #[test]
    fn test_deterministic() {
        let path = Path::new("assets/Icon.Bmp");
        for respect_case in [false, true] {
            for append_type in [false, true] {
                assert_eq!(
                    derive_name(path, respect_case, append_type),
                    derive_name(path, respect_case, append_type)
                );
            }
        }
    }

    #[test]
    fn test_compose_name() {
        assert_eq!(compose_name("Logo", ".PNG", false, true), "logo_png");
        assert_eq!(compose_name("Logo", "PNG", true, true), "Logo_PNG");
        assert_eq!(compose_name("Logo", ".PNG", true, false), "Logo");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("a/logo.png")), ".png");
        assert_eq!(extension_of(Path::new("Makefile")), "");
        assert_eq!(extension_of(Path::new(".hidden")), "");
    }
}
