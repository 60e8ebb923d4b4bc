/// Maximum file name length in bytes (Linux NAME_MAX)
const MAX_NAME_BYTES: usize = 255;

/// Sanitizes a candidate file or folder name for safe use on disk
///
/// Section labels come straight from link text and remote file names come
/// straight from URL paths, so neither can be trusted as a path component.
///
/// # Arguments
///
/// * `name` - The raw name, e.g. a navigation label or a URL path segment
///
/// # Returns
///
/// * A name with separators, control characters, and whitespace replaced by
///   underscores, consecutive underscores collapsed, surrounding dots and
///   underscores trimmed, and the result capped at 255 bytes. May be empty
///   if the input had nothing usable.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else if c.is_whitespace() {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '\t' || c == '.' || c == '_');

    if trimmed.len() > MAX_NAME_BYTES {
        let mut take = MAX_NAME_BYTES;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_slashes() {
        assert_eq!(sanitize_file_name("a/b\\c.jpg"), "a_b_c.jpg");
    }

    #[test]
    fn test_trims_dots_and_spaces() {
        assert_eq!(sanitize_file_name("  ..  bild.png  ..  "), "bild.png");
    }

    #[test]
    fn test_collapses_underscores() {
        assert_eq!(sanitize_file_name("Unsere   Produkte"), "Unsere_Produkte");
        assert_eq!(sanitize_file_name("foto___galerie"), "foto_galerie");
    }

    #[test]
    fn test_control_chars() {
        assert_eq!(sanitize_file_name("bild\x00name.jpg"), "bild_name.jpg");
    }

    #[test]
    fn test_empty_after_sanitizing() {
        assert_eq!(sanitize_file_name("  .. "), "");
        assert_eq!(sanitize_file_name(""), "");
    }

    #[test]
    fn test_keeps_umlauts() {
        assert_eq!(sanitize_file_name("Über uns"), "Über_uns");
    }

    #[test]
    fn test_truncates_long_names() {
        let long = "a".repeat(400);
        assert_eq!(sanitize_file_name(&long).len(), 255);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'ä' is two bytes in UTF-8; 128 of them is 256 bytes
        let long = "ä".repeat(128);
        let result = sanitize_file_name(&long);
        assert!(result.len() <= 255);
        assert_eq!(result, "ä".repeat(127));
    }
}
