#[cfg(test)]
mod tests {
    use crate::security::FilenameSanitizer;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(FilenameSanitizer::sanitize("Initial Options"), "Initial Options");
    }

    #[test]
    fn test_each_reserved_character_replaced() {
        let result = FilenameSanitizer::sanitize(r#"a<b>c:d"e/f\g|h?i*j"#);
        assert_eq!(result, "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_traversal_flattened() {
        let result = FilenameSanitizer::sanitize("../../etc/passwd");
        assert!(!result.contains('/'));
        assert_eq!(result, ".._.._etc_passwd");
    }

    #[test]
    fn test_windows_separator_replaced() {
        assert_eq!(FilenameSanitizer::sanitize(r"C:\temp\x"), "C__temp_x");
    }

    #[test]
    fn test_unicode_kept() {
        assert_eq!(FilenameSanitizer::sanitize("Prüfprofil ü"), "Prüfprofil ü");
    }

    #[test]
    fn test_profile_file_name() {
        assert_eq!(
            FilenameSanitizer::profile_file_name("104", "PCI: Full/Auth"),
            "profile_104_PCI_ Full_Auth.xml"
        );
    }

    #[test]
    fn test_sanitized_names_have_no_reserved_chars() {
        for raw in ["a:b", "x/y\\z", "what?", "<tag>", "a|b*c\"d"] {
            let sanitized = FilenameSanitizer::sanitize(raw);
            assert!(
                !sanitized.contains(['<', '>', ':', '"', '/', '\\', '|', '?', '*']),
                "{} -> {}",
                raw,
                sanitized
            );
        }
    }
}
