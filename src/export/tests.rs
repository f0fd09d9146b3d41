#[cfg(test)]
mod tests {
    use crate::export::*;
    use crate::parser::{AssetSet, OptionProfile};
    use tempfile::TempDir;

    fn sample_assets() -> AssetSet {
        AssetSet {
            dns: vec!["web1.example.com".to_string()],
            domains: vec!["example.com".to_string()],
            ips: vec!["10.0.0.1".to_string(), "10.0.1.1-10.0.1.5".to_string()],
        }
    }

    fn profile(id: &str, name: &str) -> OptionProfile {
        OptionProfile {
            id: id.to_string(),
            name: name.to_string(),
            xml: format!("<OPTION_PROFILE><BASIC_INFO><ID>{}</ID></BASIC_INFO></OPTION_PROFILE>", id),
        }
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        let rows = write_assets_csv(&sample_assets(), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 4);
        assert_eq!(
            lines,
            vec![
                "Type,Value",
                "DNS,web1.example.com",
                "Domain,example.com",
                "IP,10.0.0.1",
                "IP,10.0.1.1-10.0.1.5",
            ]
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let assets = AssetSet {
            dns: vec!["odd,name".to_string()],
            ..AssetSet::default()
        };
        let mut buf = Vec::new();
        write_assets_csv(&assets, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().any(|l| l == "DNS,\"odd,name\""));
    }

    #[test]
    fn test_csv_empty_set_has_header_only() {
        let mut buf = Vec::new();
        let rows = write_assets_csv(&AssetSet::default(), &mut buf).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(buf).unwrap().trim_end(), "Type,Value");
    }

    #[test]
    fn test_save_assets_csv_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets.csv");

        let rows = save_assets_csv(&sample_assets(), &path).unwrap();
        assert_eq!(rows, 4);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Type,Value"));
    }

    #[test]
    fn test_save_assets_csv_bad_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("assets.csv");

        let err = save_assets_csv(&sample_assets(), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }

    #[test]
    fn test_profile_writer_creates_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("scan_profiles");
        let writer = ProfileWriter::new(&out);

        writer.ensure_dir().unwrap();
        assert!(out.is_dir());

        // Second call is a no-op
        writer.ensure_dir().unwrap();
    }

    #[test]
    fn test_profile_writer_saves_sanitized_name() {
        let dir = TempDir::new().unwrap();
        let writer = ProfileWriter::new(dir.path());
        let profile = profile("104", "PCI: Full/Auth");

        let path = writer.save(&profile).unwrap();

        assert_eq!(path, dir.path().join("profile_104_PCI_ Full_Auth.xml"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), profile.xml);
    }

    #[test]
    fn test_profile_writer_stays_in_output_dir() {
        let dir = TempDir::new().unwrap();
        let writer = ProfileWriter::new(dir.path());

        let path = writer.path_for(&profile("1", "../../escape"));
        assert_eq!(path.parent().unwrap(), dir.path());
    }

    #[test]
    fn test_profile_writer_missing_dir_errors() {
        let dir = TempDir::new().unwrap();
        let writer = ProfileWriter::new(dir.path().join("not-created"));

        let err = writer.save(&profile("1", "x")).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
