use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that are invalid in file names on at least one platform
static RESERVED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("reserved character pattern is valid"));

pub struct FilenameSanitizer;

impl FilenameSanitizer {
    /// Replace reserved characters with `_` so that server-supplied names
    /// (profile titles) cannot escape the output directory or fail to save.
    ///
    /// Path separators are among the replaced characters, so the result is
    /// always a single path component.
    pub fn sanitize(name: &str) -> String {
        RESERVED.replace_all(name, "_").into_owned()
    }

    /// File name for an exported option profile
    pub fn profile_file_name(id: &str, name: &str) -> String {
        Self::sanitize(&format!("profile_{}_{}.xml", id, name))
    }
}
