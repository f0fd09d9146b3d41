use super::ExportError;
use crate::parser::OptionProfile;
use crate::security::FilenameSanitizer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes option profiles one file per profile into a directory
pub struct ProfileWriter {
    output_dir: PathBuf,
}

impl ProfileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<(), ExportError> {
        if self.output_dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;
        info!(dir = %self.output_dir.display(), "Created output directory");
        Ok(())
    }

    pub fn path_for(&self, profile: &OptionProfile) -> PathBuf {
        self.output_dir
            .join(FilenameSanitizer::profile_file_name(&profile.id, &profile.name))
    }

    /// Save one profile's XML, overwriting an earlier export of it
    pub fn save(&self, profile: &OptionProfile) -> Result<PathBuf, ExportError> {
        let path = self.path_for(profile);
        fs::write(&path, profile.xml.as_bytes()).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
