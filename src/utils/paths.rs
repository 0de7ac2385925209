use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;

const DEFAULT_DIR_NAME: &str = ".debt_core";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application-specific data directory, defaulting to `~/.debt_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("DEBT_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` through a temporary sibling file, then renames into place.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_leaves_no_tmp_file() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("data.json");
        write_atomic(&target, "{}").expect("write");
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
        assert!(!tmp_path(&target).exists());
    }

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        let path = Path::new("/tmp/debts.json");
        assert_eq!(tmp_path(path), Path::new("/tmp/debts.json.tmp"));
    }
}
