//! Opening calibration artifacts by file extension.

use std::path::Path;

use tsf_core::{Error, Result, TableProvider, TableSet};
use tsf_root::RootFile;

/// Open the table container at `path`.
///
/// `.root` files are read natively; `.json` files hold a serialized
/// [`TableSet`]. Any other extension is rejected.
pub fn open_artifact(path: &Path) -> Result<Box<dyn TableProvider>> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "root" => Ok(Box::new(RootFile::open(path)?)),
        "json" => {
            let text = std::fs::read_to_string(path)?;
            let set = TableSet::from_json_str(&text)?;
            log::debug!("read {} tables from {}", set.len(), path.display());
            Ok(Box::new(set))
        }
        _ => Err(Error::Artifact(format!(
            "unsupported calibration artifact '{}' (expected .root or .json)",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = open_artifact(Path::new("tauTriggerEfficiencies2017.txt")).err().expect("expected an error");
        assert!(matches!(err, Error::Artifact(ref m) if m.contains(".root or .json")), "{}", err);
    }

    #[test]
    fn missing_files_are_io_errors() {
        for p in ["/nonexistent/effs.root", "/nonexistent/effs.JSON"] {
            assert!(matches!(open_artifact(Path::new(p)), Err(Error::Io(_))), "{}", p);
        }
    }

    #[test]
    fn json_artifact_is_loaded() {
        let dir = std::env::temp_dir().join(format!("tsf-artifact-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("effs.json");
        std::fs::write(
            &path,
            r#"{"tables": {
                "eff": {"kind": "1d", "name": "eff", "edges": [20.0, 200.0], "values": [0.9]}
            }}"#,
        )
        .unwrap();

        let provider = open_artifact(&path).unwrap();
        assert!(provider.contains("eff"));
        assert_eq!(provider.table_1d("eff").unwrap().values(), &[0.9]);
        assert!(provider.describe().contains("1 tables"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
