//! Runs a parsed plan against a save-file codec.

use std::path::{Component, Path, PathBuf};

use dgf_strip_core::{FileMapping, ParseResult};
use tracing::{debug, info};

use crate::codec::SaveCodec;
use crate::error::FileError;

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in plan order.
    pub written: Vec<PathBuf>,
    /// Files that could not be processed.
    pub failures: Vec<FileError>,
}

impl BatchReport {
    /// Returns `true` if any file failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Processes every file of `plan` in order.
///
/// Relative paths are resolved against `base_dir`. A failing file is
/// recorded and the batch moves on.
pub fn execute(plan: &ParseResult, codec: &dyn SaveCodec, base_dir: &Path) -> BatchReport {
    let mut report = BatchReport::default();

    for mapping in &plan.files {
        match process_file(plan, mapping, codec, base_dir) {
            Ok(output) => report.written.push(output),
            Err(err) => {
                debug!(input = %mapping.input, error = %err, "File failed");
                report.failures.push(err);
            }
        }
    }

    report
}

fn process_file(
    plan: &ParseResult,
    mapping: &FileMapping,
    codec: &dyn SaveCodec,
    base_dir: &Path,
) -> Result<PathBuf, FileError> {
    let input = absolutize(base_dir, Path::new(&mapping.input));
    if !input.is_file() {
        return Err(FileError::MissingInput(input));
    }

    info!("Opening file \"{}\"...", input.display());
    let mut document = codec.open(&input).map_err(|source| FileError::Open {
        path: input.clone(),
        source,
    })?;
    document.clear_credential_fields();

    let output = absolutize(base_dir, &plan.resolved_output(mapping));
    if let Some(parent) = output.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| FileError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
            info!("Created directory \"{}\".", parent.display());
        }
    }

    document.save(&output).map_err(|source| FileError::Save {
        path: output.clone(),
        source,
    })?;
    info!("Created file \"{}\".", output.display());

    Ok(output)
}

/// Makes `path` absolute against `base` and folds `.` and `..` lexically.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::codec::{JsonSaveCodec, SaveDocument};
    use crate::error::CodecError;

    /// Records which paths were opened and saved without touching content.
    #[derive(Default)]
    struct FakeCodec {
        saved: Rc<RefCell<Vec<PathBuf>>>,
        fail_open: Option<&'static str>,
    }

    struct FakeDocument {
        cleared: bool,
        saved: Rc<RefCell<Vec<PathBuf>>>,
    }

    impl SaveCodec for FakeCodec {
        fn open(&self, path: &Path) -> Result<Box<dyn SaveDocument>, CodecError> {
            if self
                .fail_open
                .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
            {
                return Err(CodecError::NotAnObject);
            }
            Ok(Box::new(FakeDocument {
                cleared: false,
                saved: Rc::clone(&self.saved),
            }))
        }
    }

    impl SaveDocument for FakeDocument {
        fn clear_credential_fields(&mut self) {
            self.cleared = true;
        }

        fn save(&self, path: &Path) -> Result<(), CodecError> {
            assert!(self.cleared, "credentials must be cleared before saving");
            std::fs::write(path, b"saved")?;
            self.saved.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"{}").unwrap();
    }

    #[test]
    fn test_execute_writes_to_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.sav");
        touch(dir.path(), "b.sav");
        let plan = dgf_strip_core::parse(["a.sav", "-o", "renamed.sav", "b.sav", "-od", "out/nested"]);

        let codec = FakeCodec::default();
        let report = execute(&plan, &codec, dir.path());

        assert!(!report.has_failures());
        let expected = vec![
            dir.path().join("out/nested/renamed.sav"),
            dir.path().join("out/nested/b.sav"),
        ];
        assert_eq!(report.written, expected);
        assert_eq!(*codec.saved.borrow(), expected);
        assert!(expected.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_execute_continues_after_failures() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "broken.sav");
        touch(dir.path(), "good.sav");
        let plan = dgf_strip_core::parse(["missing.sav", "broken.sav", "good.sav", "-od", "out"]);

        let codec = FakeCodec {
            fail_open: Some("broken.sav"),
            ..Default::default()
        };
        let report = execute(&plan, &codec, dir.path());

        assert_eq!(report.written, vec![dir.path().join("out/good.sav")]);
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0], FileError::MissingInput(_)));
        assert!(matches!(report.failures[1], FileError::Open { .. }));
        assert!(report.failures[0].to_string().contains("does not exist"));
    }

    #[test]
    fn test_execute_absolute_output_ignores_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.sav");
        let target = dir.path().join("elsewhere/x.sav");
        let target_str = target.to_str().unwrap();
        let plan = dgf_strip_core::parse(["a.sav", "-o", target_str, "-od", "out"]);

        let report = execute(&plan, &FakeCodec::default(), dir.path());

        assert!(!report.has_failures());
        assert_eq!(report.written, vec![target.clone()]);
        assert!(target.is_file());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_execute_in_place_without_overrides() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.sav");
        let plan = dgf_strip_core::parse(["a.sav"]);

        let report = execute(&plan, &FakeCodec::default(), dir.path());
        assert_eq!(report.written, vec![dir.path().join("a.sav")]);
    }

    #[test]
    fn test_execute_with_json_codec() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("garden.json"),
            r#"{"EncryptedPlayPassword":"secret","Plants":3}"#,
        )
        .unwrap();
        let plan = dgf_strip_core::parse(["garden.json", "-od", "clean"]);

        let report = execute(&plan, &JsonSaveCodec, dir.path());
        assert!(!report.has_failures());

        let raw = std::fs::read_to_string(dir.path().join("clean/garden.json")).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved["EncryptedPlayPassword"], serde_json::Value::Null);
        assert_eq!(saved["Plants"], 3);
    }

    #[test]
    fn test_absolutize_folds_dots() {
        let base = Path::new("/work/saves");
        assert_eq!(
            absolutize(base, Path::new("./a/../b.sav")),
            PathBuf::from("/work/saves/b.sav")
        );
        assert_eq!(
            absolutize(base, Path::new("../out/c.sav")),
            PathBuf::from("/work/out/c.sav")
        );
        assert_eq!(
            absolutize(base, Path::new("/abs/d.sav")),
            PathBuf::from("/abs/d.sav")
        );
    }
}
