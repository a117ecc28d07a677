//! Save-file codec seam.
//!
//! The executor never looks inside a save file. It opens the file through a
//! [`SaveCodec`], asks the document to drop its credential fields, and saves
//! it to the planned output path.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::CodecError;

/// Save-file fields holding password material.
pub const CREDENTIAL_FIELDS: [&str; 3] = [
    "EncryptedEditPassword",
    "EncryptedPlayPassword",
    "EncryptedApplyPlayPasswordUntilGardenNumber",
];

/// Opens save files.
pub trait SaveCodec {
    /// Opens and decodes the file at `path`.
    fn open(&self, path: &Path) -> Result<Box<dyn SaveDocument>, CodecError>;
}

/// An opened save file.
pub trait SaveDocument {
    /// Clears every password-like field.
    fn clear_credential_fields(&mut self);

    /// Encodes the document to `path`.
    fn save(&self, path: &Path) -> Result<(), CodecError>;
}

/// Codec for save files exported as a JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSaveCodec;

impl SaveCodec for JsonSaveCodec {
    fn open(&self, path: &Path) -> Result<Box<dyn SaveDocument>, CodecError> {
        let reader = BufReader::new(File::open(path)?);
        match serde_json::from_reader(reader)? {
            Value::Object(root) => Ok(Box::new(JsonSaveDocument { root })),
            _ => Err(CodecError::NotAnObject),
        }
    }
}

#[derive(Debug)]
struct JsonSaveDocument {
    root: Map<String, Value>,
}

impl SaveDocument for JsonSaveDocument {
    fn clear_credential_fields(&mut self) {
        for field in CREDENTIAL_FIELDS {
            if let Some(value) = self.root.get_mut(field) {
                *value = Value::Null;
            }
        }
    }

    fn save(&self, path: &Path) -> Result<(), CodecError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.root)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_codec_clears_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garden.json");
        let output = dir.path().join("garden-open.json");
        std::fs::write(
            &input,
            r#"{"Name":"Rose garden","EncryptedEditPassword":"abc","EncryptedPlayPassword":"def"}"#,
        )
        .unwrap();

        let mut doc = JsonSaveCodec.open(&input).unwrap();
        doc.clear_credential_fields();
        doc.save(&output).unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(saved["Name"], "Rose garden");
        assert_eq!(saved["EncryptedEditPassword"], Value::Null);
        assert_eq!(saved["EncryptedPlayPassword"], Value::Null);
        assert!(saved.get("EncryptedApplyPlayPasswordUntilGardenNumber").is_none());
    }

    #[test]
    fn test_json_codec_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("list.json");
        std::fs::write(&input, "[1, 2, 3]").unwrap();

        let err = JsonSaveCodec.open(&input).err().unwrap();
        assert!(matches!(err, CodecError::NotAnObject));
    }

    #[test]
    fn test_json_codec_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        std::fs::write(&input, "{not json").unwrap();

        let err = JsonSaveCodec.open(&input).err().unwrap();
        assert!(matches!(err, CodecError::JsonError(_)));
    }
}
