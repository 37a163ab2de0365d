//! Reader for JSON dumps written by an external BUFR decoder
//!
//! A dump holds either a single message object or an array of messages. Each
//! message is deserialized on its own so one malformed message does not
//! discard the rest of the file.

use crate::app::models::DecodedMessage;
use crate::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read every message in a decoder dump
///
/// The outer `Result` fails when the file cannot be read or is not JSON at
/// all; the inner one carries per-message `Decoder` errors. Messages without
/// an `id` header take the file stem, suffixed with their position when the
/// dump holds more than one message.
pub fn read_decoded_messages(path: &Path) -> Result<Vec<Result<DecodedMessage>>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read decoder dump {}", path.display()), e))?;
    let document: Value = serde_json::from_str(&content)
        .map_err(|e| Error::json(format!("Invalid decoder dump {}", path.display()), e))?;

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let raw_messages = match document {
        Value::Array(messages) => messages,
        message @ Value::Object(_) => vec![message],
        other => {
            return Err(Error::decoder(format!(
                "{}: expected a message object or an array of messages, found {}",
                path.display(),
                json_kind(&other)
            )));
        }
    };

    debug!("Read {} messages from {}", raw_messages.len(), path.display());

    let batch = raw_messages.len() > 1;
    let messages = raw_messages
        .into_iter()
        .enumerate()
        .map(|(position, raw)| {
            let fallback_id = if batch {
                format!("{}-{}", stem, position)
            } else {
                stem.clone()
            };
            parse_message(raw, position, fallback_id, path)
        })
        .collect();
    Ok(messages)
}

fn parse_message(
    raw: Value,
    position: usize,
    fallback_id: String,
    path: &Path,
) -> Result<DecodedMessage> {
    let mut message: DecodedMessage = serde_json::from_value(raw).map_err(|e| {
        warn!("Message {} in {} could not be decoded: {}", position, path.display(), e);
        Error::decoder(format!("{} message {}: {}", path.display(), position, e))
    })?;
    if message.headers.id.is_empty() {
        message.headers.id = fallback_id;
    }
    Ok(message)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const MESSAGE: &str = r##"{
        "headers": {
            "typicalDate": "20220320",
            "typicalTime": "210000",
            "masterTablesVersionNumber": 37,
            "numberOfSubsets": 1,
            "edition": 4
        },
        "subsets": [
            {
                "elements": [
                    {
                        "key": "#1#airTemperature",
                        "descriptorCode": "012101",
                        "rawValue": 300.0,
                        "attributes": {"code": "012101", "units": "K", "scale": 2}
                    },
                    {
                        "key": "#1#dewpointTemperature",
                        "descriptorCode": 12103,
                        "rawValue": null,
                        "attributes": {"code": 12103, "units": "K", "scale": 2}
                    }
                ]
            }
        ]
    }"##;

    fn write_dump(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_single_message_object() {
        let dir = TempDir::new().unwrap();
        let path = write_dump(&dir, "A_ISMD01EIDB202100.json", MESSAGE);

        let messages = read_decoded_messages(&path).unwrap();
        assert_eq!(messages.len(), 1);

        let message = messages[0].as_ref().unwrap();
        assert_eq!(message.headers.id, "A_ISMD01EIDB202100");
        assert_eq!(message.headers.master_tables_version_number, Some(37));
        assert_eq!(message.headers.extra["edition"], 4);

        let elements = &message.subsets[0].elements;
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].descriptor.code(), "012101");
        assert_eq!(elements[1].descriptor.code(), "012103");
        assert!(elements[1].value.is_none());
    }

    #[test]
    fn test_array_isolates_bad_message() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            r##"[{}, {{"headers": {{"id": "broken"}}, "subsets": [{{"elements": [{{"key": "x"}}]}}]}}]"##,
            MESSAGE
        );
        let path = write_dump(&dir, "batch.json", &content);

        let messages = read_decoded_messages(&path).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].as_ref().unwrap().headers.id, "batch-0");
        assert!(matches!(messages[1], Err(Error::Decoder { .. })));
    }

    #[test]
    fn test_batch_without_ids_gets_positional_ids() {
        let dir = TempDir::new().unwrap();
        let explicit = MESSAGE.replacen("\"headers\": {", "\"headers\": {\"id\": \"msg-7\",", 1);
        let content = format!("[{}, {}, {}]", MESSAGE, explicit, MESSAGE);
        let path = write_dump(&dir, "dump.json", &content);

        let ids: Vec<String> = read_decoded_messages(&path)
            .unwrap()
            .into_iter()
            .map(|message| message.unwrap().headers.id)
            .collect();
        assert_eq!(ids, vec!["dump-0", "msg-7", "dump-2"]);
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let dir = TempDir::new().unwrap();
        let content = MESSAGE.replacen("\"headers\": {", "\"headers\": {\"id\": \"msg-7\",", 1);
        let path = write_dump(&dir, "ignored.json", &content);

        let messages = read_decoded_messages(&path).unwrap();
        assert_eq!(messages[0].as_ref().unwrap().headers.id, "msg-7");
    }

    #[test]
    fn test_rejects_non_message_documents() {
        let dir = TempDir::new().unwrap();

        let path = write_dump(&dir, "scalar.json", "42");
        assert!(matches!(read_decoded_messages(&path), Err(Error::Decoder { .. })));

        let path = write_dump(&dir, "garbage.json", "{not json");
        assert!(matches!(read_decoded_messages(&path), Err(Error::Json { .. })));

        let missing = dir.path().join("missing.json");
        assert!(matches!(read_decoded_messages(&missing), Err(Error::Io { .. })));
    }
}
