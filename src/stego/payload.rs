// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Secret payload serialization.
//!
//! The payload is the string that gets encrypted. Plain text travels as-is;
//! a file travels as a tagged, colon-separated record:
//!
//! ```text
//! FILE:<name>:<mime type>:<data URI>
//! ```
//!
//! The data URI (normally `data:<mime>;base64,<...>`) may itself contain `:`,
//! so only the first two delimiters after the tag are split points. A name or
//! MIME type containing `:` cannot be represented and is rejected by
//! [`SecretPayload::serialize`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::stego::error::StegoError;

/// Tag that marks a serialized file payload.
pub const FILE_TAG: &str = "FILE:";

/// Maximum raw file size accepted by [`SecretPayload::file_from_bytes`].
pub const MAX_SECRET_FILE_SIZE: usize = 5 * 1024 * 1024; // 5 MB

/// A secret to hide: free text or a named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    /// UTF-8 text, embedded verbatim.
    Text(String),
    /// A file carried as a data URI.
    File {
        name: String,
        mime_type: String,
        data_uri: String,
    },
}

impl SecretPayload {
    /// Build a file payload from raw bytes, wrapping them in a base64 data URI.
    ///
    /// # Errors
    /// [`StegoError::InvalidPayload`] if the content exceeds
    /// [`MAX_SECRET_FILE_SIZE`].
    pub fn file_from_bytes(name: &str, mime_type: &str, content: &[u8]) -> Result<Self, StegoError> {
        if content.len() > MAX_SECRET_FILE_SIZE {
            return Err(StegoError::InvalidPayload("file too large (max 5 MB)"));
        }
        let data_uri = format!("data:{mime_type};base64,{}", STANDARD.encode(content));
        Ok(Self::File {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            data_uri,
        })
    }

    /// Raw bytes of a file payload whose data URI is base64-encoded.
    ///
    /// Returns `None` for text payloads or URIs without a `;base64,` section.
    pub fn file_bytes(&self) -> Option<Vec<u8>> {
        let Self::File { data_uri, .. } = self else {
            return None;
        };
        let (_, encoded) = data_uri.split_once(";base64,")?;
        STANDARD.decode(encoded).ok()
    }

    /// Serialize into the string that is encrypted and embedded.
    ///
    /// # Errors
    /// [`StegoError::InvalidPayload`] for file payloads with an empty name,
    /// an empty data URI, or a name / MIME type containing `:`.
    pub fn serialize(&self) -> Result<String, StegoError> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::File { name, mime_type, data_uri } => {
                if name.is_empty() {
                    return Err(StegoError::InvalidPayload("file name is empty"));
                }
                if name.contains(':') {
                    return Err(StegoError::InvalidPayload("file name contains ':'"));
                }
                if mime_type.contains(':') {
                    return Err(StegoError::InvalidPayload("MIME type contains ':'"));
                }
                if data_uri.is_empty() {
                    return Err(StegoError::InvalidPayload("file data is empty"));
                }
                Ok(format!("{FILE_TAG}{name}:{mime_type}:{data_uri}"))
            }
        }
    }

    /// Parse a decrypted string back into a payload.
    ///
    /// Strings that start with `FILE:` but do not have the full
    /// `name:mime:data` shape (non-empty name and data) are returned as text.
    pub fn deserialize(s: &str) -> Self {
        match s.strip_prefix(FILE_TAG).and_then(parse_file_fields) {
            Some((name, mime_type, data_uri)) => Self::File {
                name: name.to_string(),
                mime_type: mime_type.to_string(),
                data_uri: data_uri.to_string(),
            },
            None => Self::Text(s.to_string()),
        }
    }

    /// The file name reduced to a single path component, safe to join onto
    /// an output directory.
    ///
    /// The name comes from the image, so everything up to the last `/` or `\`
    /// is dropped. Returns `None` for text payloads and for names that reduce
    /// to nothing, `.` or `..`.
    pub fn safe_file_name(&self) -> Option<&str> {
        let Self::File { name, .. } = self else {
            return None;
        };
        let base = name.rsplit(['/', '\\']).next()?.trim();
        match base {
            "" | "." | ".." => None,
            _ => Some(base),
        }
    }

    /// Whether this payload is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// Split `name:mime:rest` at the first two colons.
fn parse_file_fields(body: &str) -> Option<(&str, &str, &str)> {
    let (name, rest) = body.split_once(':')?;
    let (mime_type, data) = rest.split_once(':')?;
    if name.is_empty() || data.is_empty() {
        return None;
    }
    Some((name, mime_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn file(name: &str, mime: &str, data: &str) -> SecretPayload {
        SecretPayload::File {
            name: name.into(),
            mime_type: mime.into(),
            data_uri: data.into(),
        }
    }

    #[test]
    fn text_passes_through() {
        let p = SecretPayload::Text("hello | world: 42".into());
        assert_eq!(p.serialize().unwrap(), "hello | world: 42");
        assert_eq!(SecretPayload::deserialize("hello | world: 42"), p);
    }

    #[test]
    fn file_wire_format() {
        let p = file("notes.txt", "text/plain", "data:text/plain;base64,aGk=");
        assert_eq!(p.serialize().unwrap(), "FILE:notes.txt:text/plain:data:text/plain;base64,aGk=");
    }

    #[test]
    fn file_data_may_contain_colons() {
        let s = "FILE:a.bin:application/octet-stream:data:x:y:z";
        assert_eq!(
            SecretPayload::deserialize(s),
            file("a.bin", "application/octet-stream", "data:x:y:z")
        );
    }

    #[test]
    fn empty_mime_type_is_allowed() {
        let p = file("blob", "", "data:;base64,AA==");
        let s = p.serialize().unwrap();
        assert_eq!(SecretPayload::deserialize(&s), p);
    }

    #[test]
    fn malformed_file_records_fall_back_to_text() {
        for s in ["FILE:", "FILE:name", "FILE:name:mime", "FILE::mime:data", "FILE:name:mime:"] {
            assert_eq!(SecretPayload::deserialize(s), SecretPayload::Text(s.into()), "{s}");
        }
    }

    #[test]
    fn lowercase_tag_is_text() {
        let s = "file:a:b:c";
        assert_eq!(SecretPayload::deserialize(s), SecretPayload::Text(s.into()));
    }

    #[test]
    fn colon_in_name_or_mime_rejected() {
        assert!(matches!(
            file("a:b.txt", "text/plain", "data:,x").serialize(),
            Err(StegoError::InvalidPayload(_))
        ));
        assert!(matches!(
            file("a.txt", "text:plain", "data:,x").serialize(),
            Err(StegoError::InvalidPayload(_))
        ));
        assert!(file("", "text/plain", "data:,x").serialize().is_err());
        assert!(file("a.txt", "text/plain", "").serialize().is_err());
    }

    #[test]
    fn file_from_bytes_roundtrip() {
        let content = b"\x00\x01binary\xffcontent";
        let p = SecretPayload::file_from_bytes("x.bin", "application/octet-stream", content).unwrap();
        match &p {
            SecretPayload::File { data_uri, .. } => {
                assert!(data_uri.starts_with("data:application/octet-stream;base64,"));
            }
            SecretPayload::Text(_) => panic!("expected file payload"),
        }
        assert!(p.is_file());
        assert_eq!(p.file_bytes().unwrap(), content);

        let back = SecretPayload::deserialize(&p.serialize().unwrap());
        assert_eq!(back.file_bytes().unwrap(), content);
    }

    #[test]
    fn file_size_limit() {
        let big = vec![0u8; MAX_SECRET_FILE_SIZE + 1];
        assert!(SecretPayload::file_from_bytes("big", "x/y", &big).is_err());
        let ok = vec![0u8; 1024];
        assert!(SecretPayload::file_from_bytes("ok", "x/y", &ok).is_ok());
    }

    #[test]
    fn safe_file_name_strips_directories() {
        assert_eq!(file("../escaped.txt", "text/plain", "x").safe_file_name(), Some("escaped.txt"));
        assert_eq!(file("/etc/passwd", "text/plain", "x").safe_file_name(), Some("passwd"));
        assert_eq!(file("..\\..\\boot.ini", "text/plain", "x").safe_file_name(), Some("boot.ini"));
        assert_eq!(file("notes.txt", "text/plain", "x").safe_file_name(), Some("notes.txt"));
    }

    #[test]
    fn safe_file_name_rejects_bare_dots() {
        for name in ["..", ".", "dir/", "a/..", " "] {
            assert_eq!(file(name, "text/plain", "x").safe_file_name(), None, "{name:?}");
        }
        assert_eq!(SecretPayload::Text("../x".into()).safe_file_name(), None);
    }

    #[test]
    fn text_with_file_shape_reads_back_as_file() {
        // Known limitation of the byte-compatible wire format.
        let text = SecretPayload::Text("FILE:a.txt:text/plain:hi".into());
        let wire = text.serialize().unwrap();
        assert_eq!(SecretPayload::deserialize(&wire), file("a.txt", "text/plain", "hi"));
    }

    #[test]
    fn text_has_no_file_bytes() {
        assert_eq!(SecretPayload::Text("x".into()).file_bytes(), None);
    }

    proptest! {
        #[test]
        fn text_roundtrip(s in "\\PC*") {
            // Text that happens to look like a file record reparses as a file.
            prop_assume!(!s.starts_with(FILE_TAG));
            let p = SecretPayload::Text(s);
            prop_assert_eq!(SecretPayload::deserialize(&p.serialize().unwrap()), p);
        }

        #[test]
        fn file_roundtrip(
            name in "[^:]{1,40}",
            mime in "[a-z]{0,10}(/[a-z0-9.+-]{1,20})?",
            data in "\\PC{1,200}",
        ) {
            let p = file(&name, &mime, &data);
            prop_assert_eq!(SecretPayload::deserialize(&p.serialize().unwrap()), p);
        }
    }
}
