// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Metadata map and its canonical JSON serialization.
//!
//! The embedded payload is one UTF-8 JSON object whose keys keep insertion
//! order. Values are conventionally strings that themselves contain JSON
//! (the hosting tools store prompt and workflow blobs that way), but the
//! codec treats them as opaque.
//!
//! Serialization uses `", "` and `": "` separators. Extraction hands back
//! the exact embedded string, so byte-for-byte fidelity with the other
//! writers of this format matters more than compactness.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Insertion-ordered metadata mapping (`preserve_order` is enabled on
/// serde_json, so the underlying map keeps key order).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Formatter emitting `", "` between items and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize a metadata map to its canonical single-line JSON form.
pub fn to_json_string(metadata: &Metadata) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    metadata
        .serialize(&mut ser)
        .expect("serializing a JSON map into a Vec cannot fail");
    String::from_utf8(out).expect("serde_json emits UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn separators_match_wire_form() {
        let mut meta = Metadata::new();
        meta.insert("prompt".into(), Value::String("\"a cat\"".into()));
        assert_eq!(to_json_string(&meta), r#"{"prompt": "\"a cat\""}"#);
    }

    #[test]
    fn empty_object() {
        assert_eq!(to_json_string(&Metadata::new()), "{}");
    }

    #[test]
    fn key_order_preserved() {
        let mut meta = Metadata::new();
        meta.insert("workflow".into(), Value::String("{}".into()));
        meta.insert("prompt".into(), Value::String("x".into()));
        assert_eq!(to_json_string(&meta), r#"{"workflow": "{}", "prompt": "x"}"#);
    }

    #[test]
    fn nested_values_spaced_too() {
        let mut meta = Metadata::new();
        meta.insert("a".into(), serde_json::json!(["1", "2"]));
        assert_eq!(to_json_string(&meta), r#"{"a": ["1", "2"]}"#);
    }

    #[test]
    fn serialized_form_reparses_identically() {
        let mut meta = Metadata::new();
        meta.insert("prompt".into(), Value::String("{\"text\": \"hi\"}".into()));
        meta.insert("seed".into(), Value::String("42".into()));
        let text = to_json_string(&meta);
        let reparsed: Metadata = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, meta);
        assert_eq!(to_json_string(&reparsed), text);
    }
}
