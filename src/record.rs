// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    coding::{Decode, Encode},
    fixed::FixedBuf,
    layout::Layout,
};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use std::io::{Read, Write};

/// A fixed-width record: integer key plus two text fields
///
/// Text fields are truncated to the widths of the file's [`Layout`]
/// when written. Records read back from disk hold the stored content,
/// with trailing NUL bytes stripped.
///
/// Keys are not unique; records with equal keys are all retained.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    key: i32,
    name: Vec<u8>,
    field: Vec<u8>,
}

impl Record {
    /// Creates a new record.
    pub fn new<N: AsRef<[u8]>, F: AsRef<[u8]>>(key: i32, name: N, field: F) -> Self {
        Self {
            key,
            name: name.as_ref().to_vec(),
            field: field.as_ref().to_vec(),
        }
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> i32 {
        self.key
    }

    /// Returns the name bytes.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Returns the field bytes.
    #[must_use]
    pub fn field(&self) -> &[u8] {
        &self.field
    }

    /// Returns the name as text, replacing invalid UTF-8.
    #[must_use]
    pub fn name_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Returns the field as text, replacing invalid UTF-8.
    #[must_use]
    pub fn field_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.field)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Record: {}, {}, {}>",
            self.key,
            self.name_lossy(),
            self.field_lossy(),
        )
    }
}

impl Encode for Record {
    fn encode_into<W: Write>(&self, writer: &mut W, layout: Layout) -> crate::Result<()> {
        writer.write_i32::<LE>(self.key)?;

        FixedBuf::new(&self.name, layout.name_width()).encode_into(writer)?;
        FixedBuf::new(&self.field, layout.field_width()).encode_into(writer)?;

        Ok(())
    }
}

impl Decode for Record {
    fn decode_from<R: Read>(reader: &mut R, layout: Layout) -> crate::Result<Self> {
        let key = reader.read_i32::<LE>()?;
        let name = FixedBuf::decode_from(reader, layout.name_width())?;
        let field = FixedBuf::decode_from(reader, layout.field_width())?;

        Ok(Self {
            key,
            name: name.content().to_vec(),
            field: field.content().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn record_encoded_size() {
        let layout = Layout::default();
        let bytes = Record::new(1, "Alvaro", "A1").encode_into_vec(layout);
        assert_eq!(54, bytes.len());
        assert_eq!(layout.record_size(), bytes.len() as u64);
    }

    #[test]
    fn record_raw() -> crate::Result<()> {
        let layout = Layout::new(1, 1, 4, 2)?;

        #[rustfmt::skip]
        let bytes = [
            // Key
            7, 0, 0, 0,

            // Name
            b'D', b'o', b'n', 0,

            // Field
            b'D', b'2',
        ];

        let record = Record::decode_from(&mut Cursor::new(bytes), layout)?;
        assert_eq!(Record::new(7, "Don", "D2"), record);
        assert_eq!(bytes.as_slice(), &*record.encode_into_vec(layout));

        Ok(())
    }

    #[test]
    fn record_negative_key() -> crate::Result<()> {
        let layout = Layout::default();
        let record = Record::new(-42, "neg", "N1");

        let bytes = record.encode_into_vec(layout);
        let decoded = Record::decode_from(&mut bytes.as_slice(), layout)?;
        assert_eq!(-42, decoded.key());

        Ok(())
    }

    #[test]
    fn record_truncates_long_fields() -> crate::Result<()> {
        let layout = Layout::default();

        let name = "n".repeat(31);
        let field = "f".repeat(21);
        let record = Record::new(3, &name, &field);

        let bytes = record.encode_into_vec(layout);
        assert_eq!(54, bytes.len());

        let decoded = Record::decode_from(&mut bytes.as_slice(), layout)?;
        assert_eq!(3, decoded.key());
        assert_eq!(name.as_bytes().get(..30), Some(decoded.name()));
        assert_eq!(field.as_bytes().get(..20), Some(decoded.field()));

        Ok(())
    }

    #[test]
    fn record_field_boundaries() -> crate::Result<()> {
        let layout = Layout::default();

        for len in [0, 19, 20] {
            let field = "x".repeat(len);
            let record = Record::new(9, "Carlos", &field);

            let bytes = record.encode_into_vec(layout);
            let decoded = Record::decode_from(&mut bytes.as_slice(), layout)?;
            assert_eq!(record, decoded);
        }

        Ok(())
    }

    #[test]
    fn record_decode_short_input() {
        let bytes = [1, 0, 0, 0, b'a'];
        assert!(matches!(
            Record::decode_from(&mut bytes.as_slice(), Layout::default()),
            Err(crate::Error::Io(_)),
        ));
    }

    #[test]
    fn record_display() {
        let record = Record::new(6, "Federico", "F1");
        assert_eq!("<Record: 6, Federico, F1>", record.to_string());
    }
}
