use bytes::Bytes;

/// One cell of a wide row.
///
/// The qualifier encodes the time offset (and for non-numeric data the type
/// tag); the value is opaque until a fragment builder interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub qualifier: Bytes,
    pub value: Bytes,
}

impl Column {
    pub fn new(qualifier: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            qualifier: qualifier.into(),
            value: value.into(),
        }
    }

    /// First qualifier byte, the type tag for odd-length qualifiers.
    pub fn prefix(&self) -> Option<u8> {
        self.qualifier.first().copied()
    }
}

/// All columns fetched for one row key, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: Bytes,
    columns: Vec<Column>,
}

impl Row {
    pub fn new(key: impl Into<Bytes>, columns: Vec<Column>) -> Self {
        Self {
            key: key.into(),
            columns,
        }
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
