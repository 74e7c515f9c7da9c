use crate::engine::core::row::Column;
use crate::engine::core::row::format::{APPENDS_QUALIFIER, FLAG_FLOAT, MS_BYTE_FLAG, NS_BYTE_FLAG};
use rand::Rng;

/// Builds numeric columns in the store's wire format.
///
/// Points added with `second`/`milli`/`nano` become one compacted column
/// (`create`), one column each (`create_each`) or an appended batch
/// (`create_appends`).
pub struct ColumnFactory {
    cells: Vec<(Vec<u8>, Vec<u8>)>,
}

impl ColumnFactory {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn second(mut self, offset: u16, value: i64) -> Self {
        let (flags, bytes) = encode_int(value);
        self.cells.push((second_qualifier(offset, flags).to_vec(), bytes));
        self
    }

    pub fn second_float(mut self, offset: u16, value: f64) -> Self {
        let (flags, bytes) = encode_float(value);
        self.cells.push((second_qualifier(offset, flags).to_vec(), bytes));
        self
    }

    pub fn milli(mut self, offset_ms: u32, value: i64) -> Self {
        let (flags, bytes) = encode_int(value);
        self.cells.push((milli_qualifier(offset_ms, flags).to_vec(), bytes));
        self
    }

    pub fn nano(mut self, offset_ns: u64, value: i64) -> Self {
        let (flags, bytes) = encode_int(value);
        self.cells.push((nano_qualifier(offset_ns, flags).to_vec(), bytes));
        self
    }

    /// One second-resolution point per offset in `0..count`, random values.
    pub fn with_random_points(mut self, count: u16) -> Self {
        let mut rng = rand::thread_rng();
        for offset in 0..count {
            self = self.second(offset, rng.gen_range(-1_000_000..1_000_000));
        }
        self
    }

    pub fn create(self) -> Column {
        let mut qualifier = Vec::new();
        let mut value = Vec::new();
        for (q, v) in self.cells {
            qualifier.extend_from_slice(&q);
            value.extend_from_slice(&v);
        }
        Column::new(qualifier, value)
    }

    pub fn create_each(self) -> Vec<Column> {
        self.cells
            .into_iter()
            .map(|(q, v)| Column::new(q, v))
            .collect()
    }

    pub fn create_appends(self) -> Column {
        let mut value = Vec::new();
        for (q, v) in self.cells {
            value.extend_from_slice(&q);
            value.extend_from_slice(&v);
        }
        Column::new(APPENDS_QUALIFIER.to_vec(), value)
    }

    /// Extension type column with a second offset.
    pub fn typed(tag: u8, offset_seconds: u16, payload: &[u8]) -> Column {
        let mut qualifier = vec![tag];
        qualifier.extend_from_slice(&offset_seconds.to_be_bytes());
        Column::new(qualifier, payload.to_vec())
    }

    /// Rollup column for one aggregator and slot.
    pub fn rollup(aggregator: u8, slot: u16, value: i64) -> Column {
        let (flags, bytes) = encode_int(value);
        let mut qualifier = vec![aggregator];
        qualifier.extend_from_slice(&second_qualifier(slot, flags));
        Column::new(qualifier, bytes)
    }

    pub fn raw(qualifier: &[u8], value: &[u8]) -> Column {
        Column::new(qualifier.to_vec(), value.to_vec())
    }
}

/// Smallest integer encoding that holds `value`, with its length flags.
pub fn encode_int(value: i64) -> (u8, Vec<u8>) {
    if let Ok(v) = i8::try_from(value) {
        (0x00, v.to_be_bytes().to_vec())
    } else if let Ok(v) = i16::try_from(value) {
        (0x01, v.to_be_bytes().to_vec())
    } else if let Ok(v) = i32::try_from(value) {
        (0x03, v.to_be_bytes().to_vec())
    } else {
        (0x07, value.to_be_bytes().to_vec())
    }
}

pub fn encode_float(value: f64) -> (u8, Vec<u8>) {
    (FLAG_FLOAT | 0x07, value.to_be_bytes().to_vec())
}

pub fn second_qualifier(offset: u16, flags: u8) -> [u8; 2] {
    ((offset << 4) | flags as u16).to_be_bytes()
}

pub fn milli_qualifier(offset_ms: u32, flags: u8) -> [u8; 4] {
    (((MS_BYTE_FLAG as u32) << 24) | (offset_ms << 6) | flags as u32).to_be_bytes()
}

pub fn nano_qualifier(offset_ns: u64, flags: u8) -> [u8; 8] {
    let mut q = ((offset_ns << 4) | flags as u64).to_be_bytes();
    q[0] = NS_BYTE_FLAG;
    q
}
