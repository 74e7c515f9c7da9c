use serde::Serialize;

use crate::engine::errors::RowSeqError;
use crate::shared::time::{NANOS_PER_MILLI, NANOS_PER_SECOND, TimeResolution};

/// Tag the type filter is asked about for numeric data.
pub const NUMERIC_TYPE: u8 = 1;
/// Prefix handed to the numeric builder for plain numeric columns.
pub const NUMERIC_PREFIX: u8 = 0;
/// Leading byte of an appended-batch qualifier.
pub const APPENDS_PREFIX: u8 = 5;
pub const APPENDS_QUALIFIER: [u8; 3] = [APPENDS_PREFIX, 0, 0];

/// Top nibble marking a 4 byte millisecond qualifier.
pub const MS_BYTE_FLAG: u8 = 0xF0;
/// Leading byte marking an 8 byte nanosecond qualifier.
pub const NS_BYTE_FLAG: u8 = 0xFE;

pub const SECOND_QUALIFIER_WIDTH: usize = 2;
pub const MS_QUALIFIER_WIDTH: usize = 4;
pub const NS_QUALIFIER_WIDTH: usize = 8;

pub const FLAG_FLOAT: u8 = 0x08;
pub const LENGTH_MASK: u8 = 0x07;
pub const FLAGS_MASK: u8 = 0x0F;

/// Largest second offset a 2 byte qualifier can carry without its top
/// nibble reading as the millisecond flag.
pub const MAX_SECOND_OFFSET: u64 = 0x0EFF;
pub const MAX_MS_OFFSET: u64 = 0x003F_FFFF;

/// A decoded numeric qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifierHeader {
    pub offset_nanos: u64,
    pub resolution: TimeResolution,
    pub flags: u8,
    pub width: usize,
}

impl QualifierHeader {
    pub fn value_len(&self) -> usize {
        ((self.flags & LENGTH_MASK) + 1) as usize
    }

    pub fn is_float(&self) -> bool {
        self.flags & FLAG_FLOAT != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
}

impl NumericValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericValue::Integer(v) => v as f64,
            NumericValue::Float(v) => v,
        }
    }
}

/// Width of the numeric qualifier starting with `lead`.
pub fn qualifier_width(lead: u8) -> usize {
    if lead == NS_BYTE_FLAG {
        NS_QUALIFIER_WIDTH
    } else if lead & MS_BYTE_FLAG == MS_BYTE_FLAG {
        MS_QUALIFIER_WIDTH
    } else {
        SECOND_QUALIFIER_WIDTH
    }
}

/// Parses the numeric qualifier at the front of `buf`.
pub fn parse_qualifier(buf: &[u8]) -> Result<QualifierHeader, RowSeqError> {
    let lead = *buf.first().ok_or(RowSeqError::EmptyQualifier)?;
    let width = qualifier_width(lead);
    if buf.len() < width {
        return Err(RowSeqError::TruncatedQualifier {
            needed: width,
            available: buf.len(),
        });
    }

    let header = match width {
        SECOND_QUALIFIER_WIDTH => {
            let v = u16::from_be_bytes([buf[0], buf[1]]);
            QualifierHeader {
                offset_nanos: (v >> 4) as u64 * NANOS_PER_SECOND,
                resolution: TimeResolution::Seconds,
                flags: (v as u8) & FLAGS_MASK,
                width,
            }
        }
        MS_QUALIFIER_WIDTH => {
            let v = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
            QualifierHeader {
                offset_nanos: ((v >> 6) as u64 & MAX_MS_OFFSET) * NANOS_PER_MILLI,
                resolution: TimeResolution::Millis,
                flags: (v as u8) & FLAGS_MASK,
                width,
            }
        }
        _ => {
            let mut raw = [0u8; 8];
            raw[1..].copy_from_slice(&buf[1..NS_QUALIFIER_WIDTH]);
            let v = u64::from_be_bytes(raw);
            QualifierHeader {
                offset_nanos: v >> 4,
                resolution: TimeResolution::Nanos,
                flags: (v as u8) & FLAGS_MASK,
                width,
            }
        }
    };
    Ok(header)
}

/// Decodes a numeric value whose length and kind come from the qualifier flags.
pub fn decode_value(header: &QualifierHeader, bytes: &[u8]) -> Result<NumericValue, RowSeqError> {
    let unsupported = || RowSeqError::UnsupportedValueLength {
        len: bytes.len(),
        float: header.is_float(),
    };

    if header.is_float() {
        return match bytes.len() {
            4 => Ok(NumericValue::Float(
                f32::from_be_bytes(bytes.try_into().map_err(|_| unsupported())?) as f64,
            )),
            8 => Ok(NumericValue::Float(f64::from_be_bytes(
                bytes.try_into().map_err(|_| unsupported())?,
            ))),
            _ => Err(unsupported()),
        };
    }

    let v = match bytes.len() {
        1 => bytes[0] as i8 as i64,
        2 => i16::from_be_bytes([bytes[0], bytes[1]]) as i64,
        4 => i32::from_be_bytes(bytes.try_into().map_err(|_| unsupported())?) as i64,
        8 => i64::from_be_bytes(bytes.try_into().map_err(|_| unsupported())?),
        _ => return Err(unsupported()),
    };
    Ok(NumericValue::Integer(v))
}

/// Offset carried by a typed qualifier after its tag byte.
pub fn parse_typed_offset(offset: &[u8]) -> Result<(u64, TimeResolution), RowSeqError> {
    match offset.len() {
        2 => Ok((
            u16::from_be_bytes([offset[0], offset[1]]) as u64 * NANOS_PER_SECOND,
            TimeResolution::Seconds,
        )),
        4 => Ok((
            u32::from_be_bytes([offset[0], offset[1], offset[2], offset[3]]) as u64
                * NANOS_PER_MILLI,
            TimeResolution::Millis,
        )),
        8 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(offset);
            Ok((u64::from_be_bytes(raw), TimeResolution::Nanos))
        }
        n => Err(RowSeqError::MalformedQualifier(format!(
            "typed offset must be 2, 4 or 8 bytes, got {n}"
        ))),
    }
}
