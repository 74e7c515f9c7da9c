use crate::engine::core::row::format::{
    NumericValue, QualifierHeader, decode_value, parse_qualifier, parse_typed_offset,
    qualifier_width,
};
use crate::engine::errors::RowSeqError;
use crate::shared::time::TimeResolution;

#[test]
fn width_follows_leading_byte() {
    assert_eq!(qualifier_width(0x00), 2);
    assert_eq!(qualifier_width(0x0E), 2);
    assert_eq!(qualifier_width(0xF0), 4);
    assert_eq!(qualifier_width(0xFD), 4);
    assert_eq!(qualifier_width(0xFE), 8);
}

#[test]
fn parses_second_qualifier() {
    // offset 60s, 8 byte integer
    let header = parse_qualifier(&[0x03, 0xC7]).unwrap();
    assert_eq!(header.offset_nanos, 60_000_000_000);
    assert_eq!(header.resolution, TimeResolution::Seconds);
    assert_eq!(header.value_len(), 8);
    assert!(!header.is_float());
    assert_eq!(header.width, 2);
}

#[test]
fn parses_millisecond_qualifier() {
    // 0xF << 28 | 1500 << 6 | 0x0B (4 byte float)
    let raw: u32 = 0xF000_0000 | (1500 << 6) | 0x0B;
    let header = parse_qualifier(&raw.to_be_bytes()).unwrap();
    assert_eq!(header.offset_nanos, 1_500_000_000);
    assert_eq!(header.resolution, TimeResolution::Millis);
    assert_eq!(header.value_len(), 4);
    assert!(header.is_float());
}

#[test]
fn parses_nanosecond_qualifier() {
    let offset_ns: u64 = 1_000_000_123;
    let packed = (offset_ns << 4) | 0x01;
    let mut q = [0u8; 8];
    q.copy_from_slice(&packed.to_be_bytes());
    q[0] = 0xFE;
    let header = parse_qualifier(&q).unwrap();
    assert_eq!(header.offset_nanos, offset_ns);
    assert_eq!(header.resolution, TimeResolution::Nanos);
    assert_eq!(header.value_len(), 2);
}

#[test]
fn rejects_short_qualifiers() {
    assert_eq!(parse_qualifier(&[]), Err(RowSeqError::EmptyQualifier));
    assert_eq!(
        parse_qualifier(&[0xF0, 0x00]),
        Err(RowSeqError::TruncatedQualifier {
            needed: 4,
            available: 2
        })
    );
}

#[test]
fn decodes_integer_widths() {
    let header = |flags| QualifierHeader {
        offset_nanos: 0,
        resolution: TimeResolution::Seconds,
        flags,
        width: 2,
    };
    assert_eq!(
        decode_value(&header(0x00), &[0xFF]).unwrap(),
        NumericValue::Integer(-1)
    );
    assert_eq!(
        decode_value(&header(0x01), &[0x01, 0x00]).unwrap(),
        NumericValue::Integer(256)
    );
    assert_eq!(
        decode_value(&header(0x03), &42i32.to_be_bytes()).unwrap(),
        NumericValue::Integer(42)
    );
    assert_eq!(
        decode_value(&header(0x07), &i64::MIN.to_be_bytes()).unwrap(),
        NumericValue::Integer(i64::MIN)
    );
}

#[test]
fn decodes_floats() {
    let header = |flags| QualifierHeader {
        offset_nanos: 0,
        resolution: TimeResolution::Seconds,
        flags,
        width: 2,
    };
    assert_eq!(
        decode_value(&header(0x0B), &1.5f32.to_be_bytes()).unwrap(),
        NumericValue::Float(1.5)
    );
    assert_eq!(
        decode_value(&header(0x0F), &(-2.25f64).to_be_bytes()).unwrap(),
        NumericValue::Float(-2.25)
    );
}

#[test]
fn rejects_odd_value_lengths() {
    let header = QualifierHeader {
        offset_nanos: 0,
        resolution: TimeResolution::Seconds,
        flags: 0x02,
        width: 2,
    };
    assert_eq!(
        decode_value(&header, &[0, 0, 1]),
        Err(RowSeqError::UnsupportedValueLength {
            len: 3,
            float: false
        })
    );
}

#[test]
fn typed_offsets_by_width() {
    assert_eq!(
        parse_typed_offset(&[0x00, 0x0A]).unwrap(),
        (10_000_000_000, TimeResolution::Seconds)
    );
    assert_eq!(
        parse_typed_offset(&250u32.to_be_bytes()).unwrap(),
        (250_000_000, TimeResolution::Millis)
    );
    assert_eq!(
        parse_typed_offset(&7u64.to_be_bytes()).unwrap(),
        (7, TimeResolution::Nanos)
    );
    assert!(matches!(
        parse_typed_offset(&[1, 2, 3]),
        Err(RowSeqError::MalformedQualifier(_))
    ));
}
