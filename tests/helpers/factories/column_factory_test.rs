use crate::engine::core::row::format::APPENDS_PREFIX;
use crate::test_helpers::factories::column_factory::encode_int;
use crate::test_helpers::factory::Factory;

#[test]
fn test_column_factory_compacts_points() {
    let column = Factory::column().second(0, 1).second(1, 300).create();

    assert_eq!(&column.qualifier[..], &[0x00, 0x00, 0x00, 0x11]);
    assert_eq!(&column.value[..], &[0x01, 0x01, 0x2C]);
}

#[test]
fn test_column_factory_appends_and_each() {
    let appends = Factory::column().second(0, 1).milli(500, 2).create_appends();
    assert_eq!(&appends.qualifier[..], &[APPENDS_PREFIX, 0, 0]);
    // 2 byte qualifier + 1 byte value + 4 byte qualifier + 1 byte value
    assert_eq!(appends.value.len(), 8);

    let each = Factory::column().second(0, 1).nano(5, 2).create_each();
    assert_eq!(each.len(), 2);
    assert_eq!(each[1].qualifier.len(), 8);
}

#[test]
fn test_encode_int_picks_smallest_width() {
    assert_eq!(encode_int(-5).1.len(), 1);
    assert_eq!(encode_int(1_000).1.len(), 2);
    assert_eq!(encode_int(100_000).1.len(), 4);
    assert_eq!(encode_int(i64::MAX).1.len(), 8);
}
