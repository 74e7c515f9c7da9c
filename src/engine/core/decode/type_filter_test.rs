use crate::engine::core::decode::{DataTypeFilter, TypeFilter};
use crate::engine::core::row::format::NUMERIC_TYPE;

#[test]
fn numeric_only_wants_only_numeric() {
    let filter = DataTypeFilter::numeric_only();
    assert!(filter.wants_type(NUMERIC_TYPE));
    assert!(!filter.wants_type(6));
    assert_eq!(filter.len(), 1);
}

#[test]
fn insert_and_remove_across_words() {
    let mut filter = DataTypeFilter::none();
    assert!(filter.is_empty());
    for tag in [0u8, 63, 64, 200, 255] {
        filter.insert(tag);
    }
    assert_eq!(filter.iter().collect::<Vec<_>>(), vec![0, 63, 64, 200, 255]);

    filter.remove(64);
    assert!(!filter.contains(64));
    assert!(filter.contains(63));
    assert_eq!(filter.len(), 4);
}

#[test]
fn all_wants_everything() {
    let filter = DataTypeFilter::all();
    assert_eq!(filter.len(), 256);
    assert!((0..=u8::MAX).all(|tag| filter.wants_type(tag)));
}

#[test]
fn parses_tag_lists() {
    let filter: DataTypeFilter = "1, 7,9".parse().unwrap();
    assert_eq!(filter.iter().collect::<Vec<_>>(), vec![1, 7, 9]);

    let all: DataTypeFilter = "*".parse().unwrap();
    assert_eq!(all, DataTypeFilter::all());

    assert!("1,300".parse::<DataTypeFilter>().is_err());
    assert!("".parse::<DataTypeFilter>().unwrap().is_empty());
}

#[test]
fn closures_are_filters() {
    let odd_only = |tag: u8| tag % 2 == 1;
    let filter: &dyn TypeFilter = &odd_only;
    assert!(filter.wants_type(NUMERIC_TYPE));
    assert!(!filter.wants_type(6));
}
