use crate::test_helpers::factories::row_factory::DEFAULT_BASE_TIMESTAMP;
use crate::test_helpers::factory::Factory;

#[test]
fn test_row_factory_key_layout() {
    let row = Factory::row()
        .with_salt(2)
        .with_metric([0, 0, 9])
        .with_column(Factory::column().second(0, 1).create())
        .create();

    let key = row.key();
    assert_eq!(key[0], 2);
    assert_eq!(&key[1..4], &[0, 0, 9]);
    assert_eq!(&key[4..8], &DEFAULT_BASE_TIMESTAMP.to_be_bytes());
    assert_eq!(key.len(), 1 + 3 + 4 + 6);
    assert_eq!(row.len(), 1);
}

#[test]
fn test_row_factory_create_list_steps_hours() {
    let rows = Factory::row()
        .with_column(Factory::column().second(0, 1).create())
        .create_list(3);

    assert_eq!(rows.len(), 3);
    assert_eq!(
        &rows[2].key()[3..7],
        &(DEFAULT_BASE_TIMESTAMP + 7200).to_be_bytes()
    );
}
