pub use super::factories::{ColumnFactory, RowFactory, SchemaFactory};

pub struct Factory;

impl Factory {
    pub fn column() -> ColumnFactory {
        ColumnFactory::new()
    }

    pub fn row() -> RowFactory {
        RowFactory::new()
    }

    pub fn schema() -> SchemaFactory {
        SchemaFactory::new()
    }
}
