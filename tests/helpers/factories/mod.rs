pub mod column_factory;
pub mod row_factory;
pub mod schema_factory;

pub use column_factory::ColumnFactory;
pub use row_factory::RowFactory;
pub use schema_factory::SchemaFactory;

#[cfg(test)]
mod column_factory_test;
#[cfg(test)]
mod row_factory_test;
