pub mod impl_sqlite;
pub mod interface;
