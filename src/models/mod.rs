pub mod table;
pub mod traffic;
