pub mod literature;
pub mod migrations;
pub mod tokens;
