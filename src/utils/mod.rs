pub mod colors;
pub mod logging;
pub mod table;
