pub mod formatting;
pub mod logging;
pub mod parsers;
pub mod ui;
