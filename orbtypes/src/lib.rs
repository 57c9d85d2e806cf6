pub mod catalog;
pub mod position;
pub mod prelude;
pub mod time;
pub mod tle;
pub mod track;
