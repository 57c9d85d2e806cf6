pub use crate::parser::{parse_element_sets, ParseError};

pub mod parser;
