mod analyzer;
mod parser;

pub use self::analyzer::analyze_fridge;
pub use self::parser::{parse_line, parse_listing};
