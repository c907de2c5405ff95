//! iCalendar feed parsing (RFC 5545 subset).
//!
//! - Lexer: line ending normalisation, unfolding and content line splitting
//! - Values: DATE / DATE-TIME / TEXT value helpers
//! - Parser: `VEVENT` block extraction into raw event records

mod lexer;
mod parser;
mod values;

pub use lexer::{ContentLine, split_content_line, unfold};
pub use parser::parse_events;
pub use values::{format_date, parse_date, parse_datetime, unescape_text};
pub(crate) use values::parse_time_of_day;
