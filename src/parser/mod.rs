//! Input list parsing.
//!
//! The input is a plain text resource with one page URL per line. Blank
//! lines are ignored and entries are not validated up front.

mod error;
mod input;

pub use error::InputError;
pub use input::{PageJob, parse_page_list, read_page_list};
