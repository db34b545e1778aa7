//! Terminal output formatting
//!
//! Board rendering and messages for the text interface.

pub mod display;
pub mod formatters;

pub use display::{
    write_board, write_divider, write_heading, write_intro, write_outcome, write_rules,
    write_score, write_slots,
};
