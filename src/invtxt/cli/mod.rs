//! Terminal presentation. Everything that writes to stdout lives here.

pub mod print;
