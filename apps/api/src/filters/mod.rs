// Structured candidate filters built from the filter form rows.

pub mod builder;
pub mod handlers;
