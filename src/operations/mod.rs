//! Operations module
//!
//! Loading documents and running checks over them

pub mod check;
pub mod load;
