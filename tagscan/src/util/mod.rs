//! Low level decoding helpers shared by the format readers

pub mod bits;
pub(crate) mod io;
pub mod num;
pub(crate) mod text;
