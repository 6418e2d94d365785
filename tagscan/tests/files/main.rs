#![allow(missing_docs)]

mod ape;
mod asf;
mod facade;
mod flac;
mod mp4;
mod mpeg;
mod ogg;
mod truncation;
pub(crate) mod util;
