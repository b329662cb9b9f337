//! lyric-atlas: builds the lyric font texture and glyph definition file used
//! by Rocksmith 2014 from a lyric document or a plain-text glyph list.
//!
//! The engine lives in `lyric-atlas-core`; this crate adds the command line,
//! logging, input readers and output writers.

pub mod app;
pub mod cli;
pub mod debug;
pub mod document;
pub mod output;
