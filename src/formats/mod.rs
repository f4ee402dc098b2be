//! Output format modules for the planisphere generator
//!
//! All writers use the `std::io::Write` trait and never touch the
//! filesystem themselves.

pub mod document;
pub mod svg_writer;

pub use document::{write_instructions, DocumentPart, InstructionDocument};
pub use svg_writer::{Color, HAlign, Style, SvgConfig, SvgError, SvgWriter, TextStyle, VAlign};
