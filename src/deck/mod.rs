pub mod assembler;
pub mod ooxml;

pub use assembler::DeckAssembler;
pub use ooxml::{EmbeddedImage, ImageFormat, PackageWriter, SlidePart};
