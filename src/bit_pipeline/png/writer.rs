use std::io::Write;
use crate::bit_pipeline::common::error::Result;
use crate::bit_pipeline::png::assembler::RenderedImage;

pub trait ImageWriter {
    fn write_image(&self, image: &RenderedImage, output: &mut dyn Write) -> Result<()>;
}
