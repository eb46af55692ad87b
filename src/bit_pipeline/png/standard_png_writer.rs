use std::io::Write;
use image::codecs::png::PngEncoder;
use tracing::debug;
use crate::bit_pipeline::common::error::{Result, MappingError};
use crate::bit_pipeline::png::assembler::RenderedImage;
use crate::bit_pipeline::png::writer::ImageWriter;

pub struct StandardPngWriter;

impl ImageWriter for StandardPngWriter {
    fn write_image(&self, image: &RenderedImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        image
            .image
            .write_with_encoder(PngEncoder::new(&mut buffer))
            .map_err(|e| MappingError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
