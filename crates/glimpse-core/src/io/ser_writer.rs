use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{GlimpseError, Result};
use crate::frame::Frame;
use crate::io::ser::{SerHeader, SER_FRAME_COUNT_OFFSET, SER_HEADER_SIZE, SER_MAGIC};

/// Writes a valid SER file at the raw byte level.
///
/// The header's frame count does not have to be known up front: the count
/// of frames actually written is patched into the header on `finalize`.
pub struct SerWriter {
    writer: BufWriter<File>,
    header: SerHeader,
    frames_written: u32,
}

impl SerWriter {
    /// Create a new SER file and write the header.
    pub fn create(path: &Path, header: &SerHeader) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_header(&mut writer, header)?;
        Ok(Self {
            writer,
            header: header.clone(),
            frames_written: 0,
        })
    }

    /// Write a single raw frame (bytes must match the header's frame_byte_size).
    pub fn write_raw_frame(&mut self, data: &[u8]) -> Result<()> {
        debug_assert_eq!(data.len(), self.header.frame_byte_size());
        self.writer.write_all(data)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Encode a decoded frame back to the header's bit depth and write it.
    ///
    /// Values are clamped to [0, 1] before quantization. Frame dimensions
    /// must match the header.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let (h, w) = frame.data.dim();
        if h != self.header.height as usize || w != self.header.width as usize {
            return Err(GlimpseError::InvalidDimensions {
                width: w as u32,
                height: h as u32,
            });
        }

        let max_val = ((1u32 << self.header.pixel_depth) - 1) as f32;
        let mut raw = Vec::with_capacity(self.header.frame_byte_size());
        if self.header.bytes_per_pixel() == 1 {
            for v in frame.data.iter() {
                raw.push((v.clamp(0.0, 1.0) * max_val).round() as u8);
            }
        } else {
            for v in frame.data.iter() {
                let q = (v.clamp(0.0, 1.0) * max_val).round() as u16;
                raw.extend_from_slice(&q.to_le_bytes());
            }
        }

        self.write_raw_frame(&raw)
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Flush, patch the real frame count into the header, and close.
    pub fn finalize(mut self) -> Result<u32> {
        self.writer.flush()?;
        let mut file = self
            .writer
            .into_inner()
            .map_err(|e| GlimpseError::Io(e.into_error()))?;
        file.seek(SeekFrom::Start(SER_FRAME_COUNT_OFFSET))?;
        file.write_all(&(self.frames_written as i32).to_le_bytes())?;
        file.flush()?;
        Ok(self.frames_written)
    }
}

fn write_header(w: &mut impl Write, header: &SerHeader) -> Result<()> {
    // Magic (14 bytes)
    w.write_all(SER_MAGIC)?;
    // LuID (4 bytes)
    w.write_all(&0i32.to_le_bytes())?;
    // ColorID (4 bytes)
    w.write_all(&header.color_id.to_le_bytes())?;
    // LittleEndian flag: 0 = little-endian (Siril convention)
    let le_flag: i32 = if header.little_endian { 0 } else { 1 };
    w.write_all(&le_flag.to_le_bytes())?;
    // Width (4 bytes)
    w.write_all(&(header.width as i32).to_le_bytes())?;
    // Height (4 bytes)
    w.write_all(&(header.height as i32).to_le_bytes())?;
    // PixelDepth (4 bytes)
    w.write_all(&(header.pixel_depth as i32).to_le_bytes())?;
    // FrameCount (4 bytes)
    w.write_all(&(header.frame_count as i32).to_le_bytes())?;
    // Observer (40 bytes)
    write_fixed_string(w, &header.observer, 40)?;
    // Instrument (40 bytes)
    write_fixed_string(w, &header.instrument, 40)?;
    // Telescope (40 bytes)
    write_fixed_string(w, &header.telescope, 40)?;
    // DateTime (8 bytes)
    w.write_all(&header.date_time.to_le_bytes())?;
    // DateTimeUTC (8 bytes)
    w.write_all(&header.date_time_utc.to_le_bytes())?;

    debug_assert_eq!(
        14 + 4 + 4 + 4 + 4 + 4 + 4 + 4 + 40 + 40 + 40 + 8 + 8,
        SER_HEADER_SIZE
    );
    Ok(())
}

fn write_fixed_string(w: &mut impl Write, s: &str, len: usize) -> Result<()> {
    let bytes = s.as_bytes();
    let to_write = bytes.len().min(len);
    w.write_all(&bytes[..to_write])?;
    // Pad with zeros
    for _ in to_write..len {
        w.write_all(&[0u8])?;
    }
    Ok(())
}
