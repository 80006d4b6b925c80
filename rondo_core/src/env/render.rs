use std::fmt::{Display, Formatter};
use clap::ValueEnum;

/// How environment presents itself when asked to render.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "speedy", derive(speedy::Writable, speedy::Readable))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RenderMode{
    #[default]
    None,
    Text,
    PixelBuffer,
}

impl Display for RenderMode{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            RenderMode::None => write!(f, "none"),
            RenderMode::Text => write!(f, "text"),
            RenderMode::PixelBuffer => write!(f, "pixel-buffer"),
        }
    }
}

/// Row major RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer{
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer{
    pub fn new(width: usize, height: usize) -> Self{
        Self{width, height, data: vec![0; width * height * 3]}
    }

    pub fn width(&self) -> usize{
        self.width
    }

    pub fn height(&self) -> usize{
        self.height
    }

    pub fn data(&self) -> &[u8]{
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]>{
        if x >= self.width || y >= self.height{
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Sets pixel, coordinates outside of buffer are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]){
        if x < self.width && y < self.height{
            let i = (y * self.width + x) * 3;
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, rgb: [u8; 3]){
        for yy in y..(y + h).min(self.height){
            for xx in x..(x + w).min(self.width){
                self.set_pixel(xx, yy, rgb);
            }
        }
    }
}

/// Snapshot produced by [`render`](crate::env::TurnBasedEnvironment::render).
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered{
    Nothing,
    Text(String),
    Pixels(PixelBuffer),
}
