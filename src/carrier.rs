//! # 载体图像模块
//!
//! 负责把图像文件解码成扁平的像素字节流 (行优先、通道交错)，
//! 以及把修改后的字节流按原尺寸、原通道布局写回无损格式的图像文件。

use anyhow::{Context, Result};
use colored::Colorize;
use image::{ColorType, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use log::{debug, warn};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// 以 8 位通道加载的载体图像。
///
/// 通道数与源图像保持一致，每个通道占一个字节，每个字节可隐藏 1 位数据。
#[derive(Debug, Clone)]
pub enum Carrier {
    Luma(GrayImage),
    LumaAlpha(GrayAlphaImage),
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Carrier {
    /// 读取并解码图像文件。
    ///
    /// # Errors
    ///
    /// 文件无法打开或不是受支持的图像格式时返回错误。
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;

        let color = image.color();
        if color.bytes_per_pixel() != color.channel_count() {
            warn!(
                "{} has {:?} pixels, channels are reduced to 8 bits before hiding",
                path.display(),
                color
            );
        }

        let carrier = match color {
            ColorType::L8 | ColorType::L16 => Carrier::Luma(image.into_luma8()),
            ColorType::La8 | ColorType::La16 => Carrier::LumaAlpha(image.into_luma_alpha8()),
            c if c.has_alpha() => Carrier::Rgba(image.into_rgba8()),
            _ => Carrier::Rgb(image.into_rgb8()),
        };

        let (width, height) = carrier.dimensions();
        debug!(
            "loaded {}: {}x{}, {} channels, {} bit slots",
            path.display(),
            width,
            height,
            carrier.channels(),
            carrier.capacity_bits()
        );

        Ok(carrier)
    }

    /// 图像的宽和高。
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Carrier::Luma(img) => img.dimensions(),
            Carrier::LumaAlpha(img) => img.dimensions(),
            Carrier::Rgb(img) => img.dimensions(),
            Carrier::Rgba(img) => img.dimensions(),
        }
    }

    /// 每个像素的通道数。
    pub fn channels(&self) -> usize {
        match self {
            Carrier::Luma(_) => 1,
            Carrier::LumaAlpha(_) => 2,
            Carrier::Rgb(_) => 3,
            Carrier::Rgba(_) => 4,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        match self {
            Carrier::Luma(img) => &**img,
            Carrier::LumaAlpha(img) => &**img,
            Carrier::Rgb(img) => &**img,
            Carrier::Rgba(img) => &**img,
        }
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        match self {
            Carrier::Luma(img) => &mut **img,
            Carrier::LumaAlpha(img) => &mut **img,
            Carrier::Rgb(img) => &mut **img,
            Carrier::Rgba(img) => &mut **img,
        }
    }

    /// 可用于隐藏数据的位数，等于像素字节数。
    pub fn capacity_bits(&self) -> usize {
        self.pixels().len()
    }

    /// 按目标路径的扩展名选择格式，把图像写回磁盘。
    ///
    /// # Errors
    ///
    /// 如果目标格式无法识别、是有损格式 (会破坏隐藏的位)、不支持当前的通道布局，或写入失败，将返回错误。
/// 出错时不会创建目标文件。
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path).with_context(|| {
            format!(
                "Unable to determine the image format of: {}",
                path.to_string_lossy().red().bold()
            )
        })?;

        anyhow::ensure!(
            is_lossless(format),
            "The output format {} is lossy and would destroy the hidden data. \nUse PNG, BMP, TIFF, WebP or QOI instead.",
            format!("{format:?}").red().bold()
        );

        // 先在内存中编码，编码失败时不会在磁盘上留下残缺的文件。
        let mut encoded = Vec::new();
        let mut cursor = Cursor::new(&mut encoded);
        let result = match self {
            Carrier::Luma(img) => img.write_to(&mut cursor, format),
            Carrier::LumaAlpha(img) => img.write_to(&mut cursor, format),
            Carrier::Rgb(img) => img.write_to(&mut cursor, format),
            Carrier::Rgba(img) => img.write_to(&mut cursor, format),
        };

        result.with_context(|| {
            format!(
                "Unable to encode the image as {} ({} channels)",
                format!("{format:?}").red().bold(),
                self.channels()
            )
        })?;

        fs::write(path, encoded).with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                path.to_string_lossy().red().bold()
            )
        })
    }
}

/// 只有无损格式才能原样保留每个字节的最低位。
pub fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::WebP
            | ImageFormat::Qoi
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};
    use tempfile::tempdir;

    #[test]
    fn test_lossless_formats() {
        assert!(is_lossless(ImageFormat::Png));
        assert!(is_lossless(ImageFormat::Bmp));
        assert!(!is_lossless(ImageFormat::Jpeg));
        assert!(!is_lossless(ImageFormat::Gif));
    }

    #[test]
    fn test_rgba_round_trip_keeps_bytes() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("carrier.png");
        let img = ImageBuffer::from_fn(7, 5, |x, y| Rgba([x as u8, y as u8, (x * y) as u8, 200]));
        img.save(&path)?;

        let mut carrier = Carrier::open(&path)?;
        assert_eq!(carrier.channels(), 4);
        assert_eq!(carrier.dimensions(), (7, 5));
        assert_eq!(carrier.capacity_bits(), 7 * 5 * 4);

        carrier.pixels_mut()[0] ^= 1;
        let out = dir.path().join("out.png");
        carrier.save(&out)?;

        let reloaded = Carrier::open(&out)?;
        assert_eq!(reloaded.pixels(), carrier.pixels());
        Ok(())
    }

    #[test]
    fn test_rgb_stays_three_channels() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("carrier.bmp");
        let img = ImageBuffer::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 9]));
        img.save(&path)?;

        let carrier = Carrier::open(&path)?;
        assert!(matches!(carrier, Carrier::Rgb(_)));
        assert_eq!(carrier.pixels().len(), 4 * 4 * 3);
        Ok(())
    }

    #[test]
    fn test_save_refuses_unknown_extension() -> Result<()> {
        let dir = tempdir()?;
        let carrier = Carrier::Rgb(RgbImage::new(2, 2));
        let result = carrier.save(&dir.path().join("out.unknown"));
        assert!(result.is_err());
        assert!(!dir.path().join("out.unknown").exists());
        Ok(())
    }

    #[test]
    fn test_save_unsupported_layout_leaves_no_file() -> Result<()> {
        let dir = tempdir()?;

        // QOI 只支持 RGB/RGBA
        let path = dir.path().join("out.qoi");
        let result = Carrier::Luma(GrayImage::new(3, 3)).save(&path);
        assert!(result.is_err());
        assert!(!path.exists());

        let result = Carrier::LumaAlpha(GrayAlphaImage::new(3, 3)).save(&path);
        assert!(result.is_err());
        assert!(!path.exists());

        // 同一个载体换成支持的格式仍可正常写入
        let carrier = Carrier::Luma(GrayImage::new(3, 3));
        let png = dir.path().join("out.png");
        carrier.save(&png)?;
        assert_eq!(Carrier::open(&png)?.pixels(), carrier.pixels());
        Ok(())
    }

    #[test]
    fn test_save_refuses_lossy_format() -> Result<()> {
        let dir = tempdir()?;
        let carrier = Carrier::Rgb(RgbImage::new(2, 2));
        let path = dir.path().join("out.jpg");
        let err = carrier.save(&path).unwrap_err();
        assert!(err.to_string().contains("lossy"));
        assert!(!path.exists());
        Ok(())
    }
}
