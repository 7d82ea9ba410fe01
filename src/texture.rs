use crate::gpu::GpuContext;
use std::path::Path;

/// Errors from loading a texture image.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load texture '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// A GPU texture that can be bound to shaders.
#[derive(Debug)]
pub struct Texture {
    #[allow(dead_code)]
    pub(crate) texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
}

impl Texture {
    /// Create a texture from raw RGBA data.
    pub fn from_rgba(gpu: &GpuContext, data: &[u8], width: u32, height: u32, label: &str) -> Self {
        use wgpu::util::DeviceExt;

        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Nearest filtering keeps pixel-art textures crisp
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Load a texture from an image file.
    ///
    /// The image is flipped vertically so that `v = 0` samples its bottom row,
    /// matching the primitives' UV layout.
    pub fn from_file(gpu: &GpuContext, path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let img = image::open(path)
            .map_err(|source| TextureError::Image {
                path: label.clone(),
                source,
            })?
            .flipv()
            .to_rgba8();
        let (width, height) = img.dimensions();
        log::info!("loaded texture {} ({}x{})", label, width, height);
        Ok(Self::from_rgba(gpu, &img, width, height, &label))
    }

    /// A 1×1 white texture for untextured primitives.
    pub fn white(gpu: &GpuContext) -> Self {
        Self::from_rgba(gpu, &[255, 255, 255, 255], 1, 1, "White Texture")
    }

    /// Generate a procedural cobblestone texture.
    pub fn cobblestone(gpu: &GpuContext, size: u32, seed: u32) -> Self {
        let data = cobblestone_pixels(size, seed);
        Self::from_rgba(gpu, &data, size, size, "Cobblestone Texture")
    }
}

/// RGBA pixels of a blocky gray stone pattern with darkened seams.
fn cobblestone_pixels(size: u32, seed: u32) -> Vec<u8> {
    const GRAYS: [u8; 6] = [128, 100, 150, 90, 140, 110];

    let mut data = vec![0u8; (size * size * 4) as usize];
    for y in 0..size {
        for x in 0..size {
            let idx = ((y * size + x) * 4) as usize;

            // 4×4 pixel stones
            let stone = hash(x / 4, y / 4, seed);
            let base = GRAYS[(stone % GRAYS.len() as u32) as usize] as i32;

            let variation = (hash(x, y, seed.wrapping_add(12345)) % 16) as i32 - 8;
            let seam = (x % 4 == 0 || y % 4 == 0) && hash(x, y, seed.wrapping_add(999)) % 3 == 0;
            let value = (base + variation - if seam { 20 } else { 0 }).clamp(0, 255) as u8;

            data[idx..idx + 4].copy_from_slice(&[value, value, value, 255]);
        }
    }
    data
}

fn hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_add(x.wrapping_mul(374761393));
    h = h.wrapping_add(y.wrapping_mul(668265263));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cobblestone_is_opaque_gray() {
        let data = cobblestone_pixels(16, 7);
        assert_eq!(data.len(), 16 * 16 * 4);
        for px in data.chunks(4) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn cobblestone_depends_on_seed() {
        assert_eq!(cobblestone_pixels(8, 1), cobblestone_pixels(8, 1));
        assert_ne!(cobblestone_pixels(8, 1), cobblestone_pixels(8, 2));
    }
}
