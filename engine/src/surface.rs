use crate::rect::Rect;

pub const CHANNELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(CHANNELS)
    }

    pub fn bounds(self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// An owned RGBA pixel surface.
///
/// Layers, overlays and the composited screen image are all `PixelSurface`s. Block writes copy a
/// packed `w * h * 4` sample buffer into a rectangle; they overwrite, they never blend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl PixelSurface {
    /// A fully transparent surface.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * CHANNELS;
        let px = self.buf.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.size.width || y >= self.size.height {
            return;
        }
        let idx = (y as usize * self.size.width as usize + x as usize) * CHANNELS;
        if let Some(px) = self.buf.get_mut(idx..idx + CHANNELS) {
            px.copy_from_slice(&color);
        }
    }

    /// Copy a packed block of `rect.w * rect.h` pixels into `rect`.
    ///
    /// Rows falling outside the surface are clipped. A block whose length does not match the
    /// rect is ignored.
    pub fn write_block(&mut self, rect: Rect, block: &[u8]) {
        let block_stride = rect.w as usize * CHANNELS;
        if block.len() != block_stride * rect.h as usize {
            return;
        }
        let clipped = rect.clip_to(self.size.bounds());
        if clipped.is_empty() {
            return;
        }

        let stride = self.size.width as usize * CHANNELS;
        let row_bytes = clipped.w as usize * CHANNELS;
        let skip_x = (clipped.x - rect.x) as usize * CHANNELS;
        for row in 0..clipped.h as usize {
            let src_row = (clipped.y - rect.y) as usize + row;
            let src_start = src_row * block_stride + skip_x;
            let dst_start = (clipped.y as usize + row) * stride + clipped.x as usize * CHANNELS;
            self.buf[dst_start..dst_start + row_bytes]
                .copy_from_slice(&block[src_start..src_start + row_bytes]);
        }
    }

    /// Read `rect` back as a packed block. Returns `None` if `rect` is not fully inside.
    pub fn read_block(&self, rect: Rect) -> Option<Vec<u8>> {
        if rect.right() > self.size.width || rect.bottom() > self.size.height {
            return None;
        }
        let stride = self.size.width as usize * CHANNELS;
        let row_bytes = rect.w as usize * CHANNELS;
        let mut out = Vec::with_capacity(row_bytes * rect.h as usize);
        for row in rect.y as usize..rect.bottom() as usize {
            let start = row * stride + rect.x as usize * CHANNELS;
            out.extend_from_slice(&self.buf[start..start + row_bytes]);
        }
        Some(out)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let clipped = rect.clip_to(self.size.bounds());
        if clipped.is_empty() {
            return;
        }
        let stride = self.size.width as usize * CHANNELS;
        let row_bytes = clipped.w as usize * CHANNELS;
        for row in clipped.y as usize..clipped.bottom() as usize {
            let start = row * stride + clipped.x as usize * CHANNELS;
            for px in self.buf[start..start + row_bytes].chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Source-over composite `src` onto this surface (same size required; mismatches are ignored).
    pub fn blend_over(&mut self, src: &PixelSurface) {
        if src.size != self.size {
            return;
        }
        for (dst, s) in self
            .buf
            .chunks_exact_mut(CHANNELS)
            .zip(src.buf.chunks_exact(CHANNELS))
        {
            let a = s[3] as u32;
            if a == 0 {
                continue;
            }
            if a == 255 {
                dst.copy_from_slice(s);
                continue;
            }
            let inv = 255 - a;
            for c in 0..3 {
                dst[c] = ((dst[c] as u32 * inv + s[c] as u32 * a + 127) / 255) as u8;
            }
            dst[3] = (a + (dst[3] as u32 * inv + 127) / 255).min(255) as u8;
        }
    }
}
