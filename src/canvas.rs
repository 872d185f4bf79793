/// Row-major flat RGBA raster. No per-pixel objects; rows are contiguous
/// `w * 4` byte chunks so they can be handed to rayon independently.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub data: Vec<u8>,
    pub w: usize,
    pub h: usize,
}

impl Canvas {
    pub fn new(w: usize, h: usize, background: [u8; 4]) -> Self {
        let mut data = vec![0u8; w * h * 4];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&background);
        }
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        (y * self.w + x) * 4
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn row_bytes(&self) -> usize {
        self.w * 4
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }
}

/// Source-over blend of `color` at `alpha` onto one RGBA pixel.
#[inline]
pub fn blend(px: &mut [u8], color: [u8; 4], alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    for c in 0..3 {
        let dst = px[c] as f32;
        px[c] = (dst + (color[c] as f32 - dst) * a).round() as u8;
    }
    px[3] = 255;
}
