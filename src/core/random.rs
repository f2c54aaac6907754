/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Small seeded generator used for palette picks.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Create from a seed. Zero would lock xorshift at zero forever, so it is remapped.
    pub fn new(seed: u32) -> Self {
        Self { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }

    /// Seed from the host's entropy source.
    pub fn from_entropy() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new((js_sys::Math::random() * u32::MAX as f64) as u32)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos())
                .unwrap_or(12345);
            Self::new(nanos)
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_u32() as usize) % len
    }
}
