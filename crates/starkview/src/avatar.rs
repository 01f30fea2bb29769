use crate::address::Address;

/// Identicon grid dimension.
pub const GRID: usize = 8;

/// Avatar size ladder used by rendering contexts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvatarSize {
    Xs,
    Sm,
    #[default]
    Base,
    Lg,
    Xl,
    Xxl,
    Xxxl,
}

impl AvatarSize {
    /// Pixels per identicon cell.
    pub fn cell_px(self) -> u32 {
        match self {
            AvatarSize::Xs => 6,
            AvatarSize::Sm => 7,
            AvatarSize::Base => 8,
            AvatarSize::Lg => 9,
            AvatarSize::Xl => 10,
            AvatarSize::Xxl => 12,
            AvatarSize::Xxxl => 15,
        }
    }
}

/// An HSL color as produced by the blockies generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HslColor {
    pub fn to_css(&self) -> String {
        format!("hsl({},{}%,{}%)", self.hue, self.saturation, self.lightness)
    }
}

/// What a grid cell renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Background,
    Foreground,
    Spot,
}

/// A deterministic blockie identicon.
///
/// Port of the canonical blockies generator: a four-word xorshift PRNG
/// seeded from the address string, three HSL colors drawn in a fixed order,
/// and an 8x8 grid whose left half mirrors onto the right. JS `i32`
/// arithmetic is reproduced with wrapping operations so the pattern for a
/// given address matches what wallet front-ends render.
#[derive(Debug, Clone, PartialEq)]
pub struct Identicon {
    pub color: HslColor,
    pub background: HslColor,
    pub spot: HslColor,
    pixels: Vec<Shade>,
}

impl Identicon {
    /// Build the identicon for an address. Seeded from the lowercase form,
    /// so checksum casing does not affect the pattern.
    pub fn from_address(address: &Address) -> Self {
        Self::from_seed(&address.lowercase())
    }

    pub fn from_seed(seed: &str) -> Self {
        let mut rng = XorShift::from_seed(seed);
        let color = create_color(&mut rng);
        let background = create_color(&mut rng);
        let spot = create_color(&mut rng);
        let pixels = create_grid(&mut rng);
        Self {
            color,
            background,
            spot,
            pixels,
        }
    }

    pub fn shade(&self, x: usize, y: usize) -> Shade {
        self.pixels[y * GRID + x]
    }

    pub fn pixels(&self) -> &[Shade] {
        &self.pixels
    }

    /// Render as a square SVG at the given size.
    pub fn to_svg(&self, size: AvatarSize) -> String {
        let cell = size.cell_px();
        let dim = cell * GRID as u32;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{dim}" height="{dim}">"#
        );
        svg.push_str(&format!(
            r#"<rect width="{dim}" height="{dim}" fill="{}"/>"#,
            self.background.to_css()
        ));
        for y in 0..GRID {
            for x in 0..GRID {
                let fill = match self.shade(x, y) {
                    Shade::Background => continue,
                    Shade::Foreground => self.color,
                    Shade::Spot => self.spot,
                };
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{cell}" height="{cell}" fill="{}"/>"#,
                    x as u32 * cell,
                    y as u32 * cell,
                    fill.to_css()
                ));
            }
        }
        svg.push_str("</svg>");
        svg
    }
}

/// The blockies PRNG: four `i32` words, JS shift/overflow semantics.
struct XorShift {
    seed: [i32; 4],
}

impl XorShift {
    fn from_seed(seed: &str) -> Self {
        let mut words = [0i32; 4];
        for (i, b) in seed.bytes().enumerate() {
            let w = words[i % 4];
            words[i % 4] = w.wrapping_shl(5).wrapping_sub(w).wrapping_add(b as i32);
        }
        Self { seed: words }
    }

    /// Next sample in `[0, 2)` — the upstream generator divides an
    /// unsigned reinterpretation by 2^31, quirk included.
    fn next(&mut self) -> f64 {
        let t = self.seed[0] ^ self.seed[0].wrapping_shl(11);
        self.seed[0] = self.seed[1];
        self.seed[1] = self.seed[2];
        self.seed[2] = self.seed[3];
        self.seed[3] = self.seed[3] ^ (self.seed[3] >> 19) ^ t ^ (t >> 8);
        (self.seed[3] as u32) as f64 / 2_147_483_648.0
    }
}

fn create_color(rng: &mut XorShift) -> HslColor {
    let hue = (rng.next() * 360.0).floor();
    let saturation = rng.next() * 60.0 + 40.0;
    let lightness = (rng.next() + rng.next() + rng.next() + rng.next()) * 25.0;
    HslColor {
        hue: hue as f32,
        saturation: saturation as f32,
        lightness: lightness as f32,
    }
}

fn create_grid(rng: &mut XorShift) -> Vec<Shade> {
    let data_width = GRID.div_ceil(2);
    let mirror_width = GRID - data_width;

    let mut pixels = Vec::with_capacity(GRID * GRID);
    for _ in 0..GRID {
        let mut row: Vec<u8> = (0..data_width).map(|_| (rng.next() * 2.3) as u8).collect();
        let mirrored: Vec<u8> = row[..mirror_width].iter().rev().copied().collect();
        row.extend(mirrored);
        pixels.extend(row.into_iter().map(|v| match v {
            0 => Shade::Background,
            1 => Shade::Foreground,
            _ => Shade::Spot,
        }));
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0x2fd23d9182193775423497fc0c472e156c57c69e4089a1967fb288a2d84e914";
    const OTHER: &str = "0x64b48806902a367c8598f4f95c305e8c1a1acba5f082d294a43793113115691";

    #[test]
    fn test_deterministic_for_same_address() {
        let address = Address::parse(SAMPLE).unwrap();
        let a = Identicon::from_address(&address);
        let b = Identicon::from_address(&address);
        assert_eq!(a, b);
    }

    #[test]
    fn test_casing_does_not_change_pattern() {
        let address = Address::parse(SAMPLE).unwrap();
        let from_checksum = Identicon::from_address(&address);
        let from_lower = Identicon::from_seed(&address.lowercase());
        assert_eq!(from_checksum, from_lower);
    }

    #[test]
    fn test_distinct_addresses_differ() {
        let a = Identicon::from_address(&Address::parse(SAMPLE).unwrap());
        let b = Identicon::from_address(&Address::parse(OTHER).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_grid_is_mirrored() {
        let identicon = Identicon::from_address(&Address::parse(SAMPLE).unwrap());
        assert_eq!(identicon.pixels().len(), GRID * GRID);
        for y in 0..GRID {
            for x in 0..GRID {
                assert_eq!(identicon.shade(x, y), identicon.shade(GRID - 1 - x, y));
            }
        }
    }

    #[test]
    fn test_svg_dimensions_follow_size() {
        let identicon = Identicon::from_address(&Address::parse(SAMPLE).unwrap());
        let svg = identicon.to_svg(AvatarSize::Xxxl);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="120""#)); // 15 px * 8 cells
    }
}
