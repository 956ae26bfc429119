//! Module `core::palette`
//!
//! Defines [`Rgba`], a packed 32-bit color, and [`Palette`], the fixed 256-slot
//! table that voxel color indices point into.
//!
//! Colors are packed with red in the low byte, then green, blue and alpha, which
//! is the byte order of an `RGBA` chunk read as little-endian `u32`s.
//!
//! # Examples
//!
//! ```rust
//! use voxbridge::{Palette, Rgba};
//!
//! let palette = Palette::default();
//! assert_eq!(palette.len(), 256);
//! assert_eq!(palette[1], Rgba::new(255, 255, 255, 255));
//! ```

/// Number of entries in every palette.
pub const PALETTE_LEN: usize = 256;

/// A packed RGBA color: `R | G << 8 | B << 16 | A << 24`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(u32);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba(0);

    #[must_use]
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    #[must_use]
    #[inline(always)]
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    #[must_use]
    #[inline(always)]
    pub const fn packed(&self) -> u32 {
        self.0
    }

    #[must_use]
    #[inline(always)]
    pub const fn r(&self) -> u8 {
        self.0 as u8
    }

    #[must_use]
    #[inline(always)]
    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    #[inline(always)]
    pub const fn b(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    #[inline(always)]
    pub const fn a(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Channels scaled to `0.0..=1.0`, in `[r, g, b, a]` order.
    #[must_use]
    pub fn to_unit(&self) -> [f64; 4] {
        [
            self.r() as f64 / 255.0,
            self.g() as f64 / 255.0,
            self.b() as f64 / 255.0,
            self.a() as f64 / 255.0,
        ]
    }
}

impl From<u32> for Rgba {
    #[inline]
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<Rgba> for u32 {
    #[inline]
    fn from(color: Rgba) -> u32 {
        color.0
    }
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rgba({}, {}, {}, {})",
            self.r(),
            self.g(),
            self.b(),
            self.a()
        )
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r(),
            self.g(),
            self.b(),
            self.a()
        )
    }
}

/// A 256-entry color table indexed by [`crate::Voxel::color_index`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Palette([Rgba; PALETTE_LEN]);

impl Palette {
    #[must_use]
    pub const fn new(entries: [Rgba; PALETTE_LEN]) -> Self {
        Self(entries)
    }

    /// Builds a palette from packed `u32` colors.
    #[must_use]
    pub const fn from_packed(packed: [u32; PALETTE_LEN]) -> Self {
        let mut entries = [Rgba::TRANSPARENT; PALETTE_LEN];
        let mut i = 0;
        while i < PALETTE_LEN {
            entries[i] = Rgba::from_packed(packed[i]);
            i += 1;
        }
        Self(entries)
    }

    #[must_use]
    #[inline(always)]
    pub const fn get(&self, index: u8) -> Rgba {
        self.0[index as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, index: u8, color: Rgba) {
        self.0[index as usize] = color;
    }

    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        PALETTE_LEN
    }

    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Rgba] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgba> {
        self.0.iter()
    }

    /// Returns `true` when every entry matches [`DEFAULT_PALETTE`].
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == DEFAULT_PALETTE
    }
}

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

impl std::ops::Index<u8> for Palette {
    type Output = Rgba;

    #[inline(always)]
    fn index(&self, index: u8) -> &Self::Output {
        &self.0[index as usize]
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgba;
    type IntoIter = std::slice::Iter<'a, Rgba>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Palette {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(PALETTE_LEN))?;
        for color in self.0.iter() {
            seq.serialize_element(&color.packed())?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Palette {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let packed = Vec::<u32>::deserialize(deserializer)?;
        let packed: [u32; PALETTE_LEN] = packed.try_into().map_err(|v: Vec<u32>| {
            serde::de::Error::invalid_length(v.len(), &"256 packed colors")
        })?;
        Ok(Palette::from_packed(packed))
    }
}

/// MagicaVoxel's built-in palette, used when a file carries no `RGBA` chunk.
pub const DEFAULT_PALETTE: Palette = Palette::from_packed(DEFAULT_PALETTE_PACKED);

#[rustfmt::skip]
const DEFAULT_PALETTE_PACKED: [u32; PALETTE_LEN] = [
    0x00000000, 0xffffffff, 0xffccffff, 0xff99ffff, 0xff66ffff, 0xff33ffff, 0xff00ffff, 0xffffccff,
    0xffccccff, 0xff99ccff, 0xff66ccff, 0xff33ccff, 0xff00ccff, 0xffff99ff, 0xffcc99ff, 0xff9999ff,
    0xff6699ff, 0xff3399ff, 0xff0099ff, 0xffff66ff, 0xffcc66ff, 0xff9966ff, 0xff6666ff, 0xff3366ff,
    0xff0066ff, 0xffff33ff, 0xffcc33ff, 0xff9933ff, 0xff6633ff, 0xff3333ff, 0xff0033ff, 0xffff00ff,
    0xffcc00ff, 0xff9900ff, 0xff6600ff, 0xff3300ff, 0xff0000ff, 0xffffffcc, 0xffccffcc, 0xff99ffcc,
    0xff66ffcc, 0xff33ffcc, 0xff00ffcc, 0xffffcccc, 0xffcccccc, 0xff99cccc, 0xff66cccc, 0xff33cccc,
    0xff00cccc, 0xffff99cc, 0xffcc99cc, 0xff9999cc, 0xff6699cc, 0xff3399cc, 0xff0099cc, 0xffff66cc,
    0xffcc66cc, 0xff9966cc, 0xff6666cc, 0xff3366cc, 0xff0066cc, 0xffff33cc, 0xffcc33cc, 0xff9933cc,
    0xff6633cc, 0xff3333cc, 0xff0033cc, 0xffff00cc, 0xffcc00cc, 0xff9900cc, 0xff6600cc, 0xff3300cc,
    0xff0000cc, 0xffffff99, 0xffccff99, 0xff99ff99, 0xff66ff99, 0xff33ff99, 0xff00ff99, 0xffffcc99,
    0xffcccc99, 0xff99cc99, 0xff66cc99, 0xff33cc99, 0xff00cc99, 0xffff9999, 0xffcc9999, 0xff999999,
    0xff669999, 0xff339999, 0xff009999, 0xffff6699, 0xffcc6699, 0xff996699, 0xff666699, 0xff336699,
    0xff006699, 0xffff3399, 0xffcc3399, 0xff993399, 0xff663399, 0xff333399, 0xff003399, 0xffff0099,
    0xffcc0099, 0xff990099, 0xff660099, 0xff330099, 0xff000099, 0xffffff66, 0xffccff66, 0xff99ff66,
    0xff66ff66, 0xff33ff66, 0xff00ff66, 0xffffcc66, 0xffcccc66, 0xff99cc66, 0xff66cc66, 0xff33cc66,
    0xff00cc66, 0xffff9966, 0xffcc9966, 0xff999966, 0xff669966, 0xff339966, 0xff009966, 0xffff6666,
    0xffcc6666, 0xff996666, 0xff666666, 0xff336666, 0xff006666, 0xffff3366, 0xffcc3366, 0xff993366,
    0xff663366, 0xff333366, 0xff003366, 0xffff0066, 0xffcc0066, 0xff990066, 0xff660066, 0xff330066,
    0xff000066, 0xffffff33, 0xffccff33, 0xff99ff33, 0xff66ff33, 0xff33ff33, 0xff00ff33, 0xffffcc33,
    0xffcccc33, 0xff99cc33, 0xff66cc33, 0xff33cc33, 0xff00cc33, 0xffff9933, 0xffcc9933, 0xff999933,
    0xff669933, 0xff339933, 0xff009933, 0xffff6633, 0xffcc6633, 0xff996633, 0xff666633, 0xff336633,
    0xff006633, 0xffff3333, 0xffcc3333, 0xff993333, 0xff663333, 0xff333333, 0xff003333, 0xffff0033,
    0xffcc0033, 0xff990033, 0xff660033, 0xff330033, 0xff000033, 0xffffff00, 0xffccff00, 0xff99ff00,
    0xff66ff00, 0xff33ff00, 0xff00ff00, 0xffffcc00, 0xffcccc00, 0xff99cc00, 0xff66cc00, 0xff33cc00,
    0xff00cc00, 0xffff9900, 0xffcc9900, 0xff999900, 0xff669900, 0xff339900, 0xff009900, 0xffff6600,
    0xffcc6600, 0xff996600, 0xff666600, 0xff336600, 0xff006600, 0xffff3300, 0xffcc3300, 0xff993300,
    0xff663300, 0xff333300, 0xff003300, 0xffff0000, 0xffcc0000, 0xff990000, 0xff660000, 0xff330000,
    0xff0000ee, 0xff0000dd, 0xff0000bb, 0xff0000aa, 0xff000088, 0xff000077, 0xff000055, 0xff000044,
    0xff000022, 0xff000011, 0xff00ee00, 0xff00dd00, 0xff00bb00, 0xff00aa00, 0xff008800, 0xff007700,
    0xff005500, 0xff004400, 0xff002200, 0xff001100, 0xffee0000, 0xffdd0000, 0xffbb0000, 0xffaa0000,
    0xff880000, 0xff770000, 0xff550000, 0xff440000, 0xff220000, 0xff110000, 0xffeeeeee, 0xffdddddd,
    0xffbbbbbb, 0xffaaaaaa, 0xff888888, 0xff777777, 0xff555555, 0xff444444, 0xff222222, 0xff111111,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_channels() {
        let color = Rgba::from_packed(0x44332211);
        assert_eq!(color.r(), 0x11);
        assert_eq!(color.g(), 0x22);
        assert_eq!(color.b(), 0x33);
        assert_eq!(color.a(), 0x44);
        assert_eq!(Rgba::new(0x11, 0x22, 0x33, 0x44), color);
    }

    #[test]
    fn test_rgba_to_unit() {
        let color = Rgba::new(255, 0, 51, 255);
        assert_eq!(color.to_unit(), [1.0, 0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_rgba_display() {
        assert_eq!(format!("{}", Rgba::new(0xff, 0x00, 0x10, 0x80)), "#ff001080");
    }

    #[test]
    fn test_default_palette_edges() {
        assert_eq!(DEFAULT_PALETTE.get(0), Rgba::TRANSPARENT);
        assert_eq!(DEFAULT_PALETTE.get(1), Rgba::from_packed(0xffffffff));
        assert_eq!(DEFAULT_PALETTE.get(255), Rgba::from_packed(0xff111111));
        // Entry 2 is 0xffccffff: white-ish with a reduced blue channel.
        assert_eq!(DEFAULT_PALETTE.get(2), Rgba::new(0xff, 0xff, 0xcc, 0xff));
    }

    #[test]
    fn test_default_palette_is_opaque_after_zero() {
        assert!(DEFAULT_PALETTE.iter().skip(1).all(|c| c.a() == 0xff));
    }

    #[test]
    fn test_palette_set_and_is_default() {
        let mut palette = Palette::default();
        assert!(palette.is_default());

        palette.set(7, Rgba::new(1, 2, 3, 4));
        assert_eq!(palette[7], Rgba::new(1, 2, 3, 4));
        assert!(!palette.is_default());
    }
}
