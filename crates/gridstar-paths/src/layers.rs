//! Obstacle layers: identifiers, masks, and per-layer blocking ranges.
//!
//! Every cell of an obstacle bitmap is a [`LayerMask`] with one bit per
//! obstacle layer. Which layers actually block a given search is chosen per
//! call with a blocking mask, and each layer can be given a maximum blocking
//! range so its obstacles stop mattering far from a path's starting point.

use std::ops::{BitAnd, BitOr, Not};

// ---------------------------------------------------------------------------
// Layer
// ---------------------------------------------------------------------------

/// One obstacle layer, identified by a single bit of a [`LayerMask`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layer(u64);

impl Layer {
    /// Number of distinct layers a mask can hold.
    pub const COUNT: u32 = u64::BITS;

    /// The layer occupying bit `bit` of the mask.
    ///
    /// # Panics
    /// Panics if `bit >= Layer::COUNT`.
    #[inline]
    pub const fn new(bit: u32) -> Self {
        assert!(bit < Self::COUNT);
        Self(1 << bit)
    }

    /// The bit position identifying this layer.
    #[inline]
    pub const fn bit(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// This layer as a one-bit mask.
    #[inline]
    pub const fn mask(self) -> LayerMask {
        LayerMask(self.0)
    }
}

impl From<Layer> for LayerMask {
    #[inline]
    fn from(layer: Layer) -> Self {
        layer.mask()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Layer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bit().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Layer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bit = u32::deserialize(deserializer)?;
        if bit >= Layer::COUNT {
            return Err(serde::de::Error::custom("layer bit out of range"));
        }
        Ok(Layer::new(bit))
    }
}

// ---------------------------------------------------------------------------
// LayerMask
// ---------------------------------------------------------------------------

/// A set of obstacle layers, one bit per layer.
///
/// Serves both as per-cell obstacle occupancy and as the blocking mask that
/// selects which layers are active in a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u64);

impl LayerMask {
    /// The empty mask.
    pub const NONE: Self = Self(0);
    /// The mask holding every layer.
    pub const ALL: Self = Self(u64::MAX);

    /// Whether this mask contains every layer of `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no layer is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The individual layers set in this mask, lowest bit first.
    #[inline]
    pub fn layers(self) -> Layers {
        Layers(self.0)
    }
}

impl BitOr for LayerMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for LayerMask {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for LayerMask {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// Iterator over the layers of a [`LayerMask`], lowest bit first.
#[derive(Clone)]
pub struct Layers(u64);

impl Iterator for Layers {
    type Item = Layer;

    #[inline]
    fn next(&mut self) -> Option<Layer> {
        if self.0 == 0 {
            return None;
        }
        let layer = Layer(1 << self.0.trailing_zeros());
        self.0 &= self.0 - 1;
        Some(layer)
    }
}

// ---------------------------------------------------------------------------
// Per-layer blocking ranges
// ---------------------------------------------------------------------------

/// Per-layer maximum blocking ranges.
///
/// Unlimited range is encoded as the grid's total cell count, a value no
/// in-grid Manhattan distance can exceed.
#[derive(Clone)]
pub(crate) struct LayerRanges {
    ranges: [i32; Layer::COUNT as usize],
    unlimited: i32,
}

impl LayerRanges {
    pub(crate) fn new(unlimited: i32) -> Self {
        Self {
            ranges: [unlimited; Layer::COUNT as usize],
            unlimited,
        }
    }

    /// Replace the unlimited encoding and restore every layer to it.
    pub(crate) fn reset_all(&mut self, unlimited: i32) {
        self.unlimited = unlimited;
        self.ranges = [unlimited; Layer::COUNT as usize];
    }

    pub(crate) fn set(&mut self, layer: Layer, range: i32) {
        self.ranges[layer.bit() as usize] = range;
    }

    pub(crate) fn reset(&mut self, layer: Layer) {
        self.ranges[layer.bit() as usize] = self.unlimited;
    }

    /// The configured range, or `None` when the layer blocks at any range.
    pub(crate) fn get(&self, layer: Layer) -> Option<i32> {
        let range = self.ranges[layer.bit() as usize];
        if range == self.unlimited { None } else { Some(range) }
    }
}

// ---------------------------------------------------------------------------
// Bulk maintenance
// ---------------------------------------------------------------------------

/// Clear one layer's bit from every cell of an obstacle bitmap, in place.
///
/// All other bits of every cell are left untouched, and no search state is
/// involved.
pub fn clear_layer(cells: &mut [LayerMask], layer: Layer) {
    let keep = !layer.mask();
    for cell in cells.iter_mut() {
        *cell = *cell & keep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_bit_round_trip() {
        for bit in [0, 1, 31, 63] {
            assert_eq!(Layer::new(bit).bit(), bit);
        }
        assert_eq!(Layer::new(3).mask(), LayerMask(0b1000));
    }

    #[test]
    #[should_panic]
    fn layer_bit_out_of_range_panics() {
        let _ = Layer::new(64);
    }

    #[test]
    fn mask_ops() {
        let a = Layer::new(0).mask();
        let b = Layer::new(2).mask();
        let both = a | b;
        assert_eq!(both, LayerMask(0b101));
        assert!(both.contains(a));
        assert!(both.contains(b));
        assert!(!a.contains(both));
        assert_eq!(both & !a, b);
        assert!(LayerMask::NONE.is_empty());
        assert!(LayerMask::ALL.contains(both));
        assert_eq!(LayerMask::from(Layer::new(5)), LayerMask(0b10_0000));
    }

    #[test]
    fn layers_iterates_set_bits_in_order() {
        let mask = Layer::new(0).mask() | Layer::new(7).mask() | Layer::new(63).mask();
        let bits: Vec<u32> = mask.layers().map(Layer::bit).collect();
        assert_eq!(bits, vec![0, 7, 63]);
        assert_eq!(LayerMask::NONE.layers().count(), 0);
    }

    #[test]
    fn clear_layer_touches_only_that_bit() {
        let a = Layer::new(1);
        let b = Layer::new(4);
        let mut cells = vec![
            a.mask() | b.mask(),
            a.mask(),
            b.mask(),
            LayerMask::NONE,
        ];
        clear_layer(&mut cells, a);
        assert_eq!(cells, vec![b.mask(), LayerMask::NONE, b.mask(), LayerMask::NONE]);
    }

    #[test]
    fn ranges_distinguish_unlimited() {
        let mut ranges = LayerRanges::new(100);
        let layer = Layer::new(9);
        assert_eq!(ranges.get(layer), None);
        ranges.set(layer, 5);
        assert_eq!(ranges.get(layer), Some(5));
        ranges.reset(layer);
        assert_eq!(ranges.get(layer), None);
        // A range set to the unlimited encoding itself reads back as such.
        ranges.set(layer, 100);
        assert_eq!(ranges.get(layer), None);
        ranges.set(layer, 7);
        ranges.reset_all(64);
        assert_eq!(ranges.get(layer), None);
    }
}
