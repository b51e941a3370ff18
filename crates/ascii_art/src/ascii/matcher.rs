use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;

use super::glyph::{BitmapFont, GlyphRaster};
use crate::AsciiError;

/// Smallest active set the matcher lets `remove` shrink to.
pub const MIN_ACTIVE_CHARS: usize = 2;

/// How a brightness between two indexed keys is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingPolicy {
    /// Closest key; equal distances go to the lower character.
    #[default]
    Nearest,
    /// Smallest key at or above the brightness.
    Up,
    /// Greatest key at or below the brightness.
    Down,
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingPolicy::Nearest => "nearest",
            RoundingPolicy::Up => "up",
            RoundingPolicy::Down => "down",
        };
        f.write_str(name)
    }
}

/// Normalized brightness usable as an ordered map key.
#[derive(Clone, Copy, Debug)]
struct BrightnessKey(f64);

impl PartialEq for BrightnessKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BrightnessKey {}

impl PartialOrd for BrightnessKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BrightnessKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Maps cell brightness to the character whose glyph ink best matches it.
///
/// Raw brightness of a character is the coverage of its glyph bitmap. The
/// active set is rescaled so its darkest member sits at `0.0` and its
/// densest at `1.0`, and lookups are answered against that rescaled index.
/// Every `insert` or `remove` rebuilds the index before returning.
pub struct CharMatcher<G = BitmapFont> {
    raster: G,
    /// Active characters, ordered by code point.
    raw: BTreeMap<char, f64>,
    /// Raw brightness of every character ever measured.
    measured: HashMap<char, f64>,
    index: BTreeMap<BrightnessKey, char>,
    policy: RoundingPolicy,
}

impl CharMatcher<BitmapFont> {
    pub fn new<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self::with_raster(BitmapFont, chars)
    }
}

impl<G: GlyphRaster> CharMatcher<G> {
    pub fn with_raster<I>(raster: G, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut matcher = Self {
            raster,
            raw: BTreeMap::new(),
            measured: HashMap::new(),
            index: BTreeMap::new(),
            policy: RoundingPolicy::default(),
        };
        for ch in chars {
            let brightness = matcher.measure(ch);
            matcher.raw.insert(ch, brightness);
        }
        matcher.rebuild_index();
        matcher
    }

    /// Adds `ch` to the active set. Returns `false` if it was already there.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.raw.contains_key(&ch) {
            return false;
        }
        let brightness = self.measure(ch);
        self.raw.insert(ch, brightness);
        self.rebuild_index();
        true
    }

    /// Removes `ch` from the active set.
    ///
    /// Returns `false` without touching the index when `ch` is not active or
    /// when removing it would leave fewer than [`MIN_ACTIVE_CHARS`].
    pub fn remove(&mut self, ch: char) -> bool {
        if !self.raw.contains_key(&ch) {
            return false;
        }
        if self.raw.len() <= MIN_ACTIVE_CHARS {
            debug!("keeping {ch:?}: only {} characters active", self.raw.len());
            return false;
        }
        self.raw.remove(&ch);
        self.rebuild_index();
        true
    }

    pub fn contains(&self, ch: char) -> bool {
        self.raw.contains_key(&ch)
    }

    /// Active characters in code point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.raw.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RoundingPolicy) {
        self.policy = policy;
    }

    /// The normalized index as `(key, character)` pairs in ascending key order.
    pub fn normalized(&self) -> impl Iterator<Item = (f64, char)> + '_ {
        self.index.iter().map(|(key, &ch)| (key.0, ch))
    }

    /// Resolves `brightness` with the current rounding policy.
    pub fn best_match(&self, brightness: f64) -> Result<char, AsciiError> {
        self.match_with(brightness, self.policy)
    }

    pub fn match_with(&self, brightness: f64, policy: RoundingPolicy) -> Result<char, AsciiError> {
        let query = BrightnessKey(brightness);
        let floor = self.index.range(..=query).next_back();
        let ceiling = self.index.range(query..).next();

        let found = match policy {
            RoundingPolicy::Up => ceiling.map(|(_, &ch)| ch),
            RoundingPolicy::Down => floor.map(|(_, &ch)| ch),
            RoundingPolicy::Nearest => match (floor, ceiling) {
                (Some((low, &low_ch)), Some((high, &high_ch))) => {
                    let below = (brightness - low.0).abs();
                    let above = (high.0 - brightness).abs();
                    Some(match below.partial_cmp(&above) {
                        Some(Ordering::Less) => low_ch,
                        Some(Ordering::Greater) => high_ch,
                        _ => low_ch.min(high_ch),
                    })
                },
                (Some((_, &ch)), None) | (None, Some((_, &ch))) => Some(ch),
                (None, None) => None,
            },
        };

        found.ok_or(AsciiError::InvalidBrightnessQuery { brightness, policy })
    }

    fn measure(&mut self, ch: char) -> f64 {
        let raster = &self.raster;
        *self.measured.entry(ch).or_insert_with(|| raster.rasterize(ch).coverage())
    }

    // Full O(n) rebuild; the active set never exceeds a few hundred entries.
    fn rebuild_index(&mut self) {
        self.index.clear();

        let min = self.raw.values().copied().fold(f64::INFINITY, f64::min);
        let max = self.raw.values().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        // Ascending code point order, so the lowest character claims a shared key.
        for (&ch, &raw) in &self.raw {
            let normalized = if span > 0.0 { (raw - min) / span } else { 0.0 };
            self.index.entry(BrightnessKey(normalized)).or_insert(ch);
        }

        debug!(
            "rebuilt brightness index: {} characters, {} distinct keys",
            self.raw.len(),
            self.index.len()
        );
    }
}
