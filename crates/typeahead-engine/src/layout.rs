// Derive the adjacency map from on-screen key geometry

use typeahead_core::character::simple_lower;

use crate::nearby::NearbyKeys;

/// Key codes that never take part in adjacency: unassigned, backspace,
/// return, alt, caps lock and space.
const SPECIAL_KEYS: [u32; 6] = [0, 8, 13, 18, 20, 32];

/// Keys further apart than this many key radii are not neighbours.
const MAX_DISTANCE: f64 = 2.5;

/// One key's bounding box in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRect {
    /// Character code the key produces.
    pub code: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyRect {
    pub fn new(code: u32, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            code,
            x,
            y,
            width,
            height,
        }
    }

    fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Distance from the centre to a corner.
    fn radius(&self) -> f64 {
        (self.width * self.width / 4.0 + self.height * self.height / 4.0).sqrt()
    }
}

/// The rendered keys of one keyboard layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardLayout {
    pub keys: Vec<KeyRect>,
}

impl KeyboardLayout {
    pub fn new(keys: Vec<KeyRect>) -> Self {
        Self { keys }
    }
}

/// Inverse square distance between two key centres, measured in radii of
/// `from`. Zero for keys that overlap or are too far apart.
fn proximity(from: &KeyRect, to: &KeyRect) -> f64 {
    let (cx1, cy1) = from.center();
    let (cx2, cy2) = to.center();
    let radius = from.radius();
    let dx = (cx1 - cx2) / radius;
    let dy = (cy1 - cy2) / radius;
    let distance_squared = dx * dx + dy * dy;

    if distance_squared < 1.0 {
        tracing::warn!(from = from.code, to = to.code, "keys too close");
        return 0.0;
    }
    if distance_squared > MAX_DISTANCE * MAX_DISTANCE {
        0.0
    } else {
        1.0 / distance_squared
    }
}

fn lowercase_code(code: u32) -> Option<char> {
    char::from_u32(code).map(simple_lower)
}

impl NearbyKeys {
    /// Compute adjacency weights from key geometry.
    ///
    /// Key codes are lowercased first, so shifted layouts produce the same
    /// map. Same-row neighbours of equal-sized keys come out at about 0.5,
    /// keys directly above or below at about 0.25.
    pub fn from_layout(layout: &KeyboardLayout) -> Self {
        let keys: Vec<(char, &KeyRect)> = layout
            .keys
            .iter()
            .filter(|key| !SPECIAL_KEYS.contains(&key.code))
            .filter_map(|key| Some((lowercase_code(key.code)?, key)))
            .collect();

        let mut nearby = NearbyKeys::new();
        for (i, &(c1, key1)) in keys.iter().enumerate() {
            for (j, &(c2, key2)) in keys.iter().enumerate() {
                if i == j {
                    continue;
                }
                nearby.insert(c1, c2, proximity(key1, key2));
            }
        }
        tracing::debug!(
            keys = keys.len(),
            with_neighbors = nearby.len(),
            "adjacency derived from layout"
        );
        nearby
    }
}
