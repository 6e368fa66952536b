//! Seeded particle field and its proximity connection graph.
//!
//! Attributes are kept as flat parallel arrays (3 floats per position and
//! colour, 1 per size) so they can be uploaded to vertex buffers as-is.

use crate::constants::{
    BLUE_LEVEL, GREEN_RATIO, INTENSITY_BASE, INTENSITY_SPAN, LINE_COLOR, MIN_PARTICLE_SIZE,
};
use crate::rng::SeededSequence;
use crate::tier::QualityTier;
use glam::Vec3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub sizes: Vec<f32>,
}

impl ParticleField {
    /// Lay out `tier.particle_count` particles from `seed`.
    ///
    /// Draw order per particle is x, y, z, colour intensity, size. Identical
    /// seed and tier always produce identical arrays.
    pub fn generate(seed: u32, tier: &QualityTier) -> Self {
        let n = tier.particle_count;
        let mut rng = SeededSequence::new(seed);
        let mut positions = Vec::with_capacity(n * 3);
        let mut colors = Vec::with_capacity(n * 3);
        let mut sizes = Vec::with_capacity(n);

        let xy = tier.xy_range as f64;
        let z = tier.z_range as f64;
        for _ in 0..n {
            positions.push(((rng.next_unit() - 0.5) * xy) as f32);
            positions.push(((rng.next_unit() - 0.5) * xy) as f32);
            positions.push(((rng.next_unit() - 0.5) * z) as f32);

            let intensity = INTENSITY_BASE + rng.next_unit() * INTENSITY_SPAN;
            colors.push(intensity as f32);
            colors.push((intensity * GREEN_RATIO) as f32);
            colors.push(BLUE_LEVEL);

            sizes.push((rng.next_unit() * tier.size_span as f64 + MIN_PARTICLE_SIZE) as f32);
        }

        Self {
            positions,
            colors,
            sizes,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let i = index * 3;
        Vec3::new(
            self.positions[i],
            self.positions[i + 1],
            self.positions[i + 2],
        )
    }

    /// Euclidean distance between two stored particles, computed in f64 from
    /// the stored f32 coordinates.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let (ia, ib) = (a * 3, b * 3);
        let dx = self.positions[ia] as f64 - self.positions[ib] as f64;
        let dy = self.positions[ia + 1] as f64 - self.positions[ib + 1] as f64;
        let dz = self.positions[ia + 2] as f64 - self.positions[ib + 2] as f64;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Unordered particle pair closer than the cutoff. Always `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: u32,
    pub b: u32,
    pub distance: f32,
    /// `(1 - distance / cutoff) * tier line alpha`
    pub opacity: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionGraph {
    pub connections: Vec<Connection>,
}

impl ConnectionGraph {
    /// O(n²) sweep over all pairs; pairs at or beyond `cutoff` are skipped.
    pub fn build(field: &ParticleField, cutoff: f32, alpha_scale: f32) -> Self {
        let mut connections = Vec::new();
        if cutoff <= 0.0 {
            return Self { connections };
        }
        let cutoff = cutoff as f64;
        let n = field.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = field.distance(i, j);
                if d < cutoff {
                    let alpha = 1.0 - d / cutoff;
                    connections.push(Connection {
                        a: i as u32,
                        b: j as u32,
                        distance: d as f32,
                        opacity: (alpha * alpha_scale as f64) as f32,
                    });
                }
            }
        }
        Self { connections }
    }

    /// Graph for the tier, or an empty graph when the tier disables links.
    pub fn for_tier(field: &ParticleField, tier: &QualityTier) -> Self {
        if !tier.connections {
            return Self::default();
        }
        Self::build(field, tier.connection_distance, tier.line_alpha)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Two endpoints per connection, 3 floats each.
    pub fn line_positions(&self, field: &ParticleField) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.connections.len() * 6);
        for c in &self.connections {
            out.extend_from_slice(&field.position(c.a as usize).to_array());
            out.extend_from_slice(&field.position(c.b as usize).to_array());
        }
        out
    }

    /// Two endpoints per connection, RGBA each; both ends share the opacity.
    pub fn line_colors(&self) -> Vec<f32> {
        let [r, g, b] = LINE_COLOR;
        let mut out = Vec::with_capacity(self.connections.len() * 8);
        for c in &self.connections {
            out.extend_from_slice(&[r, g, b, c.opacity, r, g, b, c.opacity]);
        }
        out
    }
}
