use crate::data::model::{Dataset, Feature, Record};

// ---------------------------------------------------------------------------
// Orthographic 3D → 2D projection for the 3D scatter
// ---------------------------------------------------------------------------

/// Viewing angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation about the vertical (z) axis.
    pub yaw: f64,
    /// Tilt about the screen-horizontal axis, applied after yaw.
    pub pitch: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            yaw: 35f64.to_radians(),
            pitch: 20f64.to_radians(),
        }
    }
}

/// A point on screen plus its depth (larger is nearer the viewer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl Camera {
    /// Project a point already normalised to `[-1, 1]` on each axis.
    ///
    /// With zero yaw and pitch, `(x, y, z)` maps to screen `(x, z)`.
    pub fn project(&self, p: [f64; 3]) -> Projected {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let x1 = p[0] * cy - p[1] * sy;
        let y1 = p[0] * sy + p[1] * cy;
        let z1 = p[2];

        let y2 = y1 * cp - z1 * sp;
        let z2 = y1 * sp + z1 * cp;

        Projected {
            x: x1,
            y: z2,
            depth: -y2,
        }
    }
}

/// Maps records of a dataset into the `[-1, 1]` cube over three features.
///
/// Scaling uses the whole dataset's bounds so filtering never moves the
/// remaining points.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    axes: [Feature; 3],
    offset: [f64; 3],
    scale: [f64; 3],
}

impl Normalizer {
    pub fn new(dataset: &Dataset, axes: [Feature; 3]) -> Self {
        let mut offset = [0.0; 3];
        let mut scale = [1.0; 3];
        for (i, &feature) in axes.iter().enumerate() {
            let b = dataset.bounds(feature);
            offset[i] = (b.min + b.max) / 2.0;
            let half = b.span() / 2.0;
            scale[i] = if half > 0.0 { 1.0 / half } else { 1.0 };
        }
        Normalizer {
            axes,
            offset,
            scale,
        }
    }

    pub fn axes(&self) -> [Feature; 3] {
        self.axes
    }

    pub fn normalize(&self, record: &Record) -> [f64; 3] {
        std::array::from_fn(|i| (record.get(self.axes[i]) - self.offset[i]) * self.scale[i])
    }
}
