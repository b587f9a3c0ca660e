//! Magnitude-response curve of a filter chain, one point per pixel column.
//!
//! The horizontal axis is logarithmic in frequency, the vertical axis
//! linear in dB. [`ResponseCurve::compute`] evaluates the chain once per
//! column and keeps both the raw magnitudes and the screen-space polyline.

use zeroeq_core::{FilterChain, MAX_FREQUENCY, MIN_FREQUENCY, log_interpolate, log_position, map_range};

use crate::sink::CurveSink;

/// Plot geometry: pixel size plus the frequency and dB ranges it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveLayout {
    /// Number of pixel columns (one curve point each).
    pub width: usize,
    /// Plot height in pixels.
    pub height: f32,
    /// dB value at the bottom edge.
    pub min_db: f32,
    /// dB value at the top edge.
    pub max_db: f32,
    /// Frequency at column 0.
    pub min_freq: f32,
    /// Frequency at column `width`.
    pub max_freq: f32,
}

impl Default for CurveLayout {
    fn default() -> Self {
        Self {
            width: 600,
            height: 200.0,
            min_db: -24.0,
            max_db: 24.0,
            min_freq: MIN_FREQUENCY,
            max_freq: MAX_FREQUENCY,
        }
    }
}

impl CurveLayout {
    /// Layout of `width` × `height` pixels with the default axes.
    pub fn new(width: usize, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Sets the dB range shown.
    pub fn with_db_range(mut self, min_db: f32, max_db: f32) -> Self {
        self.min_db = min_db;
        self.max_db = max_db;
        self
    }

    /// Sets the frequency range shown.
    pub fn with_freq_range(mut self, min_freq: f32, max_freq: f32) -> Self {
        self.min_freq = min_freq;
        self.max_freq = max_freq;
        self
    }

    /// Frequency under column `x`: `min_freq * (max_freq / min_freq)^(x / width)`.
    ///
    /// ```rust
    /// use zeroeq_editor::CurveLayout;
    ///
    /// let layout = CurveLayout::new(300, 100.0);
    /// assert_eq!(layout.column_to_freq(0.0), 20.0);
    /// assert!((layout.column_to_freq(100.0) - 200.0).abs() < 0.01);
    /// ```
    pub fn column_to_freq(&self, x: f32) -> f32 {
        if self.width == 0 {
            return self.min_freq;
        }
        log_interpolate(self.min_freq, self.max_freq, x / self.width as f32)
    }

    /// Column position of `freq_hz`, the inverse of [`column_to_freq`](Self::column_to_freq).
    pub fn freq_to_x(&self, freq_hz: f32) -> f32 {
        log_position(self.min_freq, self.max_freq, freq_hz) * self.width as f32
    }

    /// Vertical pixel for `db`: `max_db` maps to 0, `min_db` to `height`.
    ///
    /// Values outside the dB range are pinned to the edges.
    pub fn db_to_y(&self, db: f32) -> f32 {
        let db = if db.is_nan() {
            self.min_db
        } else {
            db.clamp(self.min_db.min(self.max_db), self.max_db.max(self.min_db))
        };
        map_range(db, self.min_db, self.max_db, self.height, 0.0)
    }

    /// Inverse of [`db_to_y`](Self::db_to_y) for in-range pixels.
    pub fn y_to_db(&self, y: f32) -> f32 {
        map_range(y, self.height, 0.0, self.min_db, self.max_db)
    }
}

/// One evaluated column of the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Column index, as a pixel coordinate.
    pub x: f32,
    /// Vertical pixel, clamped into the plot.
    pub y: f32,
    /// Frequency evaluated at this column.
    pub freq_hz: f32,
    /// Unclamped chain magnitude in dB.
    pub magnitude_db: f64,
}

/// The chain's response over a [`CurveLayout`], recomputed as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseCurve {
    layout: CurveLayout,
    points: Vec<CurvePoint>,
    polyline: Vec<[f32; 2]>,
}

impl ResponseCurve {
    /// Evaluates `chain` at every column of `layout`.
    ///
    /// ```rust
    /// use zeroeq_core::{ChainSettings, FilterChain};
    /// use zeroeq_editor::{CurveLayout, ResponseCurve};
    ///
    /// let chain = FilterChain::new(&ChainSettings::default(), 48000.0);
    /// let curve = ResponseCurve::compute(&chain, &CurveLayout::new(128, 64.0));
    /// assert_eq!(curve.points().len(), 128);
    /// ```
    pub fn compute(chain: &FilterChain, layout: &CurveLayout) -> Self {
        let points: Vec<CurvePoint> = (0..layout.width)
            .map(|column| {
                let x = column as f32;
                let freq_hz = layout.column_to_freq(x);
                let magnitude_db = chain.magnitude_db_at(f64::from(freq_hz));
                CurvePoint {
                    x,
                    y: layout.db_to_y(magnitude_db as f32),
                    freq_hz,
                    magnitude_db,
                }
            })
            .collect();
        let polyline = points.iter().map(|p| [p.x, p.y]).collect();
        Self {
            layout: *layout,
            points,
            polyline,
        }
    }

    /// Empty curve for `layout`, shown before the first rebuild.
    pub fn empty(layout: &CurveLayout) -> Self {
        Self {
            layout: *layout,
            points: Vec::new(),
            polyline: Vec::new(),
        }
    }

    /// Evaluated columns, left to right.
    #[inline]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Screen-space `[x, y]` pairs.
    #[inline]
    pub fn polyline(&self) -> &[[f32; 2]] {
        &self.polyline
    }

    /// Raw magnitudes in dB, left to right.
    pub fn magnitudes_db(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.magnitude_db)
    }

    /// Layout this curve was computed for.
    #[inline]
    pub fn layout(&self) -> &CurveLayout {
        &self.layout
    }

    /// Column with the highest magnitude, or `None` for an empty curve.
    pub fn peak_point(&self) -> Option<&CurvePoint> {
        self.points
            .iter()
            .max_by(|a, b| a.magnitude_db.total_cmp(&b.magnitude_db))
    }

    /// Hands the polyline to a rendering backend.
    pub fn render_to(&self, sink: &mut dyn CurveSink) {
        sink.polyline(&self.polyline);
    }
}
