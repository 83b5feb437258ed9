//! # Motion Decoder
//!
//! Converts a stream of absolute angle samples into filtered, wrap-corrected
//! relative scroll deltas.
//!
//! ## Algorithm
//!
//! Each accepted sample moves a remembered reference angle forward; the
//! reported delta is the wrap-corrected difference from that reference,
//! scaled to scroll clicks:
//!
//! 1. First sample after boot establishes the reference, reports nothing.
//! 2. Differences below the jitter threshold are suppressed *without*
//!    touching the reference, so sub-threshold motion accumulates across
//!    polls and is reported in full once it crosses the threshold. Net
//!    motion is delayed, never lost.
//! 3. A difference larger than the maximum physically plausible rotation
//!    per poll is a 0/360 wrap and gets corrected by ±360.
//!
//! ## Usage
//!
//! ```
//! use scroll_wheel::sensor::MotionDecoder;
//!
//! let mut decoder = MotionDecoder::new(0.5, 180.0, 1.0);
//!
//! assert_eq!(decoder.decode(30.0), 0); // first sample: baseline only
//! assert_eq!(decoder.decode(30.3), 0); // below threshold: suppressed
//! assert_eq!(decoder.decode(31.0), 1); // cumulative 1.0 degree reported
//! ```

/// Decodes absolute angles into relative scroll deltas.
///
/// Owns the last-seen angle reference; the reference is updated only on
/// accepted (non-suppressed) samples.
#[derive(Debug, Clone)]
pub struct MotionDecoder {
    /// Last accepted angle in degrees, `None` until the first sample
    reference: Option<f32>,
    /// Minimum angular change (degrees) treated as real motion
    jitter_threshold: f32,
    /// Largest plausible rotation (degrees) between consecutive polls
    max_rotation_per_read: f32,
    /// Scale factor from degrees to scroll clicks
    scroll_multiplier: f32,
}

impl MotionDecoder {
    /// Creates a decoder with an uninitialized reference.
    ///
    /// # Arguments
    ///
    /// * `jitter_threshold` - Degrees below which motion is suppressed
    /// * `max_rotation_per_read` - Degrees beyond which a difference is a wrap
    /// * `scroll_multiplier` - Degrees-to-clicks scale factor
    #[must_use]
    pub fn new(jitter_threshold: f32, max_rotation_per_read: f32, scroll_multiplier: f32) -> Self {
        Self {
            reference: None,
            jitter_threshold,
            max_rotation_per_read,
            scroll_multiplier,
        }
    }

    /// Decodes one absolute angle sample (degrees) into a scroll delta.
    ///
    /// Returns 0 for the baseline-establishing first sample and for
    /// sub-threshold motion; otherwise the rounded, scaled, wrap-corrected
    /// difference from the reference.
    pub fn decode(&mut self, current_angle_degrees: f32) -> i32 {
        // First sample after boot establishes the baseline
        let Some(reference) = self.reference else {
            self.reference = Some(current_angle_degrees);
            return 0;
        };

        let mut diff = current_angle_degrees - reference;

        // Sub-threshold motion accumulates against the stale reference.
        // Exact boundary |diff| == threshold is not suppressed.
        if diff.abs() < self.jitter_threshold {
            return 0;
        }

        // Wrap-around at the 0/360 boundary. The wheel cannot physically
        // rotate more than max_rotation_per_read between polls.
        if diff > self.max_rotation_per_read {
            diff -= 360.0;
        } else if diff < -self.max_rotation_per_read {
            diff += 360.0;
        }

        self.reference = Some(current_angle_degrees);

        (diff * self.scroll_multiplier).round() as i32
    }

    /// Decodes one raw sensor sample in `[0, ANGLE_RESOLUTION)`.
    pub fn decode_raw(&mut self, raw: u16) -> i32 {
        self.decode(super::angle::raw_to_degrees(raw))
    }

    /// Returns the current reference angle, if one has been established.
    #[must_use]
    pub fn reference(&self) -> Option<f32> {
        self.reference
    }
}
