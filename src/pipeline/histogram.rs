use serde::Serialize;

/// Default bin cap, matching the usual charting default.
pub const DEFAULT_MAX_BINS: usize = 10;

const STEP_MULTIPLIERS: [f64; 3] = [1.0, 2.0, 5.0];

/// One histogram bar. Covers `[start, end)`, except the last bin which also includes `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over a numeric extract, with edges on multiples of `step`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub step: f64,
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bins `values` into at most `max_bins` bins of a "nice" width
    /// (1, 2 or 5 times a power of ten). Non-finite values are ignored.
    pub fn from_values(values: &[f64], max_bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Self::default();
        }

        let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if lo == hi {
            let start = lo.floor();
            return Self {
                step: 1.0,
                bins: vec![Bin {
                    start,
                    end: start + 1.0,
                    count: finite.len(),
                }],
            };
        }

        let Some(step) = nice_step(lo, hi, max_bins.max(1)) else {
            // No finite nice step fits; cover the whole extent with one bin.
            let (start, end) = (lo.floor(), hi.ceil());
            return Self {
                step: end - start,
                bins: vec![Bin {
                    start,
                    end,
                    count: finite.len(),
                }],
            };
        };
        let start = (lo / step).floor() * step;
        let n = bin_count(lo, hi, step);

        let mut bins: Vec<Bin> = (0..n)
            .map(|i| Bin {
                start: start + i as f64 * step,
                end: start + (i + 1) as f64 * step,
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = (((v - start) / step).floor() as usize).min(n - 1);
            bins[idx].count += 1;
        }

        Self { step, bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

fn bin_count(lo: f64, hi: f64, step: f64) -> usize {
    let first = (lo / step).floor();
    let last = (hi / step).ceil();
    ((last - first) as usize).max(1)
}

/// Smallest nice step that fits `[lo, hi]` into `max_bins` bins.
///
/// `None` when no finite step fits, e.g. one bin for values on both sides of
/// zero, since edges are always aligned to multiples of the step.
fn nice_step(lo: f64, hi: f64, max_bins: usize) -> Option<f64> {
    let span = hi - lo;
    let mut magnitude = 10f64.powf((span / max_bins as f64).log10().floor());

    while magnitude.is_finite() {
        for m in STEP_MULTIPLIERS {
            let step = m * magnitude;
            if !step.is_finite() {
                return None;
            }
            if bin_count(lo, hi, step) <= max_bins {
                return Some(step);
            }
        }
        magnitude *= 10.0;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::from_values(&[], DEFAULT_MAX_BINS);
        assert!(histogram.is_empty());
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn test_single_value() {
        let histogram = Histogram::from_values(&[24.0, 24.0, 24.0], DEFAULT_MAX_BINS);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].count, 3);
        assert_eq!(histogram.bins[0].start, 24.0);
    }

    #[test]
    fn test_unit_step_for_small_span() {
        let histogram = Histogram::from_values(&[23.0, 31.0], DEFAULT_MAX_BINS);
        assert_eq!(histogram.step, 1.0);
        assert_eq!(histogram.bins.len(), 8);
        assert_eq!(histogram.bins[0].start, 23.0);
        assert_eq!(histogram.bins[0].count, 1);
        // The maximum lands in the closed last bin.
        assert_eq!(histogram.bins[7].end, 31.0);
        assert_eq!(histogram.bins[7].count, 1);
    }

    #[test]
    fn test_nice_step_for_wide_span() {
        // Heights between 127 and 226 need steps of 20 to fit in 10 bins.
        let histogram = Histogram::from_values(&[127.0, 170.0, 180.0, 226.0], DEFAULT_MAX_BINS);
        assert_eq!(histogram.step, 20.0);
        assert!(histogram.bins.len() <= DEFAULT_MAX_BINS);
        assert_eq!(histogram.bins[0].start, 120.0);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn test_respects_max_bins() {
        let values: Vec<f64> = (10..=97).map(f64::from).collect();
        for max_bins in [1, 3, 5, 10, 20] {
            let histogram = Histogram::from_values(&values, max_bins);
            assert!(histogram.bins.len() <= max_bins, "max_bins={max_bins}");
            assert_eq!(histogram.total(), values.len());
        }
    }

    #[test]
    fn test_single_bin_across_zero() {
        let histogram = Histogram::from_values(&[-1.0, 1.0], 1);
        assert!(histogram.step.is_finite());
        assert_eq!(
            histogram.bins,
            vec![Bin {
                start: -1.0,
                end: 1.0,
                count: 2
            }]
        );

        let histogram = Histogram::from_values(&[-3.5, 0.5, 7.2], 1);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].start, -4.0);
        assert_eq!(histogram.bins[0].end, 8.0);
        assert_eq!(histogram.step, 12.0);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_two_bins_across_zero() {
        let histogram = Histogram::from_values(&[-1.0, 1.0], 2);
        assert_eq!(histogram.bins.len(), 2);
        assert!(histogram.bins.iter().all(|b| b.start.is_finite() && b.end.is_finite()));
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_ignores_non_finite() {
        let histogram = Histogram::from_values(&[1.0, f64::NAN, 3.0, f64::INFINITY], 10);
        assert_eq!(histogram.total(), 2);
    }
}
