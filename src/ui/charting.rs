use crate::session::WpmSample;

/// `(seconds, wpm)` points for the results chart.
pub fn chart_points(samples: &[WpmSample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| (s.elapsed_secs as f64, s.wpm as f64))
        .collect()
}

/// X (seconds) and Y (WPM) upper bounds for the results chart.
///
/// With no samples the x axis spans `elapsed_secs`; both axes are at least 1
/// wide so the chart never collapses.
pub fn compute_chart_params(points: &[(f64, f64)], elapsed_secs: u64) -> (f64, f64) {
    let highest_wpm = points.iter().map(|&(_, wpm)| wpm).fold(0.0, f64::max);
    let duration = points
        .last()
        .map(|&(t, _)| t)
        .unwrap_or(elapsed_secs as f64);

    (duration.max(1.0), highest_wpm.round().max(1.0))
}

pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_params_without_samples() {
        let (x, y) = compute_chart_params(&[], 5);
        assert_eq!(x, 5.0);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn test_chart_params_from_samples() {
        let samples = [
            WpmSample {
                elapsed_secs: 1,
                wpm: 40,
            },
            WpmSample {
                elapsed_secs: 2,
                wpm: 72,
            },
            WpmSample {
                elapsed_secs: 3,
                wpm: 65,
            },
        ];
        let points = chart_points(&samples);
        assert_eq!(points[1], (2.0, 72.0));
        assert_eq!(compute_chart_params(&points, 99), (3.0, 72.0));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(30.0), "30");
        assert_eq!(format_label(1.26), "1.3");
    }
}
