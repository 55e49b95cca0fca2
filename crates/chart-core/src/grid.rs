// File: crates/chart-core/src/grid.rs
// Summary: Tick layout helpers: "nice" steps, tick positions and label formatting.

/// Round `span / target` to 1, 2 or 5 times a power of ten.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span.abs() / target.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Tick values inside `[min, max]` at a nice step, roughly `target` of them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Vec::new();
    }
    let step = nice_step(max - min, target);
    let first = (min / step).ceil() * step;
    let eps = step * 1e-9;
    let mut ticks = Vec::new();
    for i in 0.. {
        let t = first + step * i as f64;
        if t > max + eps || ticks.len() > 64 {
            break;
        }
        // snap -0.000000001 style noise to zero
        ticks.push(if t.abs() < eps { 0.0 } else { t });
    }
    ticks
}

/// Format a tick with just enough decimals for its step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).clamp(0.0, 6.0) as usize
    } else {
        0
    };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_one_two_five() {
        assert_eq!(nice_step(10.0, 10), 1.0);
        assert_eq!(nice_step(10.0, 5), 2.0);
        assert_eq!(nice_step(100.0, 4), 20.0);
        assert!((nice_step(1.0, 4) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn ticks_cover_range() {
        let t = nice_ticks(0.0, 10.0, 5);
        assert_eq!(t, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!(nice_ticks(1.0, 1.0, 5).is_empty());
        assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(2.0, 1.0), "2");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(1500.0, 500.0), "1500");
    }
}
