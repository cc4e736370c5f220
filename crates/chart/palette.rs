use plotters::style::RGBColor;

/// `0xRRGGBB` as a colour.
pub const fn rgb(code: u32) -> RGBColor {
    RGBColor((code >> 16) as u8, (code >> 8) as u8, code as u8)
}

const VIRIDIS: [(f64, RGBColor); 5] = [
    (0.0, rgb(0x440154)),
    (0.25, rgb(0x3b528b)),
    (0.5, rgb(0x21918c)),
    (0.75, rgb(0x5ec962)),
    (1.0, rgb(0xfde725)),
];

const COOLWARM: [(f64, RGBColor); 3] = [
    (0.0, rgb(0x3b4cc0)),
    (0.5, rgb(0xdddddd)),
    (1.0, rgb(0xb40426)),
];

pub fn viridis(t: f64) -> RGBColor {
    interpolate(&VIRIDIS, t)
}

pub fn coolwarm(t: f64) -> RGBColor {
    interpolate(&COOLWARM, t)
}

/// `n` colours at evenly spaced interior points of a colour map; both ends are left out.
pub fn spread(n: usize, map: fn(f64) -> RGBColor) -> Vec<RGBColor> {
    let bins = (n + 1) as f64;
    (1..=n).map(|i| map(i as f64 / bins)).collect()
}

fn interpolate(stops: &[(f64, RGBColor)], t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            return RGBColor(mix(c0.0, c1.0, f), mix(c0.1, c1.1, f), mix(c0.2, c1.2, f));
        }
    }
    stops[stops.len() - 1].1
}

fn mix(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xd73027), RGBColor(0xd7, 0x30, 0x27));
        assert_eq!(rgb(0x000000), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), rgb(0x440154));
        assert_eq!(viridis(1.0), rgb(0xfde725));
        assert_eq!(viridis(7.0), rgb(0xfde725));
        assert_eq!(coolwarm(-1.0), rgb(0x3b4cc0));
        assert_eq!(coolwarm(f64::NAN), rgb(0x3b4cc0));
        assert_eq!(coolwarm(0.5), rgb(0xdddddd));
    }

    #[test]
    fn test_interpolates_between_stops() {
        let mid = coolwarm(0.25);
        assert_eq!(mid, RGBColor(0x8c, 0x95, 0xcf));
    }

    #[test]
    fn test_spread() {
        assert!(spread(0, viridis).is_empty());
        assert_eq!(spread(1, viridis), vec![viridis(0.5)]);
        let three = spread(3, viridis);
        assert_eq!(three, vec![viridis(0.25), viridis(0.5), viridis(0.75)]);
        let four = spread(4, coolwarm);
        assert_eq!(four.len(), 4);
        assert_eq!(four[0], coolwarm(0.2));
        assert_eq!(four[3], coolwarm(0.8));
    }
}
