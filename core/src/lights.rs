use rand::Rng;

pub const LIGHT_HUES: [u32; 9] = [10, 28, 50, 110, 140, 190, 220, 300, 340];

const X_RANGE: std::ops::Range<f64> = 6.0..94.0;
const Y_RANGE: std::ops::Range<f64> = 8.0..92.0;
const SIZE_RANGE: std::ops::Range<f64> = 100.0..180.0;
const SPEED_RANGE: std::ops::Range<f64> = 5.5..9.5;
const INITIAL_DELAY_MAX: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightParams {
    pub x_pct: f64,
    pub y_pct: f64,
    pub size_px: u32,
    pub hue: u32,
    pub speed_s: f64,
    pub delay_s: f64,
}

impl LightParams {
    // negative delay staggers only the first iteration
    pub fn random<R: Rng + ?Sized>(rng: &mut R, initial: bool) -> Self {
        let hue = LIGHT_HUES[rng.random_range(0..LIGHT_HUES.len())];
        let delay_s = if initial {
            -rng.random_range(0.0..INITIAL_DELAY_MAX)
        } else {
            0.0
        };
        Self {
            x_pct: rng.random_range(X_RANGE),
            y_pct: rng.random_range(Y_RANGE),
            size_px: rng.random_range(SIZE_RANGE).round() as u32,
            hue,
            speed_s: rng.random_range(SPEED_RANGE),
            delay_s,
        }
    }

    pub fn css_vars(&self) -> [(&'static str, String); 6] {
        let delay = if self.delay_s == 0.0 {
            "0s".to_string()
        } else {
            format!("{:.2}s", self.delay_s)
        };
        [
            ("--x", format!("{:.1}%", self.x_pct)),
            ("--y", format!("{:.1}%", self.y_pct)),
            ("--size", format!("{}px", self.size_px)),
            ("--hue", self.hue.to_string()),
            ("--speed", format!("{:.2}s", self.speed_s)),
            ("--delay", delay),
        ]
    }
}
