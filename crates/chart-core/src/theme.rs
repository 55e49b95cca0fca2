// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors, including the per-series palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub crosshair: skia::Color,
    pub legend_fill: skia::Color,
    /// Line colors, cycled by series index.
    pub palette: [skia::Color; 8],
}

// Plotly-like qualitative palette, readable on dark and light backgrounds.
const QUALITATIVE: [skia::Color; 8] = [
    skia::Color::from_argb(255, 0x63, 0x6e, 0xfa),
    skia::Color::from_argb(255, 0xef, 0x55, 0x3b),
    skia::Color::from_argb(255, 0x00, 0xcc, 0x96),
    skia::Color::from_argb(255, 0xab, 0x63, 0xfa),
    skia::Color::from_argb(255, 0xff, 0xa1, 0x5a),
    skia::Color::from_argb(255, 0x19, 0xd3, 0xf3),
    skia::Color::from_argb(255, 0xff, 0x66, 0x92),
    skia::Color::from_argb(255, 0xb6, 0xe8, 0x80),
];

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            crosshair: skia::Color::from_argb(255, 255, 230, 70),
            legend_fill: skia::Color::from_argb(200, 28, 28, 32),
            palette: QUALITATIVE,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            crosshair: skia::Color::from_argb(255, 30, 120, 240),
            legend_fill: skia::Color::from_argb(210, 255, 255, 255),
            palette: QUALITATIVE,
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            grid: skia::Color::from_argb(255, 0x07, 0x36, 0x42),       // base02
            axis_line: skia::Color::from_argb(255, 0x93, 0xa1, 0xa1),  // base1
            axis_label: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5), // base2
            tick: skia::Color::from_argb(255, 0x83, 0x94, 0x96),       // base0
            crosshair: skia::Color::from_argb(255, 0xb5, 0x89, 0x00),  // yellow
            legend_fill: skia::Color::from_argb(200, 0x07, 0x36, 0x42),
            palette: Self::solarized_accents(),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: skia::Color::from_argb(255, 0xfd, 0xf6, 0xe3), // base3
            grid: skia::Color::from_argb(255, 0xee, 0xe8, 0xd5),       // base2
            axis_line: skia::Color::from_argb(255, 0x65, 0x7b, 0x83),  // base00
            axis_label: skia::Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            tick: skia::Color::from_argb(255, 0x58, 0x6e, 0x75),       // base01
            crosshair: skia::Color::from_argb(255, 0xcb, 0x4b, 0x16),  // orange
            legend_fill: skia::Color::from_argb(210, 0xfd, 0xf6, 0xe3),
            palette: Self::solarized_accents(),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            crosshair: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            legend_fill: skia::Color::from_argb(230, 0x00, 0x00, 0x00),
            palette: [
                skia::Color::from_argb(255, 0x00, 0xff, 0xff),
                skia::Color::from_argb(255, 0xff, 0x00, 0xff),
                skia::Color::from_argb(255, 0xff, 0xff, 0x00),
                skia::Color::from_argb(255, 0x00, 0xff, 0x00),
                skia::Color::from_argb(255, 0xff, 0x80, 0x00),
                skia::Color::from_argb(255, 0x80, 0x80, 0xff),
                skia::Color::from_argb(255, 0xff, 0x40, 0x40),
                skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            ],
        }
    }

    fn solarized_accents() -> [skia::Color; 8] {
        [
            skia::Color::from_argb(255, 0x26, 0x8b, 0xd2), // blue
            skia::Color::from_argb(255, 0xdc, 0x32, 0x2f), // red
            skia::Color::from_argb(255, 0x85, 0x99, 0x00), // green
            skia::Color::from_argb(255, 0xd3, 0x36, 0x82), // magenta
            skia::Color::from_argb(255, 0xcb, 0x4b, 0x16), // orange
            skia::Color::from_argb(255, 0x2a, 0xa1, 0x98), // cyan
            skia::Color::from_argb(255, 0x6c, 0x71, 0xc4), // violet
            skia::Color::from_argb(255, 0xb5, 0x89, 0x00), // yellow
        ]
    }

    /// Line color for the `index`-th series.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

/// CSS hex string (`#rrggbb`) for a color, alpha dropped.
pub fn css_hex(color: skia::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a preset by name, case-insensitively.
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Preset names, for CLI help and error messages.
pub fn names() -> Vec<&'static str> {
    presets().iter().map(|t| t.name).collect()
}
