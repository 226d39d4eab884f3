use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorSupport::Mono;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub section_title: Color,
    pub cpu_gauge: Color,
    pub memory_gauge: Color,
    pub swap_gauge: Color,
    pub disk_gauge: Color,
    pub gauge_unfilled: Color,
    pub sparkline_color: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub placeholder: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    /// Idle, busy and saturated.
    pub heat_colors: [Color; 3],
}

impl Theme {
    pub fn from_config(theme_name: &str, support: ColorSupport) -> Self {
        let mut theme = if support == ColorSupport::Mono {
            Self::mono()
        } else {
            match theme_name.to_lowercase().as_str() {
                "light" => Self::light(),
                "vivid" => Self::vivid(),
                "mono" => Self::mono(),
                _ => Self::dark(),
            }
        };
        theme.apply_color_support(support);
        theme
    }

    pub fn next(&self, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::from_config("mono", support);
        }
        let next_name = match self.name {
            "dark" => "vivid",
            "vivid" => "light",
            "light" => "mono",
            _ => "dark",
        };
        Theme::from_config(next_name, support)
    }

    /// Color for a utilisation percentage: calm below 50, warm below 85.
    pub fn heat(&self, percent: f32) -> Color {
        if percent >= 85.0 {
            self.heat_colors[2]
        } else if percent >= 50.0 {
            self.heat_colors[1]
        } else {
            self.heat_colors[0]
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.section_title = map(self.section_title);
        self.cpu_gauge = map(self.cpu_gauge);
        self.memory_gauge = map(self.memory_gauge);
        self.swap_gauge = map(self.swap_gauge);
        self.disk_gauge = map(self.disk_gauge);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.sparkline_color = map(self.sparkline_color);
        self.status_ok = map(self.status_ok);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.overlay_border = map(self.overlay_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.placeholder = map(self.placeholder);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.heat_colors = self.heat_colors.map(map);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            section_title: Color::Rgb(96, 165, 250),
            cpu_gauge: Color::Rgb(52, 211, 153),
            memory_gauge: Color::Rgb(250, 204, 21),
            swap_gauge: Color::Rgb(234, 179, 8),
            disk_gauge: Color::Rgb(248, 113, 113),
            gauge_unfilled: Color::DarkGray,
            sparkline_color: Color::Rgb(52, 211, 153),
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            placeholder: Color::DarkGray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            heat_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            section_title: Color::Rgb(29, 78, 216),
            cpu_gauge: Color::Rgb(21, 128, 61),
            memory_gauge: Color::Rgb(161, 98, 7),
            swap_gauge: Color::Rgb(180, 83, 9),
            disk_gauge: Color::Rgb(185, 28, 28),
            gauge_unfilled: Color::Rgb(226, 232, 240),
            sparkline_color: Color::Rgb(21, 128, 61),
            status_ok: Color::Rgb(21, 128, 61),
            status_err: Color::Rgb(185, 28, 28),
            statusbar_bg: Color::Rgb(226, 232, 240),
            overlay_border: Color::Rgb(100, 116, 139),
            text_primary: Color::Black,
            text_secondary: Color::Rgb(71, 85, 105),
            placeholder: Color::Rgb(148, 163, 184),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(241, 245, 249),
            heat_colors: [
                Color::Rgb(21, 128, 61),
                Color::Rgb(194, 65, 12),
                Color::Rgb(185, 28, 28),
            ],
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            header_accent_bg: Color::Rgb(168, 85, 247),
            header_accent_fg: Color::Black,
            section_title: Color::Rgb(56, 189, 248),
            cpu_gauge: Color::Rgb(74, 222, 128),
            memory_gauge: Color::Rgb(253, 224, 71),
            swap_gauge: Color::Rgb(251, 191, 36),
            disk_gauge: Color::Rgb(251, 113, 133),
            gauge_unfilled: Color::Rgb(30, 41, 59),
            sparkline_color: Color::Rgb(244, 114, 182),
            status_ok: Color::Rgb(74, 222, 128),
            status_err: Color::Rgb(251, 113, 133),
            statusbar_bg: Color::Rgb(30, 41, 59),
            overlay_border: Color::Rgb(168, 85, 247),
            text_primary: Color::White,
            text_secondary: Color::Rgb(203, 213, 225),
            placeholder: Color::Rgb(100, 116, 139),
            pill_key_bg: Color::Rgb(168, 85, 247),
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Rgb(30, 41, 59),
            heat_colors: [
                Color::Rgb(74, 222, 128),
                Color::Rgb(251, 146, 60),
                Color::Rgb(244, 63, 94),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            section_title: Color::White,
            cpu_gauge: Color::White,
            memory_gauge: Color::White,
            swap_gauge: Color::White,
            disk_gauge: Color::White,
            gauge_unfilled: Color::Black,
            sparkline_color: Color::White,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            placeholder: Color::DarkGray,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            heat_colors: [Color::Gray, Color::White, Color::White],
        }
    }
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_returns_to_start() {
        let support = ColorSupport::Truecolor;
        let mut theme = Theme::from_config("dark", support);
        let mut seen = vec![theme.name];
        for _ in 0..4 {
            theme = theme.next(support);
            seen.push(theme.name);
        }
        assert_eq!(seen, vec!["dark", "vivid", "light", "mono", "dark"]);
    }

    #[test]
    fn mono_support_forces_mono_theme() {
        let theme = Theme::from_config("vivid", ColorSupport::Mono);
        assert_eq!(theme.name, "mono");
        assert_eq!(theme.next(ColorSupport::Mono).name, "mono");
    }

    #[test]
    fn color256_maps_rgb_to_indexed() {
        let theme = Theme::from_config("dark", ColorSupport::Color256);
        assert!(matches!(theme.cpu_gauge, Color::Indexed(_)));
        assert_eq!(theme.gauge_unfilled, Color::DarkGray);
    }

    #[test]
    fn heat_thresholds() {
        let theme = Theme::dark();
        assert_eq!(theme.heat(10.0), theme.heat_colors[0]);
        assert_eq!(theme.heat(50.0), theme.heat_colors[1]);
        assert_eq!(theme.heat(84.9), theme.heat_colors[1]);
        assert_eq!(theme.heat(85.0), theme.heat_colors[2]);
    }

    #[test]
    fn ansi256_cube_corners() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn unknown_support_string_is_auto() {
        assert_eq!(ColorSupport::from_config_str("weird"), ColorSupport::Auto);
        assert_eq!(ColorSupport::from_config_str("24bit"), ColorSupport::Truecolor);
    }
}
