use eframe::egui::Color32;

use crate::deck::{ColorTag, MapMode};
use crate::highlight::RegionState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Fill and outline for one region marking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStyle {
    pub fill: Color32,
    pub stroke: Color32,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub alert: Color32,
    pub panel_background: Color32,
    pub region_default: Color32,
    pub region_stroke: Color32,
    pub region_visited: Color32,
    pub title_size: f32,
    pub heading_size: f32,
    pub subheading_size: f32,
    pub body_size: f32,
    pub caption_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: Color32::from_rgb(0x0B, 0x0F, 0x19),
            foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0xF9, 0x73, 0x16),
            alert: Color32::from_rgb(0xEF, 0x44, 0x44),
            panel_background: Color32::from_rgb(0x17, 0x1D, 0x2B),
            region_default: Color32::from_rgb(0x33, 0x3B, 0x4D),
            region_stroke: Color32::from_rgb(0x0B, 0x0F, 0x19),
            region_visited: Color32::from_rgb(0x7C, 0x5A, 0x3A),
            title_size: 112.0,
            heading_size: 64.0,
            subheading_size: 34.0,
            body_size: 30.0,
            caption_size: 20.0,
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: Color32::from_rgb(0xF8, 0xF6, 0xF1),
            foreground: Color32::from_rgb(0x1F, 0x29, 0x37),
            heading_color: Color32::from_rgb(0x11, 0x18, 0x27),
            accent: Color32::from_rgb(0xC2, 0x41, 0x0C),
            alert: Color32::from_rgb(0xDC, 0x26, 0x26),
            panel_background: Color32::from_rgb(0xEC, 0xE8, 0xDF),
            region_default: Color32::from_rgb(0xD6, 0xD3, 0xCB),
            region_stroke: Color32::WHITE,
            region_visited: Color32::from_rgb(0xF2, 0xB8, 0x8C),
            title_size: 112.0,
            heading_size: 64.0,
            subheading_size: 34.0,
            body_size: 30.0,
            caption_size: 20.0,
        }
    }

    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn toggled(&self) -> Self {
        Self::from_mode(self.mode.toggled())
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Solid color for a content color tag. Same in both modes so chart
    /// legends stay recognisable across a theme switch.
    pub fn tag_color(&self, tag: ColorTag) -> Color32 {
        match tag {
            ColorTag::Red => Color32::from_rgb(0xDC, 0x26, 0x26),
            ColorTag::Orange => Color32::from_rgb(0xEA, 0x58, 0x0C),
            ColorTag::Amber => Color32::from_rgb(0xD9, 0x77, 0x06),
            ColorTag::Green => Color32::from_rgb(0x16, 0xA3, 0x4A),
            ColorTag::Teal => Color32::from_rgb(0x0D, 0x94, 0x88),
            ColorTag::Blue => Color32::from_rgb(0x25, 0x63, 0xEB),
            ColorTag::Indigo => Color32::from_rgb(0x4F, 0x46, 0xE5),
            ColorTag::Purple => Color32::from_rgb(0x93, 0x33, 0xEA),
            ColorTag::Slate => Color32::from_rgb(0x47, 0x55, 0x69),
        }
    }

    pub fn region_style(&self, state: RegionState, mode: MapMode) -> RegionStyle {
        match state {
            RegionState::Default => RegionStyle {
                fill: self.region_default,
                stroke: self.region_stroke,
            },
            RegionState::Visited => RegionStyle {
                fill: self.region_visited,
                stroke: self.region_stroke,
            },
            RegionState::Active => RegionStyle {
                fill: self.active_region_fill(mode),
                stroke: self.heading_color,
            },
        }
    }

    fn active_region_fill(&self, mode: MapMode) -> Color32 {
        match mode {
            MapMode::Concentration => self.accent,
            MapMode::Northeast => self.tag_color(ColorTag::Teal),
            MapMode::Crisis => self.alert,
        }
    }
}

/// `#rrggbb` form of a color, for style sheets.
pub fn css_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
        assert_eq!(Theme::dark().toggled().mode, ThemeMode::Light);
    }

    #[test]
    fn mode_names() {
        assert_eq!(ThemeMode::from_name("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_name("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_name("sepia"), None);
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn region_styles_are_distinct() {
        let theme = Theme::dark();
        let default = theme.region_style(RegionState::Default, MapMode::Crisis);
        let visited = theme.region_style(RegionState::Visited, MapMode::Crisis);
        let active = theme.region_style(RegionState::Active, MapMode::Crisis);
        assert_ne!(default.fill, visited.fill);
        assert_ne!(visited.fill, active.fill);
        assert_eq!(active.fill, theme.alert);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(css_hex(Color32::from_rgb(0xEA, 0x58, 0x0C)), "#ea580c");
    }
}
