use ratatui::style::{Color, Style};

use super::ColorError;

/// Opaque id of a (foreground, background) pair. `AttrHandle(0)` is the
/// terminal's default colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttrHandle(pub u16);

impl AttrHandle {
    pub const DEFAULT: AttrHandle = AttrHandle(0);
}

/// Allocator of color pairs, bounded like a terminal color-pair table
#[derive(Debug, Clone)]
pub struct Palette {
    pairs: Vec<(Color, Color)>,
    /// Total pairs including the default one
    capacity: usize,
}

impl Palette {
    pub fn new(capacity: usize) -> Self {
        Palette {
            pairs: Vec::new(),
            capacity: capacity.min(usize::from(u16::MAX)),
        }
    }

    /// Handle for a pair, reusing an existing allocation when possible
    pub fn allocate(&mut self, fg: Color, bg: Color) -> Result<AttrHandle, ColorError> {
        if let Some(idx) = self.pairs.iter().position(|&p| p == (fg, bg)) {
            return Ok(handle_for(idx));
        }
        if self.pairs.len() + 1 >= self.capacity {
            return Err(ColorError::PaletteExhausted {
                capacity: self.capacity,
            });
        }
        self.pairs.push((fg, bg));
        Ok(handle_for(self.pairs.len() - 1))
    }

    /// The pair behind a handle, `None` for the default handle
    pub fn pair(&self, handle: AttrHandle) -> Option<(Color, Color)> {
        let idx = usize::from(handle.0).checked_sub(1)?;
        self.pairs.get(idx).copied()
    }

    /// Style to draw a handle with
    pub fn style(&self, handle: AttrHandle) -> Style {
        match self.pair(handle) {
            Some((fg, bg)) => Style::default().fg(fg).bg(bg),
            None => Style::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(64)
    }
}

fn handle_for(idx: usize) -> AttrHandle {
    // capacity is clamped to u16::MAX, so idx + 1 always fits
    AttrHandle(u16::try_from(idx + 1).unwrap_or(u16::MAX))
}

/// Parse a color name: `red`, `brightred`/`bright red`, `0`-`255`,
/// `#RRGGBB`, or `default`/`-1` for the terminal default.
pub fn parse_color(name: &str) -> Result<Color, ColorError> {
    let lower = name.trim().to_ascii_lowercase();
    let (bright, base) = match lower.strip_prefix("bright") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, lower.as_str()),
    };

    let color = match (bright, base) {
        (false, "default" | "-1" | "none") => Color::Reset,
        (false, "black") => Color::Black,
        (false, "red") => Color::Red,
        (false, "green") => Color::Green,
        (false, "yellow") => Color::Yellow,
        (false, "blue") => Color::Blue,
        (false, "magenta") => Color::Magenta,
        (false, "cyan") => Color::Cyan,
        (false, "white") => Color::Gray,
        (true, "black") => Color::DarkGray,
        (true, "red") => Color::LightRed,
        (true, "green") => Color::LightGreen,
        (true, "yellow") => Color::LightYellow,
        (true, "blue") => Color::LightBlue,
        (true, "magenta") => Color::LightMagenta,
        (true, "cyan") => Color::LightCyan,
        (true, "white") => Color::White,
        (false, other) => match other.parse::<u8>() {
            Ok(n) => Color::Indexed(n),
            Err(_) => parse_hex_color(other).ok_or_else(|| ColorError::UnknownColor(name.into()))?,
        },
        _ => return Err(ColorError::UnknownColor(name.into())),
    };
    Ok(color)
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_reuses_pairs() {
        let mut palette = Palette::new(8);
        let a = palette.allocate(Color::Red, Color::Reset).unwrap();
        let b = palette.allocate(Color::Cyan, Color::Black).unwrap();
        let c = palette.allocate(Color::Red, Color::Reset).unwrap();
        assert_eq!(a, AttrHandle(1));
        assert_eq!(b, AttrHandle(2));
        assert_eq!(a, c);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn exhaustion_is_an_error() {
        // Pair 0 is reserved for the default colors
        let mut palette = Palette::new(3);
        palette.allocate(Color::Red, Color::Reset).unwrap();
        palette.allocate(Color::Green, Color::Reset).unwrap();
        let err = palette.allocate(Color::Blue, Color::Reset).unwrap_err();
        assert!(matches!(err, ColorError::PaletteExhausted { capacity: 3 }));
        // Existing pairs are still handed out
        assert!(palette.allocate(Color::Green, Color::Reset).is_ok());
    }

    #[test]
    fn default_handle_has_default_style() {
        let mut palette = Palette::default();
        assert_eq!(palette.style(AttrHandle::DEFAULT), Style::default());
        let h = palette.allocate(Color::Black, Color::Cyan).unwrap();
        assert_eq!(
            palette.style(h),
            Style::default().fg(Color::Black).bg(Color::Cyan)
        );
        assert_eq!(palette.pair(AttrHandle(40)), None);
    }

    #[test]
    fn parse_color_names() {
        assert_eq!(parse_color("red").unwrap(), Color::Red);
        assert_eq!(parse_color("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color("bright red").unwrap(), Color::LightRed);
        assert_eq!(parse_color("brightblue").unwrap(), Color::LightBlue);
        assert_eq!(parse_color("-1").unwrap(), Color::Reset);
        assert_eq!(parse_color("default").unwrap(), Color::Reset);
        assert_eq!(parse_color("208").unwrap(), Color::Indexed(208));
        assert_eq!(
            parse_color("#FF4444").unwrap(),
            Color::Rgb(0xFF, 0x44, 0x44)
        );
        assert!(parse_color("mauve").is_err());
        assert!(parse_color("bright default").is_err());
        assert!(parse_color("300").is_err());
    }
}
