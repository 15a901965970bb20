use std::time::Duration;

pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
pub const DEFAULT_MOUSE_INTENSITY: f64 = 10.0;
pub const DEFAULT_TYPEWRITER_SPEED: Duration = Duration::from_millis(100);

/// Vertical offset for a layer moving at `speed` times the scroll rate.
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    scroll_y * speed
}

/// Text revealed by a typewriter effect after `elapsed`, one character per
/// `speed` tick, and whether the effect has finished.
///
/// The effect reports completion one tick after the last character appears.
/// A zero `speed` shows everything at once.
pub fn typewriter_frame(text: &str, elapsed: Duration, speed: Duration) -> (&str, bool) {
    if speed.is_zero() {
        return (text, true);
    }
    let ticks = usize::try_from(elapsed.as_nanos() / speed.as_nanos()).unwrap_or(usize::MAX);
    let end = text
        .char_indices()
        .nth(ticks)
        .map_or(text.len(), |(index, _)| index);
    let complete = ticks > text.chars().count();
    (&text[..end], complete)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f64,
    pub y: f64,
}

/// Offset that follows the pointer: zero at the window centre and
/// `±intensity / 2` at the edges. An empty window yields no offset.
pub fn mouse_parallax(
    pointer: (f64, f64),
    window: (f64, f64),
    intensity: f64,
) -> PointerOffset {
    let axis = |position: f64, extent: f64| {
        if extent > 0.0 {
            (position / extent - 0.5) * intensity
        } else {
            0.0
        }
    };
    PointerOffset {
        x: axis(pointer.0, window.0),
        y: axis(pointer.1, window.1),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Reports the direction of travel, ignoring jitter of up to
/// [`ScrollDirectionTracker::HYSTERESIS_PX`].
#[derive(Debug, Clone, Default)]
pub struct ScrollDirectionTracker {
    direction: ScrollDirection,
    last_scroll_y: f64,
}

impl ScrollDirectionTracker {
    pub const HYSTERESIS_PX: f64 = 10.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn update(&mut self, scroll_y: f64) -> ScrollDirection {
        let delta = scroll_y - self.last_scroll_y;
        let moving = if delta > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        if moving != self.direction && delta.abs() > Self::HYSTERESIS_PX {
            self.direction = moving;
        }
        // Overscroll above the page top (negative offsets) counts as the top.
        self.last_scroll_y = scroll_y.max(0.0);
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_scales_scroll() {
        assert_eq!(parallax_offset(200.0, DEFAULT_PARALLAX_SPEED), 100.0);
        assert!((parallax_offset(200.0, 0.3) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn typewriter_reveals_one_character_per_tick() {
        let tick = DEFAULT_TYPEWRITER_SPEED;
        assert_eq!(typewriter_frame("Luxe", Duration::ZERO, tick), ("", false));
        assert_eq!(typewriter_frame("Luxe", tick * 2 + tick / 2, tick), ("Lu", false));
        assert_eq!(typewriter_frame("Luxe", tick * 4, tick), ("Luxe", false));
        assert_eq!(typewriter_frame("Luxe", tick * 5, tick), ("Luxe", true));
        assert_eq!(typewriter_frame("Luxe", tick * 500, tick), ("Luxe", true));
    }

    #[test]
    fn typewriter_respects_char_boundaries() {
        let tick = Duration::from_millis(50);
        assert_eq!(typewriter_frame("Café ✓", tick * 4, tick), ("Café", false));
        assert_eq!(typewriter_frame("", tick, tick), ("", true));
        assert_eq!(typewriter_frame("Home", Duration::ZERO, Duration::ZERO), ("Home", true));
    }

    #[test]
    fn mouse_parallax_is_centred() {
        let centre = mouse_parallax((500.0, 400.0), (1000.0, 800.0), DEFAULT_MOUSE_INTENSITY);
        assert_eq!(centre, PointerOffset { x: 0.0, y: 0.0 });
        let corner = mouse_parallax((1000.0, 0.0), (1000.0, 800.0), 15.0);
        assert_eq!(corner, PointerOffset { x: 7.5, y: -7.5 });
        let empty = mouse_parallax((10.0, 10.0), (0.0, 0.0), 15.0);
        assert_eq!(empty, PointerOffset::default());
    }

    #[test]
    fn direction_ignores_small_moves() {
        let mut tracker = ScrollDirectionTracker::new();
        assert_eq!(tracker.direction(), ScrollDirection::Down);
        assert_eq!(tracker.update(100.0), ScrollDirection::Down);
        assert_eq!(tracker.update(95.0), ScrollDirection::Down);
        assert_eq!(tracker.update(80.0), ScrollDirection::Up);
        assert_eq!(tracker.update(85.0), ScrollDirection::Up);
        assert_eq!(tracker.update(120.0), ScrollDirection::Down);
    }
}
