// Scroll-to-expand hero
//
// Wheel and touch gestures drive a progress value in [0, 1] that grows a
// centered media card to full viewport, then reveals the content below it.
// All of it is a pure reducer over HeroState so it can run without a DOM.

use serde::{Deserialize, Serialize};

/// Tuning constants for the hero gesture.
///
/// Defaults reproduce the shipped web client exactly. They are kept as data
/// so a host can retune them from settings without touching the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroConfig {
    /// Progress per wheel delta unit.
    pub wheel_sensitivity: f64,
    /// Progress per pixel when the finger moves up (delta > 0, expanding).
    pub touch_expand_sensitivity: f64,
    /// Progress per pixel when the finger moves down (delta < 0, retracting).
    pub touch_retract_sensitivity: f64,
    /// Below this progress the revealed content hides again.
    pub reveal_threshold: f64,
    /// Page scroll offset still treated as "at the top".
    pub top_tolerance_px: f64,
    /// Minimum downward finger travel that collapses an expanded hero.
    pub touch_reverse_min_px: f64,
    /// Viewports narrower than this use the narrow footprint.
    pub narrow_breakpoint_px: f64,
    pub base_width: f64,
    pub base_height: f64,
    pub wide_growth: Footprint,
    pub narrow_growth: Footprint,
    /// Title drift at full progress, in viewport-width units.
    pub wide_text_shift_vw: f64,
    pub narrow_text_shift_vw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 0.0009,
            touch_expand_sensitivity: 0.005,
            touch_retract_sensitivity: 0.008,
            reveal_threshold: 0.75,
            top_tolerance_px: 5.0,
            touch_reverse_min_px: 20.0,
            narrow_breakpoint_px: 768.0,
            base_width: 300.0,
            base_height: 400.0,
            wide_growth: Footprint { width: 1250.0, height: 400.0 },
            narrow_growth: Footprint { width: 650.0, height: 200.0 },
            wide_text_shift_vw: 10.0,
            narrow_text_shift_vw: 12.0,
        }
    }
}

impl HeroConfig {
    fn at_top(&self, scroll_y: f64) -> bool {
        scroll_y <= self.top_tolerance_px
    }
}

/// Input to the hero reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeroEvent {
    /// Wheel with its vertical delta (positive = scroll down) and the page
    /// scroll offset at the time of the event.
    Wheel { delta_y: f64, scroll_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64, scroll_y: f64 },
    TouchEnd,
    Resize { width: f64 },
    /// Native page scroll happened.
    PageScroll { scroll_y: f64 },
    /// The media source was swapped.
    MediaChanged,
}

/// Side effects the host must perform after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeroEffects {
    /// Suppress native scrolling for this event.
    pub prevent_default: bool,
    /// Force the page back to scroll offset 0.
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeroState {
    progress: f64,
    fully_expanded: bool,
    show_content: bool,
    /// Last touch Y of the active gesture.
    touch_y: Option<f64>,
    narrow: bool,
}

impl HeroState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.fully_expanded
    }

    pub fn shows_content(&self) -> bool {
        self.show_content
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    pub fn touch_y(&self) -> Option<f64> {
        self.touch_y
    }

    /// Convenience wrapper around [`reduce`] for hosts that keep the state
    /// in place.
    pub fn apply(&mut self, config: &HeroConfig, event: HeroEvent) -> HeroEffects {
        let (next, effects) = reduce(config, *self, event);
        *self = next;
        effects
    }

    fn advance(&mut self, config: &HeroConfig, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.progress = (self.progress + delta).clamp(0.0, 1.0);
        if self.progress >= 1.0 {
            self.fully_expanded = true;
            self.show_content = true;
        } else if self.progress < config.reveal_threshold {
            self.show_content = false;
        }
    }

    fn reset(&mut self) {
        self.progress = 0.0;
        self.fully_expanded = false;
        self.show_content = false;
    }

    /// Rendering values derived from the current progress.
    pub fn layout(&self, config: &HeroConfig) -> HeroLayout {
        let (growth, shift) = if self.narrow {
            (config.narrow_growth, config.narrow_text_shift_vw)
        } else {
            (config.wide_growth, config.wide_text_shift_vw)
        };
        HeroLayout {
            media_width: config.base_width + self.progress * growth.width,
            media_height: config.base_height + self.progress * growth.height,
            text_shift_vw: self.progress * shift,
            background_opacity: 1.0 - self.progress,
            content_opacity: if self.show_content { 1.0 } else { 0.0 },
        }
    }
}

/// Advance the hero by one event.
pub fn reduce(config: &HeroConfig, state: HeroState, event: HeroEvent) -> (HeroState, HeroEffects) {
    let mut next = state;
    let mut effects = HeroEffects::default();

    match event {
        HeroEvent::Wheel { delta_y, scroll_y } => {
            if next.fully_expanded {
                if delta_y < 0.0 && config.at_top(scroll_y) {
                    next.fully_expanded = false;
                    effects.prevent_default = true;
                }
            } else {
                effects.prevent_default = true;
                next.advance(config, delta_y * config.wheel_sensitivity);
            }
        }
        HeroEvent::TouchStart { y } => {
            next.touch_y = Some(y);
        }
        HeroEvent::TouchMove { y, scroll_y } => {
            let Some(last_y) = next.touch_y else {
                return (next, effects);
            };
            // Positive when the finger travels up the screen.
            let delta = last_y - y;
            if next.fully_expanded {
                if delta < -config.touch_reverse_min_px && config.at_top(scroll_y) {
                    next.fully_expanded = false;
                    effects.prevent_default = true;
                }
            } else {
                effects.prevent_default = true;
                let factor = if delta < 0.0 {
                    config.touch_retract_sensitivity
                } else {
                    config.touch_expand_sensitivity
                };
                next.advance(config, delta * factor);
                next.touch_y = Some(y);
            }
        }
        HeroEvent::TouchEnd => {
            next.touch_y = None;
        }
        HeroEvent::Resize { width } => {
            next.narrow = width < config.narrow_breakpoint_px;
        }
        HeroEvent::PageScroll { scroll_y } => {
            if !next.fully_expanded && scroll_y != 0.0 {
                effects.scroll_to_top = true;
            }
        }
        HeroEvent::MediaChanged => {
            log::debug!("hero media changed, resetting from progress {:.3}", next.progress);
            next.reset();
        }
    }

    (next, effects)
}

/// Values a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroLayout {
    pub media_width: f64,
    pub media_height: f64,
    /// First title word moves left by this much, the rest moves right.
    pub text_shift_vw: f64,
    pub background_opacity: f64,
    pub content_opacity: f64,
}

/// Split a title into its first word and the remainder.
///
/// A missing title yields two empty spans.
pub fn split_title(title: Option<&str>) -> (String, String) {
    let Some(title) = title else {
        return (String::new(), String::new());
    };
    let mut words = title.split(' ');
    let first = words.next().unwrap_or_default().to_string();
    let rest = words.collect::<Vec<_>>().join(" ");
    (first, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(delta_y: f64) -> HeroEvent {
        HeroEvent::Wheel { delta_y, scroll_y: 0.0 }
    }

    #[test]
    fn test_initial_state_is_collapsed() {
        let state = HeroState::new();
        assert_eq!(state.progress(), 0.0);
        assert!(!state.is_fully_expanded());
        assert!(!state.shows_content());
    }

    #[test]
    fn test_wheel_advances_and_prevents_default() {
        let config = HeroConfig::default();
        let (state, effects) = reduce(&config, HeroState::new(), wheel(100.0));
        assert!((state.progress() - 0.09).abs() < 1e-9);
        assert!(effects.prevent_default);
        assert!(!state.is_fully_expanded());
    }

    #[test]
    fn test_full_normalized_delta_expands_and_reveals() {
        // Unit sensitivity so the wheel delta is the normalized delta.
        let config = HeroConfig { wheel_sensitivity: 1.0, ..HeroConfig::default() };
        let mut state = HeroState::new();
        state.apply(&config, wheel(1.0));
        assert_eq!(state.progress(), 1.0);
        assert!(state.is_fully_expanded());
        assert!(state.shows_content());

        // Upward wheel at the top collapses but keeps progress at 1.
        let effects = state.apply(&config, wheel(-50.0));
        assert!(effects.prevent_default);
        assert!(!state.is_fully_expanded());
        assert_eq!(state.progress(), 1.0);
        assert!(state.shows_content());

        // Further upward input now retracts.
        state.apply(&config, wheel(-0.1));
        assert!(state.progress() < 1.0);
    }

    #[test]
    fn test_overshoot_clamps_to_one() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, wheel(50_000.0));
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_reversal_ignored_when_scrolled_into_content() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, wheel(5_000.0));
        assert!(state.is_fully_expanded());

        let effects = state.apply(&config, HeroEvent::Wheel { delta_y: -80.0, scroll_y: 240.0 });
        assert!(state.is_fully_expanded());
        assert!(!effects.prevent_default);
    }

    #[test]
    fn test_downward_wheel_when_expanded_is_native_scroll() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, wheel(5_000.0));
        let effects = state.apply(&config, wheel(120.0));
        assert_eq!(effects, HeroEffects::default());
        assert!(state.is_fully_expanded());
    }

    #[test]
    fn test_reveal_hysteresis() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, wheel(5_000.0));
        state.apply(&config, wheel(-10.0)); // collapse latch

        // 1.0 -> 0.82: still inside the band, content stays.
        state.apply(&config, wheel(-200.0));
        assert!(state.progress() > 0.75);
        assert!(state.shows_content());

        // -> 0.73: below the threshold, content hides.
        state.apply(&config, wheel(-100.0));
        assert!(state.progress() < 0.75);
        assert!(!state.shows_content());
    }

    #[test]
    fn test_touch_sensitivity_is_asymmetric() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, HeroEvent::TouchStart { y: 500.0 });
        // Finger moves up 100px: expand at 0.005/px.
        state.apply(&config, HeroEvent::TouchMove { y: 400.0, scroll_y: 0.0 });
        assert!((state.progress() - 0.5).abs() < 1e-9);
        assert_eq!(state.touch_y(), Some(400.0));

        // Finger moves down 50px: retract at 0.008/px.
        state.apply(&config, HeroEvent::TouchMove { y: 450.0, scroll_y: 0.0 });
        assert!((state.progress() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_touch_move_without_gesture_is_ignored() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        let effects = state.apply(&config, HeroEvent::TouchMove { y: 100.0, scroll_y: 0.0 });
        assert_eq!(effects, HeroEffects::default());
        assert_eq!(state.progress(), 0.0);

        state.apply(&config, HeroEvent::TouchStart { y: 300.0 });
        state.apply(&config, HeroEvent::TouchEnd);
        assert_eq!(state.touch_y(), None);
    }

    #[test]
    fn test_touch_reversal_needs_twenty_pixels() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, wheel(5_000.0));
        state.apply(&config, HeroEvent::TouchStart { y: 200.0 });

        state.apply(&config, HeroEvent::TouchMove { y: 215.0, scroll_y: 0.0 });
        assert!(state.is_fully_expanded());

        // The start point is not advanced while expanded, so travel accumulates.
        let effects = state.apply(&config, HeroEvent::TouchMove { y: 225.0, scroll_y: 0.0 });
        assert!(!state.is_fully_expanded());
        assert!(effects.prevent_default);
    }

    #[test]
    fn test_page_scroll_cancelled_until_expanded() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        assert!(state.apply(&config, HeroEvent::PageScroll { scroll_y: 30.0 }).scroll_to_top);

        state.apply(&config, wheel(5_000.0));
        assert!(!state.apply(&config, HeroEvent::PageScroll { scroll_y: 30.0 }).scroll_to_top);
    }

    #[test]
    fn test_media_change_resets() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, HeroEvent::Resize { width: 400.0 });
        state.apply(&config, wheel(5_000.0));
        state.apply(&config, HeroEvent::MediaChanged);
        assert_eq!(state.progress(), 0.0);
        assert!(!state.is_fully_expanded());
        assert!(!state.shows_content());
        assert!(state.is_narrow());
    }

    #[test]
    fn test_layout_wide_and_narrow() {
        let config = HeroConfig::default();
        let mut state = HeroState::new();
        state.apply(&config, HeroEvent::Resize { width: 1440.0 });
        state.apply(&config, wheel(5_000.0));

        let wide = state.layout(&config);
        assert_eq!(wide.media_width, 1550.0);
        assert_eq!(wide.media_height, 800.0);
        assert_eq!(wide.text_shift_vw, 10.0);
        assert_eq!(wide.background_opacity, 0.0);
        assert_eq!(wide.content_opacity, 1.0);

        state.apply(&config, HeroEvent::Resize { width: 767.0 });
        let narrow = state.layout(&config);
        assert_eq!(narrow.media_width, 950.0);
        assert_eq!(narrow.media_height, 600.0);
        assert_eq!(narrow.text_shift_vw, 12.0);
    }

    #[test]
    fn test_layout_collapsed() {
        let config = HeroConfig::default();
        let layout = HeroState::new().layout(&config);
        assert_eq!(layout.media_width, 300.0);
        assert_eq!(layout.media_height, 400.0);
        assert_eq!(layout.background_opacity, 1.0);
        assert_eq!(layout.content_opacity, 0.0);
    }

    #[test]
    fn test_split_title() {
        assert_eq!(
            split_title(Some("Grow Smarter Today")),
            ("Grow".to_string(), "Smarter Today".to_string())
        );
        assert_eq!(split_title(Some("Kisan")), ("Kisan".to_string(), String::new()));
        assert_eq!(split_title(None), (String::new(), String::new()));
        assert_eq!(split_title(Some("")), (String::new(), String::new()));
    }

    #[test]
    fn test_config_partial_override() {
        let config: HeroConfig = serde_json::from_str(r#"{"revealThreshold": 0.6}"#).unwrap();
        assert_eq!(config.reveal_threshold, 0.6);
        assert_eq!(config.wheel_sensitivity, 0.0009);
    }
}
