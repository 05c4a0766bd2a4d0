use std::time::{Duration, Instant};

use kiss3d::event::{Action, Event, Key, WindowEvent};
use tracing::debug;

use super::widgets::Button;
use super::Panel;
use crate::consts::FPS;

// Key config, all in one place
pub const KEY_ECC_UP: Key = Key::Up;
pub const KEY_ECC_DOWN: Key = Key::Down;
pub const KEY_FASTER: Key = Key::Right;
pub const KEY_SLOWER: Key = Key::Left;
pub const KEY_TRANSFER: Key = Key::T;
pub const KEY_RESET: Key = Key::R;
pub const KEY_TOGGLE_PAUSE: Key = Key::Space;

// Below this fraction of the target frame rate, the status line says so
const LAG_THRESHOLD: f64 = 0.9;

pub struct Controller {
    paused: bool,
    frame_rate: FrameRate,
}

/// Frame rate measured over fixed windows of wall-clock time. Frames only
/// count while the scene is running, so pausing doesn't drag the figure down.
pub struct FrameRate {
    window: Duration,
    window_start: Instant,
    frames: u32,
    measured: Option<f64>,
}

impl FrameRate {
    pub fn new(window: Duration) -> Self {
        Self::starting_at(window, Instant::now())
    }

    fn starting_at(window: Duration, now: Instant) -> Self {
        FrameRate {
            window,
            window_start: now,
            frames: 0,
            measured: None,
        }
    }

    /// Frames per second over the last complete window, if there was one.
    pub fn measured(&self) -> Option<f64> {
        self.measured
    }

    /// Whether the last window fell well short of the target frame rate.
    pub fn is_lagging(&self) -> bool {
        self.measured
            .is_some_and(|fps| fps < LAG_THRESHOLD * FPS as f64)
    }

    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    fn record_frame_at(&mut self, now: Instant) {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed > self.window {
            self.measured = Some(self.frames as f64 / elapsed.as_secs_f64());
            self.restart(now);
        }
    }

    fn restart(&mut self, now: Instant) {
        self.window_start = now;
        self.frames = 0;
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            paused: false,
            frame_rate: FrameRate::new(Duration::from_secs(1)),
        }
    }

    pub fn process_event(
        &mut self,
        event: Event,
        panel: &mut Panel,
        buttons: &mut [Button<Panel>],
    ) {
        if let WindowEvent::Key(key, Action::Press, _) = event.value {
            self.process_key(key, panel, buttons);
        }
    }

    /// Handles a single key press. Returns whether anything used it.
    pub fn process_key(
        &mut self,
        key: Key,
        panel: &mut Panel,
        buttons: &mut [Button<Panel>],
    ) -> bool {
        match key {
            KEY_ECC_UP => panel.eccentricity.increment(),
            KEY_ECC_DOWN => panel.eccentricity.decrement(),
            KEY_FASTER => panel.velocity.increment(),
            KEY_SLOWER => panel.velocity.decrement(),
            KEY_TOGGLE_PAUSE => {
                self.paused = !self.paused;
                if !self.paused {
                    self.frame_rate.restart(Instant::now());
                }
                debug!(paused = self.paused, "toggled pause");
            }
            _ => match buttons.iter_mut().find(|b| b.key() == key) {
                Some(button) => {
                    debug!(button = button.label(), "clicked");
                    button.click(panel);
                }
                None => return false,
            },
        }
        true
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame_rate(&self) -> &FrameRate {
        &self.frame_rate
    }

    /// Call once per drawn frame.
    pub fn end_frame(&mut self) {
        if !self.paused {
            self.frame_rate.record_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::astro::OrbitShape;
    use crate::gui::default_buttons;
    use crate::render::testing::RecordingSurface;
    use crate::view::SceneConfig;

    fn make_panel() -> Panel {
        let config = SceneConfig {
            reference_orbits: vec![crate::astro::Orbit::new(0.0, 8e23).unwrap()],
            ..Default::default()
        };
        Panel::new(config).unwrap()
    }

    #[test]
    fn test_keys_move_sliders() {
        let mut panel = make_panel();
        let mut buttons = default_buttons();
        let mut controller = Controller::new();

        for _ in 0..3 {
            assert!(controller.process_key(KEY_ECC_UP, &mut panel, &mut buttons));
        }
        controller.process_key(KEY_FASTER, &mut panel, &mut buttons);
        let input = panel.input();
        assert_relative_eq!(input.eccentricity, 0.3, max_relative = 1e-12);
        assert_relative_eq!(input.velocity, 1.05, max_relative = 1e-12);

        controller.process_key(KEY_ECC_DOWN, &mut panel, &mut buttons);
        controller.process_key(KEY_SLOWER, &mut panel, &mut buttons);
        assert_relative_eq!(panel.input().velocity, 1.0);
    }

    #[test]
    fn test_slider_reaches_circle_from_ellipse() {
        let config = SceneConfig {
            initial_orbit: crate::astro::Orbit::new(0.3, 1e24).unwrap(),
            ..Default::default()
        };
        let mut panel = Panel::new(config).unwrap();
        let mut buttons = default_buttons();
        let mut controller = Controller::new();

        for _ in 0..3 {
            controller.process_key(KEY_ECC_DOWN, &mut panel, &mut buttons);
        }
        let input = panel.input();
        panel.scene.tick(&input, &mut RecordingSurface::default());
        assert_eq!(panel.scene.orbit().eccentricity(), 0.0);
        assert_eq!(panel.scene.orbit().shape(), OrbitShape::Circle);

        for _ in 0..10 {
            controller.process_key(KEY_ECC_DOWN, &mut panel, &mut buttons);
        }
        let input = panel.input();
        panel.scene.tick(&input, &mut RecordingSurface::default());
        assert_eq!(panel.scene.orbit().shape(), OrbitShape::Parabola);
    }

    #[test]
    fn test_frame_rate() {
        let start = Instant::now();
        let mut frame_rate = FrameRate::starting_at(Duration::from_secs(1), start);
        assert_eq!(frame_rate.measured(), None);
        assert!(!frame_rate.is_lagging());

        // 20 frames a second, well under target
        for i in 1..=21 {
            frame_rate.record_frame_at(start + Duration::from_millis(50 * i));
        }
        assert_relative_eq!(frame_rate.measured().unwrap(), 21.0 / 1.05, max_relative = 1e-9);
        assert!(frame_rate.is_lagging());

        // Then a full window at the target rate
        let restart = start + Duration::from_millis(1050);
        for i in 1..=61 {
            frame_rate.record_frame_at(restart + Duration::from_micros(16_667 * i));
        }
        assert!(frame_rate.measured().unwrap() > 55.0);
        assert!(!frame_rate.is_lagging());
    }

    #[test]
    fn test_pause_and_unknown_keys() {
        let mut panel = make_panel();
        let mut buttons = default_buttons();
        let mut controller = Controller::new();

        assert!(!controller.is_paused());
        controller.process_key(KEY_TOGGLE_PAUSE, &mut panel, &mut buttons);
        assert!(controller.is_paused());
        assert!(!controller.process_key(Key::Z, &mut panel, &mut buttons));
    }

    #[test]
    fn test_buttons() {
        let mut panel = make_panel();
        let mut buttons = default_buttons();
        let mut controller = Controller::new();

        controller.process_key(KEY_TRANSFER, &mut panel, &mut buttons);
        assert_eq!(
            panel.scene.satellite().orbit(),
            panel.scene.orbits().nth(1).unwrap()
        );

        controller.process_key(KEY_ECC_UP, &mut panel, &mut buttons);
        controller.process_key(KEY_RESET, &mut panel, &mut buttons);
        assert_eq!(panel.input(), panel.scene.config().initial_input());
    }
}
