//! The interactive window: sliders for eccentricity and velocity, a couple of
//! key-bound buttons, and the scene drawn through kiss3d's 2D overlay.

use std::rc::Rc;

use kiss3d::event::EventManager;
use kiss3d::text::Font;
use kiss3d::window::{State, Window};

use self::controller::{Controller, KEY_RESET, KEY_TRANSFER};
use crate::consts::{SLIDER_HEIGHT, SLIDER_WIDTH};
use crate::error::Result;
use crate::render::{RenderSurface, Rgb};
use crate::view::{FrameInput, OrbitScene, SceneConfig};

mod controller;
mod surface;
mod widgets;

pub use self::surface::WindowSurface;
pub use self::widgets::{Button, Slider, SliderConfig};

const SLIDER_GAP: f64 = 15.0;

/// The scene plus the widgets that feed it.
pub struct Panel {
    pub scene: OrbitScene,
    pub eccentricity: Slider,
    pub velocity: Slider,
}

impl Panel {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let eccentricity = SliderConfig {
            initial: config.initial_orbit.eccentricity(),
            ..SliderConfig::ECCENTRICITY
        };
        Self::with_sliders(config, eccentricity, SliderConfig::VELOCITY)
    }

    pub fn with_sliders(
        config: SceneConfig,
        eccentricity: SliderConfig,
        velocity: SliderConfig,
    ) -> Result<Self> {
        Ok(Panel {
            eccentricity: Slider::new("eccentricity", eccentricity)?,
            velocity: Slider::new("velocity", velocity)?,
            scene: OrbitScene::new(config)?,
        })
    }

    pub fn input(&self) -> FrameInput {
        FrameInput {
            eccentricity: self.eccentricity.value(),
            velocity: self.velocity.value(),
        }
    }

    pub fn reset(&mut self) {
        self.eccentricity.reset();
        self.velocity.reset();
        self.scene.reset();
    }

    pub fn draw_widgets(&self, surface: &mut dyn RenderSurface) {
        let viewport = &self.scene.config().viewport;
        let x = (viewport.width - SLIDER_WIDTH) / 2.0 - 60.0;
        let mut y = viewport.gui_y + SLIDER_GAP;
        for slider in [&self.eccentricity, &self.velocity] {
            slider.draw(surface, x, y, SLIDER_WIDTH, SLIDER_HEIGHT);
            y += SLIDER_HEIGHT + SLIDER_GAP;
        }
    }
}

pub fn default_buttons() -> Vec<Button<Panel>> {
    vec![
        Button::new("transfer", KEY_TRANSFER, |panel: &mut Panel| {
            panel.scene.transfer()
        }),
        Button::new("reset", KEY_RESET, Panel::reset),
    ]
}

pub struct Simulation {
    panel: Panel,
    buttons: Vec<Button<Panel>>,
    controller: Controller,
    font: Rc<Font>,
}

impl Simulation {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            buttons: default_buttons(),
            controller: Controller::new(),
            font: Font::default(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller
                .process_event(event, &mut self.panel, &mut self.buttons);
        }
    }

    fn status_text(&self) -> String {
        let buttons: Vec<_> = self
            .buttons
            .iter()
            .map(|b| format!("[{:?}] {}", b.key(), b.label()))
            .collect();
        let frame_rate = self.controller.frame_rate();
        let fps = match frame_rate.measured() {
            Some(fps) => format!("{:.0} fps", fps),
            None => "-- fps".to_owned(),
        };
        let state = if self.controller.is_paused() {
            "  PAUSED"
        } else if frame_rate.is_lagging() {
            "  (slow)"
        } else {
            ""
        };
        format!("{}  [Space] pause  {}{}", buttons.join("  "), fps, state)
    }
}

impl State for Simulation {
    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        let status = self.status_text();
        let viewport = self.panel.scene.config().viewport;
        let mut surface = WindowSurface::new(window, self.font.clone());
        if self.controller.is_paused() {
            self.panel.scene.draw(&mut surface);
        } else {
            let input = self.panel.input();
            self.panel.scene.tick(&input, &mut surface);
        }
        self.panel.draw_widgets(&mut surface);
        surface.label(&status, 10.0, viewport.height - 25.0, Rgb::GRAY);

        self.controller.end_frame();
    }
}
