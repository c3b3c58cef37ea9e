//! Class-list state of the viewer's diagram container.
//!
//! The page script in [`crate::html`] is generated from the same presets, so this type describes
//! exactly what the buttons do to the container's `classList`.

use crate::palette::{SpeedPreset, Theme};

pub const CONTAINER_CLASS: &str = "diagram-container";
pub const PAUSED_CLASS: &str = "paused";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    /// `None` until a speed button is pressed; edges then run at their own `--pulse-speed`.
    pub speed: Option<SpeedPreset>,
    pub theme: Theme,
    pub paused: bool,
}

impl ControlState {
    pub fn select_speed(&mut self, speed: SpeedPreset) {
        self.speed = Some(speed);
    }

    pub fn select_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn class_list(&self) -> Vec<String> {
        let mut classes = vec![CONTAINER_CLASS.to_string(), self.theme.css_class()];
        if let Some(speed) = self.speed {
            classes.push(speed.css_class());
        }
        if self.paused {
            classes.push(PAUSED_CLASS.to_string());
        }
        classes
    }

    pub fn class_attr(&self) -> String {
        self.class_list().join(" ")
    }
}
