//! Button labels, enablement and keyboard bindings

use serde::{Deserialize, Serialize};

use crate::state::Phase;

/// Stopwatch action a control can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Pause,
    Lap,
    Reset,
}

/// What the main button currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainButton {
    Start,
    Pause,
    Resume,
}

impl MainButton {
    pub fn label(self) -> &'static str {
        match self {
            MainButton::Start => "Start",
            MainButton::Pause => "Pause",
            MainButton::Resume => "Resume",
        }
    }

    pub fn action(self) -> Action {
        match self {
            MainButton::Start | MainButton::Resume => Action::Start,
            MainButton::Pause => Action::Pause,
        }
    }
}

/// What the secondary button currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryButton {
    Lap,
    Reset,
}

impl SecondaryButton {
    pub fn label(self) -> &'static str {
        match self {
            SecondaryButton::Lap => "Lap",
            SecondaryButton::Reset => "Reset",
        }
    }

    pub fn action(self) -> Action {
        match self {
            SecondaryButton::Lap => Action::Lap,
            SecondaryButton::Reset => Action::Reset,
        }
    }
}

/// Control surface state for one stopwatch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub main: MainButton,
    pub secondary: SecondaryButton,
    pub secondary_enabled: bool,
    pub export_enabled: bool,
}

impl Controls {
    pub fn for_state(phase: Phase, lap_count: usize) -> Self {
        let (main, secondary, secondary_enabled) = match phase {
            Phase::Idle => (MainButton::Start, SecondaryButton::Reset, false),
            Phase::Running => (MainButton::Pause, SecondaryButton::Lap, true),
            Phase::Paused => (MainButton::Resume, SecondaryButton::Reset, true),
        };
        Self {
            main,
            secondary,
            secondary_enabled,
            export_enabled: lap_count > 0,
        }
    }

    /// Action of a main button click
    pub fn press_main(&self) -> Action {
        self.main.action()
    }

    /// Action of a secondary button click, if the button is enabled
    pub fn press_secondary(&self) -> Option<Action> {
        self.secondary_enabled.then(|| self.secondary.action())
    }

    /// Action bound to `key` in this state, if any
    pub fn press_key(&self, key: Key) -> Option<Action> {
        match key {
            Key::Space => Some(self.press_main()),
            Key::L if self.secondary == SecondaryButton::Lap => self.press_secondary(),
            Key::R if self.secondary == SecondaryButton::Reset => self.press_secondary(),
            Key::L | Key::R => None,
        }
    }
}

/// Keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    L,
    R,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "KeyL" => Some(Key::L),
            "KeyR" => Some(Key::R),
            _ => None,
        }
    }
}
