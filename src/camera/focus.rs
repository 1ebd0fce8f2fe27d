//! Camera focus state machine.

use std::time::Duration;

use bevy::prelude::*;

use crate::core::CameraConfig;

/// Which behavior currently steers the main camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Fixed top-down overview shown at startup.
    #[default]
    Initial,
    /// Trails Earth along its orbit.
    AutoFollow,
    /// Close-up locked onto Earth.
    Focused,
}

/// Inputs that can move the camera between modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraTrigger {
    IntroElapsed,
    ManualInput,
    EarthClicked,
}

impl CameraMode {
    pub fn on(self, trigger: CameraTrigger) -> Self {
        use CameraMode::*;
        use CameraTrigger::*;

        match (self, trigger) {
            (Initial, IntroElapsed | ManualInput) => AutoFollow,
            (Initial | AutoFollow, EarthClicked) => Focused,
            (Focused, EarthClicked) => AutoFollow,
            (mode, _) => mode,
        }
    }

    pub fn is_focused(self) -> bool {
        self == CameraMode::Focused
    }
}

/// Written when the user clicks Earth.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct FocusToggleRequested;

/// Holds the current [`CameraMode`] and the timers that drive it.
#[derive(Resource, Debug)]
pub struct FocusController {
    mode: CameraMode,
    intro: Timer,
    debounce_secs: f32,
    last_toggle_secs: Option<f32>,
}

impl FocusController {
    pub fn new(intro_delay_secs: f32, debounce_secs: f32) -> Self {
        Self {
            mode: CameraMode::Initial,
            intro: Timer::from_seconds(intro_delay_secs, TimerMode::Once),
            debounce_secs,
            last_toggle_secs: None,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Advance the intro timer. Returns the new mode if the intro just ended.
    pub fn tick(&mut self, delta: Duration) -> Option<CameraMode> {
        if self.mode != CameraMode::Initial {
            return None;
        }
        self.intro.tick(delta);
        if self.intro.is_finished() {
            return self.apply(CameraTrigger::IntroElapsed);
        }
        None
    }

    pub fn manual_input(&mut self) -> Option<CameraMode> {
        self.apply(CameraTrigger::ManualInput)
    }

    /// Flip focus. Clicks inside the debounce window after the last flip are ignored.
    pub fn toggle_focus(&mut self, now_secs: f32) -> Option<CameraMode> {
        if let Some(last) = self.last_toggle_secs
            && now_secs - last < self.debounce_secs
        {
            return None;
        }

        let changed = self.apply(CameraTrigger::EarthClicked);
        if changed.is_some() {
            self.last_toggle_secs = Some(now_secs);
        }
        changed
    }

    fn apply(&mut self, trigger: CameraTrigger) -> Option<CameraMode> {
        let next = self.mode.on(trigger);
        if next == self.mode {
            return None;
        }
        self.mode = next;
        Some(next)
    }
}

impl FromWorld for FocusController {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<CameraConfig>()
            .cloned()
            .unwrap_or_default();
        Self::new(config.intro_delay_secs, config.click_debounce_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_hands_over_after_delay() {
        let mut controller = FocusController::new(5.0, 0.25);
        assert_eq!(controller.tick(Duration::from_secs_f32(4.9)), None);
        assert_eq!(controller.mode(), CameraMode::Initial);
        assert_eq!(
            controller.tick(Duration::from_secs_f32(0.2)),
            Some(CameraMode::AutoFollow)
        );
        // Timer stays quiet once the intro is over.
        assert_eq!(controller.tick(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_manual_input_ends_intro_early() {
        let mut controller = FocusController::new(5.0, 0.25);
        assert_eq!(controller.manual_input(), Some(CameraMode::AutoFollow));
        assert_eq!(controller.manual_input(), None);
    }

    #[test]
    fn test_double_toggle_returns_to_auto_follow() {
        let mut controller = FocusController::new(5.0, 0.25);
        controller.manual_input();

        assert_eq!(controller.toggle_focus(10.0), Some(CameraMode::Focused));
        assert_eq!(controller.toggle_focus(11.0), Some(CameraMode::AutoFollow));
        assert_eq!(controller.mode(), CameraMode::AutoFollow);
    }

    #[test]
    fn test_click_during_intro_focuses() {
        let mut controller = FocusController::new(5.0, 0.25);
        assert_eq!(controller.toggle_focus(1.0), Some(CameraMode::Focused));
        assert_eq!(controller.tick(Duration::from_secs(10)), None);
        assert_eq!(controller.mode(), CameraMode::Focused);
    }

    #[test]
    fn test_rapid_clicks_are_debounced() {
        let mut controller = FocusController::new(0.0, 0.25);
        controller.manual_input();

        assert_eq!(controller.toggle_focus(3.0), Some(CameraMode::Focused));
        assert_eq!(controller.toggle_focus(3.1), None);
        assert_eq!(controller.mode(), CameraMode::Focused);
        assert_eq!(controller.toggle_focus(3.3), Some(CameraMode::AutoFollow));
    }

    #[test]
    fn test_zero_debounce_always_inverts() {
        let mut controller = FocusController::new(0.0, 0.0);
        controller.manual_input();

        assert_eq!(controller.toggle_focus(2.0), Some(CameraMode::Focused));
        assert_eq!(controller.toggle_focus(2.0), Some(CameraMode::AutoFollow));
    }

    #[test]
    fn test_manual_input_never_leaves_focus() {
        assert_eq!(
            CameraMode::Focused.on(CameraTrigger::ManualInput),
            CameraMode::Focused
        );
        assert_eq!(
            CameraMode::AutoFollow.on(CameraTrigger::IntroElapsed),
            CameraMode::AutoFollow
        );
    }
}
