//! Keyboard sampling
//!
//! Platform layers push raw key events; the sampler folds them into a
//! `ButtonState` snapshot that `tick` reads once per frame.

use serde::{Deserialize, Serialize};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Z,
    S,
    Up,
    Down,
    Escape,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value; W doubles as Z for QWERTY layouts
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "z" | "Z" | "w" | "W" => Some(Key::Z),
            "s" | "S" => Some(Key::S),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "Escape" => Some(Key::Escape),
            " " | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Raw platform event for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window close request
    Close,
    /// Window lost focus; pending key-ups will never arrive
    FocusLost,
}

/// Logical buttons, split by trigger semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Left paddle up (level)
    MoveUp,
    /// Left paddle down (level)
    MoveDown,
    /// Right paddle up (level)
    MoveUp2,
    /// Right paddle down (level)
    MoveDown2,
    /// Pause toggle (edge)
    PauseToggle,
    /// Replay confirm (edge)
    Confirm,
}

impl Button {
    /// Binding used by both the desktop and web frontends
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::Z => Button::MoveUp,
            Key::S => Button::MoveDown,
            Key::Up => Button::MoveUp2,
            Key::Down => Button::MoveDown2,
            Key::Escape => Button::PauseToggle,
            Key::Space => Button::Confirm,
        }
    }

    /// Edge buttons fire once per press and are cleared at end of frame
    pub fn is_edge_triggered(self) -> bool {
        matches!(self, Button::PauseToggle | Button::Confirm)
    }
}

/// Movement buttons: true for as long as the key is held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelButtons {
    pub move_up: bool,
    pub move_down: bool,
    pub move_up2: bool,
    pub move_down2: bool,
}

/// Action buttons: true only on the frame the key went down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeButtons {
    pub pause_toggle: bool,
    pub confirm: bool,
}

/// Snapshot of every button for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub level: LevelButtons,
    pub edge: EdgeButtons,
}

impl ButtonState {
    pub fn is_down(&self, button: Button) -> bool {
        match button {
            Button::MoveUp => self.level.move_up,
            Button::MoveDown => self.level.move_down,
            Button::MoveUp2 => self.level.move_up2,
            Button::MoveDown2 => self.level.move_down2,
            Button::PauseToggle => self.edge.pause_toggle,
            Button::Confirm => self.edge.confirm,
        }
    }

    fn set(&mut self, button: Button, down: bool) {
        let flag = match button {
            Button::MoveUp => &mut self.level.move_up,
            Button::MoveDown => &mut self.level.move_down,
            Button::MoveUp2 => &mut self.level.move_up2,
            Button::MoveDown2 => &mut self.level.move_down2,
            Button::PauseToggle => &mut self.edge.pause_toggle,
            Button::Confirm => &mut self.edge.confirm,
        };
        *flag = down;
    }
}

/// Translates key events into the per-frame `ButtonState`
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    buttons: ButtonState,
    /// Edge keys currently held down (suppresses key repeat)
    held_edge: EdgeButtons,
    quit_requested: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot
    pub fn buttons(&self) -> &ButtonState {
        &self.buttons
    }

    /// Set once a window close event has been seen
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Fold one raw event into the button state
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Close => {
                log::info!("Window close requested");
                self.quit_requested = true;
            }
            InputEvent::FocusLost => self.release_all(),
            InputEvent::KeyDown(key) => {
                let button = Button::from_key(key);
                if button.is_edge_triggered() {
                    // Fire only on the transition, not on auto-repeat
                    if !std::mem::replace(self.held_edge_mut(button), true) {
                        self.buttons.set(button, true);
                    }
                } else {
                    self.buttons.set(button, true);
                }
            }
            InputEvent::KeyUp(key) => {
                let button = Button::from_key(key);
                if button.is_edge_triggered() {
                    *self.held_edge_mut(button) = false;
                } else {
                    self.buttons.set(button, false);
                }
            }
        }
    }

    /// Apply every event gathered for this frame
    pub fn apply<I: IntoIterator<Item = InputEvent>>(&mut self, events: I) {
        for event in events {
            self.handle(event);
        }
    }

    /// Forget every held key. Presses already fired this frame still count.
    pub fn release_all(&mut self) {
        self.buttons.level = LevelButtons::default();
        self.held_edge = EdgeButtons::default();
    }

    /// Clear the edge-triggered subset; movement buttons persist until key-up
    pub fn end_frame(&mut self) {
        self.buttons.edge = EdgeButtons::default();
    }

    fn held_edge_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Confirm => &mut self.held_edge.confirm,
            _ => &mut self.held_edge.pause_toggle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_is_level_triggered() {
        let mut sampler = InputSampler::new();
        sampler.handle(InputEvent::KeyDown(Key::Z));
        assert!(sampler.buttons().is_down(Button::MoveUp));

        // Still held after the frame ends
        sampler.end_frame();
        assert!(sampler.buttons().is_down(Button::MoveUp));

        sampler.handle(InputEvent::KeyUp(Key::Z));
        assert!(!sampler.buttons().is_down(Button::MoveUp));
    }

    #[test]
    fn test_pause_is_edge_triggered() {
        let mut sampler = InputSampler::new();
        sampler.handle(InputEvent::KeyDown(Key::Escape));
        assert!(sampler.buttons().is_down(Button::PauseToggle));

        sampler.end_frame();
        assert!(!sampler.buttons().is_down(Button::PauseToggle));
    }

    #[test]
    fn test_held_edge_key_fires_once() {
        let mut sampler = InputSampler::new();
        sampler.handle(InputEvent::KeyDown(Key::Space));
        assert!(sampler.buttons().is_down(Button::Confirm));
        sampler.end_frame();

        // Auto-repeat while held must not fire again
        sampler.handle(InputEvent::KeyDown(Key::Space));
        assert!(!sampler.buttons().is_down(Button::Confirm));
        sampler.end_frame();

        // Release and press again fires
        sampler.apply([InputEvent::KeyUp(Key::Space), InputEvent::KeyDown(Key::Space)]);
        assert!(sampler.buttons().is_down(Button::Confirm));
    }

    #[test]
    fn test_press_and_release_within_one_frame_still_fires() {
        let mut sampler = InputSampler::new();
        sampler.apply([InputEvent::KeyDown(Key::Escape), InputEvent::KeyUp(Key::Escape)]);
        assert!(sampler.buttons().is_down(Button::PauseToggle));
    }

    #[test]
    fn test_end_frame_leaves_level_buttons() {
        let mut sampler = InputSampler::new();
        sampler.apply([
            InputEvent::KeyDown(Key::Up),
            InputEvent::KeyDown(Key::S),
            InputEvent::KeyDown(Key::Escape),
            InputEvent::KeyDown(Key::Space),
        ]);
        sampler.end_frame();

        let buttons = sampler.buttons();
        assert!(buttons.level.move_up2);
        assert!(buttons.level.move_down);
        assert_eq!(buttons.edge, EdgeButtons::default());
    }

    #[test]
    fn test_close_requests_quit() {
        let mut sampler = InputSampler::new();
        assert!(!sampler.quit_requested());
        sampler.handle(InputEvent::Close);
        assert!(sampler.quit_requested());
    }

    #[test]
    fn test_focus_loss_releases_held_keys() {
        let mut sampler = InputSampler::new();
        sampler.apply([InputEvent::KeyDown(Key::Z), InputEvent::KeyDown(Key::Escape)]);
        sampler.end_frame();

        // Key-ups are lost with the focus
        sampler.handle(InputEvent::FocusLost);
        assert!(!sampler.buttons().is_down(Button::MoveUp));

        // A fresh press of the latched edge key fires again
        sampler.handle(InputEvent::KeyDown(Key::Escape));
        assert!(sampler.buttons().is_down(Button::PauseToggle));
    }

    #[test]
    fn test_release_all_keeps_presses_from_this_frame() {
        let mut sampler = InputSampler::new();
        sampler.apply([InputEvent::KeyDown(Key::Space), InputEvent::KeyDown(Key::Down)]);
        sampler.release_all();

        let buttons = sampler.buttons();
        assert_eq!(buttons.level, LevelButtons::default());
        assert!(buttons.edge.confirm);
    }

    #[test]
    fn test_dom_key_names() {
        assert_eq!(Key::from_dom_key("z"), Some(Key::Z));
        assert_eq!(Key::from_dom_key("W"), Some(Key::Z));
        assert_eq!(Key::from_dom_key("s"), Some(Key::S));
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Space));
        assert_eq!(Key::from_dom_key("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_dom_key("Enter"), None);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(Button::from_key(Key::Z), Button::MoveUp);
        assert_eq!(Button::from_key(Key::S), Button::MoveDown);
        assert_eq!(Button::from_key(Key::Up), Button::MoveUp2);
        assert_eq!(Button::from_key(Key::Down), Button::MoveDown2);
        assert!(Button::from_key(Key::Escape).is_edge_triggered());
        assert!(Button::from_key(Key::Space).is_edge_triggered());
        assert!(!Button::MoveUp.is_edge_triggered());
    }
}
