//! Turn polled device states into [`InputAction`]s.
//!
//! Runners poll each device once per frame and describe what is currently held in a
//! [`DeviceState`]. Discrete actions are edge-triggered: they fire once per physical press, not
//! once per frame the button is held, and every device keeps its own “previously pressed” flags
//! so that a key and a gamepad button never mask each other.

use crate::{InputAction, RasterMode};

/// Analog magnitude below which stick input is ignored.
pub const DEFAULT_DEAD_ZONE: f32 = 0.1;

/// Device-agnostic buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Button {
  ToggleCamera,
  Quit,
  Fill,
  Wireframe,
  Point,
  NextShape,
  PreviousShape,
  Zoom,
}

impl Button {
  pub const ALL: [Button; 8] = [
    Button::ToggleCamera,
    Button::Quit,
    Button::Fill,
    Button::Wireframe,
    Button::Point,
    Button::NextShape,
    Button::PreviousShape,
    Button::Zoom,
  ];

  fn bit(self) -> u16 {
    1 << self as u16
  }

  // action fired on the press edge; zoom is handled separately as it’s a held modifier
  fn action(self) -> Option<InputAction> {
    match self {
      Button::ToggleCamera => Some(InputAction::ToggleCamera),
      Button::Quit => Some(InputAction::Quit),
      Button::Fill => Some(InputAction::Raster(RasterMode::Fill)),
      Button::Wireframe => Some(InputAction::Raster(RasterMode::Wireframe)),
      Button::Point => Some(InputAction::Raster(RasterMode::Point)),
      Button::NextShape => Some(InputAction::NextShape),
      Button::PreviousShape => Some(InputAction::PreviousShape),
      Button::Zoom => None,
    }
  }
}

/// Set of held buttons.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ButtonSet(u16);

impl ButtonSet {
  pub fn empty() -> Self {
    ButtonSet(0)
  }

  pub fn insert(&mut self, button: Button) {
    self.0 |= button.bit();
  }

  pub fn set(&mut self, button: Button, held: bool) {
    if held {
      self.insert(button);
    } else {
      self.0 &= !button.bit();
    }
  }

  pub fn contains(&self, button: Button) -> bool {
    self.0 & button.bit() != 0
  }
}

impl std::iter::FromIterator<Button> for ButtonSet {
  fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
    let mut set = ButtonSet::empty();
    for button in iter {
      set.insert(button);
    }
    set
  }
}

/// What a device reports for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceState {
  pub buttons: ButtonSet,
  /// Horizontal and vertical movement, up and right positive.
  pub movement: [f32; 2],
  /// Yaw and pitch axes.
  pub rotation: [f32; 2],
}

/// One “previously pressed” flag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EdgeTrigger {
  pressed: bool,
}

impl EdgeTrigger {
  /// Feed the current level; `true` only on the frame the button goes down.
  pub fn rising(&mut self, down: bool) -> bool {
    let fired = down && !self.pressed;
    self.pressed = down;
    fired
  }

  pub fn is_pressed(&self) -> bool {
    self.pressed
  }
}

/// Zero out analog values whose magnitude doesn’t exceed `dead_zone`.
pub fn apply_dead_zone(value: f32, dead_zone: f32) -> f32 {
  if value.abs() > dead_zone {
    value
  } else {
    0.
  }
}

#[derive(Clone, Debug, Default)]
struct DeviceEdges {
  edges: [EdgeTrigger; 8],
}

impl DeviceEdges {
  fn poll(&mut self, buttons: ButtonSet, actions: &mut Vec<InputAction>) {
    for (edge, button) in self.edges.iter_mut().zip(Button::ALL) {
      if edge.rising(buttons.contains(button)) {
        actions.extend(button.action());
      }
    }
  }

  fn release_all(&mut self) {
    self.edges = Default::default();
  }
}

/// Edge tracking for a keyboard and an optional gamepad.
#[derive(Clone, Debug)]
pub struct Controls {
  keyboard: DeviceEdges,
  gamepad: DeviceEdges,
  zoom: EdgeTrigger,
  dead_zone: f32,
}

impl Controls {
  pub fn new(dead_zone: f32) -> Self {
    Controls {
      keyboard: DeviceEdges::default(),
      gamepad: DeviceEdges::default(),
      zoom: EdgeTrigger::default(),
      dead_zone: dead_zone.abs(),
    }
  }

  pub fn dead_zone(&self) -> f32 {
    self.dead_zone
  }

  /// Compute this frame’s actions.
  ///
  /// Pass `None` for the gamepad when none is connected; its flags are then released so that a
  /// button held while unplugging doesn’t swallow the next press.
  pub fn frame(
    &mut self,
    keyboard: &DeviceState,
    gamepad: Option<&DeviceState>,
  ) -> Vec<InputAction> {
    let mut actions = Vec::new();

    self.keyboard.poll(keyboard.buttons, &mut actions);

    let mut movement = keyboard.movement;
    let mut rotation = keyboard.rotation;
    let mut zoom = keyboard.buttons.contains(Button::Zoom);

    match gamepad {
      Some(pad) => {
        self.gamepad.poll(pad.buttons, &mut actions);

        for i in 0..2 {
          movement[i] += apply_dead_zone(pad.movement[i], self.dead_zone);
          rotation[i] += apply_dead_zone(pad.rotation[i], self.dead_zone);
        }

        zoom |= pad.buttons.contains(Button::Zoom);
      }

      None => self.gamepad.release_all(),
    }

    let was_zooming = self.zoom.is_pressed();
    if self.zoom.rising(zoom) {
      actions.push(InputAction::ZoomPressed);
    } else if was_zooming && !zoom {
      actions.push(InputAction::ZoomReleased);
    }

    if movement != [0., 0.] {
      actions.push(InputAction::Move {
        x: movement[0],
        y: movement[1],
      });
    }

    if rotation != [0., 0.] {
      actions.push(InputAction::Rotate {
        x: rotation[0],
        y: rotation[1],
      });
    }

    actions
  }
}

impl Default for Controls {
  fn default() -> Self {
    Self::new(DEFAULT_DEAD_ZONE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn held(buttons: &[Button]) -> DeviceState {
    DeviceState {
      buttons: buttons.iter().copied().collect(),
      ..DeviceState::default()
    }
  }

  #[test]
  fn edge_trigger_fires_once_per_press() {
    let mut edge = EdgeTrigger::default();
    assert!(edge.rising(true));
    assert!(!edge.rising(true));
    assert!(!edge.rising(true));
    assert!(!edge.rising(false));
    assert!(edge.rising(true));
  }

  #[test]
  fn dead_zone_filters_small_values() {
    assert_eq!(apply_dead_zone(0.05, 0.1), 0.);
    assert_eq!(apply_dead_zone(-0.1, 0.1), 0.);
    assert_eq!(apply_dead_zone(0.5, 0.1), 0.5);
    assert_eq!(apply_dead_zone(-0.75, 0.1), -0.75);
  }

  #[test]
  fn held_toggle_fires_once() {
    let mut controls = Controls::default();
    let space = held(&[Button::ToggleCamera]);

    assert_eq!(controls.frame(&space, None), vec![InputAction::ToggleCamera]);
    assert!(controls.frame(&space, None).is_empty());
    assert!(controls.frame(&space, None).is_empty());
  }

  #[test]
  fn sources_have_separate_flags() {
    let mut controls = Controls::default();
    let toggle = held(&[Button::ToggleCamera]);

    // keyboard held, then the gamepad button goes down: that’s a new press
    assert_eq!(controls.frame(&toggle, None), vec![InputAction::ToggleCamera]);
    assert_eq!(
      controls.frame(&toggle, Some(&toggle)),
      vec![InputAction::ToggleCamera]
    );
  }

  #[test]
  fn unplugged_gamepad_releases_its_flags() {
    let mut controls = Controls::default();
    let none = DeviceState::default();
    let next = held(&[Button::NextShape]);

    assert_eq!(controls.frame(&none, Some(&next)), vec![InputAction::NextShape]);
    assert!(controls.frame(&none, None).is_empty());
    assert_eq!(controls.frame(&none, Some(&next)), vec![InputAction::NextShape]);
  }

  #[test]
  fn zoom_reports_edges_of_either_source() {
    let mut controls = Controls::default();
    let none = DeviceState::default();
    let zoom = held(&[Button::Zoom]);

    assert_eq!(controls.frame(&zoom, None), vec![InputAction::ZoomPressed]);
    // still held through the gamepad, keyboard released
    assert!(controls.frame(&none, Some(&zoom)).is_empty());
    assert_eq!(controls.frame(&none, Some(&none)), vec![InputAction::ZoomReleased]);
  }

  #[test]
  fn axes_add_up_after_dead_zone() {
    let mut controls = Controls::new(0.1);
    let keyboard = DeviceState {
      movement: [1., 0.],
      ..DeviceState::default()
    };
    let pad = DeviceState {
      movement: [0.05, -0.5],
      rotation: [0.08, 0.02],
      ..DeviceState::default()
    };

    assert_eq!(
      controls.frame(&keyboard, Some(&pad)),
      vec![InputAction::Move { x: 1., y: -0.5 }]
    );
  }

  #[test]
  fn raster_buttons_map_to_modes() {
    let mut controls = Controls::default();
    let all = held(&[Button::Fill, Button::Wireframe, Button::Point]);

    assert_eq!(
      controls.frame(&all, None),
      vec![
        InputAction::Raster(RasterMode::Fill),
        InputAction::Raster(RasterMode::Wireframe),
        InputAction::Raster(RasterMode::Point),
      ]
    );
  }
}
