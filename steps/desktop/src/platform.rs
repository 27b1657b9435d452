//! Device polling.
//!
//! Keys and gamepad buttons are read as levels once per frame and turned into [`DeviceState`]s;
//! edge detection happens in [`gl_steps::controls::Controls`].

use gl_steps::controls::{Button, ButtonSet, DeviceState};
use glfw::{Action, GamepadAxis, GamepadButton, Glfw, JoystickId, Key, Window};

const KEY_BUTTONS: [(Key, Button); 8] = [
  (Key::Space, Button::ToggleCamera),
  (Key::Escape, Button::Quit),
  (Key::Num1, Button::Fill),
  (Key::Num2, Button::Wireframe),
  (Key::Num3, Button::Point),
  (Key::Up, Button::NextShape),
  (Key::Down, Button::PreviousShape),
  (Key::LeftShift, Button::Zoom),
];

const PAD_BUTTONS: [(GamepadButton, Button); 8] = [
  (GamepadButton::ButtonStart, Button::ToggleCamera),
  (GamepadButton::ButtonBack, Button::Quit),
  (GamepadButton::ButtonA, Button::Fill),
  (GamepadButton::ButtonB, Button::Wireframe),
  (GamepadButton::ButtonX, Button::Point),
  (GamepadButton::ButtonDpadUp, Button::NextShape),
  (GamepadButton::ButtonDpadDown, Button::PreviousShape),
  (GamepadButton::ButtonRightBumper, Button::Zoom),
];

/// Value of a keyboard axis; the negative key wins when both are held.
fn axis_value(negative: bool, positive: bool) -> f32 {
  if negative {
    -1.
  } else if positive {
    1.
  } else {
    0.
  }
}

fn axis(window: &Window, negative: Key, positive: Key) -> f32 {
  let held = |key| window.get_key(key) == Action::Press;
  axis_value(held(negative), held(positive))
}

/// Snapshot of the keyboard.
pub fn poll_keyboard(window: &Window) -> DeviceState {
  let mut buttons = ButtonSet::empty();
  for &(key, button) in &KEY_BUTTONS {
    if window.get_key(key) == Action::Press {
      buttons.insert(button);
    }
  }

  DeviceState {
    buttons,
    movement: [axis(window, Key::A, Key::D), axis(window, Key::S, Key::W)],
    rotation: [axis(window, Key::Q, Key::E), axis(window, Key::F, Key::R)],
  }
}

/// Snapshot of the first joystick, if it’s connected and has a gamepad mapping.
pub fn poll_gamepad(glfw: &Glfw) -> Option<DeviceState> {
  let joystick = glfw.get_joystick(JoystickId::Joystick1);

  if !joystick.is_gamepad() {
    return None;
  }

  let state = joystick.get_gamepad_state()?;
  let buttons = PAD_BUTTONS
    .iter()
    .filter(|&&(pad_button, _)| state.get_button_state(pad_button) == Action::Press)
    .map(|&(_, button)| button)
    .collect();

  // GLFW reports stick Y axes growing downwards
  Some(DeviceState {
    buttons,
    movement: [
      state.get_axis(GamepadAxis::AxisLeftX),
      -state.get_axis(GamepadAxis::AxisLeftY),
    ],
    rotation: [
      state.get_axis(GamepadAxis::AxisRightX),
      -state.get_axis(GamepadAxis::AxisRightY),
    ],
  })
}
