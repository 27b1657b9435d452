//! Hue / saturation / value adjustments animated over time.

/// Degrees of hue rotation per second.
pub const HUE_SPEED: f32 = 30.;

/// Angular frequency of the saturation oscillation, in radians per second.
pub const SATURATION_PULSE: f32 = 2.;

/// HSV adjustment applied to sampled texels.
///
/// `hue` is a rotation in degrees, `saturation` and `value` scale the matching HSV channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HsvShift {
  pub hue: f32,
  pub saturation: f32,
  pub value: f32,
}

impl HsvShift {
  /// Adjustment `time` seconds after start: the hue turns all the way around every twelve
  /// seconds while the saturation oscillates between 0 and 1.
  pub fn at(time: f32) -> Self {
    HsvShift {
      hue: (time * HUE_SPEED).rem_euclid(360.),
      saturation: 0.5 + 0.5 * (time * SATURATION_PULSE).sin(),
      value: 1.,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::f32::consts::FRAC_PI_4;

  #[test]
  fn starts_unshifted_at_half_saturation() {
    assert_eq!(
      HsvShift::at(0.),
      HsvShift {
        hue: 0.,
        saturation: 0.5,
        value: 1.,
      }
    );
  }

  #[test]
  fn hue_wraps_around() {
    assert_eq!(HsvShift::at(3.).hue, 90.);
    assert_eq!(HsvShift::at(12.).hue, 0.);
    assert_eq!(HsvShift::at(13.).hue, 30.);
    assert!((HsvShift::at(1000.).hue - 120.).abs() < 1e-2);
  }

  #[test]
  fn saturation_stays_in_unit_range() {
    for i in 0..2000 {
      let shift = HsvShift::at(i as f32 * 0.01);
      assert!((0. ..=1.).contains(&shift.saturation));
      assert_eq!(shift.value, 1.);
      assert!((0. ..360.).contains(&shift.hue));
    }

    let peak = HsvShift::at(FRAC_PI_4);
    assert!((peak.saturation - 1.).abs() < 1e-5);
  }
}
