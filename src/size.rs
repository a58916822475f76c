// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use bitflags::bitflags;
use log::debug;

use crate::BBox;
use crate::Id;
use crate::MutCap;


/// The height requested by widgets sized for being operated with a
/// finger.
pub const FINGER_HEIGHT: u16 = 70;
/// The height requested by widgets sized for being operated with a
/// thumb.
pub const THUMB_HEIGHT: u16 = 105;
/// The name assigned to widgets of finger height.
pub const FINGER_WIDGET_NAME: &str = "finger-widget";
/// The name assigned to widgets of thumb height.
pub const THUMB_WIDGET_NAME: &str = "thumb-widget";


bitflags! {
  /// A size preset, combining a width and a height hint.
  ///
  /// Exactly one width and one height hint is meant to be set. Should
  /// more be set nonetheless, the half screen width takes precedence
  /// over the full screen one and the finger height over the thumb
  /// height.
  #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
  pub struct Size: u8 {
    /// Let the widget decide on its width.
    const AUTO_WIDTH = 0;
    /// Request half the width of the screen.
    const HALFSCREEN_WIDTH = 1;
    /// Request the full width of the screen.
    const FULLSCREEN_WIDTH = 1 << 1;
    /// Let the widget decide on its height.
    const AUTO_HEIGHT = 0;
    /// Request a height suitable for being operated with a finger.
    const FINGER_HEIGHT = 1 << 2;
    /// Request a height suitable for being operated with a thumb.
    const THUMB_HEIGHT = 1 << 3;
    /// Let the widget decide on both width and height.
    const AUTO = Self::AUTO_WIDTH.bits() | Self::AUTO_HEIGHT.bits();
  }
}

impl Default for Size {
  fn default() -> Self {
    Self::AUTO
  }
}


/// A requested extent along one axis.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Extent {
  /// No particular extent is requested.
  #[default]
  Auto,
  /// A fixed extent, in renderer units.
  Fixed(u16),
  /// Half of the extent of the renderable area.
  HalfScreen,
  /// The full extent of the renderable area.
  FullScreen,
}

impl Extent {
  /// Resolve the extent against the extent of the screen.
  pub fn resolve(&self, screen: u16) -> Option<u16> {
    match self {
      Self::Auto => None,
      Self::Fixed(extent) => Some(*extent),
      Self::HalfScreen => Some(screen / 2),
      Self::FullScreen => Some(screen),
    }
  }
}


/// The size a widget requests to be rendered with.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SizeRequest {
  /// The requested width.
  pub width: Extent,
  /// The requested height.
  pub height: Extent,
}

impl SizeRequest {
  /// Constrain the given bounding box to the request. A request never
  /// grows the box beyond what is available.
  pub fn constrain(&self, bbox: BBox, screen: BBox) -> BBox {
    let w = self.width.resolve(screen.w).map_or(bbox.w, |w| w.min(bbox.w));
    let h = self.height.resolve(screen.h).map_or(bbox.h, |h| h.min(bbox.h));

    BBox { w, h, ..bbox }
  }
}

impl From<Size> for SizeRequest {
  fn from(size: Size) -> Self {
    let height = if size.contains(Size::FINGER_HEIGHT) {
      Extent::Fixed(FINGER_HEIGHT)
    } else if size.contains(Size::THUMB_HEIGHT) {
      Extent::Fixed(THUMB_HEIGHT)
    } else {
      Extent::Auto
    };

    let width = if size.contains(Size::HALFSCREEN_WIDTH) {
      Extent::HalfScreen
    } else if size.contains(Size::FULLSCREEN_WIDTH) {
      Extent::FullScreen
    } else {
      Extent::Auto
    };

    Self { width, height }
  }
}


/// Retrieve the widget name associated with the height hint of a size
/// preset, if any.
fn preset_name(size: Size) -> Option<&'static str> {
  if size.contains(Size::FINGER_HEIGHT) {
    Some(FINGER_WIDGET_NAME)
  } else if size.contains(Size::THUMB_HEIGHT) {
    Some(THUMB_WIDGET_NAME)
  } else {
    None
  }
}


/// Apply a size preset to a widget.
///
/// The preset is translated into a [`SizeRequest`] for the widget.
/// Presets with a height hint additionally name the widget, allowing
/// renderers to style it accordingly. Widgets keep their name if the
/// preset has no height hint.
pub fn set_theme_size<E>(cap: &mut dyn MutCap<E>, widget: Id, size: Size) {
  let request = SizeRequest::from(size);
  debug!("applying size preset {size:?} to widget {widget}: {request:?}");

  cap.set_size_request(widget, request);

  if let Some(name) = preset_name(size) {
    cap.set_name(widget, name);
  }
}
