// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::Cap;
use crate::Renderable;


/// A bounding box representing the area that a widget may occupy. A
/// bounding box always describes a rectangular area. The origin [x=0,
/// y=0] is typically assumed to reside in the upper left corner of the
/// screen, but it is really up to the individual [`Renderer`] to make
/// do with whatever is provided.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct BBox {
  /// The x-coordinate of the bounding box.
  pub x: u16,
  /// The y-coordinate of the bounding box.
  pub y: u16,
  /// The width of the bounding box.
  pub w: u16,
  /// The height of the bounding box.
  pub h: u16,
}


/// An abstraction for objects used for rendering widgets.
pub trait Renderer {
  /// Retrieve the bounding box of the renderable area (typically the
  /// screen).
  ///
  /// Note that the units to be used are not specified. That is, the
  /// result could be in pixels, characters (in case of a terminal), or
  /// just arbitrary numbers (if virtual coordinates are being used), as
  /// long as this `Renderer` knows how to interpret them. Screen
  /// relative size requests (see [`Extent`][crate::Extent]) are
  /// resolved against this area.
  fn renderable_area(&self) -> BBox;

  /// Perform some pre-render step.
  fn pre_render(&self) {}

  /// Render an object.
  ///
  /// Objects are represented as [`Renderable`] and need to be cast into
  /// the actual widget type to render by the `Renderer` itself, should
  /// that be necessary. A simplified implementation could look as
  /// follows:
  /// ```rust
  /// # use gui_touch::{BBox, Button, Cap, PlaceholderTextField, Renderable, Renderer};
  /// # #[derive(Debug)]
  /// # struct TestRenderer {}
  /// # impl TestRenderer {
  /// #   fn render_text_field(&self, _field: &PlaceholderTextField, _cap: &dyn Cap, bbox: BBox) -> BBox {
  /// #     bbox
  /// #   }
  /// #   fn render_button(&self, _button: &Button, _cap: &dyn Cap, bbox: BBox) -> BBox {
  /// #     bbox
  /// #   }
  /// # }
  /// # impl Renderer for TestRenderer {
  /// #   fn renderable_area(&self) -> BBox {
  /// #     Default::default()
  /// #   }
  /// fn render(&self, object: &dyn Renderable, cap: &dyn Cap, bbox: BBox) -> BBox {
  ///   if let Some(field) = object.downcast_ref::<PlaceholderTextField>() {
  ///     self.render_text_field(field, cap, bbox)
  ///   } else if let Some(button) = object.downcast_ref::<Button>() {
  ///     self.render_button(button, cap, bbox)
  ///   } else {
  ///     panic!("Renderable {:?} is unknown to the renderer", object)
  ///   }
  /// }
  /// # }
  /// # fn main() {}
  /// ```
  fn render(&self, object: &dyn Renderable, cap: &dyn Cap, bbox: BBox) -> BBox;

  /// A method invoked once rendering of a widget and all its children
  /// concluded.
  fn render_done(&self, _object: &dyn Renderable, _cap: &dyn Cap, _bbox: BBox) {}

  /// Perform some post-render step.
  fn post_render(&self) {}
}
