// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::TypeId;
use std::fmt::Debug;

use crate::BBox;
use crate::Cap;
use crate::Renderer;


/// A trait representing a renderable object.
pub trait Renderable: Debug {
  /// Get the [`TypeId`] of `self`.
  fn type_id(&self) -> TypeId;

  /// Render the renderable object.
  ///
  /// This method just forwards the call to the given [`Renderer`],
  /// supplying a trait object of the actual widget. The renderer is
  /// advised to honor the given [`BBox`] and is free to inquire
  /// additional state using the supplied [`Cap`].
  fn render(&self, cap: &dyn Cap, renderer: &dyn Renderer, bbox: BBox) -> BBox;
}

impl<'a> dyn Renderable + 'a {
  /// Check if the object is of type `T`.
  pub fn is<T>(&self) -> bool
  where
    T: Renderable + 'static,
  {
    TypeId::of::<T>() == Renderable::type_id(self)
  }

  /// Downcast the object reference to type `T`.
  pub fn downcast_ref<T>(&self) -> Option<&T>
  where
    T: Renderable + 'static,
  {
    if self.is::<T>() {
      unsafe { Some(&*(self as *const (dyn Renderable + 'a) as *const T)) }
    } else {
      None
    }
  }
}
