// Copyright (C) 2018-2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::type_name;
use std::any::TypeId;
use std::fmt::Debug;

use crate::Cap;
use crate::Handleable;
use crate::Id;
use crate::MutCap;
use crate::Renderable;


/// An `Object` represents a first-class entity in a UI.
pub trait Object: Debug {
  /// Retrieve this object's [`Id`].
  fn id(&self) -> Id;
}


/// A widget as used by a [`Ui`][crate::Ui].
///
/// In addition to taking care of [`Id`] management and parent-child
/// relationships, the `Ui` is responsible for dispatching events and
/// focus changes to widgets and for rendering them. Hence, a widget
/// usable for the `Ui` needs to implement [`Handleable`],
/// [`Renderable`], and [`Object`].
///
/// Widgets themselves are immutable. All mutable state lives in the
/// data object the `Ui` associates with each widget and which is
/// accessible through [`Widget::data`] and [`Widget::data_mut`].
pub trait Widget<E>: Handleable<E> + Renderable + Object + Debug {
  /// Get the [`TypeId`] of `self`.
  fn type_id(&self) -> TypeId;

  /// Retrieve a reference to a widget's data.
  ///
  /// # Panics
  ///
  /// This function will panic if the data associated with the object is
  /// not of type `D`.
  fn data<'c, D>(&self, cap: &'c dyn Cap) -> &'c D
  where
    Self: Sized,
    D: 'static,
  {
    cap
      .data(self.id())
      .downcast_ref::<D>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", self.id(), type_name::<D>()))
  }

  /// Retrieve a mutable reference to a widget's data.
  ///
  /// # Panics
  ///
  /// This function will panic if the data associated with the object is
  /// not of type `D`.
  fn data_mut<'c, D>(&self, cap: &'c mut dyn MutCap<E>) -> &'c mut D
  where
    Self: Sized,
    D: 'static,
  {
    let id = self.id();
    cap
      .data_mut(id)
      .downcast_mut::<D>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<D>()))
  }
}

impl<'a, E> dyn Widget<E> + 'a
where
  E: 'static,
{
  /// Check if the widget is of type `T`.
  pub fn is<T>(&self) -> bool
  where
    T: Widget<E> + 'static,
  {
    let t = TypeId::of::<T>();
    let own_t = Widget::type_id(self);

    t == own_t
  }

  /// Downcast the widget reference to type `T`.
  pub fn downcast_ref<T>(&self) -> Option<&T>
  where
    T: Widget<E> + 'static,
  {
    if self.is::<T>() {
      unsafe { Some(&*(self as *const (dyn Widget<E> + 'a) as *const T)) }
    } else {
      None
    }
  }
}
