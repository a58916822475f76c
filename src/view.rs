// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::type_name;
use std::any::Any;
use std::any::TypeId;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::rc::Rc;

use log::debug;

use crate::BBox;
use crate::Cap;
use crate::Handleable;
use crate::Id;
use crate::MutCap;
use crate::Object;
use crate::Renderable;
use crate::Renderer;
use crate::Widget;


/// The interaction mode of a view.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum UiMode {
  /// Rows can only be activated; there is no persistent selection.
  #[default]
  Normal,
  /// Rows can be selected.
  Edit,
}


/// A list of rows displayed by a view.
///
/// Models are shared between views by means of an `Rc`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListModel {
  rows: Vec<String>,
}

impl ListModel {
  /// Create a new, empty model.
  pub fn new() -> Self {
    Self::default()
  }

  /// Retrieve the number of rows.
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  /// Check whether the model is empty.
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Retrieve the row at the given position, if any.
  pub fn row(&self, row: usize) -> Option<&str> {
    self.rows.get(row).map(String::as_str)
  }
}

impl<S> FromIterator<S> for ListModel
where
  S: Into<String>,
{
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = S>,
  {
    Self {
      rows: iter.into_iter().map(Into::into).collect(),
    }
  }
}


/// The data of a [`View`].
#[derive(Clone, Debug, Default)]
pub struct ViewData {
  mode: UiMode,
  model: Option<Rc<ListModel>>,
  selected: Option<usize>,
}

impl ViewData {
  pub(crate) fn new(mode: UiMode, model: Option<Rc<ListModel>>) -> Self {
    Self {
      mode,
      model,
      selected: None,
    }
  }
}


/// Marker type for views displaying rows as a tree.
#[derive(Clone, Copy, Debug)]
pub enum Tree {}

/// Marker type for views displaying rows as a grid of icons.
#[derive(Clone, Copy, Debug)]
pub enum Icon {}


/// A view displaying the rows of a [`ListModel`].
///
/// The kind of presentation is selected through the type parameter.
/// Use [`TreeView`] and [`IconView`] instead of naming it directly.
#[derive(Debug)]
pub struct View<K> {
  id: Id,
  _kind: PhantomData<K>,
}

impl<K> Clone for View<K> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<K> Copy for View<K> {}

/// A view presenting its rows as a tree.
pub type TreeView = View<Tree>;
/// A view presenting its rows as a grid of icons.
pub type IconView = View<Icon>;

impl<K> View<K>
where
  K: Debug + 'static,
{
  /// Create a new view.
  pub fn new(id: Id) -> Self {
    Self {
      id,
      _kind: PhantomData,
    }
  }

  /// Create the data for a view.
  pub fn new_data(mode: UiMode, model: Option<Rc<ListModel>>) -> Box<dyn Any> {
    Box::new(ViewData::new(mode, model))
  }

  fn state<'c>(&self, cap: &'c dyn Cap) -> &'c ViewData {
    cap
      .data(self.id)
      .downcast_ref::<ViewData>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", self.id, type_name::<ViewData>()))
  }

  fn state_mut<'c, E>(&self, cap: &'c mut dyn MutCap<E>) -> &'c mut ViewData {
    let id = self.id;
    cap
      .data_mut(id)
      .downcast_mut::<ViewData>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<ViewData>()))
  }

  /// Retrieve the view's interaction mode.
  pub fn mode(&self, cap: &dyn Cap) -> UiMode {
    self.state(cap).mode
  }

  /// Set the view's interaction mode.
  ///
  /// Switching to [`UiMode::Normal`] clears the selection.
  pub fn set_mode<E>(&self, cap: &mut dyn MutCap<E>, mode: UiMode) {
    let state = self.state_mut(cap);
    state.mode = mode;
    if mode == UiMode::Normal {
      state.selected = None;
    }
    debug!("view {} switched to {mode:?} mode", self.id);
  }

  /// Retrieve the model being displayed, if any.
  pub fn model(&self, cap: &dyn Cap) -> Option<Rc<ListModel>> {
    self.state(cap).model.clone()
  }

  /// Set or clear the model being displayed. The selection is cleared.
  pub fn set_model<E>(&self, cap: &mut dyn MutCap<E>, model: Option<Rc<ListModel>>) {
    let state = self.state_mut(cap);
    state.model = model;
    state.selected = None;
  }

  /// Select a row, returning whether it got selected.
  ///
  /// Rows can only be selected in [`UiMode::Edit`] and only if they
  /// exist in the model.
  pub fn select<E>(&self, cap: &mut dyn MutCap<E>, row: usize) -> bool {
    let state = self.state_mut(cap);
    let rows = state.model.as_ref().map_or(0, |model| model.len());

    if state.mode == UiMode::Edit && row < rows {
      state.selected = Some(row);
      true
    } else {
      false
    }
  }

  /// Retrieve the selected row, if any.
  pub fn selected(&self, cap: &dyn Cap) -> Option<usize> {
    self.state(cap).selected
  }
}

impl<K> Object for View<K>
where
  K: Debug,
{
  fn id(&self) -> Id {
    self.id
  }
}

impl<K> Renderable for View<K>
where
  K: Debug + 'static,
{
  fn type_id(&self) -> TypeId {
    TypeId::of::<Self>()
  }

  fn render(&self, cap: &dyn Cap, renderer: &dyn Renderer, bbox: BBox) -> BBox {
    renderer.render(self, cap, bbox)
  }
}

impl<E, K> Handleable<E> for View<K> where K: Debug {}

impl<E, K> Widget<E> for View<K>
where
  E: 'static,
  K: Debug + 'static,
{
  fn type_id(&self) -> TypeId {
    TypeId::of::<Self>()
  }
}
