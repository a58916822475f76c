// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Factory functions creating widgets with consistent sizing.

use std::fmt::Debug;
use std::rc::Rc;

use log::debug;

use crate::set_theme_size;
use crate::AsEdit;
use crate::Button;
use crate::ButtonKind;
use crate::Icon;
use crate::Id;
use crate::ListModel;
use crate::MutCap;
use crate::PlaceholderTextField;
use crate::RadioGroup;
use crate::Size;
use crate::Tree;
use crate::UiMode;
use crate::View;
use crate::Widget;


fn new_button<E>(id: Id, _cap: &mut dyn MutCap<E>) -> Box<dyn Widget<E>>
where
  E: 'static,
{
  Box::new(Button::new(id))
}

fn new_text_field<E>(id: Id, _cap: &mut dyn MutCap<E>) -> Box<dyn Widget<E>>
where
  E: AsEdit + 'static,
{
  Box::new(PlaceholderTextField::new(id))
}

fn new_view<E, K>(id: Id, _cap: &mut dyn MutCap<E>) -> Box<dyn Widget<E>>
where
  E: 'static,
  K: Debug + 'static,
{
  Box::new(View::<K>::new(id))
}


fn add_any_button<E>(
  cap: &mut dyn MutCap<E>,
  parent: Id,
  size: Size,
  kind: ButtonKind,
  active: bool,
) -> Id
where
  E: 'static,
{
  let id = cap.add_widget(
    parent,
    Box::new(move || Button::new_data(kind, active)),
    Box::new(new_button::<E>),
  );
  set_theme_size(cap, id, size);
  debug!("created {kind:?} button {id}");
  id
}

/// Create a push button of the given size.
pub fn add_button<E>(cap: &mut dyn MutCap<E>, parent: Id, size: Size) -> Id
where
  E: 'static,
{
  add_any_button(cap, parent, size, ButtonKind::Normal, false)
}

/// Create an inactive toggle button of the given size.
pub fn add_toggle_button<E>(cap: &mut dyn MutCap<E>, parent: Id, size: Size) -> Id
where
  E: 'static,
{
  add_any_button(cap, parent, size, ButtonKind::Toggle, false)
}

/// Create a radio button of the given size.
///
/// The button joins `group`, if provided. Otherwise it starts a new
/// group, in which case it is the group's active button.
pub fn add_radio_button<E>(
  cap: &mut dyn MutCap<E>,
  parent: Id,
  size: Size,
  group: Option<RadioGroup>,
) -> Id
where
  E: 'static,
{
  let (group, active) = match group {
    Some(group) => (group, false),
    None => (RadioGroup::new(), true),
  };
  add_any_button(cap, parent, size, ButtonKind::Radio(group), active)
}

/// Create a radio button of the given size, joining the group of the
/// radio button `member`, if provided.
///
/// # Panics
///
/// This function panics if `member` is not a radio button.
pub fn add_radio_button_from_widget<E>(
  cap: &mut dyn MutCap<E>,
  parent: Id,
  size: Size,
  member: Option<Id>,
) -> Id
where
  E: 'static,
{
  let group = member.map(|member| Button::group_of(cap, member));
  add_radio_button(cap, parent, size, group)
}

/// Create a [`PlaceholderTextField`] of the given size.
///
/// Text fields are usually created with
/// `Size::AUTO_WIDTH | Size::FINGER_HEIGHT`.
pub fn add_text_field<E>(cap: &mut dyn MutCap<E>, parent: Id, size: Size) -> Id
where
  E: AsEdit + 'static,
{
  let id = cap.add_widget(
    parent,
    Box::new(PlaceholderTextField::new_data),
    Box::new(new_text_field::<E>),
  );
  set_theme_size(cap, id, size);
  id
}

fn add_view<E, K>(
  cap: &mut dyn MutCap<E>,
  parent: Id,
  mode: UiMode,
  model: Option<Rc<ListModel>>,
) -> Id
where
  E: 'static,
  K: Debug + 'static,
{
  cap.add_widget(
    parent,
    Box::new(move || View::<K>::new_data(mode, model)),
    Box::new(new_view::<E, K>),
  )
}

/// Create a [`TreeView`][crate::TreeView] operating in `mode`, without
/// a model.
pub fn add_tree_view<E>(cap: &mut dyn MutCap<E>, parent: Id, mode: UiMode) -> Id
where
  E: 'static,
{
  add_view::<E, Tree>(cap, parent, mode, None)
}

/// Create a [`TreeView`][crate::TreeView] operating in `mode` and
/// displaying `model`.
pub fn add_tree_view_with_model<E>(
  cap: &mut dyn MutCap<E>,
  parent: Id,
  mode: UiMode,
  model: Rc<ListModel>,
) -> Id
where
  E: 'static,
{
  add_view::<E, Tree>(cap, parent, mode, Some(model))
}

/// Create an [`IconView`][crate::IconView] operating in `mode`, without
/// a model.
pub fn add_icon_view<E>(cap: &mut dyn MutCap<E>, parent: Id, mode: UiMode) -> Id
where
  E: 'static,
{
  add_view::<E, Icon>(cap, parent, mode, None)
}

/// Create an [`IconView`][crate::IconView] operating in `mode` and
/// displaying `model`.
pub fn add_icon_view_with_model<E>(
  cap: &mut dyn MutCap<E>,
  parent: Id,
  mode: UiMode,
  model: Rc<ListModel>,
) -> Id
where
  E: 'static,
{
  add_view::<E, Icon>(cap, parent, mode, Some(model))
}
