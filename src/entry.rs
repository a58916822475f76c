// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::type_name;
use std::any::Any;
use std::any::TypeId;

use async_trait::async_trait;
use log::debug;

use crate::AsEdit;
use crate::BBox;
use crate::Cap;
use crate::ColorRole;
use crate::Handleable;
use crate::Id;
use crate::MutCap;
use crate::Object;
use crate::Renderable;
use crate::Renderer;
use crate::TextField;
use crate::TextFieldData;
use crate::TextState;
use crate::Widget;


/// The data of a [`PlaceholderTextField`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlaceholderData {
  /// The state of the underlying text field. Its content is what is
  /// actually displayed, which may be the placeholder.
  text: TextFieldData,
  /// The text displayed while the field is empty and unfocused.
  placeholder: String,
  /// Whether the placeholder is what is currently displayed.
  showing_placeholder: bool,
}

impl TextState for PlaceholderData {
  fn text(&self) -> &TextFieldData {
    &self.text
  }

  fn text_mut(&mut self) -> &mut TextFieldData {
    &mut self.text
  }
}


/// A text field that shows a placeholder text while it is empty and
/// does not have the input focus.
///
/// The placeholder is purely advisory: [`PlaceholderTextField::text`]
/// never reports it, not even while it is being displayed. Hence, the
/// content of the underlying [`TextField`] must not be changed directly
/// but only through [`PlaceholderTextField::set_text`].
///
/// Like all widgets, a `PlaceholderTextField` keeps its state in the
/// widget data managed by the [`Ui`][crate::Ui]. It is merely a handle
/// and can be recreated from its [`Id`] at any time.
///
/// ```rust
/// # use gui_touch::{Edit, PlaceholderTextField, Ui};
/// let (mut ui, root) = Ui::<Edit>::new(PlaceholderTextField::new_data, |id, _cap| {
///   Box::new(PlaceholderTextField::new(id))
/// });
/// let field = PlaceholderTextField::new(root);
///
/// field.set_placeholder(&mut ui, "First name");
/// assert!(field.is_showing_placeholder(&ui));
/// assert_eq!(field.content(&ui), "First name");
/// assert_eq!(field.text(&ui), "");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PlaceholderTextField {
  base: TextField<PlaceholderData>,
}

impl PlaceholderTextField {
  /// Create a new `PlaceholderTextField`.
  pub fn new(id: Id) -> Self {
    Self {
      base: TextField::new(id),
    }
  }

  /// Create the data for a `PlaceholderTextField`.
  pub fn new_data() -> Box<dyn Any> {
    Box::new(PlaceholderData::default())
  }

  /// # Panics
  ///
  /// This function panics if the widget's data is not of type
  /// `PlaceholderData`.
  fn state<'c>(&self, cap: &'c dyn Cap) -> &'c PlaceholderData {
    let id = self.id();
    cap
      .data(id)
      .downcast_ref::<PlaceholderData>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<PlaceholderData>()))
  }

  /// # Panics
  ///
  /// This function panics if the widget's data is not of type
  /// `PlaceholderData`.
  fn state_mut<'c, E>(&self, cap: &'c mut dyn MutCap<E>) -> &'c mut PlaceholderData {
    let id = self.id();
    cap
      .data_mut(id)
      .downcast_mut::<PlaceholderData>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<PlaceholderData>()))
  }

  fn show_placeholder<E>(&self, cap: &mut dyn MutCap<E>) {
    let state = self.state_mut(cap);
    state.showing_placeholder = true;
    let placeholder = state.placeholder.clone();

    debug!("text field {} displays placeholder {placeholder:?}", self.id());
    self.base.set_content(cap, &placeholder);
    self.base.set_color(cap, ColorRole::Muted);
  }

  fn hide_placeholder<E>(&self, cap: &mut dyn MutCap<E>, text: &str) {
    if self.state(cap).showing_placeholder {
      debug!("text field {} hides its placeholder", self.id());
    }

    self.state_mut(cap).showing_placeholder = false;
    self.base.set_content(cap, text);
    self.base.set_color(cap, ColorRole::Normal);
  }

  /// Set the text of the field, replacing its current content.
  ///
  /// Setting an empty text while the field is not focused causes the
  /// placeholder to be displayed.
  pub fn set_text<E>(&self, cap: &mut dyn MutCap<E>, text: &str) {
    if text.is_empty() && !cap.is_focused(self.id()) {
      self.show_placeholder(cap)
    } else {
      self.hide_placeholder(cap, text)
    }
  }

  /// Retrieve the text of the field.
  ///
  /// This is the text set by [`set_text`][Self::set_text] or typed by
  /// the user. The placeholder is never reported.
  pub fn text<'c>(&self, cap: &'c dyn Cap) -> &'c str {
    if self.state(cap).showing_placeholder {
      ""
    } else {
      self.base.content(cap)
    }
  }

  /// Retrieve the placeholder text.
  pub fn placeholder<'c>(&self, cap: &'c dyn Cap) -> &'c str {
    &self.state(cap).placeholder
  }

  /// Set the placeholder text.
  ///
  /// The new placeholder is displayed right away if the previous one
  /// was, or if the field is empty and not focused.
  pub fn set_placeholder<E>(&self, cap: &mut dyn MutCap<E>, placeholder: &str) {
    let state = self.state_mut(cap);
    state.placeholder.clear();
    state.placeholder.push_str(placeholder);

    let showing = state.showing_placeholder;
    if showing || (!cap.is_focused(self.id()) && self.base.content(cap).is_empty()) {
      self.show_placeholder(cap)
    }
  }

  /// Check whether the placeholder is currently being displayed.
  pub fn is_showing_placeholder(&self, cap: &dyn Cap) -> bool {
    self.state(cap).showing_placeholder
  }

  /// Retrieve the content currently being displayed, which may be the
  /// placeholder.
  pub fn content<'c>(&self, cap: &'c dyn Cap) -> &'c str {
    self.base.content(cap)
  }

  /// Retrieve the color role the content is displayed with.
  pub fn color(&self, cap: &dyn Cap) -> ColorRole {
    self.base.color(cap)
  }

  /// Retrieve the cursor position, in characters.
  pub fn cursor(&self, cap: &dyn Cap) -> usize {
    self.base.cursor(cap)
  }
}

impl Object for PlaceholderTextField {
  fn id(&self) -> Id {
    self.base.id()
  }
}

impl Renderable for PlaceholderTextField {
  fn type_id(&self) -> TypeId {
    TypeId::of::<PlaceholderTextField>()
  }

  fn render(&self, cap: &dyn Cap, renderer: &dyn Renderer, bbox: BBox) -> BBox {
    renderer.render(self, cap, bbox)
  }
}

#[async_trait(?Send)]
impl<E> Handleable<E> for PlaceholderTextField
where
  E: AsEdit + 'static,
{
  async fn handle(&self, cap: &mut dyn MutCap<E>, event: E) -> Option<E> {
    // Edits never apply to the placeholder.
    if event.as_edit().is_some() && self.is_showing_placeholder(cap) {
      self.hide_placeholder(cap, "")
    }
    self.base.handle_edit(cap, event)
  }

  fn focus_in(&self, cap: &mut dyn MutCap<E>) -> bool {
    if self.is_showing_placeholder(cap) {
      self.hide_placeholder(cap, "")
    }
    self.base.focus_in(cap)
  }

  fn focus_out(&self, cap: &mut dyn MutCap<E>) -> bool {
    // Note that we check what is displayed, not `text`: the placeholder
    // is only ever displayed in place of nothing.
    if self.base.content(cap).is_empty() {
      self.show_placeholder(cap)
    }
    self.base.focus_out(cap)
  }
}

impl<E> Widget<E> for PlaceholderTextField
where
  E: AsEdit + 'static,
{
  fn type_id(&self) -> TypeId {
    TypeId::of::<PlaceholderTextField>()
  }
}
