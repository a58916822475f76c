// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::type_name;
use std::any::Any;
use std::any::TypeId;
use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use log::trace;

use crate::BBox;
use crate::Cap;
use crate::Handleable;
use crate::Id;
use crate::MutCap;
use crate::Object;
use crate::Renderable;
use crate::Renderer;
use crate::Widget;


/// An edit operation on the content of a [`TextField`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Edit {
  /// Insert a character at the cursor position.
  Insert(char),
  /// Remove the character before the cursor.
  Backspace,
  /// Remove the character after the cursor.
  Delete,
  /// Move the cursor one character to the left.
  Left,
  /// Move the cursor one character to the right.
  Right,
  /// Move the cursor to the start of the content.
  Home,
  /// Move the cursor to the end of the content.
  End,
}


/// A trait for events that may represent an [`Edit`].
///
/// Text fields consume all events that map to an edit and let the
/// remaining ones bubble up.
pub trait AsEdit {
  /// Retrieve the edit the event represents, if any.
  fn as_edit(&self) -> Option<Edit>;
}

impl AsEdit for Edit {
  fn as_edit(&self) -> Option<Edit> {
    Some(*self)
  }
}


/// The logical color role used for the text displayed by a
/// [`TextField`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ColorRole {
  /// The high emphasis color used for regular content.
  #[default]
  Normal,
  /// The de-emphasized color used for advisory content.
  Muted,
}

impl ColorRole {
  /// Retrieve the name of the theme color the role maps to.
  pub fn logical_name(&self) -> &'static str {
    match self {
      Self::Normal => "ReversedTextColor",
      Self::Muted => "ReversedSecondaryTextColor",
    }
  }
}


/// The data of a [`TextField`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextFieldData {
  /// The content being displayed.
  content: String,
  /// The cursor position, in characters.
  cursor: usize,
  /// The color role the content is displayed with.
  color: ColorRole,
}

impl TextFieldData {
  /// Convert the cursor position into a byte offset into the content.
  fn byte_offset(&self, cursor: usize) -> usize {
    self
      .content
      .char_indices()
      .nth(cursor)
      .map_or(self.content.len(), |(offset, _)| offset)
  }

  fn char_count(&self) -> usize {
    self.content.chars().count()
  }

  fn set_content(&mut self, content: &str) {
    self.content.clear();
    self.content.push_str(content);
    self.cursor = self.char_count();
  }

  /// Apply an edit, returning whether the content changed.
  fn apply(&mut self, edit: Edit) -> bool {
    let count = self.char_count();
    debug_assert!(self.cursor <= count);

    match edit {
      Edit::Insert(c) => {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, c);
        self.cursor += 1;
        true
      },
      Edit::Backspace => {
        if self.cursor > 0 {
          self.cursor -= 1;
          let offset = self.byte_offset(self.cursor);
          let _ = self.content.remove(offset);
          true
        } else {
          false
        }
      },
      Edit::Delete => {
        if self.cursor < count {
          let offset = self.byte_offset(self.cursor);
          let _ = self.content.remove(offset);
          true
        } else {
          false
        }
      },
      Edit::Left => {
        self.cursor = self.cursor.saturating_sub(1);
        false
      },
      Edit::Right => {
        self.cursor = (self.cursor + 1).min(count);
        false
      },
      Edit::Home => {
        self.cursor = 0;
        false
      },
      Edit::End => {
        self.cursor = count;
        false
      },
    }
  }
}


/// A trait for widget data embedding the state of a [`TextField`].
///
/// Widgets building on top of a text field keep the field's state as
/// part of their own data and expose it through this trait.
pub trait TextState: Debug + 'static {
  /// Retrieve the text field state.
  fn text(&self) -> &TextFieldData;

  /// Retrieve the mutable text field state.
  fn text_mut(&mut self) -> &mut TextFieldData;
}

impl TextState for TextFieldData {
  fn text(&self) -> &TextFieldData {
    self
  }

  fn text_mut(&mut self) -> &mut TextFieldData {
    self
  }
}


/// A single line text entry.
///
/// The field's state is stored as part of the widget data of type `D`.
/// When used as a widget on its own, that is [`TextFieldData`]. Other
/// widgets may embed a text field, in which case `D` is their own data
/// type (see [`TextState`]).
#[derive(Debug)]
pub struct TextField<D = TextFieldData> {
  id: Id,
  _data: PhantomData<D>,
}

impl<D> Clone for TextField<D> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<D> Copy for TextField<D> {}

impl TextField<TextFieldData> {
  /// Create the data for a stand-alone text field.
  pub fn new_data() -> Box<dyn Any> {
    Box::new(TextFieldData::default())
  }
}

impl<D> TextField<D>
where
  D: TextState,
{
  /// Create a new `TextField` operating on the data of the widget with
  /// the given `Id`.
  pub fn new(id: Id) -> Self {
    Self {
      id,
      _data: PhantomData,
    }
  }

  /// # Panics
  ///
  /// This function panics if the widget's data is not of type `D`.
  fn state<'c>(&self, cap: &'c dyn Cap) -> &'c TextFieldData {
    cap
      .data(self.id)
      .downcast_ref::<D>()
      .map(TextState::text)
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", self.id, type_name::<D>()))
  }

  /// # Panics
  ///
  /// This function panics if the widget's data is not of type `D`.
  fn state_mut<'c, E>(&self, cap: &'c mut dyn MutCap<E>) -> &'c mut TextFieldData {
    let id = self.id;
    cap
      .data_mut(id)
      .downcast_mut::<D>()
      .map(TextState::text_mut)
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<D>()))
  }

  /// Retrieve the content currently being displayed.
  pub fn content<'c>(&self, cap: &'c dyn Cap) -> &'c str {
    &self.state(cap).content
  }

  /// Replace the content being displayed, moving the cursor to its end.
  pub fn set_content<E>(&self, cap: &mut dyn MutCap<E>, content: &str) {
    self.state_mut(cap).set_content(content)
  }

  /// Retrieve the cursor position, in characters.
  pub fn cursor(&self, cap: &dyn Cap) -> usize {
    self.state(cap).cursor
  }

  /// Retrieve the color role the content is displayed with.
  pub fn color(&self, cap: &dyn Cap) -> ColorRole {
    self.state(cap).color
  }

  /// Set the color role the content is displayed with.
  pub fn set_color<E>(&self, cap: &mut dyn MutCap<E>, color: ColorRole) {
    self.state_mut(cap).color = color
  }

  /// Apply an edit to the content, returning whether it changed.
  pub fn apply<E>(&self, cap: &mut dyn MutCap<E>, edit: Edit) -> bool {
    let changed = self.state_mut(cap).apply(edit);
    trace!("applied {edit:?} to text field {}: changed: {changed}", self.id);
    changed
  }

  /// The default handling of the field receiving the input focus: the
  /// cursor is placed at the end of the content.
  pub fn focus_in<E>(&self, cap: &mut dyn MutCap<E>) -> bool {
    let state = self.state_mut(cap);
    state.cursor = state.char_count();
    false
  }

  /// The default handling of the field losing the input focus.
  pub fn focus_out<E>(&self, _cap: &mut dyn MutCap<E>) -> bool {
    false
  }

  /// Handle an event, consuming it if it represents an edit.
  pub fn handle_edit<E>(&self, cap: &mut dyn MutCap<E>, event: E) -> Option<E>
  where
    E: AsEdit,
  {
    match event.as_edit() {
      Some(edit) => {
        let _ = self.apply(cap, edit);
        None
      },
      None => Some(event),
    }
  }
}

impl<D> Object for TextField<D>
where
  D: TextState,
{
  fn id(&self) -> Id {
    self.id
  }
}

impl Renderable for TextField<TextFieldData> {
  fn type_id(&self) -> TypeId {
    TypeId::of::<Self>()
  }

  fn render(&self, cap: &dyn Cap, renderer: &dyn Renderer, bbox: BBox) -> BBox {
    renderer.render(self, cap, bbox)
  }
}

#[async_trait(?Send)]
impl<E> Handleable<E> for TextField<TextFieldData>
where
  E: AsEdit + 'static,
{
  async fn handle(&self, cap: &mut dyn MutCap<E>, event: E) -> Option<E> {
    self.handle_edit(cap, event)
  }

  fn focus_in(&self, cap: &mut dyn MutCap<E>) -> bool {
    TextField::focus_in(self, cap)
  }

  fn focus_out(&self, cap: &mut dyn MutCap<E>) -> bool {
    TextField::focus_out(self, cap)
  }
}

impl<E> Widget<E> for TextField<TextFieldData>
where
  E: AsEdit + 'static,
{
  fn type_id(&self) -> TypeId {
    TypeId::of::<Self>()
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  fn data(content: &str) -> TextFieldData {
    let mut data = TextFieldData::default();
    data.set_content(content);
    data
  }


  /// Check that inserting characters honors the cursor position.
  #[test]
  fn insert_at_cursor() {
    let mut data = data("ac");
    assert_eq!(data.cursor, 2);

    assert!(!data.apply(Edit::Left));
    assert!(data.apply(Edit::Insert('b')));
    assert_eq!(data.content, "abc");
    assert_eq!(data.cursor, 2);

    assert!(!data.apply(Edit::Home));
    assert!(data.apply(Edit::Insert('_')));
    assert_eq!(data.content, "_abc");
  }

  /// Check removal of characters around the cursor.
  #[test]
  fn remove_around_cursor() {
    let mut data = data("abc");
    assert!(!data.apply(Edit::Delete));
    assert!(data.apply(Edit::Backspace));
    assert_eq!(data.content, "ab");

    assert!(!data.apply(Edit::Home));
    assert!(!data.apply(Edit::Backspace));
    assert!(data.apply(Edit::Delete));
    assert_eq!(data.content, "b");
    assert_eq!(data.cursor, 0);
  }

  /// Make sure that the cursor is counted in characters, not bytes.
  #[test]
  fn multi_byte_content() {
    let mut data = data("äö");
    assert_eq!(data.cursor, 2);

    assert!(!data.apply(Edit::Left));
    assert!(data.apply(Edit::Insert('ü')));
    assert_eq!(data.content, "äüö");
    assert!(data.apply(Edit::Backspace));
    assert!(data.apply(Edit::Backspace));
    assert_eq!(data.content, "ö");
  }

  /// Check that cursor movement stays within the content.
  #[test]
  fn cursor_is_clamped() {
    let mut data = data("x");
    assert!(!data.apply(Edit::Right));
    assert_eq!(data.cursor, 1);
    assert!(!data.apply(Edit::Left));
    assert!(!data.apply(Edit::Left));
    assert_eq!(data.cursor, 0);
    assert!(!data.apply(Edit::End));
    assert_eq!(data.cursor, 1);
  }

  #[test]
  fn color_role_names() {
    assert_eq!(ColorRole::default(), ColorRole::Normal);
    assert_eq!(ColorRole::Normal.logical_name(), "ReversedTextColor");
    assert_eq!(ColorRole::Muted.logical_name(), "ReversedSecondaryTextColor");
  }
}
