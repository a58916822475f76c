// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(
  clippy::assertions_on_constants,
  clippy::let_unit_value,
  clippy::redundant_field_names,
)]
#![warn(
  future_incompatible,
  missing_copy_implementations,
  missing_debug_implementations,
  missing_docs,
  rust_2018_compatibility,
  rust_2018_idioms,
  trivial_numeric_casts,
  unreachable_pub,
  unstable_features,
  unused_import_braces,
  unused_qualifications,
  unused_results,
)]

//! A crate providing touch friendly widgets on top of a small UI core
//! that is agnostic of the underlying system, its rendering machinery,
//! and event dispatching.
//!
//! The centerpiece is the [`PlaceholderTextField`], a text field that
//! displays an advisory placeholder text while it is empty and
//! unfocused. In addition, a set of factory functions creates buttons,
//! text fields, and views with consistent sizing presets (see
//! [`Size`]).

mod button;
mod dummy;
mod entry;
mod handleable;
mod helpers;
mod notify;
mod renderable;
mod renderer;
mod size;
mod text;
mod ui;
mod view;
mod widget;

use self::dummy::Dummy;

pub use self::button::Button;
pub use self::button::ButtonData;
pub use self::button::ButtonKind;
pub use self::button::RadioGroup;
pub use self::entry::PlaceholderData;
pub use self::entry::PlaceholderTextField;
pub use self::handleable::Handleable;
pub use self::helpers::add_button;
pub use self::helpers::add_icon_view;
pub use self::helpers::add_icon_view_with_model;
pub use self::helpers::add_radio_button;
pub use self::helpers::add_radio_button_from_widget;
pub use self::helpers::add_text_field;
pub use self::helpers::add_toggle_button;
pub use self::helpers::add_tree_view;
pub use self::helpers::add_tree_view_with_model;
pub use self::notify::NotifyFn;
pub use self::notify::Property;
pub use self::notify::Subscription;
pub use self::renderable::Renderable;
pub use self::renderer::BBox;
pub use self::renderer::Renderer;
pub use self::size::set_theme_size;
pub use self::size::Extent;
pub use self::size::Size;
pub use self::size::SizeRequest;
pub use self::size::FINGER_HEIGHT;
pub use self::size::FINGER_WIDGET_NAME;
pub use self::size::THUMB_HEIGHT;
pub use self::size::THUMB_WIDGET_NAME;
pub use self::text::AsEdit;
pub use self::text::ColorRole;
pub use self::text::Edit;
pub use self::text::TextField;
pub use self::text::TextFieldData;
pub use self::text::TextState;
pub use self::ui::Cap;
pub use self::ui::ChildIter;
pub use self::ui::Id;
pub use self::ui::MutCap;
pub use self::ui::NewDataFn;
pub use self::ui::NewWidgetFn;
pub use self::ui::Ui;
pub use self::view::Icon;
pub use self::view::IconView;
pub use self::view::ListModel;
pub use self::view::Tree;
pub use self::view::TreeView;
pub use self::view::UiMode;
pub use self::view::View;
pub use self::view::ViewData;
pub use self::widget::Object;
pub use self::widget::Widget;

/// A module providing custom derive functionality for `gui-touch`
/// related traits.
///
/// The module merely re-exports the procedural macros provided by the
/// `gui_touch_derive` crate.
#[cfg(feature = "derive")]
pub mod derive {
  pub use gui_touch_derive::*;
}
