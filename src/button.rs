// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::type_name;
use std::any::Any;
use std::any::TypeId;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use log::debug;

use crate::BBox;
use crate::Cap;
use crate::Handleable;
use crate::Id;
use crate::MutCap;
use crate::Object;
use crate::Property;
use crate::Renderable;
use crate::Renderer;
use crate::Subscription;
use crate::Widget;


/// A group of radio buttons, of which at most one is active at a time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RadioGroup(usize);

impl RadioGroup {
  /// Create a new, empty radio group.
  #[expect(clippy::new_without_default)]
  pub fn new() -> Self {
    static NEXT_GROUP: AtomicUsize = AtomicUsize::new(0);

    Self(NEXT_GROUP.fetch_add(1, Ordering::Relaxed))
  }
}


/// The kind of a [`Button`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ButtonKind {
  /// A push button without state.
  Normal,
  /// A button toggling between active and inactive on activation.
  Toggle,
  /// A button becoming active on activation, deactivating all other
  /// buttons of its group.
  Radio(RadioGroup),
}


/// The image shown by a button, along with the subscriptions keeping it
/// visible.
#[derive(Debug)]
struct Image {
  id: Id,
  _visible: Subscription,
  _parent: Subscription,
}


/// The data of a [`Button`].
#[derive(Debug)]
pub struct ButtonData {
  kind: ButtonKind,
  label: String,
  active: bool,
  image: Option<Image>,
}

impl ButtonData {
  fn new(kind: ButtonKind, active: bool) -> Self {
    Self {
      kind,
      label: String::new(),
      active,
      image: None,
    }
  }
}


/// Show an image that just got hidden. The button itself keeps its
/// visibility.
fn keep_visible<E>(cap: &mut dyn MutCap<E>, image: Id) {
  if !cap.is_visible(image) {
    debug!("showing hidden button image {image}");
    cap.show_only(image)
  }
}


/// A button, optionally showing an image.
///
/// An image set on a button is always shown: the button makes sure to
/// show it again whenever it gets hidden, for as long as the image
/// stays a child of the button.
#[derive(Clone, Copy, Debug)]
pub struct Button {
  id: Id,
}

impl Button {
  /// Create a new `Button`.
  pub fn new(id: Id) -> Self {
    Self { id }
  }

  /// Create the data for a `Button` of the given kind.
  pub fn new_data(kind: ButtonKind, active: bool) -> Box<dyn Any> {
    Box::new(ButtonData::new(kind, active))
  }

  fn button_data(cap: &dyn Cap, id: Id) -> &ButtonData {
    cap
      .data(id)
      .downcast_ref::<ButtonData>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<ButtonData>()))
  }

  fn button_data_mut<E>(cap: &mut dyn MutCap<E>, id: Id) -> &mut ButtonData {
    cap
      .data_mut(id)
      .downcast_mut::<ButtonData>()
      .unwrap_or_else(|| panic!("widget {} carries no data of type {}", id, type_name::<ButtonData>()))
  }

  /// Retrieve the radio group of the button with the given `Id`.
  ///
  /// # Panics
  ///
  /// This function panics if the widget is not a radio button.
  pub fn group_of(cap: &dyn Cap, id: Id) -> RadioGroup {
    match Self::button_data(cap, id).kind {
      ButtonKind::Radio(group) => group,
      kind => panic!("widget {id} is a {kind:?} button, not a radio button"),
    }
  }

  /// Retrieve the kind of the button.
  pub fn kind(&self, cap: &dyn Cap) -> ButtonKind {
    Self::button_data(cap, self.id).kind
  }

  /// Retrieve the button's label.
  pub fn label<'c>(&self, cap: &'c dyn Cap) -> &'c str {
    &Self::button_data(cap, self.id).label
  }

  /// Set the button's label.
  pub fn set_label<E>(&self, cap: &mut dyn MutCap<E>, label: &str) {
    let data = Self::button_data_mut(cap, self.id);
    data.label.clear();
    data.label.push_str(label);
  }

  /// Check whether the button is active. Normal buttons never are.
  pub fn is_active(&self, cap: &dyn Cap) -> bool {
    Self::button_data(cap, self.id).active
  }

  /// Activate the button, as if it got clicked.
  pub fn activate<E>(&self, cap: &mut dyn MutCap<E>) {
    let kind = Self::button_data(cap, self.id).kind;
    match kind {
      ButtonKind::Normal => (),
      ButtonKind::Toggle => {
        let data = Self::button_data_mut(cap, self.id);
        data.active = !data.active;
      },
      ButtonKind::Radio(group) => {
        let members = radio_members(cap, group);
        for member in members {
          Self::button_data_mut(cap, member).active = member == self.id;
        }
      },
    }
    debug!("activated button {}", self.id);
  }

  /// Retrieve the image shown by the button, if any.
  pub fn image(&self, cap: &dyn Cap) -> Option<Id> {
    Self::button_data(cap, self.id).image.as_ref().map(|image| image.id)
  }

  /// Set or clear the image shown by the button.
  ///
  /// The image is made a child of the button and shown. If it gets
  /// hidden later on, it is shown again right away. Once the image is
  /// moved to a different parent, the button forgets about it.
  pub fn set_image<E>(&self, cap: &mut dyn MutCap<E>, image: Option<Id>)
  where
    E: 'static,
  {
    // Dropping the previous image unsubscribes from its changes.
    let _prev = Self::button_data_mut(cap, self.id).image.take();

    if let Some(image) = image {
      if cap.parent_id(image) != Some(self.id) {
        cap.reparent(image, self.id)
      }
      cap.show_only(image);

      let visible = cap.subscribe(image, Property::Visible, Box::new(keep_visible::<E>));
      let button = self.id;
      let parent = cap.subscribe(
        image,
        Property::Parent,
        Box::new(move |cap: &mut dyn MutCap<E>, image: Id| {
          if cap.parent_id(image) != Some(button) {
            let data = Self::button_data_mut(cap, button);
            if data.image.as_ref().map(|image| image.id) == Some(image) {
              debug!("image {image} got removed from button {button}");
              data.image = None;
            }
          }
        }),
      );

      Self::button_data_mut(cap, self.id).image = Some(Image {
        id: image,
        _visible: visible,
        _parent: parent,
      });
    }
  }
}

/// Find all radio buttons belonging to `group`.
fn radio_members(cap: &dyn Cap, group: RadioGroup) -> Vec<Id> {
  let mut members = Vec::new();
  let mut pending = vec![cap.root_id()];

  while let Some(id) = pending.pop() {
    if let Some(data) = cap.data(id).downcast_ref::<ButtonData>() {
      if data.kind == ButtonKind::Radio(group) {
        members.push(id)
      }
    }
    pending.extend(cap.children(id).copied());
  }
  members
}

impl Object for Button {
  fn id(&self) -> Id {
    self.id
  }
}

impl Renderable for Button {
  fn type_id(&self) -> TypeId {
    TypeId::of::<Button>()
  }

  fn render(&self, cap: &dyn Cap, renderer: &dyn Renderer, bbox: BBox) -> BBox {
    renderer.render(self, cap, bbox)
  }
}

impl<E> Handleable<E> for Button where E: 'static {}

impl<E> Widget<E> for Button
where
  E: 'static,
{
  fn type_id(&self) -> TypeId {
    TypeId::of::<Button>()
  }
}
