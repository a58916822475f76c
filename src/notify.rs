// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::RefCell;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result;
use std::rc::Rc;

use crate::Id;
use crate::MutCap;


/// A widget property whose changes can be subscribed to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Property {
  /// The widget's visibility flag changed.
  Visible,
  /// The widget got moved to a different parent.
  Parent,
}


/// The type of a function invoked when a subscribed to property of a
/// widget changes. It receives the `Id` of the widget in question.
pub type NotifyFn<E> = dyn Fn(&mut dyn MutCap<E>, Id);


struct Entry<E> {
  key: usize,
  widget: Id,
  property: Property,
  handler: Rc<NotifyFn<E>>,
}


/// The set of all active subscriptions of a `Ui`.
pub(crate) struct Registry<E> {
  next_key: usize,
  entries: Vec<Entry<E>>,
}

impl<E> Registry<E> {
  pub(crate) fn new() -> Self {
    Self {
      next_key: 0,
      entries: Vec::new(),
    }
  }

  pub(crate) fn insert(&mut self, widget: Id, property: Property, handler: Rc<NotifyFn<E>>) -> usize {
    let key = self.next_key;
    self.next_key += 1;
    self.entries.push(Entry {
      key,
      widget,
      property,
      handler,
    });
    key
  }

  pub(crate) fn remove(&mut self, key: usize) {
    self.entries.retain(|entry| entry.key != key)
  }

  /// Retrieve the handlers currently subscribed to `property` of
  /// `widget`, in subscription order, along with their keys.
  pub(crate) fn handlers(&self, widget: Id, property: Property) -> Vec<(usize, Rc<NotifyFn<E>>)> {
    self
      .entries
      .iter()
      .filter(|entry| entry.widget == widget && entry.property == property)
      .map(|entry| (entry.key, Rc::clone(&entry.handler)))
      .collect()
  }

  /// Check whether the subscription with the given key is still active.
  pub(crate) fn contains(&self, key: usize) -> bool {
    self.entries.iter().any(|entry| entry.key == key)
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }
}

impl<E> Debug for Registry<E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Registry")
      .field("next_key", &self.next_key)
      .field("entries", &self.entries.len())
      .finish()
  }
}


/// A handle representing a subscription to changes of a widget
/// property.
///
/// The subscription stays active for as long as the handle is alive.
/// Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
  unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
  pub(crate) fn new<E>(registry: &Rc<RefCell<Registry<E>>>, key: usize) -> Self
  where
    E: 'static,
  {
    let registry = Rc::downgrade(registry);
    let unsubscribe = move || {
      // The `Ui` may be gone already, in which case there is nothing
      // left to unsubscribe from.
      if let Some(registry) = registry.upgrade() {
        registry.borrow_mut().remove(key)
      }
    };

    Self {
      unsubscribe: Some(Box::new(unsubscribe)),
    }
  }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("Subscription")
      .field("active", &self.unsubscribe.is_some())
      .finish()
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    if let Some(unsubscribe) = self.unsubscribe.take() {
      unsubscribe()
    }
  }
}
