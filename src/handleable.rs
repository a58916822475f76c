// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;

use async_trait::async_trait;

use crate::MutCap;


/// A trait representing an object capable of handling events and
/// reacting to changes of the input focus.
#[async_trait(?Send)]
pub trait Handleable<E>: Debug {
  /// Handle an event.
  ///
  /// The widget has the option to either consume the event and return
  /// nothing, in which case no one else will get informed about it,
  /// forward it directly (the default behavior), in which case its
  /// parent widget will receive it, or return a completely different
  /// event.
  async fn handle(&self, _cap: &mut dyn MutCap<E>, event: E) -> Option<E> {
    // By default we just pass through the event, which will cause it to
    // bubble up to the parent.
    Some(event)
  }

  /// React to the widget having received the input focus.
  ///
  /// The `Ui` invokes this method after it recorded the new focus, so
  /// that [`Cap::is_focused`][crate::Cap::is_focused] reports the
  /// widget as focused already. The return value indicates whether the
  /// notification got consumed.
  fn focus_in(&self, _cap: &mut dyn MutCap<E>) -> bool {
    false
  }

  /// React to the widget having lost the input focus.
  ///
  /// The widget is no longer reported as focused at the time this
  /// method is invoked. The return value indicates whether the
  /// notification got consumed.
  fn focus_out(&self, _cap: &mut dyn MutCap<E>) -> bool {
    false
  }
}
