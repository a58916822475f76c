// Copyright (C) 2018-2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::Any;

use async_trait::async_trait;

use gui_touch::derive::Widget;
use gui_touch::AsEdit;
use gui_touch::Cap;
use gui_touch::Edit;
use gui_touch::Handleable;
use gui_touch::Id;
use gui_touch::MutCap;
use gui_touch::Ui;
use gui_touch::Widget;


/// An event type used for testing purposes.
#[allow(unused)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
  /// An empty event.
  Empty,
  /// An event containing a key.
  Key(char),
  /// An edit to apply to a text field.
  Edit(Edit),
}

impl AsEdit for Event {
  fn as_edit(&self) -> Option<Edit> {
    match self {
      Self::Empty | Self::Key(..) => None,
      Self::Edit(edit) => Some(*edit),
    }
  }
}

impl From<Edit> for Event {
  fn from(edit: Edit) -> Self {
    Self::Edit(edit)
  }
}


/// A focus notification as recorded by a [`TestWidget`], along with
/// whether the widget was reported as focused at the time.
#[allow(unused)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Focus {
  In { focused: bool },
  Out { focused: bool },
}


#[derive(Debug, Default)]
pub struct TestWidgetData {
  /// The focus notifications received so far.
  pub focus: Vec<Focus>,
  /// The events received so far.
  pub events: Vec<Event>,
  /// Whether to consume events.
  pub consume: bool,
}


/// A widget recording all events and focus notifications it receives.
#[derive(Debug, Widget)]
#[gui(default_new, Event = Event)]
pub struct TestWidget {
  id: Id,
}

#[allow(unused)]
impl TestWidget {
  pub fn new_data() -> Box<dyn Any> {
    Box::new(TestWidgetData::default())
  }

  /// Retrieve the data of the `TestWidget` with the given `Id`.
  pub fn data_of(cap: &dyn Cap, id: Id) -> &TestWidgetData {
    TestWidget::new(id).data::<TestWidgetData>(cap)
  }

  /// Retrieve the mutable data of the `TestWidget` with the given `Id`.
  pub fn data_mut_of(cap: &mut dyn MutCap<Event>, id: Id) -> &mut TestWidgetData {
    TestWidget::new(id).data_mut::<TestWidgetData>(cap)
  }
}

#[async_trait(?Send)]
impl Handleable<Event> for TestWidget {
  async fn handle(&self, cap: &mut dyn MutCap<Event>, event: Event) -> Option<Event> {
    // Also check that we can access the non-mutable version of the data.
    let _ = self.data::<TestWidgetData>(cap);

    let data = self.data_mut::<TestWidgetData>(cap);
    data.events.push(event);

    if data.consume {
      None
    } else {
      Some(event)
    }
  }

  fn focus_in(&self, cap: &mut dyn MutCap<Event>) -> bool {
    let focused = cap.is_focused(self.id);
    self.data_mut::<TestWidgetData>(cap).focus.push(Focus::In { focused });
    false
  }

  fn focus_out(&self, cap: &mut dyn MutCap<Event>) -> bool {
    let focused = cap.is_focused(self.id);
    self.data_mut::<TestWidgetData>(cap).focus.push(Focus::Out { focused });
    false
  }
}


/// Create a `Ui` with a `TestWidget` as its root.
#[allow(unused)]
pub fn new_ui() -> (Ui<Event>, Id) {
  Ui::new(TestWidget::new_data, |id, _cap| Box::new(TestWidget::new(id)))
}

/// Add a `TestWidget` to the given parent.
#[allow(unused)]
pub fn add_test_widget(ui: &mut Ui<Event>, parent: Id) -> Id {
  ui.add_ui_widget(parent, TestWidget::new_data, |id, _cap| {
    Box::new(TestWidget::new(id))
  })
}
