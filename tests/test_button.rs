// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

mod common;

use gui_touch::add_button;
use gui_touch::add_radio_button;
use gui_touch::add_radio_button_from_widget;
use gui_touch::add_toggle_button;
use gui_touch::Button;
use gui_touch::ButtonKind;
use gui_touch::Cap;
use gui_touch::Extent;
use gui_touch::MutCap;
use gui_touch::Object;
use gui_touch::RadioGroup;
use gui_touch::Size;
use gui_touch::SizeRequest;
use gui_touch::FINGER_WIDGET_NAME;
use gui_touch::THUMB_WIDGET_NAME;

use common::add_test_widget;
use common::new_ui;


#[test]
fn button_factories() {
  let (mut ui, root) = new_ui();
  let b1 = add_button(&mut ui, root, Size::HALFSCREEN_WIDTH | Size::FINGER_HEIGHT);
  let b2 = add_toggle_button(&mut ui, root, Size::THUMB_HEIGHT);
  let b3 = add_button(&mut ui, root, Size::FULLSCREEN_WIDTH);

  assert_eq!(Button::new(b1).kind(&ui), ButtonKind::Normal);
  assert_eq!(Button::new(b2).kind(&ui), ButtonKind::Toggle);

  assert_eq!(ui.name(b1), Some(FINGER_WIDGET_NAME));
  assert_eq!(
    ui.size_request(b1),
    SizeRequest {
      width: Extent::HalfScreen,
      height: Extent::Fixed(70),
    }
  );
  assert_eq!(ui.name(b2), Some(THUMB_WIDGET_NAME));
  assert_eq!(ui.size_request(b2).height, Extent::Fixed(105));
  // Without a height hint the button is left unnamed.
  assert_eq!(ui.name(b3), None);
  assert_eq!(ui.size_request(b3).width, Extent::FullScreen);
  assert_eq!(ui.size_request(b3).height, Extent::Auto);
}

#[test]
fn label() {
  let (mut ui, root) = new_ui();
  let button = Button::new(add_button(&mut ui, root, Size::AUTO));

  assert_eq!(button.label(&ui), "");
  button.set_label(&mut ui, "OK");
  assert_eq!(button.label(&ui), "OK");
}

#[test]
fn activation() {
  let (mut ui, root) = new_ui();
  let push = Button::new(add_button(&mut ui, root, Size::AUTO));
  let toggle = Button::new(add_toggle_button(&mut ui, root, Size::AUTO));

  push.activate(&mut ui);
  assert!(!push.is_active(&ui));

  assert!(!toggle.is_active(&ui));
  toggle.activate(&mut ui);
  assert!(toggle.is_active(&ui));
  toggle.activate(&mut ui);
  assert!(!toggle.is_active(&ui));
}

/// Check that at most one radio button of a group is active.
#[test]
fn radio_groups() {
  let (mut ui, root) = new_ui();
  let container = add_test_widget(&mut ui, root);
  let r1 = add_radio_button(&mut ui, root, Size::FINGER_HEIGHT, None);
  let group = Button::group_of(&ui, r1);
  let r2 = add_radio_button(&mut ui, root, Size::FINGER_HEIGHT, Some(group));
  // Group members do not have to share a parent.
  let r3 = add_radio_button_from_widget(&mut ui, container, Size::AUTO, Some(r2));
  let other = add_radio_button_from_widget(&mut ui, root, Size::AUTO, None);

  assert_eq!(Button::group_of(&ui, r3), group);
  assert_ne!(Button::group_of(&ui, other), group);

  // The first button of a group is active.
  let active = |ui: &dyn Cap| {
    [r1, r2, r3, other]
      .into_iter()
      .map(|id| Button::new(id).is_active(ui))
      .collect::<Vec<_>>()
  };
  assert_eq!(active(&ui), vec![true, false, false, true]);

  Button::new(r3).activate(&mut ui);
  assert_eq!(active(&ui), vec![false, false, true, true]);

  Button::new(r2).activate(&mut ui);
  assert_eq!(active(&ui), vec![false, true, false, true]);

  // Activating the active button keeps it active.
  Button::new(r2).activate(&mut ui);
  assert_eq!(active(&ui), vec![false, true, false, true]);
}

#[test]
fn independent_radio_groups() {
  assert_ne!(RadioGroup::new(), RadioGroup::new());
}

#[test]
#[should_panic(expected = "not a radio button")]
fn radio_button_from_non_radio_button() {
  let (mut ui, root) = new_ui();
  let toggle = add_toggle_button(&mut ui, root, Size::AUTO);

  let _ = add_radio_button_from_widget(&mut ui, root, Size::AUTO, Some(toggle));
}

/// Check that a button keeps its image visible.
#[test]
fn image_stays_visible() {
  let (mut ui, root) = new_ui();
  let button = Button::new(add_button(&mut ui, root, Size::AUTO));
  let image = add_test_widget(&mut ui, root);

  ui.hide(image);
  button.set_image(&mut ui, Some(image));
  assert_eq!(button.image(&ui), Some(image));
  assert_eq!(ui.parent_id(image), Some(button.id()));
  assert!(ui.is_visible(image));

  ui.hide(image);
  assert!(ui.is_visible(image));

  // Hiding the button itself hides the image along with it.
  ui.hide(button.id());
  assert!(ui.is_visible(image));
  assert!(!ui.is_displayed(image));
}

/// Check that keeping the image visible does not show a hidden button.
#[test]
fn image_of_hidden_button() {
  let (mut ui, root) = new_ui();
  let container = add_test_widget(&mut ui, root);
  let button = Button::new(add_button(&mut ui, container, Size::AUTO));
  let image = add_test_widget(&mut ui, root);

  ui.hide(container);
  ui.hide(button.id());
  ui.hide(image);
  button.set_image(&mut ui, Some(image));
  assert!(ui.is_visible(image));
  assert!(!ui.is_visible(button.id()));
  assert!(!ui.is_visible(container));

  ui.hide(image);
  assert!(ui.is_visible(image));
  assert!(!ui.is_displayed(image));
  assert!(!ui.is_visible(button.id()));
  assert!(!ui.is_visible(container));
}

/// Check that a button forgets about its image once it gets moved
/// elsewhere.
#[test]
fn image_reparented() {
  let (mut ui, root) = new_ui();
  let button = Button::new(add_button(&mut ui, root, Size::AUTO));
  let image = add_test_widget(&mut ui, root);

  button.set_image(&mut ui, Some(image));
  ui.reparent(image, root);
  assert_eq!(button.image(&ui), None);

  ui.hide(image);
  assert!(!ui.is_visible(image));

  // Moving the image back does not make the button take it again.
  ui.reparent(image, button.id());
  assert_eq!(button.image(&ui), None);
}

/// Check that replacing or clearing the image releases the previous one.
#[test]
fn image_replaced() {
  let (mut ui, root) = new_ui();
  let button = Button::new(add_button(&mut ui, root, Size::AUTO));
  let image1 = add_test_widget(&mut ui, root);
  let image2 = add_test_widget(&mut ui, root);

  button.set_image(&mut ui, Some(image1));
  button.set_image(&mut ui, Some(image2));
  assert_eq!(button.image(&ui), Some(image2));

  ui.hide(image1);
  assert!(!ui.is_visible(image1));
  ui.hide(image2);
  assert!(ui.is_visible(image2));

  button.set_image(&mut ui, None);
  assert_eq!(button.image(&ui), None);
  ui.hide(image2);
  assert!(!ui.is_visible(image2));
}

/// Check that setting the current image again keeps it working.
#[test]
fn image_set_twice() {
  let (mut ui, root) = new_ui();
  let button = Button::new(add_button(&mut ui, root, Size::AUTO));
  let image = add_test_widget(&mut ui, root);

  button.set_image(&mut ui, Some(image));
  button.set_image(&mut ui, Some(image));

  ui.hide(image);
  assert!(ui.is_visible(image));
  ui.reparent(image, root);
  assert_eq!(button.image(&ui), None);
}

/// Check that widget handles can be copied freely.
#[test]
fn handles_are_copies() {
  let (mut ui, root) = new_ui();
  let button = Button::new(add_toggle_button(&mut ui, root, Size::AUTO));
  let copy = button;

  copy.activate(&mut ui);
  assert!(button.is_active(&ui));
  assert_eq!(copy.id(), button.id());
}

#[test]
fn widget_data_access() {
  let (mut ui, root) = new_ui();
  let id = add_button(&mut ui, root, Size::AUTO);
  let cap: &mut dyn MutCap<common::Event> = &mut ui;

  Button::new(id).set_label(cap, "Cancel");
  assert_eq!(Button::new(id).label(cap), "Cancel");
}
