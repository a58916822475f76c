// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

mod common;

use std::cell::Cell;
use std::cell::RefCell;

use gui_touch::add_button;
use gui_touch::add_text_field;
use gui_touch::BBox;
use gui_touch::Button;
use gui_touch::Cap;
use gui_touch::Id;
use gui_touch::MutCap;
use gui_touch::Object;
use gui_touch::PlaceholderTextField;
use gui_touch::Renderable;
use gui_touch::Renderer;
use gui_touch::Size;

use common::add_test_widget;
use common::new_ui;
use common::TestWidget;


const SCREEN: BBox = BBox {
  x: 0,
  y: 0,
  w: 800,
  h: 480,
};


#[derive(Debug)]
struct CountingRenderer {
  pre_render_count: Cell<u64>,
  post_render_count: Cell<u64>,
  total_render_count: Cell<u64>,
}

impl CountingRenderer {
  fn new() -> Self {
    CountingRenderer {
      pre_render_count: Cell::new(0),
      post_render_count: Cell::new(0),
      total_render_count: Cell::new(0),
    }
  }
}

impl Renderer for CountingRenderer {
  fn renderable_area(&self) -> BBox {
    BBox::default()
  }

  fn pre_render(&self) {
    self.pre_render_count.set(self.pre_render_count.get() + 1);
  }

  fn render(&self, _object: &dyn Renderable, _cap: &dyn Cap, bbox: BBox) -> BBox {
    self.total_render_count.set(self.total_render_count.get() + 1);
    bbox
  }

  fn post_render(&self) {
    self.post_render_count.set(self.post_render_count.get() + 1);
  }
}


#[derive(Debug, PartialEq)]
enum Step {
  Render(Id, BBox),
  Done(Id),
}


/// A renderer recording the bounding box each widget got rendered
/// with. Widgets with a name get rendered with a width reduced by ten
/// units, so that their children are offset.
#[derive(Debug, Default)]
struct RecordingRenderer {
  steps: RefCell<Vec<Step>>,
}

impl RecordingRenderer {
  fn id_of(object: &dyn Renderable) -> Id {
    if let Some(widget) = object.downcast_ref::<TestWidget>() {
      widget.id()
    } else if let Some(button) = object.downcast_ref::<Button>() {
      button.id()
    } else if let Some(field) = object.downcast_ref::<PlaceholderTextField>() {
      field.id()
    } else {
      panic!("Renderable {object:?} is unknown to the renderer")
    }
  }

  fn bbox_of(&self, widget: Id) -> BBox {
    self
      .steps
      .borrow()
      .iter()
      .find_map(|step| match step {
        Step::Render(id, bbox) if *id == widget => Some(*bbox),
        _ => None,
      })
      .unwrap()
  }
}

impl Renderer for RecordingRenderer {
  fn renderable_area(&self) -> BBox {
    SCREEN
  }

  fn render(&self, object: &dyn Renderable, cap: &dyn Cap, bbox: BBox) -> BBox {
    let id = Self::id_of(object);
    self.steps.borrow_mut().push(Step::Render(id, bbox));

    if cap.name(id).is_some() {
      BBox {
        x: bbox.x + 10,
        w: bbox.w - 10,
        ..bbox
      }
    } else {
      bbox
    }
  }

  fn render_done(&self, object: &dyn Renderable, _cap: &dyn Cap, _bbox: BBox) {
    let id = Self::id_of(object);
    self.steps.borrow_mut().push(Step::Done(id));
  }
}


#[test]
fn render_is_called_for_each_widget() {
  let renderer = CountingRenderer::new();
  let (mut ui, root) = new_ui();
  let _ = add_test_widget(&mut ui, root);
  let _ = add_test_widget(&mut ui, root);

  ui.render(&renderer);

  assert_eq!(renderer.pre_render_count.get(), 1);
  assert_eq!(renderer.post_render_count.get(), 1);
  assert_eq!(renderer.total_render_count.get(), 3);
}

#[test]
fn hidden_widgets_are_not_rendered() {
  let renderer = CountingRenderer::new();
  let (mut ui, root) = new_ui();
  let w1 = add_test_widget(&mut ui, root);
  let _ = add_test_widget(&mut ui, w1);
  let _ = add_test_widget(&mut ui, root);

  ui.hide(w1);
  ui.render(&renderer);

  assert_eq!(renderer.total_render_count.get(), 2);
}

/// Check that children are rendered after their parent, bottom-most
/// first, and that rendering of a parent concludes after its children.
#[test]
fn render_order() {
  let renderer = RecordingRenderer::default();
  let (mut ui, root) = new_ui();
  let w1 = add_test_widget(&mut ui, root);
  let w2 = add_test_widget(&mut ui, root);
  let w3 = add_test_widget(&mut ui, w1);

  ui.render(&renderer);

  let expected = vec![
    Step::Render(root, SCREEN),
    Step::Render(w2, SCREEN),
    Step::Done(w2),
    Step::Render(w1, SCREEN),
    Step::Render(w3, SCREEN),
    Step::Done(w3),
    Step::Done(w1),
    Step::Done(root),
  ];
  assert_eq!(*renderer.steps.borrow(), expected);
}

/// Check that the size presets applied by the factory functions
/// constrain the bounding boxes widgets are rendered with.
#[test]
fn size_presets_constrain_bbox() {
  let renderer = RecordingRenderer::default();
  let (mut ui, root) = new_ui();
  let half = add_button(&mut ui, root, Size::HALFSCREEN_WIDTH | Size::FINGER_HEIGHT);
  let full = add_button(&mut ui, root, Size::FULLSCREEN_WIDTH | Size::THUMB_HEIGHT);
  let auto = add_button(&mut ui, root, Size::AUTO);
  let field = add_text_field(&mut ui, root, Size::AUTO_WIDTH | Size::FINGER_HEIGHT);
  // A child of a named widget gets offset by its parent.
  let nested = add_button(&mut ui, field, Size::FULLSCREEN_WIDTH);

  ui.render(&renderer);

  let bbox = |x, w, h| BBox { x, y: 0, w, h };
  assert_eq!(renderer.bbox_of(half), bbox(0, 400, 70));
  assert_eq!(renderer.bbox_of(full), bbox(0, 800, 105));
  assert_eq!(renderer.bbox_of(auto), SCREEN);
  assert_eq!(renderer.bbox_of(field), bbox(0, 800, 70));
  // The full screen width does not fit into what the parent provides.
  assert_eq!(renderer.bbox_of(nested), bbox(10, 790, 70));
}

/// Check that screen relative sizes follow the renderable area.
#[test]
fn screen_relative_size() {
  #[derive(Debug)]
  struct SmallRenderer(RecordingRenderer);

  impl Renderer for SmallRenderer {
    fn renderable_area(&self) -> BBox {
      BBox {
        x: 0,
        y: 0,
        w: 320,
        h: 240,
      }
    }

    fn render(&self, object: &dyn Renderable, cap: &dyn Cap, bbox: BBox) -> BBox {
      self.0.render(object, cap, bbox)
    }
  }

  let renderer = SmallRenderer(RecordingRenderer::default());
  let (mut ui, root) = new_ui();
  let button = add_button(&mut ui, root, Size::HALFSCREEN_WIDTH);

  ui.render(&renderer);

  let bbox = renderer.0.bbox_of(button);
  assert_eq!((bbox.w, bbox.h), (160, 240));
}
