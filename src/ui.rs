// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::Any;
use std::cell::RefCell;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::mem::replace;
use std::rc::Rc;
use std::slice::Iter;
#[cfg(debug_assertions)]
use std::sync::atomic::AtomicUsize;
#[cfg(debug_assertions)]
use std::sync::atomic::Ordering;

use log::debug;
use log::trace;

use crate::notify::Registry;
use crate::BBox;
use crate::Dummy;
use crate::NotifyFn;
use crate::Property;
use crate::Renderer;
use crate::SizeRequest;
use crate::Subscription;
use crate::Widget;


/// An `Index` is our internal representation of an `Id`. `Id`s can
/// belong to different `Ui` objects and a validation step converts them
/// into an `Index`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Index {
  idx: usize,
}

impl Index {
  fn new(idx: usize) -> Self {
    Self { idx }
  }
}

impl Display for Index {
  /// Format the `Index` into the given formatter.
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "{}", self.idx)
  }
}


/// An `Id` uniquely representing a widget.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Id {
  #[cfg(debug_assertions)]
  ui_id: usize,
  idx: Index,
}

impl Id {
  fn new<E>(idx: usize, _ui: &Ui<E>) -> Id {
    Id {
      #[cfg(debug_assertions)]
      ui_id: _ui.id,
      idx: Index::new(idx),
    }
  }
}

impl Display for Id {
  /// Format the `Id` into the given formatter.
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "{}", self.idx)
  }
}


/// An iterator over the children of a widget.
pub type ChildIter<'widget> = Iter<'widget, Id>;

/// The type of a function creating the data associated with a widget.
pub type NewDataFn = dyn FnOnce() -> Box<dyn Any>;
/// The type of a function creating a widget.
pub type NewWidgetFn<E> = dyn FnOnce(Id, &mut dyn MutCap<E>) -> Box<dyn Widget<E>>;


/// A capability allowing for various widget related operations.
pub trait Cap: Debug {
  /// Retrieve a reference to a widget's data.
  fn data(&self, widget: Id) -> &dyn Any;

  /// Retrieve an iterator over the children. Iteration happens in
  /// z-order, from highest to lowest.
  fn children(&self, widget: Id) -> ChildIter<'_>;

  /// Retrieve the `Id` of the root widget.
  fn root_id(&self) -> Id;

  /// Retrieve the parent of the given widget.
  fn parent_id(&self, widget: Id) -> Option<Id>;

  /// Check whether a widget has its visibility flag set.
  ///
  /// Note that a return value of `true` does not necessary mean that
  /// the widget is actually visible. A widget is only visible if all
  /// its parents have the visibility flag set, too. The `is_displayed`
  /// method can be used to check for actual visibility.
  fn is_visible(&self, widget: Id) -> bool;

  /// Check whether a widget is actually being displayed.
  ///
  /// This method checks whether the referenced widget is actually being
  /// displayed, that is, whether its own as well as its parents'
  /// visibility flags are all set.
  fn is_displayed(&self, widget: Id) -> bool;

  /// Retrieve the currently focused widget.
  fn focused(&self) -> Option<Id>;

  /// Check whether the widget with the given `Id` is focused.
  fn is_focused(&self, widget: Id) -> bool;

  /// Retrieve the size a widget requested to be rendered with.
  fn size_request(&self, widget: Id) -> SizeRequest;

  /// Retrieve the name of a widget, if one was set.
  fn name(&self, widget: Id) -> Option<&str>;
}


/// A mutable capability allowing for various widget related operations.
pub trait MutCap<E>: Cap {
  /// Retrieve a mutable reference to a widget's data.
  fn data_mut(&mut self, widget: Id) -> &mut dyn Any;

  /// Add a widget to the `Ui` represented by the capability.
  fn add_widget(&mut self, parent: Id, new_data: Box<NewDataFn>, new_widget: Box<NewWidgetFn<E>>)
    -> Id;

  /// Show a widget, i.e., set its and its parents' visibility flag.
  ///
  /// This method sets the referenced widget's visibility flag as well
  /// as those of all its parents.
  fn show(&mut self, widget: Id);

  /// Set only the visibility flag of a widget.
  ///
  /// Contrary to [`MutCap::show`], the flags of the widget's parents
  /// are left untouched. A widget below a hidden parent stays hidden
  /// from the user.
  fn show_only(&mut self, widget: Id);

  /// Hide a widget, i.e., unset its visibility flag.
  ///
  /// This method makes sure that widget referenced is no longer
  /// displayed. If the widget has children, all those children will
  /// also be hidden. Should that affect the focused widget, it loses
  /// the focus.
  fn hide(&mut self, widget: Id);

  /// Focus a widget.
  ///
  /// The focused widget is the one receiving events first but may also
  /// be rendered in a different color or be otherwise highlighted. Note
  /// that being focused implies being visible. This invariant is
  /// enforced internally.
  ///
  /// The previously focused widget, if any, is informed about the loss
  /// of focus through [`Handleable::focus_out`][crate::Handleable::focus_out]
  /// before the newly focused one gets notified through
  /// [`Handleable::focus_in`][crate::Handleable::focus_in].
  fn focus(&mut self, widget: Id);

  /// Move a widget, along with all its children, to a new parent.
  ///
  /// # Panics
  ///
  /// This method panics if `widget` is the root widget or if `parent`
  /// is part of the subtree rooted at `widget`.
  fn reparent(&mut self, widget: Id, parent: Id);

  /// Set the size a widget requests to be rendered with.
  fn set_size_request(&mut self, widget: Id, request: SizeRequest);

  /// Set the name of a widget.
  fn set_name(&mut self, widget: Id, name: &str);

  /// Subscribe to changes of a property of a widget.
  ///
  /// The handler is invoked after each change for as long as the
  /// returned [`Subscription`] is kept alive.
  fn subscribe(&mut self, widget: Id, property: Property, handler: Box<NotifyFn<E>>)
    -> Subscription;
}


#[cfg(debug_assertions)]
fn get_next_ui_id() -> usize {
  static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

  NEXT_ID.fetch_add(1, Ordering::Relaxed)
}


/// This type contains data that is common to all widgets.
#[derive(Debug)]
struct WidgetData {
  /// The `Id` of the parent widget.
  ///
  /// This value may only be `None` for the root widget.
  parent_idx: Option<Index>,
  /// Vector of all the children that have this widget as a parent.
  children: Vec<Id>,
  /// The data associated with the widget.
  data: Box<dyn Any>,
  /// Flag indicating the widget's visibility state.
  visible: bool,
  /// The size the widget requests to be rendered with.
  size: SizeRequest,
  /// The widget's name, if any.
  name: Option<String>,
}

impl WidgetData {
  fn new(parent_idx: Option<Index>, data: Box<dyn Any>) -> Self {
    Self {
      parent_idx,
      children: Vec::new(),
      data,
      visible: true,
      size: SizeRequest::default(),
      name: None,
    }
  }
}


/// A `Ui` is a container for related widgets.
pub struct Ui<E> {
  #[cfg(debug_assertions)]
  id: usize,
  widgets: Vec<(WidgetData, Rc<dyn Widget<E>>)>,
  focused: Option<Index>,
  registry: Rc<RefCell<Registry<E>>>,
}

// A derived implementation would needlessly require `E: Debug`.
impl<E> Debug for Ui<E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    let mut debug = f.debug_struct("Ui");
    #[cfg(debug_assertions)]
    let _ = debug.field("id", &self.id);
    debug
      .field("widgets", &self.widgets)
      .field("focused", &self.focused)
      .field("registry", &self.registry)
      .finish()
  }
}

impl<E> Ui<E>
where
  E: 'static,
{
  /// Create a new `Ui` instance containing one widget that acts as the
  /// root widget.
  pub fn new<D, W>(new_data: D, new_root_widget: W) -> (Self, Id)
  where
    D: FnOnce() -> Box<dyn Any>,
    W: FnOnce(Id, &mut dyn MutCap<E>) -> Box<dyn Widget<E>>,
  {
    let mut ui = Self {
      #[cfg(debug_assertions)]
      id: get_next_ui_id(),
      widgets: Vec::new(),
      focused: None,
      registry: Rc::new(RefCell::new(Registry::new())),
    };

    let id = ui._add_widget(None, new_data, new_root_widget);
    debug_assert_eq!(id.idx.idx, 0);
    (ui, id)
  }

  /// Add a widget to the `Ui`.
  ///
  /// This method is the equivalent of [`MutCap::add_widget`] for usage
  /// from outside of event handlers.
  pub fn add_ui_widget<D, W>(&mut self, parent: Id, new_data: D, new_widget: W) -> Id
  where
    D: FnOnce() -> Box<dyn Any>,
    W: FnOnce(Id, &mut dyn MutCap<E>) -> Box<dyn Widget<E>>,
  {
    let parent_idx = self.validate(parent);
    self._add_widget(Some(parent_idx), new_data, new_widget)
  }

  fn _add_widget<D, W>(&mut self, parent_idx: Option<Index>, new_data: D, new_widget: W) -> Id
  where
    D: FnOnce() -> Box<dyn Any>,
    W: FnOnce(Id, &mut dyn MutCap<E>) -> Box<dyn Widget<E>>,
  {
    let idx = Index::new(self.widgets.len());
    let id = Id::new(idx.idx, self);

    // We require some trickery here to allow for dynamic widget
    // creation from within the constructor of another widget. In
    // particular, we install a "dummy" widget that acts as a container
    // to which newly created child widgets can be registered.
    let dummy: Rc<dyn Widget<E>> = Rc::new(Dummy);
    let data = WidgetData::new(parent_idx, new_data());
    self.widgets.push((data, dummy));

    // The widget is already linked to its parent but the parent needs to
    // know about the child as well. We do that registration before the
    // widget is actually fully constructed to preserve the invariant
    // that a widget's ID is part of the list of IDs managed by its
    // parent.
    if let Some(parent_idx) = parent_idx {
      self.widgets[parent_idx.idx].0.children.push(id)
    }

    let widget = new_widget(id, self);
    // Replace our dummy with the actual widget we just created. Note
    // that because we store the children separately as part of a
    // `WidgetData` object there is no need for us to do anything about
    // them.
    self.widgets[idx.idx].1 = Rc::from(widget);
    trace!("added widget {id}");
    id
  }

  /// Validate an `Id`, converting it into the internally used `Index`.
  #[inline]
  fn validate(&self, id: Id) -> Index {
    #[cfg(debug_assertions)]
    debug_assert_eq!(id.ui_id, self.id, "The given Id belongs to a different Ui");
    id.idx
  }

  /// Lookup a widget from an `Index`.
  ///
  /// Widgets are reference counted, which allows for invoking them
  /// while handing out a mutable reference to the `Ui` itself.
  fn lookup(&self, idx: Index) -> Rc<dyn Widget<E>> {
    Rc::clone(&self.widgets[idx.idx].1)
  }

  fn children(&self, idx: Index) -> ChildIter<'_> {
    self.widgets[idx.idx].0.children.iter()
  }

  /// Show the widget with the given `Index` and recursively all its parents.
  ///
  /// Note that the given reordering function needs to be idempotent
  /// with respect to repeated reordering of the same widgets.
  fn show<F>(&mut self, idx: Index, reorder_fn: F)
  where
    F: Fn(&mut Ui<E>, Index),
  {
    // Always run before making the widget visible. The reorder function
    // may check for visibility internally and relies in the value being
    // that before the change.
    reorder_fn(self, idx);

    let (changed, parent_idx) = {
      let data = &mut self.widgets[idx.idx].0;
      let changed = !replace(&mut data.visible, true);
      (changed, data.parent_idx)
    };

    if let Some(parent_idx) = parent_idx {
      self.show(parent_idx, reorder_fn)
    }

    if changed {
      self.notify(idx, Property::Visible)
    }
  }

  /// Reorder the widget with the given `Index` within its parent's
  /// children.
  fn reorder<F>(&mut self, idx: Index, new_idx_fn: F)
  where
    F: FnOnce(&Ui<E>, &[Id]) -> usize,
  {
    if let Some(parent_idx) = self.widgets[idx.idx].0.parent_idx {
      // First retrieve the index of the widget we are interested in in
      // its parent's list of children.
      let cur_idx = self.child_position(parent_idx, idx);

      // Now remove said widget from the list of children.
      let id = self.widgets[parent_idx.idx].0.children.remove(cur_idx);
      // Next find the spot where to insert the widget.
      let new_idx = new_idx_fn(self, &self.widgets[parent_idx.idx].0.children);
      // And reinsert it at this spot.
      self.widgets[parent_idx.idx].0.children.insert(new_idx, id)
    } else {
      // No parent. Nothing to do.
    }
  }

  /// Find the position of the widget with the given `Index` in the list
  /// of children of `parent_idx`.
  fn child_position(&self, parent_idx: Index, idx: Index) -> usize {
    self.widgets[parent_idx.idx]
      .0
      .children
      .iter()
      .position(|x| x.idx == idx)
      .unwrap_or_else(|| panic!("widget {idx} is not a child of {parent_idx}"))
  }

  /// Reorder the widget with the given `Index` as the first child.
  fn reorder_as_focused(&mut self, idx: Index) {
    // Reordering to the top is an idempotent operations already, but it
    // potentially involves allocation and deallocation and so don't do
    // it unless necessary.
    if !self.is_top_most_child(idx) {
      self.reorder(idx, |_, _| 0);
    }
  }

  /// Reorder the widget with the given `Index` as the last visible one.
  fn reorder_as_visible(&mut self, idx: Index) {
    // In order to appear idempotent, only reorder the given widget in
    // the parent's list of children if it is not already visible.
    if !self.is_visible(idx) {
      self.reorder(idx, |ui, children| {
        children
          .iter()
          .rev()
          .position(|x| Cap::is_visible(ui, *x))
          .map(|x| children.len() - x)
          .unwrap_or(0)
      })
    }
  }

  /// Reorder the widget with the given `Index` as the first hidden one.
  fn reorder_as_hidden(&mut self, idx: Index) {
    if self.is_visible(idx) {
      self.reorder(idx, |ui, children| {
        children
          .iter()
          .position(|x| !Cap::is_visible(ui, *x))
          .unwrap_or(children.len())
      })
    }
  }

  fn is_visible(&self, idx: Index) -> bool {
    self.widgets[idx.idx].0.visible
  }

  fn is_displayed(&self, idx: Index) -> bool {
    let data = &self.widgets[idx.idx].0;
    data.visible && data.parent_idx.map_or(true, |x| self.is_displayed(x))
  }

  fn is_top_most_child(&self, idx: Index) -> bool {
    let parent_idx = self.widgets[idx.idx].0.parent_idx;

    if let Some(parent_idx) = parent_idx {
      let children = &self.widgets[parent_idx.idx].0.children;
      children[0].idx == idx
    } else {
      true
    }
  }

  /// Check whether `idx` refers to `ancestor` or one of its
  /// descendants.
  fn is_in_subtree(&self, idx: Index, ancestor: Index) -> bool {
    let mut current = Some(idx);
    while let Some(idx) = current {
      if idx == ancestor {
        return true
      }
      current = self.widgets[idx.idx].0.parent_idx;
    }
    false
  }

  fn focus(&mut self, idx: Index) {
    if self.focused == Some(idx) {
      return
    }

    // We want to provide the invariant that a focused widget needs to
    // be visible.
    self.show(idx, Ui::reorder_as_focused);

    let prev = self.focused.replace(idx);
    debug!(
      "moving focus from {} to {idx}",
      prev.map_or_else(|| "nothing".to_string(), |x| x.to_string())
    );

    if let Some(prev) = prev {
      self.focus_out(prev)
    }
    self.focus_in(idx)
  }

  /// Drop the focus if the focused widget is no longer being displayed.
  fn validate_focus(&mut self) {
    if let Some(focused) = self.focused {
      if !self.is_displayed(focused) {
        debug!("widget {focused} lost focus as it is no longer displayed");
        self.focused = None;
        self.focus_out(focused)
      }
    }
  }

  fn focus_in(&mut self, idx: Index) {
    let widget = self.lookup(idx);
    let handled = widget.focus_in(self);
    trace!("focus-in of widget {idx} handled: {handled}");
  }

  fn focus_out(&mut self, idx: Index) {
    let widget = self.lookup(idx);
    let handled = widget.focus_out(self);
    trace!("focus-out of widget {idx} handled: {handled}");
  }

  /// Invoke all handlers subscribed to `property` of the widget with
  /// the given `Index`.
  fn notify(&mut self, idx: Index, property: Property) {
    let id = Id::new(idx.idx, self);
    // Handlers may subscribe or unsubscribe, so we must not keep the
    // registry borrowed while invoking them.
    let handlers = self.registry.borrow().handlers(id, property);

    for (key, handler) in handlers {
      // An earlier handler may have dropped this subscription.
      if !self.registry.borrow().contains(key) {
        continue
      }
      trace!("notifying subscriber of {property:?} of widget {id}");
      handler(self, id)
    }
  }

  /// Render the `Ui` with the given `Renderer`.
  pub fn render(&self, renderer: &dyn Renderer) {
    // We cannot simply iterate through all widgets in `self.widgets`
    // when rendering, because we need to take parent-child
    // relationships into account in case widgets cover each other.
    let idx = self.validate(self.root_id());
    let screen = renderer.renderable_area();

    renderer.pre_render();
    self.render_all(idx, renderer, screen, screen);
    renderer.post_render();
  }

  /// Recursively render the given widget and its children.
  fn render_all(&self, idx: Index, renderer: &dyn Renderer, screen: BBox, bbox: BBox) {
    if self.is_visible(idx) {
      let (data, widget) = &self.widgets[idx.idx];
      let bbox = data.size.constrain(bbox, screen);
      let inner = widget.render(self, renderer, bbox);

      for child_id in self.children(idx).rev() {
        let child_idx = self.validate(*child_id);
        self.render_all(child_idx, renderer, screen, inner)
      }

      renderer.render_done(&**widget, self, bbox);
    }
  }

  /// Handle an event.
  ///
  /// The event is passed to the currently focused widget. In case the
  /// widget does not consume it, it bubbles up to the widget's parent,
  /// and so on. An event that got consumed by none of the widgets is
  /// returned.
  pub async fn handle<T>(&mut self, event: T) -> Option<E>
  where
    T: Into<E>,
  {
    let event = event.into();

    match self.focused {
      Some(idx) => self.handle_event(idx, event).await,
      // There is no receiver for this event. Return it as-is.
      None => Some(event),
    }
  }

  /// Bubble up an event until it is handled by some `Widget`.
  async fn handle_event(&mut self, idx: Index, event: E) -> Option<E> {
    let mut idx = idx;
    let mut event = event;

    loop {
      let widget = self.lookup(idx);
      trace!("dispatching event to widget {idx}");

      event = widget.handle(self, event).await?;

      match self.widgets[idx.idx].0.parent_idx {
        Some(parent_idx) => idx = parent_idx,
        // Propagation reached the root widget.
        None => break Some(event),
      }
    }
  }
}

impl<E> Cap for Ui<E>
where
  E: 'static,
{
  fn data(&self, widget: Id) -> &dyn Any {
    let idx = self.validate(widget);
    self.widgets[idx.idx].0.data.as_ref()
  }

  fn children(&self, widget: Id) -> ChildIter<'_> {
    self.children(self.validate(widget))
  }

  fn root_id(&self) -> Id {
    debug_assert!(!self.widgets.is_empty());
    Id::new(0, self)
  }

  fn parent_id(&self, widget: Id) -> Option<Id> {
    let idx = self.validate(widget);
    let parent_idx = self.widgets[idx.idx].0.parent_idx;
    let parent_id = parent_idx.map(|x| Id::new(x.idx, self));
    debug_assert!(parent_id.map_or(true, |x| Cap::children(self, x).any(|x| *x == widget)));
    parent_id
  }

  fn is_visible(&self, widget: Id) -> bool {
    self.is_visible(self.validate(widget))
  }

  fn is_displayed(&self, widget: Id) -> bool {
    self.is_displayed(self.validate(widget))
  }

  fn focused(&self) -> Option<Id> {
    self.focused.map(|x| Id::new(x.idx, self))
  }

  fn is_focused(&self, widget: Id) -> bool {
    let idx = self.validate(widget);
    let result = self.focused == Some(idx);
    debug_assert!(result && self.is_displayed(idx) || !result);
    result
  }

  fn size_request(&self, widget: Id) -> SizeRequest {
    let idx = self.validate(widget);
    self.widgets[idx.idx].0.size
  }

  fn name(&self, widget: Id) -> Option<&str> {
    let idx = self.validate(widget);
    self.widgets[idx.idx].0.name.as_deref()
  }
}

impl<E> MutCap<E> for Ui<E>
where
  E: 'static,
{
  fn data_mut(&mut self, widget: Id) -> &mut dyn Any {
    let idx = self.validate(widget);
    self.widgets[idx.idx].0.data.as_mut()
  }

  fn add_widget(
    &mut self,
    parent: Id,
    new_data: Box<NewDataFn>,
    new_widget: Box<NewWidgetFn<E>>,
  ) -> Id {
    self.add_ui_widget(parent, new_data, new_widget)
  }

  fn show(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.show(idx, Ui::reorder_as_visible);
  }

  fn show_only(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.reorder_as_visible(idx);

    let changed = !replace(&mut self.widgets[idx.idx].0.visible, true);
    if changed {
      self.notify(idx, Property::Visible)
    }
  }

  fn hide(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.reorder_as_hidden(idx);

    let changed = replace(&mut self.widgets[idx.idx].0.visible, false);
    self.validate_focus();

    if changed {
      self.notify(idx, Property::Visible)
    }
  }

  fn focus(&mut self, widget: Id) {
    let idx = self.validate(widget);
    self.focus(idx)
  }

  fn reparent(&mut self, widget: Id, parent: Id) {
    let idx = self.validate(widget);
    let parent_idx = self.validate(parent);

    let old_parent_idx = self.widgets[idx.idx]
      .0
      .parent_idx
      .unwrap_or_else(|| panic!("the root widget {idx} cannot be reparented"));
    assert!(
      !self.is_in_subtree(parent_idx, idx),
      "widget {idx} cannot be moved into its own subtree"
    );

    if old_parent_idx == parent_idx {
      return
    }

    let cur_idx = self.child_position(old_parent_idx, idx);
    let id = self.widgets[old_parent_idx.idx].0.children.remove(cur_idx);
    self.widgets[parent_idx.idx].0.children.push(id);
    self.widgets[idx.idx].0.parent_idx = Some(parent_idx);
    debug!("moved widget {idx} from {old_parent_idx} to {parent_idx}");

    self.validate_focus();
    self.notify(idx, Property::Parent)
  }

  fn set_size_request(&mut self, widget: Id, request: SizeRequest) {
    let idx = self.validate(widget);
    self.widgets[idx.idx].0.size = request;
  }

  fn set_name(&mut self, widget: Id, name: &str) {
    let idx = self.validate(widget);
    self.widgets[idx.idx].0.name = Some(name.to_string());
  }

  fn subscribe(
    &mut self,
    widget: Id,
    property: Property,
    handler: Box<NotifyFn<E>>,
  ) -> Subscription {
    let _ = self.validate(widget);
    let key = self
      .registry
      .borrow_mut()
      .insert(widget, property, Rc::from(handler));
    trace!("subscribed to {property:?} of widget {widget}");
    Subscription::new(&self.registry, key)
  }
}
