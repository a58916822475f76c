// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::any::TypeId;

use async_trait::async_trait;

use crate::BBox;
use crate::Cap;
use crate::Handleable;
use crate::Id;
use crate::MutCap;
use crate::Object;
use crate::Renderable;
use crate::Renderer;
use crate::Widget;


/// A stand-in for a widget that is still being constructed.
///
/// The `Ui` registers a `Dummy` under a new widget's `Id` before
/// invoking the widget's constructor, so that the constructor can
/// already add children to it.
#[derive(Debug)]
pub(crate) struct Dummy;

impl Renderable for Dummy {
  fn type_id(&self) -> TypeId {
    TypeId::of::<Dummy>()
  }

  fn render(&self, _cap: &dyn Cap, _renderer: &dyn Renderer, _bbox: BBox) -> BBox {
    unreachable!()
  }
}

impl Object for Dummy {
  fn id(&self) -> Id {
    unreachable!()
  }
}

#[async_trait(?Send)]
impl<E> Handleable<E> for Dummy
where
  E: 'static,
{
  async fn handle(&self, _cap: &mut dyn MutCap<E>, _event: E) -> Option<E> {
    unreachable!()
  }
}

impl<E> Widget<E> for Dummy
where
  E: 'static,
{
  fn type_id(&self) -> TypeId {
    TypeId::of::<Dummy>()
  }
}
