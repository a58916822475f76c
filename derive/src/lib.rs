// Copyright (C) 2018-2024 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(
  missing_copy_implementations,
  missing_debug_implementations,
  trivial_casts,
  trivial_numeric_casts,
  unsafe_code,
  unstable_features,
  unused_import_braces,
  unused_qualifications,
  unused_results,
)]

//! A crate providing custom derive functionality for the `gui-touch`
//! crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro2::TokenStream as Tokens;
use quote::quote;
use syn::parse2;
use syn::parse_quote;
use syn::Attribute;
use syn::Data;
use syn::DeriveInput;
use syn::Error;
use syn::Fields;
use syn::Generics;
use syn::Result;
use syn::Type;


/// An enum to decide whether or not to create a default implementation
/// of type::new().
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum New {
  Default,
  None,
}


/// The parsed contents of all #[gui(...)] attributes of a type.
#[derive(Debug)]
struct Attrs {
  new: New,
  /// The event type the widget handles. If none is given, the traits
  /// are implemented for all event types.
  event: Option<Type>,
}


/// Custom derive functionality for the `gui_touch::Widget` trait.
///
/// Using this macro a default implementation of the
/// `gui_touch::Widget` trait can be created. Note that this trait is
/// just a unification of the `gui_touch::Object`,
/// `gui_touch::Renderable`, and `gui_touch::Handleable` traits. Note
/// furthermore that only implementations of the former two will be
/// auto generated. The reason for this behavior is that
/// `gui_touch::Handleable` most likely needs customization to
/// accommodate for custom event handling behavior.
///
/// The struct is required to have an `id` field of type
/// `gui_touch::Id`. The macro honors the following attributes:
/// - `#[gui(default_new)]` additionally creates a `new` constructor
///   accepting the `Id`
/// - `#[gui(Event = Type)]` implements `Widget` only for the given event
///   type, as opposed to all of them
///
/// This macro roughly expands to the following code:
///
/// ```rust
/// # use std::any::TypeId;
/// # #[derive(Debug)]
/// # struct TestWidget {
/// #   id: gui_touch::Id,
/// # }
/// impl gui_touch::Renderable for TestWidget {
///   fn type_id(&self) -> TypeId {
///     TypeId::of::<TestWidget>()
///   }
///
///   fn render(
///     &self,
///     cap: &dyn gui_touch::Cap,
///     renderer: &dyn gui_touch::Renderer,
///     bbox: gui_touch::BBox,
///   ) -> gui_touch::BBox {
///     renderer.render(self, cap, bbox)
///   }
/// }
///
/// impl gui_touch::Object for TestWidget {
///   fn id(&self) -> gui_touch::Id {
///     self.id
///   }
/// }
///
/// impl<E> gui_touch::Widget<E> for TestWidget
/// where
///   E: 'static,
/// {
///   fn type_id(&self) -> TypeId {
///     TypeId::of::<TestWidget>()
///   }
/// }
/// # impl<E> gui_touch::Handleable<E> for TestWidget {}
/// ```
#[proc_macro_derive(Widget, attributes(gui))]
pub fn widget(input: TokenStream) -> TokenStream {
  expand_widget(input.into())
    .unwrap_or_else(Error::into_compile_error)
    .into()
}

fn expand_widget(input: Tokens) -> Result<Tokens> {
  let input = parse2::<DeriveInput>(input)?;
  let attrs = parse_attributes(&input.attrs)?;
  expand_widget_input(&attrs, &input)
}

/// Parse all #[gui(...)] attributes of a type.
fn parse_attributes(attributes: &[Attribute]) -> Result<Attrs> {
  let mut attrs = Attrs {
    new: New::None,
    event: None,
  };

  // We don't care about the other attributes, inner/outer, doc/non-doc,
  // it's all fine by us.
  for attribute in attributes.iter().filter(|attr| attr.path().is_ident("gui")) {
    attribute.parse_nested_meta(|meta| {
      if meta.path.is_ident("default_new") {
        attrs.new = New::Default;
        Ok(())
      } else if meta.path.is_ident("Event") {
        attrs.event = Some(meta.value()?.parse::<Type>()?);
        Ok(())
      } else {
        Err(meta.error("unsupported gui attribute"))
      }
    })?;
  }
  Ok(attrs)
}

/// Expand the input with the implementation of the required traits.
fn expand_widget_input(attrs: &Attrs, input: &DeriveInput) -> Result<Tokens> {
  match input.data {
    Data::Struct(ref data) => {
      check_struct_fields(&data.fields)?;
      Ok(expand_widget_traits(attrs, input))
    },
    _ => Err(Error::new(
      Span::call_site(),
      "#[derive(Widget)] is only defined for structs",
    )),
  }
}

/// Check the fields of the user's struct for required attributes.
// Note that we only check for the names of the required fields, not for
// the types. Checking types is cumbersome and best-effort anyway as we
// are working on tokens without context (a user could have a field of
// type Id but that could map to ::foo::Id and not ::gui_touch::Id).
fn check_struct_fields(fields: &Fields) -> Result<()> {
  let id = ("id", "::gui_touch::Id");

  for (req_field, req_type) in &[id] {
    let _ = fields
      .iter()
      .find(|field| {
        if let Some(ref ident) = field.ident {
          ident == req_field
        } else {
          false
        }
      })
      .ok_or_else(|| {
        Error::new(
          Span::call_site(),
          format!("struct field {req_field}: {req_type} not found"),
        )
      })?;
  }
  Ok(())
}

/// Expand the struct input with the implementation of the required traits.
fn expand_widget_traits(attrs: &Attrs, input: &DeriveInput) -> Tokens {
  let new_impl = expand_new_impl(attrs.new, input);
  let renderable = expand_renderable_trait(input);
  let object = expand_object_trait(input);
  let widget = expand_widget_trait(attrs, input);

  quote! {
    #new_impl
    #renderable
    #object
    #widget
  }
}

/// Create the generics of an implementation of a trait that is generic
/// over the event type. If the event type is fixed, the generics of the
/// input are used as-is.
fn event_generics(attrs: &Attrs, generics: &Generics) -> (Generics, Type) {
  match attrs.event {
    Some(ref event) => (generics.clone(), event.clone()),
    None => {
      let mut generics = generics.clone();
      generics.params.push(parse_quote! { __E: 'static });
      (generics, parse_quote! { __E })
    },
  }
}

/// Expand an implementation of Type::new() for the struct.
fn expand_new_impl(new: New, input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  match new {
    New::Default => {
      quote! {
        #[allow(dead_code)]
        impl #impl_generics #name #ty_generics #where_clause {
          pub fn new(id: ::gui_touch::Id) -> Self {
            #name {
              id,
            }
          }
        }
      }
    },
    New::None => quote! {},
  }
}

/// Expand an implementation for the `gui_touch::Renderable` trait.
fn expand_renderable_trait(input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  quote! {
    impl #impl_generics ::gui_touch::Renderable for #name #ty_generics #where_clause {
      fn type_id(&self) -> ::std::any::TypeId {
        ::std::any::TypeId::of::<#name #ty_generics>()
      }

      fn render(
        &self,
        cap: &dyn ::gui_touch::Cap,
        renderer: &dyn ::gui_touch::Renderer,
        bbox: ::gui_touch::BBox,
      ) -> ::gui_touch::BBox {
        renderer.render(self, cap, bbox)
      }
    }
  }
}

/// Expand an implementation for the `gui_touch::Object` trait.
fn expand_object_trait(input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  quote! {
    impl #impl_generics ::gui_touch::Object for #name #ty_generics #where_clause {
      fn id(&self) -> ::gui_touch::Id {
        self.id
      }
    }
  }
}

/// Expand an implementation for the `gui_touch::Widget` trait.
fn expand_widget_trait(attrs: &Attrs, input: &DeriveInput) -> Tokens {
  let name = &input.ident;
  let (generics, event) = event_generics(attrs, &input.generics);
  let (impl_generics, _, where_clause) = generics.split_for_impl();
  let (_, ty_generics, _) = input.generics.split_for_impl();

  quote! {
    impl #impl_generics ::gui_touch::Widget<#event> for #name #ty_generics #where_clause {
      fn type_id(&self) -> ::std::any::TypeId {
        ::std::any::TypeId::of::<#name #ty_generics>()
      }
    }
  }
}


/// Custom derive functionality for the `gui_touch::Handleable` trait.
///
/// Using this macro a default implementation of the
/// `gui_touch::Handleable` trait can be created. This functionality is
/// mostly used in quick prototyping/testing scenarios, because most
/// custom widgets will also need a custom event handler. The
/// `#[gui(Event = Type)]` attribute is honored the same way
/// `#[derive(Widget)]` does.
///
/// This macro roughly expands to the following code:
///
/// ```rust
/// # use gui_touch::derive::Widget;
/// # #[derive(Debug, Widget)]
/// # struct TestWidget {
/// #   id: gui_touch::Id,
/// # }
/// impl<E> gui_touch::Handleable<E> for TestWidget where E: 'static {}
/// # fn main() {}
/// ```
#[proc_macro_derive(Handleable, attributes(gui))]
pub fn handleable(input: TokenStream) -> TokenStream {
  expand_handleable(input.into())
    .unwrap_or_else(Error::into_compile_error)
    .into()
}

fn expand_handleable(input: Tokens) -> Result<Tokens> {
  let input = parse2::<DeriveInput>(input)?;
  let attrs = parse_attributes(&input.attrs)?;
  expand_handleable_input(&attrs, &input)
}

/// Expand the input with the implementation of the required traits.
fn expand_handleable_input(attrs: &Attrs, input: &DeriveInput) -> Result<Tokens> {
  match input.data {
    Data::Struct(_) => {
      let name = &input.ident;
      let (generics, event) = event_generics(attrs, &input.generics);
      let (impl_generics, _, where_clause) = generics.split_for_impl();
      let (_, ty_generics, _) = input.generics.split_for_impl();

      Ok(quote! {
        impl #impl_generics ::gui_touch::Handleable<#event> for #name #ty_generics #where_clause {}
      })
    },
    _ => Err(Error::new(
      Span::call_site(),
      "#[derive(Handleable)] is only defined for structs",
    )),
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_widget_attributes() {
    let tokens = quote! {
      struct Bar { }
    };

    let input = parse2::<DeriveInput>(tokens).unwrap();
    let attrs = parse_attributes(&input.attrs).unwrap();
    assert_eq!(attrs.new, New::None);
    assert!(attrs.event.is_none());
  }

  #[test]
  fn default_new() {
    let tokens = quote! {
      #[gui(default_new)]
      struct Bar { }
    };

    let input = parse2::<DeriveInput>(tokens).unwrap();
    assert_eq!(parse_attributes(&input.attrs).unwrap().new, New::Default);
  }

  #[test]
  fn event_type() {
    let tokens = quote! {
      #[gui(default_new, Event = Option<u32>)]
      struct Bar { }
    };

    let input = parse2::<DeriveInput>(tokens).unwrap();
    let attrs = parse_attributes(&input.attrs).unwrap();
    let expected: Type = parse_quote! { Option<u32> };
    assert_eq!(attrs.new, New::Default);
    assert_eq!(attrs.event, Some(expected));
  }

  #[test]
  fn unsupported_attribute() {
    let tokens = quote! {
      #[gui(foobar)]
      struct Bar { }
    };

    let input = parse2::<DeriveInput>(tokens).unwrap();
    assert!(parse_attributes(&input.attrs).is_err());
  }

  #[test]
  fn missing_id_field() {
    let tokens = quote! {
      struct Bar {
        name: String,
      }
    };

    let error = expand_widget(tokens).unwrap_err();
    assert!(error.to_string().contains("struct field id"));
  }
}
