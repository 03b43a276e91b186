//! Registered properties of markup controls.
//!
//! A `@property` directive that survives resolution becomes a
//! `DotvvmProperty` owned by the wrapper type of its file. The registry is
//! per file; two declarations of the same name on one wrapper are a
//! conflict and only the first is kept.

use std::sync::Arc;

use dvc_scanner::DirectiveIndex;
use dvc_types::{ConstantValue, TypeDescriptor, TypeId, TypeRegistry};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use tracing::trace;

use crate::directive::{Directive, PropertyAttributeReference, PropertyDeclaration};

/// Options set through `MarkupOptions.X = value` attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupOptions {
    pub required: bool,
    pub allow_binding: bool,
    pub allow_hard_coded_value: bool,
    pub name: Option<String>,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            required: false,
            allow_binding: true,
            allow_hard_coded_value: true,
            name: None,
        }
    }
}

impl MarkupOptions {
    /// Apply one already type-checked attribute value. Returns `false` for
    /// unknown option names or mismatched values.
    pub fn apply(&mut self, option: &str, value: &ConstantValue) -> bool {
        match (option, value) {
            ("Required", ConstantValue::Bool(v)) => self.required = *v,
            ("AllowBinding", ConstantValue::Bool(v)) => self.allow_binding = *v,
            ("AllowHardCodedValue", ConstantValue::Bool(v)) => self.allow_hard_coded_value = *v,
            ("Name", ConstantValue::String(v)) => self.name = Some(v.clone()),
            ("Name", ConstantValue::Null) => self.name = None,
            _ => return false,
        }
        true
    }

    fn from_attributes(attributes: &[PropertyAttributeReference]) -> Self {
        let mut options = Self::default();
        for attribute in attributes {
            if attribute.attribute_type != TypeDescriptor::Resolved(TypeId::MARKUP_OPTIONS_ATTRIBUTE) {
                continue;
            }
            if let Some(value) = &attribute.value {
                options.apply(&attribute.property_name.name, value);
            }
        }
        options
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotvvmProperty {
    pub name: String,
    pub property_type: TypeId,
    pub declaring_type: TypeDescriptor,
    /// `None` for design-time properties, which are never evaluated.
    pub default_value: Option<ConstantValue>,
    pub markup_options: MarkupOptions,
    pub attributes: Vec<PropertyAttributeReference>,
    pub declaring_directive: DirectiveIndex,
    pub is_design_time: bool,
}

impl DotvvmProperty {
    /// Property described by a resolved declaration; `None` when the
    /// declaration has no name, no resolved type or no declaring type.
    #[must_use]
    pub fn from_declaration(directive: &Directive<PropertyDeclaration>, is_design_time: bool) -> Option<Self> {
        if directive.name.is_missing() {
            return None;
        }
        let property_type = directive.property_type.type_id()?;
        let declaring_type = directive.declaring_type.clone()?;
        Some(Self {
            name: directive.name.name.clone(),
            property_type,
            declaring_type,
            default_value: if is_design_time {
                None
            } else {
                directive.initial_value.clone()
            },
            markup_options: MarkupOptions::from_attributes(&directive.attributes),
            attributes: directive.attributes.clone(),
            declaring_directive: directive.node,
            is_design_time,
        })
    }

    /// `Wrapper.Name`, for messages and listings.
    #[must_use]
    pub fn full_name(&self, types: &TypeRegistry) -> String {
        format!("{}.{}", self.declaring_type.display(types), self.name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    properties: IndexMap<(TypeDescriptor, String), Arc<DotvvmProperty>, FxBuildHasher>,
}

impl PropertyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `property`, or return the property already registered under
    /// the same declaring type and name.
    pub fn register(&mut self, property: DotvvmProperty) -> Result<Arc<DotvvmProperty>, Arc<DotvvmProperty>> {
        let key = (property.declaring_type.clone(), property.name.clone());
        match self.properties.entry(key) {
            Entry::Occupied(existing) => Err(Arc::clone(existing.get())),
            Entry::Vacant(slot) => {
                trace!(name = %property.name, "property registered");
                Ok(Arc::clone(slot.insert(Arc::new(property))))
            }
        }
    }

    pub fn get(&self, declaring_type: &TypeDescriptor, name: &str) -> Option<&Arc<DotvvmProperty>> {
        self.properties.get(&(declaring_type.clone(), name.to_string()))
    }

    /// Properties declared on `declaring_type`, in registration order.
    pub fn declared_on<'r>(
        &'r self,
        declaring_type: &'r TypeDescriptor,
    ) -> impl Iterator<Item = &'r Arc<DotvvmProperty>> + 'r {
        self.properties
            .iter()
            .filter(move |((owner, _), _)| owner == declaring_type)
            .map(|(_, property)| property)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DotvvmProperty>> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
