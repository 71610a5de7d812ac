//! Attribute collections

use bigdecimal::BigDecimal;

use super::model::{Attachment, AttributeModel};
use super::registry;
use super::value::Attribute;
use crate::error::{Lwm2mError, Result};

/// Attributes attached to one link or carried by one write-attributes request
///
/// Keeps insertion order; attribute names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, rejecting duplicate names
    pub fn from_attributes(attributes: impl IntoIterator<Item = Attribute>) -> Result<Self> {
        let mut set = Self::new();
        for attribute in attributes {
            set.insert(attribute)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, attribute: Attribute) -> Result<()> {
        if self.contains(attribute.name()) {
            return Err(Lwm2mError::DuplicateAttribute(attribute.name().to_string()));
        }
        self.attributes.push(attribute);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let index = self.attributes.iter().position(|a| a.name() == name)?;
        Some(self.attributes.remove(index))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// Apply a write-attributes update on top of this set
    ///
    /// Attributes with a value replace the current one; valueless attributes
    /// remove it.
    pub fn merge(&self, update: &AttributeSet) -> AttributeSet {
        let mut merged = self.clone();
        for attribute in update.iter() {
            let replaced = merged
                .attributes
                .iter_mut()
                .find(|a| a.name() == attribute.name());
            match (replaced, attribute.has_value()) {
                (Some(current), true) => *current = attribute.clone(),
                (Some(_), false) => {
                    merged.remove(attribute.name());
                }
                (None, true) => merged.attributes.push(attribute.clone()),
                (None, false) => {}
            }
        }
        merged
    }

    /// Check that every attribute may annotate `attachment` and that the
    /// notification attributes are consistent with each other
    pub fn validate(&self, attachment: Attachment) -> Result<()> {
        for attribute in &self.attributes {
            if !attribute.model().can_be_attached_to(attachment) {
                return Err(Lwm2mError::IllegalAttachment {
                    name: attribute.name().to_string(),
                    attachment,
                });
            }
        }

        self.check_period_order(&registry::MINIMUM_PERIOD, &registry::MAXIMUM_PERIOD)?;
        self.check_period_order(
            &registry::EVALUATE_MINIMUM_PERIOD,
            &registry::EVALUATE_MAXIMUM_PERIOD,
        )?;

        let gt = self.decimal(registry::GREATER_THAN.name());
        let lt = self.decimal(registry::LESS_THAN.name());
        if let (Some(gt), Some(lt)) = (gt, lt) {
            if lt >= gt {
                return Err(Lwm2mError::InvalidValue(
                    "'lt' must be less than 'gt'".to_string(),
                ));
            }
            if let Some(st) = self.decimal(registry::STEP.name()) {
                let lower_band = &(lt + st) + st;
                if &lower_band >= gt {
                    return Err(Lwm2mError::InvalidValue(
                        "'lt' + 2 * 'st' must be less than 'gt'".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Check that every attribute can be set by a write-attributes request
    pub fn validate_writable(&self) -> Result<()> {
        match self
            .attributes
            .iter()
            .find(|a| !a.model().access_mode().is_writable())
        {
            Some(attribute) => Err(Lwm2mError::NotWritable(attribute.name().to_string())),
            None => Ok(()),
        }
    }

    /// Link parameters, each prefixed by `;` (ready to follow `</3/0>`)
    pub fn to_link_params(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!(";{}", a.to_core_link()))
            .collect()
    }

    /// Write-attributes query, `&`-separated
    pub fn to_query(&self) -> String {
        self.attributes
            .iter()
            .map(Attribute::to_core_link)
            .collect::<Vec<_>>()
            .join("&")
    }

    fn check_period_order(
        &self,
        min: &AttributeModel,
        max: &AttributeModel,
    ) -> Result<()> {
        let min_value = self.unsigned(min.name());
        let max_value = self.unsigned(max.name());
        if let (Some(lo), Some(hi)) = (min_value, max_value)
            && lo > hi
        {
            return Err(Lwm2mError::InvalidValue(format!(
                "'{}' ({}) must not be greater than '{}' ({})",
                min.name(),
                lo,
                max.name(),
                hi
            )));
        }
        Ok(())
    }

    fn unsigned(&self, name: &str) -> Option<u64> {
        self.get(name)?.value()?.as_unsigned()
    }

    fn decimal(&self, name: &str) -> Option<&BigDecimal> {
        self.get(name)?.value()?.as_decimal()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
