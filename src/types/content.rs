use serde::Deserialize;
use serde_json::Value;

use crate::db::{FieldValue, NetworkEntry, Resource, Service, Testimonial};
use crate::error::SiteError;

/// A request body that maps onto the writable columns of one content table.
///
/// Values are positional, aligned with `<Self::Record as Resource>::COLUMNS`.
pub trait ContentInput: Sized {
    type Record: Resource;

    /// Column values for a PATCH; `None` leaves the stored column untouched.
    fn into_patch(self) -> Result<Vec<FieldValue>, SiteError>;

    /// Column values for a POST; `None` falls back to the column default.
    fn into_create(self) -> Result<Vec<FieldValue>, SiteError> {
        self.into_patch()
    }
}

/// `bullets` as sent by clients: either a list or one comma-delimited string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BulletsInput {
    List(Vec<String>),
    Delimited(String),
}

impl BulletsInput {
    /// Lists are kept as-is; strings are split on commas, trimmed, and empty segments dropped.
    pub fn normalize(self) -> Vec<String> {
        match self {
            BulletsInput::List(items) => items,
            BulletsInput::Delimited(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn encode(self) -> Result<String, SiteError> {
        Ok(serde_json::to_string(&self.normalize())?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub bullets: Option<BulletsInput>,
}

impl ContentInput for ServiceInput {
    type Record = Service;

    fn into_patch(self) -> Result<Vec<FieldValue>, SiteError> {
        let bullets = self.bullets.map(BulletsInput::encode).transpose()?;
        Ok(vec![self.title, self.category, bullets])
    }

    fn into_create(self) -> Result<Vec<FieldValue>, SiteError> {
        let bullets = self
            .bullets
            .unwrap_or(BulletsInput::List(Vec::new()))
            .encode()?;
        Ok(vec![self.title, self.category, Some(bullets)])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkInput {
    pub name: Option<String>,
    pub city: Option<String>,
    pub meta: Option<Value>,
}

impl ContentInput for NetworkInput {
    type Record = NetworkEntry;

    fn into_patch(self) -> Result<Vec<FieldValue>, SiteError> {
        Ok(vec![self.name, self.city, self.meta.map(opaque_meta)])
    }
}

/// `meta` is stored opaquely: strings verbatim, anything else as compact JSON text.
fn opaque_meta(meta: Value) -> String {
    match meta {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialInput {
    pub quote: Option<String>,
    pub author: Option<String>,
}

impl ContentInput for TestimonialInput {
    type Record = Testimonial;

    fn into_patch(self) -> Result<Vec<FieldValue>, SiteError> {
        Ok(vec![self.quote, self.author])
    }
}

/// Public contact-form submission. No field is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub need: Option<String>,
    pub message: Option<String>,
}

impl LeadInput {
    /// Trimmed column values, missing fields as empty strings.
    pub fn into_values(self) -> Vec<FieldValue> {
        [self.name, self.phone, self.need, self.message]
            .into_iter()
            .map(|v| Some(v.unwrap_or_default().trim().to_string()))
            .collect()
    }
}
