//! # Request Binding and Validation
//!
//! Decodes request bodies and validates them before a handler runs.
//!
//! Declarative checks come from `#[derive(Validate)]`. Checks that depend on
//! runtime configuration are registered by tag in a [`Registry`], which is
//! built once at startup and handed to the router through its state. Request
//! types opt in by implementing [`Rules`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, FromRequest, Request},
    http::{StatusCode, header},
};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{Code, StructuredError};
use crate::fault::Fault;

/// A custom check applied to a single string value.
pub type RuleFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// One value of a request to check against a registered rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule<'a> {
    pub field: &'static str,
    pub tag: &'static str,
    pub value: &'a str,
}

/// Implemented by request types to list values checked by registered rules.
pub trait Rules {
    fn rules(&self) -> Vec<Rule<'_>> {
        Vec::new()
    }
}

/// Custom validation rules keyed by tag.
#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<&'static str, RuleFn>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.rules.keys().collect();
        tags.sort();
        f.debug_struct("Registry").field("tags", &tags).finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule under `tag`, replacing any earlier rule with the same tag.
    pub fn register<F>(mut self, tag: &'static str, rule: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(tag, Arc::new(rule));
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.rules.contains_key(tag)
    }

    /// Runs the derived checks of `data` and then its registered rules.
    ///
    /// # Errors
    ///
    /// - [`Fault::Validation`] with every failed field merged together
    /// - an internal `500` error when `data` names a tag nobody registered
    pub fn validate<T>(&self, data: &T) -> Result<(), Fault>
    where
        T: Validate + Rules,
    {
        let mut errors = data.validate().err().unwrap_or_else(ValidationErrors::new);

        for rule in data.rules() {
            let Some(check) = self.rules.get(rule.tag) else {
                error!(tag = rule.tag, field = rule.field, "Validation rule is not registered");
                let errx = StructuredError::new(Code::Internal, "Unknown validation rule")
                    .with_details([rule.tag])
                    .with_status(StatusCode::INTERNAL_SERVER_ERROR);
                return Err(errx.into());
            };

            if !check(rule.value) {
                debug!(tag = rule.tag, field = rule.field, "Registered rule rejected value");
                errors.add(rule.field, ValidationError::new(rule.tag));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}

/// Extractor that decodes the body (XML when the content type says so, JSON
/// otherwise) and validates it through the [`Registry`] in the router state.
#[derive(Debug, Clone)]
pub struct Bind<T>(pub T);

fn is_xml(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/xml") || value.starts_with("text/xml"))
}

impl<T, S> FromRequest<S> for Bind<T>
where
    T: DeserializeOwned + Validate + Rules,
    S: Send + Sync,
    Arc<Registry>: FromRef<S>,
{
    type Rejection = Fault;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Arc::<Registry>::from_ref(state);

        let data = if is_xml(&req) {
            let body = String::from_request(req, state).await.map_err(|e| {
                StructuredError::new(Code::Invalid, "Unable to read request body")
                    .with_status(StatusCode::BAD_REQUEST)
                    .wrap_err(e)
            })?;
            quick_xml::de::from_str::<T>(&body)?
        } else {
            let Json(data) = Json::<T>::from_request(req, state).await?;
            data
        };

        registry.validate(&data)?;
        Ok(Bind(data))
    }
}
