//! Serialization extension.
//!
//! Turns domain values into JSON documents and validated payloads back
//! into domain types. Each application binds its own `Serializer`, so
//! output options never leak between applications.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// JSON serializer bound to one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Serializer {
    pretty: bool,
    omit_nulls: bool,
}

impl Serializer {
    pub fn new(pretty: bool, omit_nulls: bool) -> Self {
        Self { pretty, omit_nulls }
    }

    /// Build the serializer described by the application settings.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.json_pretty, config.json_omit_nulls)
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    pub fn omit_nulls(&self) -> bool {
        self.omit_nulls
    }

    /// Convert a value into a JSON document.
    pub fn dump<T: Serialize + ?Sized>(&self, value: &T) -> AppResult<Value> {
        let mut document = serde_json::to_value(value)?;
        if self.omit_nulls {
            strip_nulls(&mut document);
        }
        Ok(document)
    }

    /// Convert a value into JSON text.
    pub fn dumps<T: Serialize + ?Sized>(&self, value: &T) -> AppResult<String> {
        let document = self.dump(value)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }

    /// Deserialize and validate a payload.
    pub fn load<T: DeserializeOwned + Validate>(&self, document: Value) -> AppResult<T> {
        let value: T = serde_json::from_value(document)
            .map_err(|e| AppError::validation(e.to_string()))?;
        value.validate().map_err(|e| AppError::validation(e.to_string()))?;
        Ok(value)
    }

    /// Deserialize and validate a payload from JSON text.
    pub fn loads<T: DeserializeOwned + Validate>(&self, text: &str) -> AppResult<T> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| AppError::validation(e.to_string()))?;
        self.load(document)
    }

    /// Render a JSON HTTP response.
    pub fn respond<T: Serialize + ?Sized>(&self, status: StatusCode, body: &T) -> AppResult<Response> {
        let text = self.dumps(body)?;
        Ok((
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            text,
        )
            .into_response())
    }
}

/// Remove `null` members from every object in the document
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
