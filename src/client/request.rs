use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::Result;

/// A request description the client can dispatch any number of times.
///
/// The 401-recovery path replays the original request with a fresh token, so
/// the body is held in a rebuildable form (a JSON value or owned file bytes)
/// rather than a consumed `reqwest` body stream.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<RequestBody>,
}

#[derive(Debug, Clone)]
pub(crate) enum RequestBody {
    Json(Value),
    Upload(UploadPayload),
}

/// Owned parts of a multipart file upload.
#[derive(Debug, Clone)]
pub(crate) struct UploadPayload {
    pub(crate) file_name: String,
    pub(crate) bytes: Vec<u8>,
    pub(crate) fields: Vec<(String, String)>,
}

impl UploadPayload {
    pub(crate) fn to_form(&self) -> Form {
        let part = Part::bytes(self.bytes.clone()).file_name(self.file_name.clone());
        let mut form = Form::new().part("file", part);
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        form
    }
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body. Serialization happens once, here, so replays are
    /// byte-for-byte identical.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Attach a file upload with accompanying text fields.
    pub fn with_upload(
        mut self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        fields: Vec<(String, String)>,
    ) -> Self {
        self.body = Some(RequestBody::Upload(UploadPayload {
            file_name: file_name.into(),
            bytes,
            fields,
        }));
        self
    }
}
