//! File export: a rendered resume delivered as a downloadable HTML attachment.

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::models::resume::ResumeRecord;
use crate::render::render;

pub const EXPORT_MIME: &str = "text/html; charset=utf-8";
pub const RESUME_ID_HEADER: &str = "x-resume-id";

/// `<fullName with whitespace runs replaced by "_">_Resume.html`.
pub fn export_filename(full_name: &str) -> String {
    let stem = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "Resume.html".to_string()
    } else {
        format!("{stem}_Resume.html")
    }
}

/// A rendered document plus the name it downloads under.
#[derive(Debug, Clone)]
pub struct HtmlExport {
    pub filename: String,
    pub body: String,
    pub resume_id: Option<Uuid>,
}

impl HtmlExport {
    pub fn from_record(record: &ResumeRecord) -> Self {
        Self {
            filename: export_filename(&record.personal_info.full_name),
            body: render(record),
            resume_id: None,
        }
    }

    pub fn with_resume_id(mut self, id: Uuid) -> Self {
        self.resume_id = Some(id);
        self
    }

    fn content_disposition(&self) -> String {
        let ascii: String = self
            .filename
            .chars()
            .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
            .collect();
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            urlencoding::encode(&self.filename)
        )
    }
}

impl IntoResponse for HtmlExport {
    fn into_response(self) -> Response {
        let disposition = HeaderValue::from_str(&self.content_disposition())
            .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"Resume.html\""));

        let mut response = (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(EXPORT_MIME)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response();

        if let Some(id) = self.resume_id {
            if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(RESUME_ID_HEADER), value);
            }
        }
        response
    }
}
