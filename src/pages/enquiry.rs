//! Enquiry forms on the contact and admissions pages
//!
//! Submissions are validated and logged. Nothing is written back to the
//! record store.

use serde::Deserialize;
use std::collections::HashMap;

use crate::routes::Page;
use crate::templates::EnquiryData;

/// Which form was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnquiryKind {
    Contact,
    Admissions,
}

impl EnquiryKind {
    /// The page carrying this form
    pub fn page(self) -> Page {
        match self {
            EnquiryKind::Contact => Page::Contact,
            EnquiryKind::Admissions => Page::Admissions,
        }
    }

    /// Form fields in display order
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EnquiryKind::Contact => &["name", "email", "phone", "subject", "message"],
            EnquiryKind::Admissions => &["name", "email", "phone", "program", "message"],
        }
    }

    fn required(self) -> &'static [&'static str] {
        match self {
            EnquiryKind::Contact => &["name", "email", "subject", "message"],
            EnquiryKind::Admissions => &["name", "email", "phone"],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            EnquiryKind::Contact => "contact",
            EnquiryKind::Admissions => "admissions",
        }
    }
}

/// A submitted enquiry. Fields a form lacks stay empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub program: String,
    pub message: String,
}

impl EnquiryForm {
    fn field(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            "email" => &self.email,
            "phone" => &self.phone,
            "subject" => &self.subject,
            "program" => &self.program,
            "message" => &self.message,
            _ => "",
        }
    }
}

fn field_label(name: &str) -> &'static str {
    match name {
        "name" => "Full name",
        "email" => "Email address",
        "phone" => "Phone number",
        "subject" => "Subject",
        "program" => "Program of interest",
        "message" => "Message",
        _ => "Field",
    }
}

/// Check a submission, returning one message per problem
pub fn validate(kind: EnquiryKind, form: &EnquiryForm) -> Vec<String> {
    let mut errors = Vec::new();

    for name in kind.required() {
        if form.field(name).trim().is_empty() {
            errors.push(format!("{} is required.", field_label(name)));
        }
    }

    let email = form.email.trim();
    if !email.is_empty() && !email.contains('@') {
        errors.push("Email address must contain '@'.".to_string());
    }

    errors
}

/// Form state for a page that has not been submitted
pub fn blank(kind: EnquiryKind) -> EnquiryData {
    EnquiryData {
        values: kind
            .fields()
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect(),
        errors: Vec::new(),
        sent: false,
    }
}

/// Validate and log a submission, producing the form state to render.
///
/// Accepted submissions clear the form; rejected ones keep what the
/// visitor typed.
pub fn submit(kind: EnquiryKind, form: &EnquiryForm) -> EnquiryData {
    let errors = validate(kind, form);

    if !errors.is_empty() {
        tracing::debug!(
            form = kind.as_str(),
            problems = errors.len(),
            "Rejected enquiry"
        );
        let values: HashMap<String, String> = kind
            .fields()
            .iter()
            .map(|name| (name.to_string(), form.field(name).to_string()))
            .collect();
        return EnquiryData {
            values,
            errors,
            sent: false,
        };
    }

    tracing::info!(
        form = kind.as_str(),
        name = %form.name.trim(),
        email = %form.email.trim(),
        subject = %form.subject.trim(),
        program = %form.program.trim(),
        "Received enquiry"
    );

    EnquiryData {
        sent: true,
        ..blank(kind)
    }
}
