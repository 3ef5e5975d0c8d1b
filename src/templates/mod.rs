//! Built-in site templates using the Tera template engine
//!
//! Every template is embedded in the binary, so a site directory only needs
//! its configuration, content snapshots and static files.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{ContactConfig, SiteConfig};
use crate::helpers::{format_record_date, url_for};
use crate::routes::course_path;

/// Stylesheet served at `/assets/site.css`
pub const STYLESHEET: &str = include_str!("site/site.css");

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("vision_mission.html", include_str!("site/vision_mission.html")),
            ("courses.html", include_str!("site/courses.html")),
            ("course_detail.html", include_str!("site/course_detail.html")),
            ("admissions.html", include_str!("site/admissions.html")),
            ("facilities.html", include_str!("site/facilities.html")),
            ("gallery.html", include_str!("site/gallery.html")),
            ("events.html", include_str!("site/events.html")),
            ("contact.html", include_str!("site/contact.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
        ])?;

        // Register custom filters
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("paragraphs", paragraphs_filter);

        tera.register_function(
            "url_for",
            UrlFor {
                config: config.clone(),
            },
        );

        tera.register_function(
            "course_url",
            CourseUrl {
                config: config.clone(),
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera function: `url_for(path="/courses")` prefixes the site root
struct UrlFor {
    config: SiteConfig,
}

impl tera::Function for UrlFor {
    fn call(&self, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let path = match args.get("path") {
            Some(val) => tera::try_get_value!("url_for", "path", String, val),
            None => String::new(),
        };
        Ok(tera::Value::String(url_for(&self.config, &path)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Tera function: `course_url(id=course._id)` links a course detail page.
///
/// The id is percent-encoded, so the result is safe inside an attribute.
struct CourseUrl {
    config: SiteConfig,
}

impl tera::Function for CourseUrl {
    fn call(&self, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let id = match args.get("id") {
            Some(val) => tera::try_get_value!("course_url", "id", String, val),
            None => return Err(tera::Error::msg("course_url requires an `id` argument")),
        };
        Ok(tera::Value::String(url_for(&self.config, &course_path(&id))))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: format a record date, e.g. `{{ event.date | date_format(format="MMM D, YYYY") }}`
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "MMM D, YYYY".to_string(),
    };

    Ok(tera::Value::String(format_record_date(&s, &format)))
}

/// Tera filter: split text into its non-blank lines
fn paragraphs_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("paragraphs", "value", String, value);
    let paragraphs = s
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| tera::Value::String(line.to_string()))
        .collect();
    Ok(tera::Value::Array(paragraphs))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub url: String,
    pub root: String,
    pub contact: ContactConfig,
    pub current_year: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub active: bool,
}

/// Values a visitor submitted through an enquiry form
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnquiryData {
    pub values: HashMap<String, String>,
    pub errors: Vec<String>,
    pub sent: bool,
}
