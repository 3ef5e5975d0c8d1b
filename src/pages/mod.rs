//! Page rendering
//!
//! Each page builds the shared layout context, runs its controllers against
//! the record store and renders its template. The server and the static
//! exporter both go through [`SiteRenderer`].

pub mod enquiry;

pub use enquiry::{EnquiryForm, EnquiryKind};

use anyhow::Result;
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tokio_util::sync::CancellationToken;

use crate::config::SiteConfig;
use crate::content::{Course, Event, Facility, GalleryPhoto, Testimonial};
use crate::helpers::{full_url_for, query_string, url_for};
use crate::routes::{self, Page};
use crate::store::RecordStore;
use crate::templates::{EnquiryData, SiteData, TemplateRenderer};
use crate::view::{sort_events, DetailController, Filter, ListController, ViewState};

/// Query parameters understood by the listing pages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Selected filter value
    pub filter: Option<String>,
    /// Gallery photo shown enlarged
    pub photo: Option<String>,
}

/// How a rendered page should be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    /// The requested record does not exist
    NotFound,
    /// A submitted form was rejected
    Invalid,
}

/// A rendered page
#[derive(Debug)]
pub struct Rendered {
    pub html: String,
    pub status: PageStatus,
}

impl Rendered {
    fn ok(html: String) -> Self {
        Self {
            html,
            status: PageStatus::Ok,
        }
    }
}

/// Renders site pages from the record store
pub struct SiteRenderer {
    config: SiteConfig,
    templates: TemplateRenderer,
    store: Arc<dyn RecordStore>,
}

impl SiteRenderer {
    pub fn new(config: SiteConfig, store: Arc<dyn RecordStore>) -> Result<Self> {
        let templates = TemplateRenderer::new(&config)?;
        Ok(Self {
            config,
            templates,
            store,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Render a page that takes no route parameter.
    ///
    /// Store failures never fail the render: they show up as error notices
    /// inside the page. `cancel` aborts outstanding reads, leaving their
    /// sections in the loading state.
    pub async fn render(
        &self,
        page: Page,
        query: &PageQuery,
        cancel: &CancellationToken,
    ) -> Result<Rendered> {
        let path = page.route().path;
        let mut context = self.base_context(page, path, query);
        let store = self.store.as_ref();

        match page {
            Page::Home => {
                let caps = &self.config.home;
                let mut courses = ListController::<Course>::new().with_cap(caps.courses);
                let mut testimonials =
                    ListController::<Testimonial>::new().with_cap(caps.testimonials);
                let mut photos = ListController::<GalleryPhoto>::new().with_cap(caps.gallery);
                let mut events = ListController::<Event>::new()
                    .with_ordering(sort_events)
                    .with_cap(caps.events);

                tokio::join!(
                    courses.load(store, cancel),
                    testimonials.load(store, cancel),
                    photos.load(store, cancel),
                    events.load(store, cancel),
                );

                context.insert("courses", &courses.view());
                context.insert("testimonials", &testimonials.view());
                context.insert("photos", &photos.view());
                context.insert("events", &events.view());
            }
            Page::Courses => {
                let mut courses = ListController::<Course>::new();
                courses.select(Filter::parse(query.filter.as_deref()));
                courses.load(store, cancel).await;
                context.insert("courses", &courses.view());
            }
            Page::Facilities => {
                let mut facilities = ListController::<Facility>::new();
                facilities.select(Filter::parse(query.filter.as_deref()));
                facilities.load(store, cancel).await;
                context.insert("facilities", &facilities.view());
            }
            Page::Gallery => {
                let mut photos = ListController::<GalleryPhoto>::new();
                photos.select(Filter::parse(query.filter.as_deref()));
                photos.select_record(query.photo.clone().filter(|id| !id.is_empty()));
                photos.load(store, cancel).await;
                context.insert("photos", &photos.view());
            }
            Page::Events => {
                let mut events = ListController::<Event>::new().with_ordering(sort_events);
                events.select(Filter::parse(query.filter.as_deref()));
                events.load(store, cancel).await;
                context.insert("events", &events.view());
            }
            Page::Admissions => {
                context.insert("enquiry", &enquiry::blank(EnquiryKind::Admissions));
            }
            Page::Contact => {
                context.insert("enquiry", &enquiry::blank(EnquiryKind::Contact));
            }
            Page::About | Page::VisionMission => {}
            Page::CourseDetail => {
                anyhow::bail!("course detail pages are rendered with render_course");
            }
        }

        let html = self.templates.render(page.template(), &context)?;
        Ok(Rendered::ok(html))
    }

    /// Render one course's detail page
    pub async fn render_course(&self, id: &str, cancel: &CancellationToken) -> Result<Rendered> {
        let mut course = DetailController::<Course>::new(id);
        course.load(self.store.as_ref(), cancel).await;

        let path = routes::course_path(id);
        let mut context = self.base_context(Page::CourseDetail, &path, &PageQuery::default());

        let status = match course.state() {
            ViewState::Ready(record) => {
                if let Some(name) = &record.course_name {
                    context.insert("page_title", name);
                }
                PageStatus::Ok
            }
            ViewState::NotFound => {
                context.insert("page_title", "Course Not Found");
                PageStatus::NotFound
            }
            ViewState::Loading | ViewState::Error(_) => PageStatus::Ok,
        };
        context.insert("course", &course.view());

        let html = self.templates.render(Page::CourseDetail.template(), &context)?;
        Ok(Rendered { html, status })
    }

    /// Render the page behind a submitted enquiry form
    pub fn render_enquiry(&self, kind: EnquiryKind, form: &EnquiryForm) -> Result<Rendered> {
        let data: EnquiryData = enquiry::submit(kind, form);
        let status = if data.sent {
            PageStatus::Ok
        } else {
            PageStatus::Invalid
        };

        let page = kind.page();
        let mut context = self.base_context(page, page.route().path, &PageQuery::default());
        context.insert("enquiry", &data);

        let html = self.templates.render(page.template(), &context)?;
        Ok(Rendered { html, status })
    }

    /// Context shared by every page: site identity, menu and URLs
    fn base_context(&self, page: Page, path: &str, query: &PageQuery) -> Context {
        let config = &self.config;
        let mut context = Context::new();

        context.insert(
            "site",
            &SiteData {
                title: config.title.clone(),
                subtitle: config.subtitle.clone(),
                description: config.description.clone(),
                url: config.url.clone(),
                root: config.root.clone(),
                contact: config.contact.clone(),
                current_year: chrono::Local::now().format("%Y").to_string(),
            },
        );
        context.insert("menu", &routes::menu(page));
        context.insert("page_title", &page.route().title);
        context.insert("current_path", path);

        let query = query_string(&[
            ("filter", query.filter.as_deref().unwrap_or_default()),
            ("photo", query.photo.as_deref().unwrap_or_default()),
        ]);
        context.insert("current_url", &format!("{}{}", url_for(config, path), query));
        context.insert("canonical_url", &full_url_for(config, path));

        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn renderer(store: MemoryStore) -> SiteRenderer {
        SiteRenderer::new(SiteConfig::default(), Arc::new(store)).unwrap()
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_collection(
                "courses",
                vec![
                    json!({"_id": "1", "courseName": "MBA", "programType": "PG"}),
                    json!({"_id": "2", "courseName": "BBA", "programType": "UG"}),
                ],
            )
            .with_collection(
                "galleryphotos",
                vec![json!({"_id": "p1", "title": "Library", "category": "Campus"})],
            )
    }

    #[tokio::test]
    async fn test_static_pages_render() {
        let site = renderer(MemoryStore::new());
        let cancel = CancellationToken::new();
        for page in [Page::About, Page::VisionMission, Page::Admissions, Page::Contact] {
            let rendered = site
                .render(page, &PageQuery::default(), &cancel)
                .await
                .unwrap();
            assert_eq!(rendered.status, PageStatus::Ok);
            assert!(rendered.html.contains("Pinnacle Global"));
        }
    }

    #[tokio::test]
    async fn test_courses_filter() {
        let site = renderer(sample_store());
        let query = PageQuery {
            filter: Some("UG".to_string()),
            ..PageQuery::default()
        };
        let rendered = site
            .render(Page::Courses, &query, &CancellationToken::new())
            .await
            .unwrap();
        assert!(rendered.html.contains("BBA"));
        assert!(!rendered.html.contains("MBA"));
        assert!(rendered.html.contains("filter active"));
    }

    #[tokio::test]
    async fn test_gallery_lightbox() {
        let site = renderer(sample_store());
        let query = PageQuery {
            photo: Some("p1".to_string()),
            ..PageQuery::default()
        };
        let rendered = site
            .render(Page::Gallery, &query, &CancellationToken::new())
            .await
            .unwrap();
        assert!(rendered.html.contains("class=\"lightbox\""));

        let unknown = PageQuery {
            photo: Some("missing".to_string()),
            ..PageQuery::default()
        };
        let rendered = site
            .render(Page::Gallery, &unknown, &CancellationToken::new())
            .await
            .unwrap();
        assert!(!rendered.html.contains("class=\"lightbox\""));
    }

    #[tokio::test]
    async fn test_course_not_found() {
        let site = renderer(sample_store());
        let rendered = site
            .render_course("999", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(rendered.status, PageStatus::NotFound);
        assert!(rendered.html.contains("Course Not Found"));
        assert!(rendered.html.contains("Back to Courses"));
    }

    #[tokio::test]
    async fn test_course_found() {
        let site = renderer(sample_store());
        let rendered = site
            .render_course("1", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(rendered.status, PageStatus::Ok);
        assert!(rendered.html.contains("<title>MBA | Pinnacle Global</title>"));
    }

    #[tokio::test]
    async fn test_cancelled_render_shows_loading() {
        let site = renderer(sample_store());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let rendered = site
            .render(Page::Courses, &PageQuery::default(), &cancel)
            .await
            .unwrap();
        assert!(rendered.html.contains("Loading programs"));
    }

    #[test]
    fn test_enquiry_render() {
        let site = renderer(MemoryStore::new());
        let rejected = site
            .render_enquiry(EnquiryKind::Contact, &EnquiryForm::default())
            .unwrap();
        assert_eq!(rejected.status, PageStatus::Invalid);
        assert!(rejected.html.contains("Please check the form"));

        let form = EnquiryForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            ..EnquiryForm::default()
        };
        let accepted = site.render_enquiry(EnquiryKind::Admissions, &form).unwrap();
        assert_eq!(accepted.status, PageStatus::Ok);
        assert!(accepted.html.contains("Enquiry Submitted Successfully!"));
    }
}
