//! Route table of the site
//!
//! Both the live server and the static exporter walk this table, so a page
//! exists in exactly one place.

use percent_encoding::percent_decode_str;

use crate::helpers::encode_component;
use crate::templates::MenuItem;

/// A page of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    VisionMission,
    Courses,
    CourseDetail,
    Admissions,
    Facilities,
    Gallery,
    Events,
    Contact,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy)]
pub struct Route {
    /// Path relative to the site root
    pub path: &'static str,
    pub page: Page,
    /// Title shown in the browser tab; `None` uses the site title alone
    pub title: Option<&'static str>,
    /// Entry name in the navigation menu
    pub nav: Option<&'static str>,
}

/// Path pattern of the course detail page
pub const COURSE_DETAIL: &str = "/courses/:id";

/// Every page reachable without a route parameter, in menu order
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        page: Page::Home,
        title: None,
        nav: Some("Home"),
    },
    Route {
        path: "/about",
        page: Page::About,
        title: Some("About Us"),
        nav: Some("About Us"),
    },
    Route {
        path: "/vision-mission",
        page: Page::VisionMission,
        title: Some("Vision & Mission"),
        nav: Some("Vision & Mission"),
    },
    Route {
        path: "/courses",
        page: Page::Courses,
        title: Some("Courses"),
        nav: Some("Courses"),
    },
    Route {
        path: "/admissions",
        page: Page::Admissions,
        title: Some("Admissions"),
        nav: Some("Admissions"),
    },
    Route {
        path: "/facilities",
        page: Page::Facilities,
        title: Some("Facilities"),
        nav: Some("Facilities"),
    },
    Route {
        path: "/gallery",
        page: Page::Gallery,
        title: Some("Gallery"),
        nav: Some("Gallery"),
    },
    Route {
        path: "/events",
        page: Page::Events,
        title: Some("Events"),
        nav: Some("Events"),
    },
    Route {
        path: "/contact",
        page: Page::Contact,
        title: Some("Contact"),
        nav: Some("Contact"),
    },
];

impl Page {
    /// Template rendering this page
    pub fn template(self) -> &'static str {
        match self {
            Page::Home => "home.html",
            Page::About => "about.html",
            Page::VisionMission => "vision_mission.html",
            Page::Courses => "courses.html",
            Page::CourseDetail => "course_detail.html",
            Page::Admissions => "admissions.html",
            Page::Facilities => "facilities.html",
            Page::Gallery => "gallery.html",
            Page::Events => "events.html",
            Page::Contact => "contact.html",
        }
    }

    /// Route entry of this page; the detail page lives under Courses
    pub fn route(self) -> &'static Route {
        let page = match self {
            Page::CourseDetail => Page::Courses,
            other => other,
        };
        ROUTES
            .iter()
            .find(|r| r.page == page)
            .unwrap_or(&ROUTES[0])
    }

    /// Collections read to render this page
    pub fn collections(self) -> &'static [&'static str] {
        match self {
            Page::Home => &[
                "courses",
                "testimonials",
                "galleryphotos",
                "eventsandannouncements",
            ],
            Page::Courses | Page::CourseDetail => &["courses"],
            Page::Facilities => &["facilities"],
            Page::Gallery => &["galleryphotos"],
            Page::Events => &["eventsandannouncements"],
            Page::About | Page::VisionMission | Page::Admissions | Page::Contact => &[],
        }
    }
}

/// Look up the page served at `path` (relative to the site root).
///
/// Trailing slashes are ignored and the course id is percent-decoded.
/// `None` means the path is not a page and should redirect to the root.
pub fn resolve(path: &str) -> Option<(Page, Option<String>)> {
    let trimmed = path.trim_end_matches('/');
    let trimmed = if trimmed.is_empty() { "/" } else { trimmed };

    if let Some(route) = ROUTES.iter().find(|r| r.path == trimmed) {
        return Some((route.page, None));
    }

    let segment = trimmed.strip_prefix("/courses/")?;
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    let id = percent_decode_str(segment).decode_utf8().ok()?;
    Some((Page::CourseDetail, Some(id.into_owned())))
}

/// URL path of one course's detail page, with the id percent-encoded
pub fn course_path(id: &str) -> String {
    format!("/courses/{}", encode_component(id))
}

/// Navigation menu with the entry for `current` marked active
pub fn menu(current: Page) -> Vec<MenuItem> {
    let active = current.route().page;
    ROUTES
        .iter()
        .filter_map(|route| {
            route.nav.map(|name| MenuItem {
                name: name.to_string(),
                path: route.path.to_string(),
                active: route.page == active,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_static_routes() {
        assert_eq!(resolve("/"), Some((Page::Home, None)));
        assert_eq!(resolve(""), Some((Page::Home, None)));
        assert_eq!(resolve("/vision-mission"), Some((Page::VisionMission, None)));
        assert_eq!(resolve("/gallery/"), Some((Page::Gallery, None)));
    }

    #[test]
    fn test_resolve_course_detail() {
        assert_eq!(
            resolve("/courses/abc-123"),
            Some((Page::CourseDetail, Some("abc-123".to_string())))
        );
        assert_eq!(resolve("/courses/a/b"), None);
    }

    #[test]
    fn test_resolve_decodes_course_id() {
        assert_eq!(
            resolve("/courses/b%20tech"),
            Some((Page::CourseDetail, Some("b tech".to_string())))
        );
        assert_eq!(
            resolve("/courses/a%2Fb"),
            Some((Page::CourseDetail, Some("a/b".to_string())))
        );
        assert_eq!(resolve("/courses/%FF"), None);
    }

    #[test]
    fn test_course_path_round_trips_through_resolve() {
        for id in ["mba", "b tech", "x\" onmouseover=\"alert(1)", "a/b", "ünï"] {
            let path = course_path(id);
            assert!(!path.contains(['"', ' ', '<', '>']));
            assert_eq!(resolve(&path), Some((Page::CourseDetail, Some(id.to_string()))));
        }
    }

    #[test]
    fn test_every_page_lists_its_collections() {
        assert_eq!(Page::Home.collections().len(), 4);
        assert_eq!(Page::CourseDetail.collections(), Page::Courses.collections());
        assert!(Page::Contact.collections().is_empty());
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(resolve("/blog"), None);
        assert_eq!(resolve("/about/team"), None);
    }

    #[test]
    fn test_menu_order_and_active() {
        let menu = menu(Page::CourseDetail);
        let names: Vec<_> = menu.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Home",
                "About Us",
                "Vision & Mission",
                "Courses",
                "Admissions",
                "Facilities",
                "Gallery",
                "Events",
                "Contact"
            ]
        );
        let active: Vec<_> = menu.iter().filter(|m| m.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].path, "/courses");
    }

    #[test]
    fn test_every_page_has_a_template_and_route() {
        for route in ROUTES {
            assert!(route.page.template().ends_with(".html"));
            assert_eq!(route.page.route().path, route.path);
        }
        assert_eq!(Page::CourseDetail.route().path, "/courses");
    }
}
