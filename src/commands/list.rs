//! List site information

use anyhow::Result;

use crate::content::{Course, Event, Facility, GalleryPhoto, Record, Testimonial, COLLECTIONS};
use crate::routes::{Page, COURSE_DETAIL, ROUTES};
use crate::store::{self, RecordStore};
use crate::Site;

/// List the route table or the records of one collection
pub async fn run(site: &Site, what: &str) -> Result<()> {
    if matches!(what, "route" | "routes") {
        list_routes();
        return Ok(());
    }

    let store = store::open(site);
    let store = store.as_ref();
    match what {
        "courses" => list_records::<Course>(store).await,
        "facilities" => list_records::<Facility>(store).await,
        "galleryphotos" => list_records::<GalleryPhoto>(store).await,
        "eventsandannouncements" => list_records::<Event>(store).await,
        "testimonials" => list_records::<Testimonial>(store).await,
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: routes, {}",
                what,
                COLLECTIONS.join(", ")
            );
        }
    }
}

fn list_routes() {
    println!("Routes ({}):", ROUTES.len() + 1);
    for line in route_lines() {
        println!("  {}", line);
    }
}

/// One line per route: path, template and the collections it reads
fn route_lines() -> Vec<String> {
    let line = |path: &str, page: Page| {
        let collections = page.collections();
        if collections.is_empty() {
            format!("{:<16} {}", path, page.template())
        } else {
            format!(
                "{:<16} {:<22} [{}]",
                path,
                page.template(),
                collections.join(", ")
            )
        }
    };

    let mut lines = Vec::new();
    for route in ROUTES {
        lines.push(line(route.path, route.page));
        if route.page == Page::Courses {
            lines.push(line(COURSE_DETAIL, Page::CourseDetail));
        }
    }
    lines
}

async fn list_records<T: Record>(store: &dyn RecordStore) -> Result<()> {
    let records = store::fetch_all::<T>(store).await?;

    println!("{} ({}):", T::COLLECTION, records.len());
    for record in &records {
        let label = record.label().unwrap_or("(untitled)");
        match record.category() {
            Some(category) if !category.is_empty() => {
                println!("  {} - {} [{}]", record.id(), label, category)
            }
            _ => println!("  {} - {}", record.id(), label),
        }
    }

    Ok(())
}
