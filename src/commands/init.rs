//! Initialize a new site

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Pinnacle Global
subtitle: Shaping Future Leaders
description: Empowering minds, inspiring innovation, and building tomorrow's leaders through world-class education.
language: en

# URL
## Set root to a sub-path such as /campus/ when the site is not served at /
url: http://localhost:4000
root: /

# Directory
public_dir: public
static_dir: static

# Record store
## backend: file reads <data_dir>/<collection>.json
## backend: http reads {base_url}/collections/<collection>/items
store:
  backend: file
  data_dir: data
  base_url: http://localhost:8080/api

# Home page display caps
home:
  courses: 3
  testimonials: 3
  gallery: 6
  events: 3

# Contact details
contact:
  address: 123 Education Street, Knowledge City, India - 110001
  phone: +91 98765 43210
  email: info@pinnacleglobal.edu
  office_hours: "Mon - Fri: 9:00 AM - 6:00 PM"
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("data"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    for (collection, items) in sample_collections() {
        let path = target_dir.join("data").join(format!("{}.json", collection));
        let body = serde_json::to_string_pretty(&json!({ "items": items }))?;
        fs::write(&path, body)?;
        tracing::debug!("Wrote sample collection {:?}", path);
    }

    Ok(())
}

fn sample_collections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "courses",
            json!([
                {
                    "_id": "mba",
                    "courseName": "Master of Business Administration",
                    "shortDescription": "A two-year program building strategic leaders for global business.",
                    "detailedDescription": "Core modules cover finance, marketing, operations and strategy.\nThe second year offers specialisations and a capstone consulting project.",
                    "programType": "Postgraduate"
                },
                {
                    "_id": "btech-cse",
                    "courseName": "B.Tech Computer Science",
                    "shortDescription": "Engineering fundamentals with hands-on software and systems work.",
                    "programType": "Undergraduate"
                },
                {
                    "_id": "data-analytics",
                    "courseName": "Certificate in Data Analytics",
                    "shortDescription": "A six-month evening program for working professionals.",
                    "programType": "Certificate"
                }
            ]),
        ),
        (
            "facilities",
            json!([
                {
                    "_id": "library",
                    "facilityName": "Central Library",
                    "description": "Over 80,000 volumes and a 24-hour digital reading room.",
                    "category": "Academic",
                    "capacity": 400,
                    "location": "Block A"
                },
                {
                    "_id": "sports-complex",
                    "facilityName": "Sports Complex",
                    "description": "Indoor courts, a swimming pool and a fitness centre.",
                    "category": "Sports",
                    "location": "North Campus"
                }
            ]),
        ),
        (
            "galleryphotos",
            json!([
                {"_id": "convocation", "title": "Convocation 2024", "category": "Events", "dateUploaded": "2024-05-20"},
                {"_id": "campus-green", "title": "The Campus Green", "category": "Campus"}
            ]),
        ),
        (
            "eventsandannouncements",
            json!([
                {
                    "_id": "open-day",
                    "title": "Admissions Open Day",
                    "description": "Meet faculty, tour the campus and get your questions answered.",
                    "date": "2024-07-12",
                    "time": "10:00 AM",
                    "location": "Main Auditorium",
                    "eventType": "Admissions"
                },
                {
                    "_id": "tech-fest",
                    "title": "Annual Tech Fest",
                    "description": "Three days of hackathons, talks and robotics.",
                    "date": "2024-09-03",
                    "location": "Innovation Centre",
                    "eventType": "Event"
                }
            ]),
        ),
        (
            "testimonials",
            json!([
                {
                    "_id": "priya",
                    "name": "Priya Sharma",
                    "role": "MBA, Class of 2022",
                    "testimonialText": "The faculty pushed me to think bigger than I ever had."
                }
            ]),
        ),
    ]
}
