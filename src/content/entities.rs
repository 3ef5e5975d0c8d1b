//! Content collections served by the record store

use serde::{Deserialize, Serialize};

use super::record::{flexible_count, flexible_date, flexible_text, lenient_string, Record};

/// An academic program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(
        rename = "_createdDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        rename = "_updatedDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detailed_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub program_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub enrollment_url: Option<String>,
}

impl Record for Course {
    const COLLECTION: &'static str = "courses";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.course_name.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.program_type.as_deref()
    }
}

/// A campus facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(
        rename = "_createdDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        rename = "_updatedDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub facility_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub facility_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "flexible_count")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
}

impl Record for Facility {
    const COLLECTION: &'static str = "facilities";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.facility_name.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// A photo shown in the campus gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(
        rename = "_createdDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        rename = "_updatedDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub date_uploaded: Option<String>,
}

impl Record for GalleryPhoto {
    const COLLECTION: &'static str = "galleryphotos";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// An event or announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(
        rename = "_createdDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        rename = "_updatedDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "flexible_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub external_link: Option<String>,
}

impl Record for Event {
    const COLLECTION: &'static str = "eventsandannouncements";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.event_type.as_deref()
    }
}

/// A testimonial from a student, parent or alumnus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(
        rename = "_createdDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        rename = "_updatedDate",
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub testimonial_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub person_photo: Option<String>,
    #[serde(default, deserialize_with = "flexible_date")]
    pub date_given: Option<String>,
}

impl Record for Testimonial {
    const COLLECTION: &'static str = "testimonials";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Names of every collection the site reads
pub const COLLECTIONS: [&str; 5] = [
    Course::COLLECTION,
    Facility::COLLECTION,
    GalleryPhoto::COLLECTION,
    Event::COLLECTION,
    Testimonial::COLLECTION,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_from_store_json() {
        let json = r#"{
            "_id": "1",
            "_createdDate": {"$date": "2024-01-02T00:00:00Z"},
            "courseName": "MBA",
            "programType": "PG",
            "enrollmentUrl": "https://apply.example.com/mba"
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id(), "1");
        assert_eq!(course.label(), Some("MBA"));
        assert_eq!(course.category(), Some("PG"));
        assert_eq!(course.created_date.as_deref(), Some("2024-01-02T00:00:00Z"));
        assert_eq!(course.short_description, None);
    }

    #[test]
    fn test_partial_records_decode() {
        let facility: Facility = serde_json::from_str(r#"{"_id": "f1"}"#).unwrap();
        assert_eq!(facility.category(), None);
        assert_eq!(facility.capacity, None);

        let event: Event =
            serde_json::from_str(r#"{"_id": "e1", "eventType": "Seminar", "time": "10:00"}"#)
                .unwrap();
        assert_eq!(event.category(), Some("Seminar"));
        assert_eq!(event.time.as_deref(), Some("10:00"));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_str::<Testimonial>(r#"{"name": "Asha"}"#).is_err());
    }

    #[test]
    fn test_serializes_store_field_names() {
        let photo: GalleryPhoto =
            serde_json::from_str(r#"{"_id": "g1", "title": "Library", "category": "Campus"}"#)
                .unwrap();
        let value = serde_json::to_value(&photo).unwrap();
        assert_eq!(value["_id"], "g1");
        assert_eq!(value["title"], "Library");
        assert!(value.get("_createdDate").is_none());
    }
}
