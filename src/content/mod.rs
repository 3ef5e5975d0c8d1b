//! Content module - record types read from the content store

mod entities;
mod record;

pub use entities::{Course, Event, Facility, GalleryPhoto, Testimonial, COLLECTIONS};
pub use record::{parse_date, Record};
