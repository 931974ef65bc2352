//! Collection bindings for the domain documents.

use geoform_core::{Form, Template};
use jiff::Timestamp;
use uuid::Uuid;

use crate::document::Document;

impl Document for Template {
    const COLLECTION: &'static str = "templates";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Document for Form {
    const COLLECTION: &'static str = "forms";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
