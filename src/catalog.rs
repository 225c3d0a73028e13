// Catalog store: read-only lookups over destinations, places, packages and guides
//
// Absence is a normal outcome here. Every lookup returns an Option or a
// possibly-empty Vec; nothing in this module fails once the catalog is built.

use crate::models::{Destination, Guide, Package, Place};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

// Category value that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

pub const DEFAULT_PLACES_PER_PAGE: usize = 3;

// Seed dataset bundled with the crate
pub const SEED_CATALOG_JSON: &str = include_str!("../samples/catalog.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    destinations: Vec<Destination>,
    #[serde(default)]
    places: Vec<Place>,
    #[serde(default)]
    packages: Vec<Package>,
    #[serde(default)]
    guides: Vec<Guide>,
}

impl Catalog {
    pub fn new(
        destinations: Vec<Destination>,
        places: Vec<Place>,
        packages: Vec<Package>,
        guides: Vec<Guide>,
    ) -> Self {
        Self {
            destinations,
            places,
            packages,
            guides,
        }
    }

    // The bundled storefront dataset
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_json(SEED_CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        debug!(
            destinations = catalog.destinations.len(),
            places = catalog.places.len(),
            packages = catalog.packages.len(),
            guides = catalog.guides.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn destination_by_id(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn place_by_id(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn package_by_id(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn guide_by_id(&self, id: &str) -> Option<&Guide> {
        self.guides.iter().find(|g| g.id == id)
    }

    // "All" returns everything, any other value is an exact, case-sensitive match
    pub fn destinations_by_category(&self, category: &str) -> Vec<&Destination> {
        if category == ALL_CATEGORIES {
            return self.destinations.iter().collect();
        }

        self.destinations
            .iter()
            .filter(|d| d.category.as_str() == category)
            .collect()
    }

    pub fn places_by_destination_id(&self, destination_id: &str) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|p| p.destination_id == destination_id)
            .collect()
    }

    pub fn packages_by_destination_id(&self, destination_id: &str) -> Vec<&Package> {
        self.packages
            .iter()
            .filter(|p| p.destination_id == destination_id)
            .collect()
    }

    pub fn guides_by_destination_id(&self, destination_id: &str) -> Vec<&Guide> {
        self.guides
            .iter()
            .filter(|g| g.destination_id == destination_id)
            .collect()
    }

    // Result follows catalog order, not the order of `ids`. Unknown ids are dropped.
    pub fn places_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Place> {
        if ids.is_empty() {
            return Vec::new();
        }

        self.places
            .iter()
            .filter(|p| ids.iter().any(|id| id.as_ref() == p.id))
            .collect()
    }

    // Places a package covers, in catalog order
    pub fn places_for_package(&self, package: &Package) -> Vec<&Place> {
        self.places_by_ids(&package.places_covered)
    }

    // Category filter first, then a case-insensitive substring match on name or description.
    // An empty or blank term keeps every destination in the category.
    pub fn search_destinations(&self, term: &str, category: &str) -> Vec<&Destination> {
        let needle = term.trim().to_lowercase();
        let in_category = self.destinations_by_category(category);
        if needle.is_empty() {
            return in_category;
        }

        in_category
            .into_iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&needle)
                    || d.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.page <= self.total_pages
    }
}

// 1-based paging. Pages outside 1..=total_pages come back empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    };

    let slice = if page == 0 || page > total_pages {
        &[][..]
    } else {
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total_items);
        &items[start..end]
    };

    Page {
        items: slice.to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use test_case::test_case;

    fn catalog() -> Catalog {
        Catalog::seeded().unwrap()
    }

    #[test]
    fn test_seeded_catalog_counts() {
        let catalog = catalog();
        assert_eq!(catalog.destinations().len(), 6);
        assert_eq!(catalog.places().len(), 9);
        assert_eq!(catalog.packages().len(), 6);
        assert_eq!(catalog.guides().len(), 6);
    }

    #[test]
    fn test_every_id_resolves_to_its_record() {
        let catalog = catalog();
        for d in catalog.destinations() {
            assert_eq!(catalog.destination_by_id(&d.id), Some(d));
        }
        for p in catalog.places() {
            assert_eq!(catalog.place_by_id(&p.id), Some(p));
        }
        for p in catalog.packages() {
            assert_eq!(catalog.package_by_id(&p.id), Some(p));
        }
        for g in catalog.guides() {
            assert_eq!(catalog.guide_by_id(&g.id), Some(g));
        }
    }

    #[test]
    fn test_missing_ids_are_absent() {
        let catalog = catalog();
        assert!(catalog.destination_by_id("dest-999").is_none());
        assert!(catalog.place_by_id("").is_none());
        assert!(catalog.package_by_id("PKG-001").is_none());
        assert!(catalog.guide_by_id("guide-100").is_none());
    }

    #[test_case("All", &["dest-001", "dest-002", "dest-003", "dest-004", "dest-005", "dest-006"]; "all")]
    #[test_case("Beaches", &["dest-001", "dest-006"]; "beaches")]
    #[test_case("Mountains", &["dest-002", "dest-005"]; "mountains")]
    #[test_case("Historical", &["dest-003"]; "historical")]
    #[test_case("mountains", &[]; "case sensitive")]
    #[test_case("Deserts", &[]; "unknown category")]
    #[test_case("all", &[]; "sentinel is case sensitive")]
    fn test_destinations_by_category(category: &str, expected: &[&str]) {
        let catalog = catalog();
        let ids: Vec<&str> = catalog
            .destinations_by_category(category)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_category_filter_matches_field_exactly() {
        let catalog = catalog();
        for category in [Category::Beaches, Category::Nature] {
            let found = catalog.destinations_by_category(category.as_str());
            let expected: Vec<&Destination> = catalog
                .destinations()
                .iter()
                .filter(|d| d.category == category)
                .collect();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn test_relations_by_destination() {
        let catalog = catalog();
        let places: Vec<&str> = catalog
            .places_by_destination_id("dest-002")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(places, vec!["place-004", "place-005", "place-006"]);

        let packages: Vec<&str> = catalog
            .packages_by_destination_id("dest-003")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(packages, vec!["pkg-005", "pkg-006"]);

        let guides: Vec<&str> = catalog
            .guides_by_destination_id("dest-001")
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(guides, vec!["guide-001", "guide-002"]);
    }

    #[test]
    fn test_unknown_destination_has_no_packages() {
        let catalog = catalog();
        assert!(catalog.packages_by_destination_id("dest-999").is_empty());
        assert!(catalog.places_by_destination_id("dest-999").is_empty());
        assert!(catalog.guides_by_destination_id("dest-999").is_empty());
        // Kerala is in the catalog but has nothing attached to it
        assert!(catalog.packages_by_destination_id("dest-004").is_empty());
    }

    #[test]
    fn test_places_by_ids_keeps_catalog_order() {
        let catalog = catalog();
        let ids = ["place-009", "place-missing", "place-001", "place-004"];
        let found: Vec<&str> = catalog
            .places_by_ids(&ids)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(found, vec!["place-001", "place-004", "place-009"]);

        let none: [&str; 0] = [];
        assert!(catalog.places_by_ids(&none).is_empty());
    }

    #[test]
    fn test_places_for_package() {
        let catalog = catalog();
        let package = catalog.package_by_id("pkg-004").unwrap();
        let names: Vec<&str> = catalog
            .places_for_package(package)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Solang Valley", "Hadimba Temple"]);
    }

    #[test_case("", "All", 6; "empty term")]
    #[test_case("goa", "All", 1; "name match ignores case")]
    #[test_case("HIMALAYAN", "All", 2; "description match")]
    #[test_case("himalayan", "Mountains", 2; "with category")]
    #[test_case("himalayan", "Beaches", 0; "category excludes")]
    #[test_case("atlantis", "All", 0; "no match")]
    fn test_search_destinations(term: &str, category: &str, expected: usize) {
        let catalog = catalog();
        assert_eq!(catalog.search_destinations(term, category).len(), expected);
    }

    #[test]
    fn test_paginate_places() {
        let catalog = catalog();
        let places = catalog.places_by_destination_id("dest-001");

        let first = paginate(&places, 1, 2);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 2);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = paginate(&places, 2, 2);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id, "place-003");
        assert!(!second.has_next());
        assert!(second.has_previous());

        let default_page = paginate(&places, 1, DEFAULT_PLACES_PER_PAGE);
        assert_eq!(default_page.total_pages, 1);
        assert_eq!(default_page.items.len(), 3);
    }

    #[test_case(0; "page zero")]
    #[test_case(4; "past the end")]
    fn test_paginate_out_of_range(page: usize) {
        let items: Vec<u32> = (1..=7).collect();
        let result = paginate(&items, page, 3);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_items, 7);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = Catalog::from_json("{\"destinations\": [{\"id\": 1}]}");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Catalog::load("samples/does_not_exist.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
