//! Doctor finder views

use maud::{html, Markup};

use super::query_string;
use crate::doctors::{
    directions_url, maps_script_url, AvailabilityFilter, DirectoryStats, Doctor,
    DoctorFilter, DoctorMatch, GeoPoint,
};

/// Initials from each word of the name, `Priya Sharma` → `PS`
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Five-character star rating, filled for each whole point
pub fn stars(rating: f64) -> String {
    let full = rating.floor().clamp(0.0, 5.0) as usize;
    (0..5).map(|i| if i < full { '★' } else { '☆' }).collect()
}

/// `3 Doctors Found`, `1 Doctor Found`
pub fn results_title(count: usize) -> String {
    format!("{} Doctor{} Found", count, if count == 1 { "" } else { "s" })
}

fn filter_pairs(filter: &DoctorFilter) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if !filter.search.is_empty() {
        pairs.push(("search", filter.search.clone()));
    }
    if let Some(specialty) = &filter.specialty {
        pairs.push(("specialty", specialty.clone()));
    }
    if filter.availability != AvailabilityFilter::All {
        pairs.push(("availability", filter.availability.label().to_string()));
    }
    if let Some(point) = filter.near {
        pairs.push(("lat", point.lat.to_string()));
        pairs.push(("lng", point.lng.to_string()));
    }
    pairs
}

/// `/doctors` link for `filter`
pub fn filter_link(filter: &DoctorFilter) -> String {
    let pairs = filter_pairs(filter);
    let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    format!("/doctors{}", query_string(&borrowed))
}

/// One removable tag per active filter; each links to the listing without it
pub fn filter_tags(filter: &DoctorFilter) -> Markup {
    let mut tags: Vec<(String, DoctorFilter)> = Vec::new();

    if let Some(specialty) = &filter.specialty {
        let mut without = filter.clone();
        without.specialty = None;
        tags.push((specialty.clone(), without));
    }
    if filter.availability != AvailabilityFilter::All {
        let mut without = filter.clone();
        without.availability = AvailabilityFilter::All;
        tags.push((filter.availability.label().to_string(), without));
    }
    if !filter.search.is_empty() {
        let mut without = filter.clone();
        without.search.clear();
        tags.push((format!("\"{}\"", filter.search), without));
    }
    if filter.near.is_some() {
        let mut without = filter.clone();
        without.near = None;
        tags.push(("Near Me".to_string(), without));
    }

    html! {
        div class="filter-tags" id="filterTags" {
            @for (label, without) in &tags {
                div class="filter-tag" {
                    span { (label) }
                    a class="filter-remove" href=(filter_link(without)) aria-label="Remove filter" { "×" }
                }
            }
        }
    }
}

fn location_link(doctor: &Doctor, origin: Option<GeoPoint>) -> String {
    match origin {
        Some(p) => format!(
            "/doctors/{}/location{}",
            doctor.id,
            query_string(&[("lat", p.lat.to_string().as_str()), ("lng", p.lng.to_string().as_str())])
        ),
        None => format!("/doctors/{}/location", doctor.id),
    }
}

/// A single doctor card
pub fn doctor_card(found: &DoctorMatch<'_>, origin: Option<GeoPoint>) -> Markup {
    let doctor = found.doctor;

    html! {
        div class="doctor-card" {
            div class="doctor-header" {
                div class="doctor-info" {
                    div class="doctor-avatar" { (initials(&doctor.name)) }
                    div class="doctor-details" {
                        h3 { "Dr. " (doctor.name) }
                        div class="doctor-specialty" { (doctor.specialty) }
                    }
                }
                div class={ "availability-badge " (doctor.availability.as_str()) } { (doctor.availability.to_string()) }
            }
            div class="doctor-meta" {
                div class="meta-item" {
                    span { (doctor.clinic) }
                    @if let Some(km) = found.distance_km {
                        span class="distance" { (format!("{:.2}", km)) " km away" }
                    }
                }
                div class="meta-item rating" {
                    div class="stars" { (stars(doctor.rating)) }
                    span { (doctor.rating) " (" (doctor.reviews) " reviews)" }
                    span class="experience" { (doctor.experience) " years exp." }
                }
                div class="meta-item" {
                    span { "Consultation Fee:" }
                    span class="fee" { "₹" (doctor.consultation_fee) }
                }
                div class="meta-item" {
                    span { "Next available: " (doctor.next_available) }
                }
            }
            div class="doctor-actions" {
                a class="btn btn-outline" href={ "tel:" (doctor.phone) } { "Call" }
                a class="btn btn-outline" href=(location_link(doctor, origin)) { "View Location" }
            }
        }
    }
}

fn dropdown(name: &str, options: &[String], selected: &str) -> Markup {
    html! {
        select name=(name) class="form-input" {
            @for option in options {
                option value=(option) selected[option == selected] { (option) }
            }
        }
    }
}

fn maps_script(key: Option<&str>) -> Markup {
    html! {
        @if let Some(key) = key {
            script async defer src=(maps_script_url(key)) {}
        }
    }
}

/// Inputs for the doctor listing page
pub struct DoctorsPage<'a> {
    pub filter: &'a DoctorFilter,
    pub matches: &'a [DoctorMatch<'a>],
    pub specialties: &'a [String],
    pub availability_options: &'a [String],
    /// Maps API key, when the backend config could be fetched
    pub maps_key: Option<&'a str>,
}

impl DoctorsPage<'_> {
    pub fn render(&self) -> Markup {
        let stats = DirectoryStats::from_matches(self.matches);
        let specialty = self.filter.specialty.as_deref().unwrap_or("All Specialties");

        html! {
            section class="doctor-search" {
                h1 { "Find a Doctor" }
                form method="get" action="/doctors" class="search-bar" {
                    input type="search" id="searchInput" name="search" placeholder="Search by name, specialty or clinic" value=(self.filter.search);
                    (dropdown("specialty", self.specialties, specialty))
                    (dropdown("availability", self.availability_options, self.filter.availability.label()))
                    @if let Some(p) = self.filter.near {
                        input type="hidden" name="lat" value=(p.lat);
                        input type="hidden" name="lng" value=(p.lng);
                    }
                    button type="submit" class="btn btn-primary" { "Search" }
                    a class="btn btn-outline" href="/doctors" { "Clear All" }
                }
            }
            section class="stats" {
                div class="stat" { span id="totalDoctors" { (stats.total) } " Doctors" }
                div class="stat" { span id="availableNow" { (stats.available_now) } " Available Now" }
                div class="stat" { span id="averageRating" { (format!("{:.1}★", stats.average_rating)) } " Avg Rating" }
            }
            section class="results" {
                h2 id="resultsTitle" { (results_title(stats.total)) }
                (filter_tags(self.filter))
                @if self.matches.is_empty() {
                    div class="no-results" id="noResults" {
                        h3 { "No doctors found" }
                        p { "Try adjusting your search or filters." }
                        a class="btn btn-primary" href="/doctors" { "Clear All Filters" }
                    }
                } @else {
                    div class="doctors-grid" id="doctorsGrid" {
                        @for found in self.matches {
                            (doctor_card(found, self.filter.near))
                        }
                    }
                }
            }
            (maps_script(self.maps_key))
        }
    }
}

/// Location view for one doctor, with directions from `origin` when known
pub fn location_view(doctor: &Doctor, origin: Option<GeoPoint>, maps_key: Option<&str>) -> Markup {
    let destination = GeoPoint::from(doctor.location);

    html! {
        section class="map-modal show" {
            h2 id="mapModalTitle" { (doctor.clinic) " - Dr. " (doctor.name) }
            div id="map" data-lat=(destination.lat) data-lng=(destination.lng) {}
            div class="map-info" {
                p { strong { (doctor.specialty) } }
                p { (doctor.clinic) }
                p { strong { "₹" (doctor.consultation_fee) } " consultation fee" }
            }
            a class="btn btn-primary" target="_blank" rel="noopener" href=(directions_url(origin, destination)) { "Get Directions" }
            " "
            a class="btn btn-outline" href="/doctors" { "Back to results" }
        }
        (maps_script(maps_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctors::fixtures;

    #[test]
    fn test_card_helpers() {
        assert_eq!(initials("Priya Sharma"), "PS");
        assert_eq!(stars(4.8), "★★★★☆");
        assert_eq!(stars(0.5), "☆☆☆☆☆");
        assert_eq!(results_title(1), "1 Doctor Found");
        assert_eq!(results_title(0), "0 Doctors Found");
    }

    #[test]
    fn test_card_contents() {
        let dir = fixtures::directory();
        let origin = GeoPoint::new(19.0, 72.8);
        let matches = dir.search(&DoctorFilter::new().near(origin));
        let html = doctor_card(&matches[0], Some(origin)).into_string();

        assert!(html.contains("Dr. "));
        assert!(html.contains(" km away"));
        assert!(html.contains("years exp."));
        assert!(html.contains("₹"));
        assert!(html.contains("/location?lat=19&amp;lng=72.8"));
    }

    #[test]
    fn test_filter_tags_link_without_filter() {
        let filter = DoctorFilter::new()
            .search("lotus")
            .specialty("Gynecologist")
            .availability(AvailabilityFilter::Now);

        let html = filter_tags(&filter).into_string();

        assert_eq!(html.matches(r#"class="filter-tag""#).count(), 3);
        assert!(html.contains("<span>&quot;lotus&quot;</span>"));
        assert!(html.contains(
            "/doctors?search=lotus&amp;availability=Available%20Now"
        ));
        assert!(filter_tags(&DoctorFilter::new()).into_string().ends_with(r#"id="filterTags"></div>"#));
    }

    #[test]
    fn test_page_no_results_and_stats() {
        let dir = fixtures::directory();
        let filter = DoctorFilter::new().search("nobody");
        let matches = dir.search(&filter);

        let page = DoctorsPage {
            filter: &filter,
            matches: &matches,
            specialties: &dir.specialties,
            availability_options: &dir.availability_options,
            maps_key: None,
        };
        let html = page.render().into_string();

        assert!(html.contains(r#"id="noResults""#));
        assert!(html.contains("0 Doctors Found"));
        assert!(html.contains(r#"<span id="averageRating">0.0★</span>"#));
        assert!(!html.contains("maps.googleapis.com"));
    }

    #[test]
    fn test_location_directions() {
        let dir = fixtures::directory();
        let doctor = dir.find(1).unwrap();
        let html = location_view(doctor, Some(GeoPoint::new(19.1, 72.9)), Some("k")).into_string();

        assert!(html.contains("Lotus Women's Clinic - Dr. Priya Sharma"));
        assert!(html.contains("destination=19.076,72.8777"));
        assert!(html.contains("origin=19.1,72.9"));
        assert!(html.contains("maps/api/js?key=k"));
    }
}
