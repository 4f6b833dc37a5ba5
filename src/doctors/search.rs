//! Doctor search
//!
//! Filters combine with AND. With a user location every match carries its
//! distance and results are ordered nearest first.

use super::geo::{haversine_km, GeoPoint};
use super::{Availability, Doctor};

/// Availability filter, as offered in the availability dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Now,
    Today,
    Tomorrow,
    ThisWeek,
}

impl AvailabilityFilter {
    /// Map a dropdown label; unknown labels select everything
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Available Now" => Self::Now,
            "Available Today" => Self::Today,
            "Available Tomorrow" => Self::Tomorrow,
            "Available This Week" => Self::ThisWeek,
            _ => Self::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Availability",
            Self::Now => "Available Now",
            Self::Today => "Available Today",
            Self::Tomorrow => "Available Tomorrow",
            Self::ThisWeek => "Available This Week",
        }
    }

    pub fn matches(&self, availability: Availability) -> bool {
        match self {
            Self::All => true,
            Self::Now => availability == Availability::Available,
            Self::Today | Self::Tomorrow | Self::ThisWeek => availability != Availability::Offline,
        }
    }
}

/// Active search criteria
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorFilter {
    /// Case-insensitive text matched against name, specialty and clinic
    pub search: String,
    /// Exact specialty, `None` for all
    pub specialty: Option<String>,
    pub availability: AvailabilityFilter,
    /// User location for distance sorting
    pub near: Option<GeoPoint>,
}

impl DoctorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into().trim().to_lowercase();
        self
    }

    /// Builder method: set the specialty; "All Specialties" and "all" clear it
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        let s = specialty.into();
        self.specialty = match s.trim() {
            "" | "all" | "All Specialties" => None,
            other => Some(other.to_string()),
        };
        self
    }

    /// Builder method: set the availability filter
    pub fn availability(mut self, availability: AvailabilityFilter) -> Self {
        self.availability = availability;
        self
    }

    /// Builder method: sort by distance from `point`
    pub fn near(mut self, point: GeoPoint) -> Self {
        self.near = Some(point);
        self
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        let matches_search = self.search.is_empty()
            || doctor.name.to_lowercase().contains(&self.search)
            || doctor.specialty.to_lowercase().contains(&self.search)
            || doctor.clinic.to_lowercase().contains(&self.search);

        let matches_specialty = self
            .specialty
            .as_deref()
            .map_or(true, |s| doctor.specialty == s);

        matches_search && matches_specialty && self.availability.matches(doctor.availability)
    }

    /// Whether any criterion narrows the listing
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.specialty.is_some()
            || self.availability != AvailabilityFilter::All
            || self.near.is_some()
    }
}

/// A doctor that passed the filter
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorMatch<'a> {
    pub doctor: &'a Doctor,
    /// Distance from the user in km, when a location was given
    pub distance_km: Option<f64>,
}

pub(super) fn run<'a>(doctors: &'a [Doctor], filter: &DoctorFilter) -> Vec<DoctorMatch<'a>> {
    let mut matches: Vec<DoctorMatch<'a>> = doctors
        .iter()
        .filter(|d| filter.matches(d))
        .map(|doctor| DoctorMatch {
            doctor,
            distance_km: filter
                .near
                .map(|origin| haversine_km(origin, doctor.location.into())),
        })
        .collect();

    if filter.near.is_some() {
        matches.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    matches
}

/// Summary figures shown above the results
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryStats {
    pub total: usize,
    pub available_now: usize,
    /// Mean rating to one decimal, 0.0 when there are no matches
    pub average_rating: f64,
}

impl DirectoryStats {
    pub fn from_matches(matches: &[DoctorMatch<'_>]) -> Self {
        let total = matches.len();
        let available_now = matches
            .iter()
            .filter(|m| m.doctor.availability == Availability::Available)
            .count();
        let average_rating = if total == 0 {
            0.0
        } else {
            let sum: f64 = matches.iter().map(|m| m.doctor.rating).sum();
            ((sum / total as f64) * 10.0).round() / 10.0
        };

        Self {
            total,
            available_now,
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctors::fixtures;

    #[test]
    fn test_no_filter_returns_all() {
        let dir = fixtures::directory();
        let results = dir.search(&DoctorFilter::new());
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|m| m.distance_km.is_none()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dir = fixtures::directory();

        let by_clinic = dir.search(&DoctorFilter::new().search("HARBOUR"));
        assert_eq!(by_clinic.len(), 1);
        assert_eq!(by_clinic[0].doctor.id, 3);

        let by_specialty = dir.search(&DoctorFilter::new().search("endo"));
        assert_eq!(by_specialty[0].doctor.id, 2);
    }

    #[test]
    fn test_specialty_and_availability_combine() {
        let dir = fixtures::directory();

        let filter = DoctorFilter::new()
            .specialty("Gynecologist")
            .availability(AvailabilityFilter::from_label("Available Today"));
        let ids: Vec<u32> = dir.search(&filter).iter().map(|m| m.doctor.id).collect();
        assert_eq!(ids, vec![1]);

        let now = DoctorFilter::new().availability(AvailabilityFilter::Now);
        assert_eq!(dir.search(&now).len(), 1);

        let all = DoctorFilter::new().specialty("All Specialties");
        assert!(!all.is_active());
        assert_eq!(dir.search(&all).len(), 3);
    }

    #[test]
    fn test_near_sorts_by_distance() {
        let dir = fixtures::directory();
        // Just south of doctor 3's clinic
        let filter = DoctorFilter::new().near(GeoPoint::new(18.90, 72.83));

        let results = dir.search(&filter);
        let ids: Vec<u32> = results.iter().map(|m| m.doctor.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(results[0].distance_km.unwrap() < results[1].distance_km.unwrap());
    }

    #[test]
    fn test_stats() {
        let dir = fixtures::directory();
        let results = dir.search(&DoctorFilter::new());
        let stats = DirectoryStats::from_matches(&results);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.available_now, 1);
        assert_eq!(stats.average_rating, 4.3);

        let empty = DirectoryStats::from_matches(&[]);
        assert_eq!(empty.average_rating, 0.0);
    }
}
