//! Page view models and the derived values they carry
//!
//! Everything here is a pure function of entities and an explicit `now`, so
//! upcoming/past classification and location grouping are tested without a
//! database.

use booker_common::db::{Artist, Show, ShowListing, Venue};
use booker_common::format::{format_timestamp, DateStyle};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::forms::{FieldErrors, GENRES, STATES};

/// A show is upcoming strictly after `now`; at or before it is past
pub fn is_upcoming(start_time: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    start_time > now
}

/// Display form used for show start times
pub fn display_time(start_time: &NaiveDateTime) -> String {
    format_timestamp(start_time, &DateStyle::Medium).unwrap_or_else(|_| start_time.to_string())
}

/// Upcoming show count per venue id
pub fn upcoming_by_venue(shows: &[Show], now: &NaiveDateTime) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| is_upcoming(&s.start_time, now)) {
        *counts.entry(show.venue_id).or_insert(0) += 1;
    }
    counts
}

/// Upcoming show count per artist id
pub fn upcoming_by_artist(shows: &[Show], now: &NaiveDateTime) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| is_upcoming(&s.start_time, now)) {
        *counts.entry(show.artist_id).or_insert(0) += 1;
    }
    counts
}

/// Split listings into `(past, upcoming)`, preserving order within each side
pub fn partition_shows(
    shows: Vec<ShowListing>,
    now: &NaiveDateTime,
) -> (Vec<ShowListing>, Vec<ShowListing>) {
    let (upcoming, past): (Vec<ShowListing>, Vec<ShowListing>) = shows
        .into_iter()
        .partition(|show| is_upcoming(&show.start_time, now));
    (past, upcoming)
}

// ============================================================================
// Landing page
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub recent_venues: Vec<EntitySummary>,
    pub recent_artists: Vec<EntitySummary>,
}

// ============================================================================
// Listings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<UpcomingSummary>,
}

#[derive(Debug, Serialize)]
pub struct VenuesPage {
    pub areas: Vec<LocationGroup>,
}

#[derive(Debug, Serialize)]
pub struct ArtistsPage {
    pub artists: Vec<EntitySummary>,
}

/// Group venues by unique (city, state)
///
/// Groups are ordered by state then city; venues keep their input order
/// inside a group. Each venue lands in exactly one group.
pub fn group_by_location(venues: &[Venue], shows: &[Show], now: &NaiveDateTime) -> Vec<LocationGroup> {
    let upcoming = upcoming_by_venue(shows, now);
    let mut groups: BTreeMap<(&str, &str), Vec<UpcomingSummary>> = BTreeMap::new();

    for venue in venues {
        groups
            .entry((venue.state.as_str(), venue.city.as_str()))
            .or_default()
            .push(UpcomingSummary {
                id: venue.id,
                name: venue.name.clone(),
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
            });
    }

    groups
        .into_iter()
        .map(|((state, city), venues)| LocationGroup {
            city: city.to_string(),
            state: state.to_string(),
            venues,
        })
        .collect()
}

pub fn artist_summaries(artists: &[Artist]) -> Vec<EntitySummary> {
    artists
        .iter()
        .map(|a| EntitySummary {
            id: a.id,
            name: a.name.clone(),
        })
        .collect()
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<UpcomingSummary>,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub results: SearchResults,
    pub search_term: String,
}

impl SearchPage {
    pub fn new(search_term: String, data: Vec<UpcomingSummary>) -> Self {
        Self {
            results: SearchResults {
                count: data.len(),
                data,
            },
            search_term,
        }
    }
}

// ============================================================================
// Shows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct ShowsPage {
    pub shows: Vec<ShowEntry>,
}

impl From<&ShowListing> for ShowEntry {
    fn from(show: &ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: display_time(&show.start_time),
        }
    }
}

// ============================================================================
// Detail pages
// ============================================================================

/// A show as seen from its venue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as seen from its artist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

fn venue_show(show: &ShowListing) -> VenueShow {
    VenueShow {
        artist_id: show.artist_id,
        artist_name: show.artist_name.clone(),
        artist_image_link: show.artist_image_link.clone(),
        start_time: display_time(&show.start_time),
    }
}

fn artist_show(show: &ShowListing) -> ArtistShow {
    ArtistShow {
        venue_id: show.venue_id,
        venue_name: show.venue_name.clone(),
        venue_image_link: show.venue_image_link.clone(),
        start_time: display_time(&show.start_time),
    }
}

pub fn venue_detail(venue: Venue, shows: Vec<ShowListing>, now: &NaiveDateTime) -> VenueDetail {
    let (past, upcoming) = partition_shows(shows, now);
    let past_shows: Vec<VenueShow> = past.iter().map(venue_show).collect();
    let upcoming_shows: Vec<VenueShow> = upcoming.iter().map(venue_show).collect();

    VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

pub fn artist_detail(artist: Artist, shows: Vec<ShowListing>, now: &NaiveDateTime) -> ArtistDetail {
    let (past, upcoming) = partition_shows(shows, now);
    let past_shows: Vec<ArtistShow> = past.iter().map(artist_show).collect();
    let upcoming_shows: Vec<ArtistShow> = upcoming.iter().map(artist_show).collect();

    ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

// ============================================================================
// Forms
// ============================================================================

/// Values offered by select inputs
#[derive(Debug, Serialize)]
pub struct Choices {
    pub states: &'static [&'static str],
    pub genres: &'static [&'static str],
}

impl Choices {
    pub fn standard() -> Self {
        Self {
            states: STATES,
            genres: GENRES,
        }
    }
}

/// A form ready to render: values, select choices and any field errors
#[derive(Debug, Serialize)]
pub struct FormPage<F> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub form: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,
    pub errors: FieldErrors,
}

impl<F> FormPage<F> {
    pub fn new(form: F) -> Self {
        Self {
            id: None,
            form,
            choices: Some(Choices::standard()),
            errors: FieldErrors::default(),
        }
    }

    pub fn editing(id: i64, form: F) -> Self {
        Self {
            id: Some(id),
            ..Self::new(form)
        }
    }

    pub fn without_choices(mut self) -> Self {
        self.choices = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2030-06-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Main St".to_string(),
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn show(id: i64, venue_id: i64, artist_id: i64, start_time: NaiveDateTime) -> Show {
        Show {
            id,
            artist_id,
            venue_id,
            start_time,
        }
    }

    fn listing(id: i64, start_time: NaiveDateTime) -> ShowListing {
        ShowListing {
            id,
            start_time,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: Some("https://img.example/venue.png".to_string()),
            artist_id: 4,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: Some("https://img.example/artist.png".to_string()),
        }
    }

    #[test]
    fn test_is_upcoming_is_strict() {
        let now = now();
        assert!(is_upcoming(&(now + Duration::seconds(1)), &now));
        assert!(!is_upcoming(&now, &now), "a show starting exactly now is past");
        assert!(!is_upcoming(&(now - Duration::days(1)), &now));
    }

    #[test]
    fn test_grouping_reproduces_venue_set_exactly_once() {
        let venues = vec![
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            venue(4, "Portland Hall", "Portland", "ME"),
            venue(5, "Portland Arena", "Portland", "OR"),
        ];

        let groups = group_by_location(&venues, &[], &now());

        let flattened: Vec<i64> = groups.iter().flat_map(|g| g.venues.iter().map(|v| v.id)).collect();
        assert_eq!(flattened.len(), venues.len());
        let unique: HashSet<i64> = flattened.iter().copied().collect();
        assert_eq!(unique, venues.iter().map(|v| v.id).collect::<HashSet<_>>());

        // Same city name in two states stays two groups
        assert_eq!(groups.len(), 4);
        let sf = groups
            .iter()
            .find(|g| g.city == "San Francisco" && g.state == "CA")
            .unwrap();
        assert_eq!(sf.venues.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_grouping_counts_only_upcoming_shows() {
        let now = now();
        let venues = vec![venue(1, "The Musical Hop", "San Francisco", "CA")];
        let shows = vec![
            show(1, 1, 4, now + Duration::days(1)),
            show(2, 1, 4, now + Duration::days(2)),
            show(3, 1, 4, now - Duration::days(1)),
            show(4, 2, 4, now + Duration::days(1)),
        ];

        let groups = group_by_location(&venues, &shows, &now);
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_grouping_empty() {
        assert!(group_by_location(&[], &[], &now()).is_empty());
    }

    #[test]
    fn test_upcoming_by_artist() {
        let now = now();
        let shows = vec![
            show(1, 1, 4, now + Duration::days(1)),
            show(2, 2, 4, now - Duration::days(1)),
            show(3, 2, 5, now + Duration::days(3)),
        ];
        let counts = upcoming_by_artist(&shows, &now);
        assert_eq!(counts.get(&4), Some(&1));
        assert_eq!(counts.get(&5), Some(&1));
    }

    #[test]
    fn test_partition_covers_every_show_once() {
        let now = now();
        let shows: Vec<ShowListing> = (0..10)
            .map(|i| listing(i, now + Duration::hours(i - 5)))
            .collect();

        let (past, upcoming) = partition_shows(shows.clone(), &now);

        assert_eq!(past.len() + upcoming.len(), shows.len());
        assert!(past.iter().all(|s| s.start_time <= now));
        assert!(upcoming.iter().all(|s| s.start_time > now));
        assert_eq!(upcoming.len(), 4);
    }

    #[test]
    fn test_venue_detail_denormalizes_artist() {
        let now = now();
        let detail = venue_detail(
            venue(1, "The Musical Hop", "San Francisco", "CA"),
            vec![listing(1, now + Duration::days(1)), listing(2, now - Duration::days(1))],
            &now,
        );

        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");
        assert_eq!(
            detail.upcoming_shows[0].artist_image_link.as_deref(),
            Some("https://img.example/artist.png")
        );
    }

    #[test]
    fn test_venue_detail_serializes_flat() {
        let detail = venue_detail(venue(7, "Hall", "Austin", "TX"), vec![], &now());
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Hall");
        assert_eq!(json["past_shows_count"], 0);
        assert!(json["upcoming_shows"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_show_entry_formats_start_time() {
        let ts = NaiveDateTime::parse_from_str("2019-05-21 21:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let entry = ShowEntry::from(&listing(1, ts));
        assert_eq!(entry.start_time, "Tue 05, 21, 2019 9:30PM");
        assert_eq!(entry.venue_name, "The Musical Hop");
    }

    #[test]
    fn test_search_page_counts_results() {
        let page = SearchPage::new(
            "hop".to_string(),
            vec![UpcomingSummary {
                id: 1,
                name: "The Musical Hop".to_string(),
                num_upcoming_shows: 0,
            }],
        );
        assert_eq!(page.results.count, 1);
        assert_eq!(page.search_term, "hop");
    }
}
