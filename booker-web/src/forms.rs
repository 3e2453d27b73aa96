//! Form parsing and validation
//!
//! Submissions arrive as `application/x-www-form-urlencoded` bodies and are
//! taken as ordered `(name, value)` pairs so repeated fields (`genres`) keep
//! every value. Each form type validates into the store's field set or a
//! map of field-level errors.

use booker_common::db::{Artist, ArtistFields, NewShow, Venue, VenueFields};
use booker_common::time::parse_timestamp;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// State codes offered by the venue and artist forms
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genre choices offered by the venue and artist forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const MAX_TEXT_LEN: usize = 120;
const MAX_LINK_LEN: usize = 500;
const MAX_DESCRIPTION_LEN: usize = 1000;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?(\d{3})\)?[-. ]?(\d{3})[-. ]?(\d{4})$").expect("phone pattern is valid")
});

/// Submitted form body as ordered `(name, value)` pairs
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormData {
    /// First value of `name`, trimmed; empty when absent
    pub fn text(&self, name: &str) -> String {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Every non-blank value of a repeated field, in submission order
    pub fn all(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, v)| k == name && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .collect()
    }

    /// Checkbox semantics: present with a truthy value
    pub fn checked(&self, name: &str) -> bool {
        self.0.iter().any(|(k, v)| {
            k == name && matches!(v.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "on" | "true" | "1")
        })
    }
}

/// Field name to messages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Body of the search forms; a missing term is the empty term
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

// ============================================================================
// Venue
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            facebook_link: data.text("facebook_link"),
            website: data.text("website"),
            genres: data.all("genres"),
            seeking_talent: data.checked("seeking_talent"),
            seeking_description: data.text("seeking_description"),
        }
    }

    /// Prefill from a stored venue
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website: venue.website.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        required_text(&mut errors, "name", &self.name);
        required_text(&mut errors, "city", &self.city);
        required_text(&mut errors, "address", &self.address);
        state_choice(&mut errors, &self.state);
        let genres = genre_choices(&mut errors, &self.genres);
        let phone = phone_number(&mut errors, &self.phone);
        let image_link = link(&mut errors, "image_link", &self.image_link);
        let facebook_link = facebook_link(&mut errors, &self.facebook_link);
        let website = link(&mut errors, "website", &self.website);
        let seeking_description = description(&mut errors, &self.seeking_description);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(VenueFields {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone,
            image_link,
            facebook_link,
            website,
            genres,
            seeking_talent: self.seeking_talent,
            seeking_description,
        })
    }
}

// ============================================================================
// Artist
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            facebook_link: data.text("facebook_link"),
            website: data.text("website"),
            genres: data.all("genres"),
            seeking_venue: data.checked("seeking_venue"),
            seeking_description: data.text("seeking_description"),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website: artist.website.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        required_text(&mut errors, "name", &self.name);
        required_text(&mut errors, "city", &self.city);
        state_choice(&mut errors, &self.state);
        let genres = genre_choices(&mut errors, &self.genres);
        let phone = phone_number(&mut errors, &self.phone);
        let image_link = link(&mut errors, "image_link", &self.image_link);
        let facebook_link = facebook_link(&mut errors, &self.facebook_link);
        let website = link(&mut errors, "website", &self.website);
        let seeking_description = description(&mut errors, &self.seeking_description);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ArtistFields {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone,
            image_link,
            facebook_link,
            website,
            genres,
            seeking_venue: self.seeking_venue,
            seeking_description,
        })
    }
}

// ============================================================================
// Show
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            artist_id: data.text("artist_id"),
            venue_id: data.text("venue_id"),
            start_time: data.text("start_time"),
        }
    }

    /// Format checks only; whether the ids resolve is decided against the store
    pub fn validate(&self) -> Result<NewShow, FieldErrors> {
        let mut errors = FieldErrors::default();

        let artist_id = record_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = record_id(&mut errors, "venue_id", &self.venue_id);
        let start_time = if self.start_time.is_empty() {
            errors.add("start_time", "This field is required.");
            None
        } else {
            match parse_timestamp(&self.start_time) {
                Ok(ts) => Some(ts),
                Err(_) => {
                    errors.add("start_time", "Not a valid date/time (use YYYY-MM-DD HH:MM:SS).");
                    None
                }
            }
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Field validators
// ============================================================================

fn required_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > MAX_TEXT_LEN {
        errors.add(field, format!("Must be at most {} characters.", MAX_TEXT_LEN));
    }
}

fn state_choice(errors: &mut FieldErrors, value: &str) {
    if value.is_empty() {
        errors.add("state", "This field is required.");
    } else if !STATES.contains(&value) {
        errors.add("state", format!("Not a valid choice: {}", value));
    }
}

/// Every genre must be offered; at least one required; duplicates dropped
fn genre_choices(errors: &mut FieldErrors, values: &[String]) -> Vec<String> {
    if values.is_empty() {
        errors.add("genres", "Select at least one genre.");
        return Vec::new();
    }

    let mut genres: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !GENRES.contains(&value.as_str()) {
            errors.add("genres", format!("Not a valid choice: {}", value));
        } else if !genres.contains(value) {
            genres.push(value.clone());
        }
    }
    genres
}

/// Optional; normalized to `XXX-XXX-XXXX`
fn phone_number(errors: &mut FieldErrors, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match PHONE_RE.captures(value) {
        Some(caps) => Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3])),
        None => {
            errors.add("phone", "Invalid phone number (expected XXX-XXX-XXXX).");
            None
        }
    }
}

/// Optional absolute http(s) URL
fn link(errors: &mut FieldErrors, field: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    if value.len() > MAX_LINK_LEN {
        errors.add(field, format!("Must be at most {} characters.", MAX_LINK_LEN));
        return None;
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Some(value.to_string())
        }
        _ => {
            errors.add(field, "Invalid URL.");
            None
        }
    }
}

fn facebook_link(errors: &mut FieldErrors, value: &str) -> Option<String> {
    let checked = link(errors, "facebook_link", value)?;
    let on_facebook = Url::parse(&checked)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| host == "facebook.com" || host.ends_with(".facebook.com"));

    if on_facebook {
        Some(checked)
    } else {
        errors.add("facebook_link", "Must be a facebook.com link.");
        None
    }
}

fn description(errors: &mut FieldErrors, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    if value.chars().count() > MAX_DESCRIPTION_LEN {
        errors.add(
            "seeking_description",
            format!("Must be at most {} characters.", MAX_DESCRIPTION_LEN),
        );
        return None;
    }
    Some(value.to_string())
}

fn record_id(errors: &mut FieldErrors, field: &str, value: &str) -> Option<i64> {
    if value.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Must be a positive whole number.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into()
    }

    fn venue_data() -> FormData {
        data(&[
            ("name", "  The Musical Hop "),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123.123.1234"),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
            ("website", ""),
            ("seeking_talent", "y"),
        ])
    }

    #[test]
    fn test_form_data_accessors() {
        let form = venue_data();
        assert_eq!(form.text("name"), "The Musical Hop");
        assert_eq!(form.text("missing"), "");
        assert_eq!(form.all("genres"), vec!["Jazz", "Reggae"]);
        assert!(form.checked("seeking_talent"));
        assert!(!form.checked("seeking_venue"));
    }

    #[test]
    fn test_valid_venue_normalizes_fields() {
        let fields = VenueForm::from_data(&venue_data()).validate().unwrap();

        assert_eq!(fields.name, "The Musical Hop");
        assert_eq!(fields.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(fields.genres, vec!["Jazz", "Reggae"]);
        assert!(fields.website.is_none(), "blank optional field is stored as NULL");
        assert!(fields.seeking_talent);
        assert!(fields.seeking_description.is_none());
    }

    #[test]
    fn test_venue_missing_required_fields() {
        let errors = VenueForm::default().validate().unwrap_err();

        for field in ["name", "city", "state", "address", "genres"] {
            assert!(errors.contains(field), "expected error for {}", field);
        }
        assert!(!errors.contains("phone"));
    }

    #[test]
    fn test_unknown_state_and_genre_rejected() {
        let form = ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "ZZ".to_string(),
            genres: vec!["Rock n Roll".to_string(), "Polka".to_string()],
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.contains("state"));
        assert_eq!(errors.get("genres").unwrap(), ["Not a valid choice: Polka"]);
    }

    #[test]
    fn test_duplicate_genres_collapsed() {
        let form = ArtistForm {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            genres: vec!["Jazz".to_string(), "Jazz".to_string()],
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap().genres, vec!["Jazz"]);
    }

    #[test]
    fn test_artist_keeps_state_separate_from_city() {
        let form = ArtistForm::from_data(&data(&[
            ("name", "The Wild Sax Band"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Jazz"),
        ]));
        let fields = form.validate().unwrap();
        assert_eq!(fields.city, "San Francisco");
        assert_eq!(fields.state, "CA");
    }

    #[test]
    fn test_phone_formats() {
        let mut errors = FieldErrors::default();
        assert_eq!(phone_number(&mut errors, "(415) 555-1234").as_deref(), Some("415-555-1234"));
        assert_eq!(phone_number(&mut errors, "4155551234").as_deref(), Some("415-555-1234"));
        assert!(errors.is_empty());

        assert!(phone_number(&mut errors, "555-1234").is_none());
        assert!(errors.contains("phone"));
    }

    #[test]
    fn test_link_validation() {
        let mut errors = FieldErrors::default();
        assert!(link(&mut errors, "website", "https://example.com/band").is_some());
        assert!(errors.is_empty());

        assert!(link(&mut errors, "website", "example.com").is_none());
        assert!(link(&mut errors, "image_link", "ftp://example.com/a.png").is_none());
        assert!(errors.contains("website"));
        assert!(errors.contains("image_link"));
    }

    #[test]
    fn test_facebook_link_requires_facebook_host() {
        let mut errors = FieldErrors::default();
        assert!(facebook_link(&mut errors, "https://m.facebook.com/band").is_some());
        assert!(errors.is_empty());

        assert!(facebook_link(&mut errors, "https://notfacebook.com/band").is_none());
        assert_eq!(errors.get("facebook_link").unwrap(), ["Must be a facebook.com link."]);
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut errors = FieldErrors::default();
        required_text(&mut errors, "name", &"x".repeat(MAX_TEXT_LEN + 1));
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_description_has_its_own_limit() {
        let mut errors = FieldErrors::default();
        let long = "y".repeat(MAX_LINK_LEN + 100);
        assert_eq!(description(&mut errors, &long).as_deref(), Some(long.as_str()));
        assert!(errors.is_empty());

        assert!(description(&mut errors, &"y".repeat(MAX_DESCRIPTION_LEN + 1)).is_none());
        assert!(errors.contains("seeking_description"));
    }

    #[test]
    fn test_show_form_valid() {
        let show = ShowForm::from_data(&data(&[
            ("artist_id", "1"),
            ("venue_id", "2"),
            ("start_time", "2035-04-01 20:00:00"),
        ]))
        .validate()
        .unwrap();

        assert_eq!(show.artist_id, 1);
        assert_eq!(show.venue_id, 2);
        assert_eq!(show.start_time.to_string(), "2035-04-01 20:00:00");
    }

    #[test]
    fn test_show_form_invalid() {
        let errors = ShowForm {
            artist_id: "abc".to_string(),
            venue_id: "0".to_string(),
            start_time: "tomorrow-ish".to_string(),
        }
        .validate()
        .unwrap_err();

        assert!(errors.contains("artist_id"));
        assert!(errors.contains("venue_id"));
        assert!(errors.contains("start_time"));
    }

    #[test]
    fn test_prefill_round_trips_through_validation() {
        let fields = VenueForm::from_data(&venue_data()).validate().unwrap();
        let venue = Venue {
            id: 1,
            name: fields.name.clone(),
            city: fields.city.clone(),
            state: fields.state.clone(),
            address: fields.address.clone(),
            phone: fields.phone.clone(),
            image_link: fields.image_link.clone(),
            facebook_link: fields.facebook_link.clone(),
            website: fields.website.clone(),
            genres: fields.genres.clone(),
            seeking_talent: fields.seeking_talent,
            seeking_description: fields.seeking_description.clone(),
        };

        assert_eq!(VenueForm::from_venue(&venue).validate().unwrap(), fields);
    }
}
