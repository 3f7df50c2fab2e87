//! ==============================================================================
//! state.rs - Owned Hub State
//! ==============================================================================
//!
//! purpose:
//!     single owned container for everything the HTTP handlers read or
//!     mutate: the simulated device identity, the thermostat set points,
//!     schedule and mode pairs, and the in-memory articles/users fixture
//!     acting as the only "database".
//!
//! sharing model:
//!     handlers receive `SharedState` (Arc<RwLock<HubState>>) via axum
//!     State. Reads take the read guard, PUTs the write guard, so
//!     concurrent writers can no longer race the way package globals would.
//!
//! ==============================================================================

use std::sync::Arc;

use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::HubConfig;

pub type SharedState = Arc<RwLock<HubState>>;

/// Simulated readout range for the current temperature, °C
const TEMP_MIN: f64 = -10.0;
const TEMP_MAX: f64 = 40.0;

/// Random article ids live in [10, 110), like the fixture generator
/// this replaces.
const ARTICLE_ID_MIN: u32 = 10;
const ARTICLE_ID_MAX: u32 = 110;

// ==============================================================================
// wire records
// ==============================================================================

/// Network identity of the simulated device. `currenttime` is captured
/// once at process start.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub ip: String,
    pub ssid: String,
    pub passphrase: String,
    #[serde(rename = "currenttime")]
    pub current_time: String,
}

/// Persisted thermostat set points. The current temperature is NOT part
/// of this record - it is simulated fresh on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempSettings {
    #[serde(rename = "daytemp")]
    pub day_temp: String,
    #[serde(rename = "nighttemp")]
    pub night_temp: String,
    pub threshold: String,
}

/// GET /rest/v1/temp body: the set points plus a simulated readout.
#[derive(Debug, Clone, Serialize)]
pub struct TempReport {
    #[serde(rename = "currenttemp")]
    pub current_temp: String,
    #[serde(rename = "nighttemp")]
    pub night_temp: String,
    #[serde(rename = "daytemp")]
    pub day_temp: String,
    pub threshold: String,
}

/// Day/night switch-over schedule, HH:MM. Mutated in place by PUT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub day: String,
    pub night: String,
}

/// GET /rest/v1/mode body: `[current, requested]` pairs.
#[derive(Debug, Clone, Serialize)]
pub struct ModeReport {
    pub mode: [String; 2],
    pub heating: [String; 2],
}

/// PUT /rest/v1/mode body. Values are NOT validated against an enumerated
/// set; whatever string arrives becomes the requested value.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeUpdate {
    pub mode: String,
    pub heating: String,
}

/// Article data model, the in-memory "database" row.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: String,
    pub user_id: i64,
    pub title: String,
    pub slug: String,
}

/// User data model, a static fixture decorating article responses.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

// ==============================================================================
// hub state
// ==============================================================================

/// Mode/heating state: the process-lifetime current value plus the last
/// requested value. A mode update writes the incoming value into the
/// requested slot and leaves the current value alone.
#[derive(Debug, Clone)]
struct ModeState {
    mode_current: String,
    mode_requested: String,
    heating_current: String,
    heating_requested: String,
}

#[derive(Debug)]
pub struct HubState {
    device: Device,
    temps: TempSettings,
    schedule: Schedule,
    mode: ModeState,
    articles: Vec<Article>,
    users: Vec<User>,
}

impl HubState {
    pub fn new(config: &HubConfig) -> Self {
        Self {
            device: Device {
                ip: config.device.ip.clone(),
                ssid: config.device.ssid.clone(),
                passphrase: config.device.passphrase.clone(),
                current_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            temps: TempSettings {
                day_temp: config.climate.day_temp.clone(),
                night_temp: config.climate.night_temp.clone(),
                threshold: config.climate.threshold.clone(),
            },
            schedule: Schedule {
                day: config.climate.day_start.clone(),
                night: config.climate.night_start.clone(),
            },
            mode: ModeState {
                mode_current: config.climate.mode.clone(),
                mode_requested: "auto".to_string(),
                heating_current: config.climate.heating.clone(),
                heating_requested: "auto".to_string(),
            },
            articles: article_fixtures(),
            users: user_fixtures(),
        }
    }

    /// Convenience constructor for the shared handle handlers expect.
    pub fn shared(config: &HubConfig) -> SharedState {
        Arc::new(RwLock::new(Self::new(config)))
    }

    // --------------------------------------------------------------------------
    // device / thermostat
    // --------------------------------------------------------------------------

    pub fn device(&self) -> Device {
        self.device.clone()
    }

    /// Build a temp report with a freshly simulated current temperature.
    /// There is no real sensor behind this hub; each read rolls a new
    /// value in [TEMP_MIN, TEMP_MAX) and nothing is persisted.
    pub fn temp_report(&self) -> TempReport {
        let readout = rand::thread_rng().gen_range(TEMP_MIN..TEMP_MAX);
        TempReport {
            current_temp: format!("{readout:.2}"),
            night_temp: self.temps.night_temp.clone(),
            day_temp: self.temps.day_temp.clone(),
            threshold: self.temps.threshold.clone(),
        }
    }

    /// Overwrite the set points wholesale.
    pub fn set_temps(&mut self, temps: TempSettings) {
        self.temps = temps;
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule.clone()
    }

    /// Overwrite the schedule. The `day` field is down-cased on the way
    /// in, matching the bind step of the API this replaces.
    pub fn set_schedule(&mut self, mut schedule: Schedule) {
        schedule.day = schedule.day.to_lowercase();
        self.schedule = schedule;
    }

    pub fn modes(&self) -> ModeReport {
        ModeReport {
            mode: [
                self.mode.mode_current.clone(),
                self.mode.mode_requested.clone(),
            ],
            heating: [
                self.mode.heating_current.clone(),
                self.mode.heating_requested.clone(),
            ],
        }
    }

    pub fn set_modes(&mut self, update: ModeUpdate) {
        self.mode.mode_requested = update.mode;
        self.mode.heating_requested = update.heating;
    }

    // --------------------------------------------------------------------------
    // articles "database" - a Vec with linear scans
    // --------------------------------------------------------------------------

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Append a new article under a random free id and return it.
    pub fn insert_article(&mut self, user_id: i64, title: String, slug: String) -> Article {
        let mut rng = rand::thread_rng();
        let id = loop {
            let candidate = rng.gen_range(ARTICLE_ID_MIN..ARTICLE_ID_MAX).to_string();
            if self.article_by_id(&candidate).is_none() {
                break candidate;
            }
        };
        let article = Article {
            id,
            user_id,
            title,
            slug,
        };
        self.articles.push(article.clone());
        article
    }

    pub fn article_by_id(&self, id: &str) -> Option<Article> {
        self.articles.iter().find(|a| a.id == id).cloned()
    }

    pub fn article_by_slug(&self, slug: &str) -> Option<Article> {
        self.articles.iter().find(|a| a.slug == slug).cloned()
    }

    /// Replace the fields of an existing article. The id is immutable.
    pub fn update_article(
        &mut self,
        id: &str,
        user_id: i64,
        title: String,
        slug: String,
    ) -> Option<Article> {
        let article = self.articles.iter_mut().find(|a| a.id == id)?;
        article.user_id = user_id;
        article.title = title;
        article.slug = slug;
        Some(article.clone())
    }

    pub fn remove_article(&mut self, id: &str) -> Option<Article> {
        let index = self.articles.iter().position(|a| a.id == id)?;
        Some(self.articles.remove(index))
    }

    pub fn user_by_id(&self, id: i64) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }
}

// ==============================================================================
// fixtures
// ==============================================================================

fn article_fixtures() -> Vec<Article> {
    [
        ("1", 100, "Hi", "hi"),
        ("2", 200, "sup", "sup"),
        ("3", 300, "alo", "alo"),
        ("4", 400, "bonjour", "bonjour"),
        ("5", 500, "whats up", "whats-up"),
    ]
    .into_iter()
    .map(|(id, user_id, title, slug)| Article {
        id: id.to_string(),
        user_id,
        title: title.to_string(),
        slug: slug.to_string(),
    })
    .collect()
}

fn user_fixtures() -> Vec<User> {
    vec![
        User {
            id: 100,
            name: "Peter".to_string(),
        },
        User {
            id: 200,
            name: "Julia".to_string(),
        },
    ]
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HubConfig;

    fn state() -> HubState {
        HubState::new(&HubConfig::default())
    }

    #[test]
    fn insert_assigns_fresh_id_and_appends() {
        let mut state = state();
        let before = state.articles().len();
        let article = state.insert_article(100, "awesomeness".into(), "awesomeness".into());

        assert_eq!(state.articles().len(), before + 1);
        let id: u32 = article.id.parse().expect("numeric id");
        assert!((ARTICLE_ID_MIN..ARTICLE_ID_MAX).contains(&id));
        assert_eq!(state.article_by_id(&article.id).unwrap().title, "awesomeness");
    }

    #[test]
    fn insert_skips_taken_ids() {
        let mut state = state();
        // occupy every candidate id except one
        for id in ARTICLE_ID_MIN..ARTICLE_ID_MAX - 1 {
            state.articles.push(Article {
                id: id.to_string(),
                user_id: 0,
                title: String::new(),
                slug: String::new(),
            });
        }
        let article = state.insert_article(0, "last".into(), "last".into());
        assert_eq!(article.id, (ARTICLE_ID_MAX - 1).to_string());
    }

    #[test]
    fn lookup_by_id_and_slug() {
        let state = state();
        assert_eq!(state.article_by_id("5").unwrap().slug, "whats-up");
        assert_eq!(state.article_by_slug("whats-up").unwrap().id, "5");
        assert!(state.article_by_id("nope").is_none());
        assert!(state.article_by_slug("nope").is_none());
    }

    #[test]
    fn update_keeps_id() {
        let mut state = state();
        let updated = state
            .update_article("2", 100, "rewritten".into(), "rewritten".into())
            .unwrap();
        assert_eq!(updated.id, "2");
        assert_eq!(state.article_by_id("2").unwrap().title, "rewritten");
        assert!(state
            .update_article("404", 0, String::new(), String::new())
            .is_none());
    }

    #[test]
    fn remove_returns_the_row() {
        let mut state = state();
        let removed = state.remove_article("1").unwrap();
        assert_eq!(removed.title, "Hi");
        assert!(state.article_by_id("1").is_none());
        assert!(state.remove_article("1").is_none());
    }

    #[test]
    fn temp_report_rolls_a_value_in_range() {
        let state = state();
        for _ in 0..32 {
            let report = state.temp_report();
            let value: f64 = report.current_temp.parse().unwrap();
            assert!((TEMP_MIN..TEMP_MAX).contains(&value));
            assert_eq!(report.day_temp, "24.00");
        }
    }

    #[test]
    fn schedule_update_downcases_day() {
        let mut state = state();
        state.set_schedule(Schedule {
            day: "07:00AM".into(),
            night: "21:00".into(),
        });
        let schedule = state.schedule();
        assert_eq!(schedule.day, "07:00am");
        assert_eq!(schedule.night, "21:00");
    }

    #[test]
    fn mode_update_fills_requested_slot_only() {
        let mut state = state();
        state.set_modes(ModeUpdate {
            mode: "day".into(),
            heating: "on".into(),
        });
        let report = state.modes();
        assert_eq!(report.mode, ["night".to_string(), "day".to_string()]);
        assert_eq!(report.heating, ["off".to_string(), "on".to_string()]);
    }

    #[test]
    fn unknown_author_is_absent() {
        let state = state();
        assert_eq!(state.user_by_id(100).unwrap().name, "Peter");
        assert!(state.user_by_id(300).is_none());
    }
}
