//! Display regions
//!
//! What each region of the dashboard shows, independent of where it is
//! drawn. The terminal UI and the CLI both render from these.

use chrono::TimeZone;
use std::fmt::Display;

use super::format;
use crate::api::{CountryStat, Summary};
use crate::map::{Feature, Viewport};

/// Brand shown in the header
pub const APP_TITLE: &str = "Covid-19";

/// A labelled value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

impl Stat {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

impl Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label, self.value)
    }
}

/// Footer summary strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub updated: Stat,
    pub cases: Stat,
    pub deaths: Stat,
    pub recovered: Stat,
}

impl FooterView {
    pub const TITLE: &'static str = "Summary";

    pub fn new<Tz>(summary: &Summary, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            updated: Stat::new("Updated At", format::timestamp(summary.updated, tz)),
            cases: Stat::new("Total Cases", format::count(summary.cases)),
            deaths: Stat::new("Total Deaths", format::count(summary.deaths)),
            recovered: Stat::new("Recovered", format::count(summary.recovered)),
        }
    }

    /// The three counters, in display order
    pub fn totals(&self) -> [&Stat; 3] {
        [&self.cases, &self.deaths, &self.recovered]
    }
}

impl Display for FooterView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            Self::TITLE,
            self.updated,
            self.cases,
            self.deaths,
            self.recovered
        )
    }
}

/// Today's change, highlighted when positive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    pub text: String,
    pub highlighted: bool,
}

impl Delta {
    pub fn new(n: i64) -> Self {
        if n > 0 {
            Self {
                text: format!("+{}", format::signed(n)),
                highlighted: true,
            }
        } else {
            Self {
                text: format::signed(n),
                highlighted: false,
            }
        }
    }
}

/// One entry of the scrollable country list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    pub name: String,
    pub today: Delta,
    pub cases: String,
    pub deaths: String,
    pub recovered: String,
}

impl CountryRow {
    pub const TODAY_LABEL: &'static str = "Today Cases";
    pub const CASES_LABEL: &'static str = "Total Cases";
    pub const DEATHS_LABEL: &'static str = "Total Deaths";
    pub const RECOVERED_LABEL: &'static str = "Recovered";

    /// One row per country, in list order
    pub fn rows(countries: &[CountryStat]) -> Vec<Self> {
        countries.iter().map(Self::from).collect()
    }
}

impl From<&CountryStat> for CountryRow {
    fn from(stat: &CountryStat) -> Self {
        Self {
            name: stat.country.clone(),
            today: Delta::new(stat.today_cases),
            cases: format::signed(stat.cases),
            deaths: format::signed(stat.deaths),
            recovered: format::signed(stat.recovered),
        }
    }
}

/// A map marker ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: usize,
    pub longitude: f64,
    pub latitude: f64,
    /// Country name, or the case count for clusters
    pub text: String,
    pub cluster: bool,
    pub selected: bool,
}

impl MarkerView {
    pub fn new(feature: &Feature, selected: bool) -> Self {
        let text = if feature.is_cluster() {
            format!("({}) {}", feature.point_count, format::compact(feature.cases))
        } else {
            feature.label.clone()
        };

        Self {
            id: feature.id,
            longitude: feature.longitude,
            latitude: feature.latitude,
            text,
            cluster: feature.is_cluster(),
            selected,
        }
    }
}

/// Map title line: camera position and orientation
pub fn camera_caption(viewport: &Viewport) -> String {
    format!(
        "{:.2}°, {:.2}° · zoom {:.1} · bearing {:.0}° · pitch {:.0}°",
        viewport.latitude, viewport.longitude, viewport.zoom, viewport.bearing, viewport.pitch
    )
}
