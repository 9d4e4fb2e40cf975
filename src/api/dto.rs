//! Data Transfer Objects
//!
//! Response types for the statistics API resources.
//! Field names follow the API's camelCase JSON keys.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// SUMMARY (`all`)
// ============================================

/// Aggregate counters across all tracked regions
///
/// Starts zeroed and is only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total confirmed cases
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: u64,
    /// Total deaths
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: u64,
    /// Total recovered
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: u64,
    /// Last update, Unix timestamp in milliseconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affected_countries: u32,
}

// ============================================
// COUNTRIES (`countries`)
// ============================================

/// Counters for a single country
///
/// Counters are signed; source corrections can report negative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    /// Country name, unique within a list
    pub country: String,
    /// Location and identifiers, used to place the country on the map
    #[serde(default)]
    pub country_info: Option<CountryInfo>,
    /// New cases reported today
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recovered: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_deaths: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical: i64,
}

impl CountryStat {
    /// Create a country with the counters shown in the list
    pub fn new(country: impl Into<String>, today_cases: i64, cases: i64, deaths: i64, recovered: i64) -> Self {
        Self {
            country: country.into(),
            country_info: None,
            today_cases,
            cases,
            deaths,
            recovered,
            today_deaths: 0,
            active: 0,
            critical: 0,
        }
    }

    /// Builder method: attach a map position
    pub fn at(mut self, lat: f64, long: f64) -> Self {
        let info = self.country_info.get_or_insert_with(CountryInfo::default);
        info.lat = Some(lat);
        info.long = Some(long);
        self
    }

    /// (longitude, latitude) when the API reported a location
    ///
    /// Entries without a real location (ships, aggregates) report `null`
    /// or `(0, 0)` and get no position.
    pub fn position(&self) -> Option<(f64, f64)> {
        let info = self.country_info.as_ref()?;
        let (long, lat) = (info.long?, info.lat?);
        let placeholder = long == 0.0 && lat == 0.0;
        (long.is_finite() && lat.is_finite() && !placeholder).then_some((long, lat))
    }
}

/// Country identifiers and centroid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(rename = "_id", default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub long: Option<f64>,
    #[serde(default)]
    pub flag: Option<String>,
}

/// The API reports unknown counters as `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_api() {
        let json = r#"{
            "updated": 1584000000000,
            "cases": 1000,
            "todayCases": 12,
            "deaths": 50,
            "recovered": 800,
            "active": 150,
            "affectedCountries": 3
        }"#;

        let summary: Summary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.cases, 1000);
        assert_eq!(summary.deaths, 50);
        assert_eq!(summary.recovered, 800);
        assert_eq!(summary.updated, 1_584_000_000_000);
        assert_eq!(summary.today_cases, 12);
        assert_eq!(summary.affected_countries, 3);
        assert_eq!(summary.critical, 0);
    }

    #[test]
    fn test_summary_default_is_zeroed() {
        let summary = Summary::default();
        assert_eq!((summary.cases, summary.deaths, summary.recovered), (0, 0, 0));
        assert_eq!(summary.updated, 0);
    }

    #[test]
    fn test_country_with_info() {
        let json = r#"{
            "country": "Italy",
            "countryInfo": {"_id": 380, "iso2": "IT", "iso3": "ITA", "lat": 42.8333, "long": 12.8333, "flag": "https://disease.sh/assets/img/flags/it.png"},
            "cases": 100,
            "todayCases": 5,
            "deaths": 2,
            "recovered": null
        }"#;

        let country: CountryStat = serde_json::from_str(json).unwrap();
        assert_eq!(country.country, "Italy");
        assert_eq!(country.today_cases, 5);
        assert_eq!(country.recovered, 0);
        assert_eq!(country.position(), Some((12.8333, 42.8333)));
        assert_eq!(country.country_info.unwrap().iso2.as_deref(), Some("IT"));
    }

    #[test]
    fn test_country_without_info_has_no_position() {
        let json = r#"{"country": "X", "todayCases": 5, "cases": 100, "deaths": 2, "recovered": 90}"#;
        let country: CountryStat = serde_json::from_str(json).unwrap();
        assert_eq!(country, CountryStat::new("X", 5, 100, 2, 90));
        assert!(country.position().is_none());
    }

    #[test]
    fn test_negative_counter_keeps_list() {
        let json = r#"[
            {"country": "Italy", "todayCases": 5, "cases": 100, "deaths": 2, "recovered": 90, "active": 8},
            {"country": "Corrected", "todayCases": -4, "cases": 10, "deaths": 0, "recovered": 13, "active": -3}
        ]"#;

        let countries: Vec<CountryStat> = serde_json::from_str(json).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[1].active, -3);
        assert_eq!(countries[1].today_cases, -4);
    }

    #[test]
    fn test_null_location_is_listed_without_position() {
        let json = r#"[
            {"country": "Italy", "countryInfo": {"_id": 380, "iso2": "IT", "lat": 42.8333, "long": 12.8333}, "cases": 100},
            {"country": "Diamond Princess", "countryInfo": {"_id": null, "iso2": null, "iso3": null, "lat": null, "long": null, "flag": null}, "cases": 712}
        ]"#;

        let countries: Vec<CountryStat> = serde_json::from_str(json).unwrap();
        assert_eq!(countries.len(), 2);
        assert!(countries[0].position().is_some());
        assert_eq!(countries[1].cases, 712);
        assert!(countries[1].position().is_none());
    }

    #[test]
    fn test_origin_placeholder_has_no_position() {
        let placeholder = CountryStat::new("MS Zaandam", 0, 9, 2, 0).at(0.0, 0.0);
        assert!(placeholder.position().is_none());

        let on_equator = CountryStat::new("Gabon", 0, 9, 2, 0).at(0.0, 11.75);
        assert_eq!(on_equator.position(), Some((11.75, 0.0)));
    }

    #[test]
    fn test_country_requires_name() {
        let result = serde_json::from_str::<CountryStat>(r#"{"cases": 1}"#);
        assert!(result.is_err());
    }
}
