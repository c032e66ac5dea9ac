//! Location model and continent derivation

use serde::{Deserialize, Serialize};

/// Where an event happens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,

    /// Subdivision or state, e.g. "California"
    pub subdivision: Option<String>,

    /// Country display name
    pub country: String,

    /// Short country code, e.g. "US"
    pub country_abbr: Option<String>,

    /// Optional sub-area within the city, e.g. a neighborhood
    pub locale: Option<String>,
}

impl Location {
    /// Continent derived from the country code, falling back to the name
    pub fn continent(&self) -> Option<Continent> {
        self.country_abbr
            .as_deref()
            .and_then(Continent::from_abbr)
            .or_else(|| Continent::from_country_name(&self.country))
    }
}

/// Continent bucket used by the feed's location filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    /// Parse a caller-supplied continent string; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "africa" => Some(Continent::Africa),
            "asia" => Some(Continent::Asia),
            "europe" => Some(Continent::Europe),
            "north america" | "northamerica" => Some(Continent::NorthAmerica),
            "oceania" => Some(Continent::Oceania),
            "south america" | "southamerica" => Some(Continent::SouthAmerica),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }

    /// Lookup by two-letter country code. Unknown codes are not an error.
    pub fn from_abbr(abbr: &str) -> Option<Self> {
        match abbr.trim().to_uppercase().as_str() {
            "AT" | "BE" | "BG" | "CH" | "CZ" | "DE" | "DK" | "EE" | "ES" | "FI" | "FR"
            | "GB" | "GR" | "HR" | "HU" | "IE" | "IS" | "IT" | "LT" | "LU" | "LV" | "MT"
            | "NL" | "NO" | "PL" | "PT" | "RO" | "RS" | "SE" | "SI" | "SK" | "UA" | "UK" => {
                Some(Continent::Europe)
            }
            "BZ" | "CA" | "CR" | "CU" | "DO" | "GT" | "HN" | "JM" | "MX" | "NI" | "PA"
            | "PR" | "SV" | "US" => Some(Continent::NorthAmerica),
            "AR" | "BO" | "BR" | "CL" | "CO" | "EC" | "PE" | "PY" | "UY" | "VE" => {
                Some(Continent::SouthAmerica)
            }
            "AE" | "CN" | "GE" | "HK" | "ID" | "IL" | "IN" | "JP" | "KR" | "KZ" | "MY"
            | "PH" | "QA" | "SA" | "SG" | "TH" | "TR" | "TW" | "VN" => Some(Continent::Asia),
            "DZ" | "EG" | "ET" | "GH" | "KE" | "MA" | "NG" | "SN" | "TN" | "TZ" | "ZA"
            | "ZM" | "ZW" => Some(Continent::Africa),
            "AU" | "FJ" | "NZ" => Some(Continent::Oceania),
            _ => None,
        }
    }

    /// Lookup by country display name, for records without a code
    pub fn from_country_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "united states" | "usa" | "canada" | "mexico" => Some(Continent::NorthAmerica),
            "united kingdom" | "germany" | "france" | "spain" | "italy" | "netherlands"
            | "portugal" | "poland" | "sweden" | "norway" | "denmark" => Some(Continent::Europe),
            "brazil" | "argentina" | "chile" | "colombia" | "peru" => {
                Some(Continent::SouthAmerica)
            }
            "japan" | "india" | "china" | "south korea" | "indonesia" | "israel"
            | "turkey" => Some(Continent::Asia),
            "south africa" | "morocco" | "egypt" | "kenya" | "nigeria" => {
                Some(Continent::Africa)
            }
            "australia" | "new zealand" | "fiji" => Some(Continent::Oceania),
            _ => None,
        }
    }
}
