//! Adventure aggregate and its closed vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geo::LatLng;

/// Validation errors returned by [`Adventure::new`] and the vocabulary parsers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdventureValidationError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Offending field.
        field: &'static str,
    },
    /// The country code is not two uppercase ASCII letters.
    #[error("invalid country code '{value}'")]
    InvalidCountryCode {
        /// Rejected value.
        value: String,
    },
    /// The coordinates fall outside WGS84 ranges.
    #[error("coordinates out of range: ({lat}, {lng})")]
    InvalidCoordinates {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
    /// Adventures last at least one day.
    #[error("duration must be at least one day")]
    ZeroDuration,
    /// The difficulty label is not part of the vocabulary.
    #[error("unknown difficulty '{value}'")]
    UnknownDifficulty {
        /// Rejected label.
        value: String,
    },
    /// The typology label is not part of the vocabulary.
    #[error("unknown typology '{value}'")]
    UnknownTypology {
        /// Rejected label.
        value: String,
    },
    /// `on_sale` is set without a sale price.
    #[error("adventure is on sale but has no sale price")]
    MissingSalePrice,
    /// The sale price does not undercut the base price.
    #[error("sale price {sale_price} must be lower than price {price}")]
    SalePriceNotLower {
        /// Base price.
        price: u32,
        /// Offered sale price.
        sale_price: u32,
    },
}

/// Physical difficulty grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Suitable for everyone.
    Easy,
    /// Some fitness required.
    Medium,
    /// Good fitness required.
    Challenging,
    /// Demanding; experience recommended.
    Difficult,
}

impl Difficulty {
    /// Every grade in display order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Challenging, Self::Difficult];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Challenging => "Challenging",
            Self::Difficult => "Difficult",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = AdventureValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| AdventureValidationError::UnknownDifficulty {
                value: value.to_owned(),
            })
    }
}

/// Kind of trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Typology {
    /// Activity-led trips.
    #[serde(rename = "Sports Activities")]
    SportsActivities,
    /// Leisure trips.
    Vacation,
}

impl Typology {
    /// Every typology in display order.
    pub const ALL: [Self; 2] = [Self::SportsActivities, Self::Vacation];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SportsActivities => "Sports Activities",
            Self::Vacation => "Vacation",
        }
    }
}

impl fmt::Display for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Typology {
    type Err = AdventureValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|typology| typology.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| AdventureValidationError::UnknownTypology {
                value: value.to_owned(),
            })
    }
}

/// ISO 3166-1 alpha-2 country code.
///
/// # Examples
/// ```
/// use adventure_map::domain::CountryCode;
///
/// let code = CountryCode::new("is").expect("valid code");
/// assert_eq!(code.as_str(), "IS");
/// assert!(CountryCode::new("-99").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and normalise a country code to upper case.
    ///
    /// # Errors
    ///
    /// Returns [`AdventureValidationError::InvalidCountryCode`] unless the
    /// value is exactly two ASCII letters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AdventureValidationError> {
        let raw = value.as_ref().trim();
        if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(raw.to_ascii_uppercase()))
        } else {
            Err(AdventureValidationError::InvalidCountryCode {
                value: raw.to_owned(),
            })
        }
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = AdventureValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

/// Price and sale information in whole euros.
///
/// ## Invariants
/// - When `on_sale` is true, `sale_price` is present and strictly below `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    price: u32,
    sale_price: Option<u32>,
    on_sale: bool,
}

impl Pricing {
    /// Validate a price triple.
    ///
    /// # Errors
    ///
    /// Rejects sales without a sale price and sale prices that do not
    /// undercut the base price.
    pub fn new(
        price: u32,
        sale_price: Option<u32>,
        on_sale: bool,
    ) -> Result<Self, AdventureValidationError> {
        if on_sale {
            let sale = sale_price.ok_or(AdventureValidationError::MissingSalePrice)?;
            if sale >= price {
                return Err(AdventureValidationError::SalePriceNotLower {
                    price,
                    sale_price: sale,
                });
            }
        }
        Ok(Self {
            price,
            sale_price,
            on_sale,
        })
    }

    /// Base price.
    #[must_use]
    pub const fn price(&self) -> u32 {
        self.price
    }

    /// Sale price, whether or not it currently applies.
    #[must_use]
    pub const fn sale_price(&self) -> Option<u32> {
        self.sale_price
    }

    /// Whether the sale price applies.
    #[must_use]
    pub const fn on_sale(&self) -> bool {
        self.on_sale
    }

    /// Price the customer pays: the sale price while on sale, else the base
    /// price.
    ///
    /// # Examples
    /// ```
    /// use adventure_map::domain::Pricing;
    ///
    /// let sale = Pricing::new(2200, Some(1980), true).expect("valid pricing");
    /// assert_eq!(sale.effective_price(), 1980);
    ///
    /// let stale = Pricing::new(2200, Some(1980), false).expect("valid pricing");
    /// assert_eq!(stale.effective_price(), 2200);
    /// ```
    #[must_use]
    pub const fn effective_price(&self) -> u32 {
        match (self.on_sale, self.sale_price) {
            (true, Some(sale)) => sale,
            _ => self.price,
        }
    }
}

/// Input payload for [`Adventure::new`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureDraft {
    pub id: String,
    pub name: String,
    pub country_name: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
    pub duration_days: u32,
    pub difficulty: String,
    pub typology: String,
    pub price: u32,
    pub sale_price: Option<u32>,
    pub on_sale: bool,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// One bookable adventure package.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adventure {
    id: String,
    name: String,
    #[serde(rename = "country")]
    country_name: String,
    country_code: CountryCode,
    #[serde(flatten)]
    location: LatLng,
    #[serde(rename = "duration")]
    duration_days: u32,
    difficulty: Difficulty,
    typology: Typology,
    #[serde(flatten)]
    pricing: Pricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Adventure {
    /// Validate and construct an adventure.
    ///
    /// # Errors
    ///
    /// Returns [`AdventureValidationError`] when any field breaks its rule.
    pub fn new(draft: AdventureDraft) -> Result<Self, AdventureValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn country_name(&self) -> &str {
        self.country_name.as_str()
    }
    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }
    pub fn location(&self) -> LatLng {
        self.location
    }
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
    pub fn typology(&self) -> Typology {
        self.typology
    }
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }
    pub fn effective_price(&self) -> u32 {
        self.pricing.effective_price()
    }
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, AdventureValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdventureValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

impl TryFrom<AdventureDraft> for Adventure {
    type Error = AdventureValidationError;

    fn try_from(draft: AdventureDraft) -> Result<Self, Self::Error> {
        let id = non_empty(draft.id, "adventure.id")?;
        let name = non_empty(draft.name, "adventure.name")?;
        let country_name = non_empty(draft.country_name, "adventure.country")?;
        let country_code = CountryCode::new(&draft.country_code)?;
        let location = LatLng::new(draft.lat, draft.lng);
        if !location.is_valid() {
            return Err(AdventureValidationError::InvalidCoordinates {
                lat: draft.lat,
                lng: draft.lng,
            });
        }
        if draft.duration_days == 0 {
            return Err(AdventureValidationError::ZeroDuration);
        }
        let difficulty = draft.difficulty.parse()?;
        let typology = draft.typology.parse()?;
        let pricing = Pricing::new(draft.price, draft.sale_price, draft.on_sale)?;

        Ok(Self {
            id,
            name,
            country_name,
            country_code,
            location,
            duration_days: draft.duration_days,
            difficulty,
            typology,
            pricing,
            image_url: draft.image_url,
            url: draft.url,
            description: draft.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> AdventureDraft {
        AdventureDraft {
            id: "japan-002".to_owned(),
            name: "Kyoto Temple Walks".to_owned(),
            country_name: "Japan".to_owned(),
            country_code: "JP".to_owned(),
            lat: 35.0116,
            lng: 135.7681,
            duration_days: 7,
            difficulty: "Easy".to_owned(),
            typology: "Vacation".to_owned(),
            price: 2550,
            sale_price: Some(2295),
            on_sale: true,
            image_url: None,
            url: Some("/adventures/japan-002".to_owned()),
            description: None,
        }
    }

    #[rstest]
    fn valid_draft_builds_adventure(draft: AdventureDraft) {
        let adventure = Adventure::new(draft).expect("valid adventure");
        assert_eq!(adventure.effective_price(), 2295);
        assert_eq!(adventure.difficulty(), Difficulty::Easy);
        assert_eq!(adventure.country_code().as_str(), "JP");
    }

    #[rstest]
    fn rejects_sale_without_sale_price(mut draft: AdventureDraft) {
        draft.sale_price = None;
        assert_eq!(
            Adventure::new(draft),
            Err(AdventureValidationError::MissingSalePrice)
        );
    }

    #[rstest]
    #[case(2550)]
    #[case(3000)]
    fn rejects_sale_price_not_below_price(mut draft: AdventureDraft, #[case] sale: u32) {
        draft.sale_price = Some(sale);
        assert_eq!(
            Adventure::new(draft),
            Err(AdventureValidationError::SalePriceNotLower {
                price: 2550,
                sale_price: sale
            })
        );
    }

    #[rstest]
    fn ignores_sale_price_when_not_on_sale(mut draft: AdventureDraft) {
        draft.on_sale = false;
        draft.sale_price = Some(9999);
        let adventure = Adventure::new(draft).expect("valid adventure");
        assert_eq!(adventure.effective_price(), 2550);
    }

    #[rstest]
    fn rejects_unknown_labels(mut draft: AdventureDraft) {
        draft.difficulty = "Extreme".to_owned();
        assert!(matches!(
            Adventure::new(draft),
            Err(AdventureValidationError::UnknownDifficulty { .. })
        ));
    }

    #[rstest]
    fn rejects_zero_duration(mut draft: AdventureDraft) {
        draft.duration_days = 0;
        assert_eq!(
            Adventure::new(draft),
            Err(AdventureValidationError::ZeroDuration)
        );
    }

    #[rstest]
    #[case("sports activities", Typology::SportsActivities)]
    #[case("Vacation", Typology::Vacation)]
    fn typology_parses_case_insensitively(#[case] label: &str, #[case] expected: Typology) {
        assert_eq!(label.parse::<Typology>(), Ok(expected));
    }

    #[rstest]
    fn serialises_with_catalogue_field_names(draft: AdventureDraft) {
        let adventure = Adventure::new(draft).expect("valid adventure");
        let value = serde_json::to_value(&adventure).expect("serialise adventure");
        assert_eq!(value.get("country"), Some(&serde_json::json!("Japan")));
        assert_eq!(value.get("duration"), Some(&serde_json::json!(7)));
        assert_eq!(value.get("salePrice"), Some(&serde_json::json!(2295)));
        assert_eq!(value.get("typology"), Some(&serde_json::json!("Vacation")));
        assert_eq!(value.get("lat"), Some(&serde_json::json!(35.0116)));
    }
}
