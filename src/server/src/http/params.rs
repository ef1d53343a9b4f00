use spots::SearchArea;

use super::error::ApiError;

/// Raw `/spots` query string. Numbers are kept as text so that a bad value
/// is reported per parameter instead of as a generic extractor rejection.
#[derive(Debug, Default)]
pub struct SpotParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<String>,
    pub area_type: Option<String>,
}

impl SpotParams {
    /// Collects decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "latitude" => &mut params.latitude,
                "longitude" => &mut params.longitude,
                "radius" => &mut params.radius,
                "type" => &mut params.area_type,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Validates latitude, longitude and radius, in that order.
    pub fn search_area(&self) -> Result<SearchArea, ApiError> {
        let latitude = parse_number("latitude", self.latitude.as_deref())?;
        let longitude = parse_number("longitude", self.longitude.as_deref())?;
        let radius = parse_number("radius", self.radius.as_deref())?;

        Ok(SearchArea::new(longitude, latitude, radius))
    }

    pub fn area_tag(&self) -> &str {
        self.area_type.as_deref().unwrap_or_default()
    }
}

fn parse_number(name: &'static str, raw: Option<&str>) -> Result<f64, ApiError> {
    raw.and_then(|raw| raw.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or(ApiError::InvalidParameter(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(latitude: &str, longitude: &str, radius: &str) -> SpotParams {
        SpotParams {
            latitude: Some(latitude.to_owned()),
            longitude: Some(longitude.to_owned()),
            radius: Some(radius.to_owned()),
            area_type: None,
        }
    }

    #[test]
    fn accepts_float_notations() {
        let area = params("40", "-73.5", "1e3").search_area().unwrap();
        assert_eq!(area, SearchArea::new(-73.5, 40.0, 1000.0));
    }

    #[test]
    fn rejects_non_finite_values() {
        for bad in ["NaN", "inf", "-infinity"] {
            assert_eq!(
                params("40", "-73", bad).search_area(),
                Err(ApiError::InvalidParameter("radius"))
            );
        }
    }

    #[test]
    fn reports_first_invalid_parameter() {
        assert_eq!(
            SpotParams::default().search_area(),
            Err(ApiError::InvalidParameter("latitude"))
        );
        assert_eq!(
            params("40", "west", "").search_area(),
            Err(ApiError::InvalidParameter("longitude"))
        );
    }

    fn pairs(query: &[(&str, &str)]) -> SpotParams {
        SpotParams::from_pairs(
            query
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned())),
        )
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let params = pairs(&[
            ("type", "circle"),
            ("latitude", "40"),
            ("type", "square"),
            ("latitude", "north"),
            ("longitude", "-73"),
            ("radius", "5"),
        ]);
        assert_eq!(params.area_tag(), "circle");
        assert_eq!(params.search_area(), Ok(SearchArea::new(-73.0, 40.0, 5.0)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let params = pairs(&[("zoom", "3"), ("latitude", "1")]);
        assert_eq!(params.latitude.as_deref(), Some("1"));
        assert_eq!(params.area_tag(), "");
    }

    #[test]
    fn missing_type_is_empty_tag() {
        assert_eq!(SpotParams::default().area_tag(), "");
    }
}
