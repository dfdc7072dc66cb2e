//! Position API response parsing.

use serde::Deserialize;

use super::error::FetchError;
use crate::coord::GeoPosition;

/// Response body of the position API.
///
/// Only the coordinates are needed; the API also returns altitude, velocity,
/// visibility and more, which are ignored.
#[derive(Debug, Deserialize)]
struct PositionBody {
    latitude: Degrees,
    longitude: Degrees,
}

/// A coordinate sent either as a JSON number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn into_degrees(self, field: &str) -> Result<f64, FetchError> {
        let value = match self {
            Degrees::Number(value) => value,
            Degrees::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                FetchError::MalformedResponse(format!("{} is not numeric: {:?}", field, text))
            })?,
        };

        if !value.is_finite() {
            return Err(FetchError::MalformedResponse(format!(
                "{} is not finite",
                field
            )));
        }

        Ok(value)
    }
}

/// Parses a position API body into a [`GeoPosition`].
pub fn parse_position(body: &[u8]) -> Result<GeoPosition, FetchError> {
    let parsed: PositionBody = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    Ok(GeoPosition {
        latitude: parsed.latitude.into_degrees("latitude")?,
        longitude: parsed.longitude.into_degrees("longitude")?,
    })
}
