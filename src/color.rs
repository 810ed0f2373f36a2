use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An sRGB color in the `#RRGGBB` form the catalog uses. The leading `#` is
/// optional when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub [u8; 3]);

#[derive(Debug, Error)]
pub enum ColorParseError {
    #[error("expected a color in #RRGGBB form, got {input:?}")]
    Malformed { input: String },

    #[error("invalid hex digits in color {input:?}")]
    BadHex {
        input: String,
        source: std::num::ParseIntError,
    },
}

impl FromStr for Rgb8 {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.strip_prefix('#').unwrap_or(value);

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::Malformed {
                input: value.to_owned(),
            });
        }

        let mut channels = [0; 3];
        for (index, channel) in channels.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&digits[2 * index..2 * index + 2], 16).map_err(
                |source| ColorParseError::BadHex {
                    input: value.to_owned(),
                    source,
                },
            )?;
        }

        Ok(Rgb8(channels))
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(formatter, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
