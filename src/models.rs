use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const MISSING_FIELDS: &str = "title and genre are required";
pub const RATING_OUT_OF_RANGE: &str = "rating must be a number between 1 and 10";
pub const YEAR_NOT_A_NUMBER: &str = "year must be a whole number";

/// Body of `POST /films`. Fields stay loose so that validation, not
/// deserialization, decides which 400 message is returned.
#[derive(Debug, Deserialize)]
pub struct FilmRequest {
    pub title: Option<String>,
    pub year: Option<Value>,
    pub genre: Option<String>,
    pub rating: Option<Value>,
}

/// Body of `PUT /films`.
#[derive(Debug, Deserialize)]
pub struct UpdateFilmRequest {
    pub id: Option<i32>,
    #[serde(flatten)]
    pub film: FilmRequest,
}

/// The mutable columns of a film, after validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilmFields {
    pub title: String,
    pub year: Option<i32>,
    pub genre: String,
    pub rating: i32,
}

impl FilmRequest {
    pub fn validate(self) -> Result<FilmFields, AppError> {
        let (Some(title), Some(genre)) = (non_empty(self.title), non_empty(self.genre)) else {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        };

        let rating = self
            .rating
            .as_ref()
            .and_then(whole_number)
            .filter(|r| (1..=10).contains(r))
            .ok_or_else(|| AppError::Validation(RATING_OUT_OF_RANGE.to_string()))?;

        let year = match self.year {
            None | Some(Value::Null) => None,
            Some(v) => match loose_year(&v) {
                Some(year) => Some(year),
                None => return Err(AppError::Validation(YEAR_NOT_A_NUMBER.to_string())),
            },
        };

        Ok(FilmFields { title, year, genre, rating: rating as i32 })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

// Year is stored in an integer column, so "1995" is taken as 1995.
fn loose_year(v: &Value) -> Option<i32> {
    let n = match v {
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        other => whole_number(other)?,
    };
    i32::try_from(n).ok()
}

// Strings such as "7" are not numbers; 7.0 is.
fn whole_number(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBody {
    pub message: String,
    pub new_id: i32,
}
