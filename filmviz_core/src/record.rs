// Copyright 2025 the filmviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The film record schema.
//!
//! The data source hands over loosely-shaped objects where any numeric field may be missing.
//! [`Record`] makes every such field an explicit `Option`, and [`Field`] / [`CategoryField`]
//! are the only way to read them generically.

extern crate alloc;

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;

use core::fmt;
use core::str::FromStr;

use crate::DataError;

/// A numeric field of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Average member rating.
    Rating,
    /// Rating recomputed from the rating histogram.
    ClassicRating,
    /// Number of written reviews.
    ReviewCount,
    /// Number of ratings.
    RatingCount,
    /// Number of members who watched the film.
    WatchCount,
    /// Number of lists the film appears in.
    ListAppearanceCount,
    /// Number of likes.
    LikeCount,
    /// Runtime in minutes.
    Runtime,
    /// Release year.
    Year,
    /// Position of the film in its source list.
    Rank,
}

impl Field {
    /// Every field, in schema order.
    pub const ALL: [Self; 10] = [
        Self::Rating,
        Self::ClassicRating,
        Self::ReviewCount,
        Self::RatingCount,
        Self::WatchCount,
        Self::ListAppearanceCount,
        Self::LikeCount,
        Self::Runtime,
        Self::Year,
        Self::Rank,
    ];

    /// The wire name of the field (`snake_case`, as the data source spells it).
    pub fn name(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::ClassicRating => "classic_rating",
            Self::ReviewCount => "review_count",
            Self::RatingCount => "rating_count",
            Self::WatchCount => "watch_count",
            Self::ListAppearanceCount => "list_appearance_count",
            Self::LikeCount => "like_count",
            Self::Runtime => "runtime",
            Self::Year => "year",
            Self::Rank => "rank",
        }
    }

    /// A human-readable label, used for axis titles and tooltip rows.
    pub fn label(self) -> &'static str {
        match self {
            Self::Rating => "Rating",
            Self::ClassicRating => "Classic Rating",
            Self::ReviewCount => "Review Count",
            Self::RatingCount => "Rating Count",
            Self::WatchCount => "Watch Count",
            Self::ListAppearanceCount => "List Appearances",
            Self::LikeCount => "Like Count",
            Self::Runtime => "Runtime",
            Self::Year => "Year",
            Self::Rank => "Rank",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DataError;

    /// Accepts both the `snake_case` wire name and its `camelCase` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "rating" => Self::Rating,
            "classic_rating" | "classicRating" => Self::ClassicRating,
            "review_count" | "reviewCount" => Self::ReviewCount,
            "rating_count" | "ratingCount" => Self::RatingCount,
            "watch_count" | "watchCount" => Self::WatchCount,
            "list_appearance_count" | "listAppearanceCount" => Self::ListAppearanceCount,
            "like_count" | "likeCount" => Self::LikeCount,
            "runtime" => Self::Runtime,
            "year" => Self::Year,
            "rank" => Self::Rank,
            other => return Err(DataError::InvalidField(other.to_owned())),
        };
        Ok(field)
    }
}

/// A discrete field of a [`Record`], used as a categorical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryField {
    /// The film identifier.
    Id,
    /// The display title.
    Title,
    /// The URL slug.
    Slug,
    /// The release year, as text.
    Year,
}

impl FromStr for CategoryField {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "film_id" | "filmId" | "id" => Self::Id,
            "film_title" | "filmTitle" | "title" => Self::Title,
            "film_slug" | "filmSlug" | "slug" => Self::Slug,
            "year" => Self::Year,
            other => return Err(DataError::InvalidField(other.to_owned())),
        };
        Ok(field)
    }
}

/// One film, as delivered by the data source.
///
/// Every numeric field is optional. Consumers must treat `None` as "no observation" and never
/// as zero.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Record {
    /// Film identifier. Not required to be unique within a list.
    #[cfg_attr(feature = "serde", serde(rename = "film_id", alias = "filmId"))]
    pub id: String,
    /// URL slug.
    #[cfg_attr(feature = "serde", serde(rename = "film_slug", alias = "filmSlug"))]
    pub slug: Option<String>,
    /// Display title.
    #[cfg_attr(feature = "serde", serde(rename = "film_title", alias = "filmTitle"))]
    pub title: Option<String>,
    /// Release year.
    pub year: Option<i32>,
    /// Position in the source list (1-based).
    pub rank: Option<u32>,
    /// Average member rating.
    pub rating: Option<f64>,
    /// Rating recomputed from the rating histogram.
    #[cfg_attr(feature = "serde", serde(alias = "classicRating"))]
    pub classic_rating: Option<f64>,
    /// Number of written reviews.
    #[cfg_attr(feature = "serde", serde(alias = "reviewCount"))]
    pub review_count: Option<f64>,
    /// Number of ratings.
    #[cfg_attr(feature = "serde", serde(alias = "ratingCount"))]
    pub rating_count: Option<f64>,
    /// Number of members who watched the film.
    #[cfg_attr(feature = "serde", serde(alias = "watchCount"))]
    pub watch_count: Option<f64>,
    /// Number of lists the film appears in.
    #[cfg_attr(feature = "serde", serde(alias = "listAppearanceCount"))]
    pub list_appearance_count: Option<f64>,
    /// Number of likes.
    #[cfg_attr(feature = "serde", serde(alias = "likeCount"))]
    pub like_count: Option<f64>,
    /// Runtime in minutes.
    pub runtime: Option<f64>,
}

impl Record {
    /// Creates a record with the given id and no other data.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns the value of `field`, or `None` when it is absent or not finite.
    pub fn value(&self, field: Field) -> Option<f64> {
        let v = match field {
            Field::Rating => self.rating,
            Field::ClassicRating => self.classic_rating,
            Field::ReviewCount => self.review_count,
            Field::RatingCount => self.rating_count,
            Field::WatchCount => self.watch_count,
            Field::ListAppearanceCount => self.list_appearance_count,
            Field::LikeCount => self.like_count,
            Field::Runtime => self.runtime,
            Field::Year => self.year.map(f64::from),
            Field::Rank => self.rank.map(f64::from),
        };
        v.filter(|v| v.is_finite())
    }

    /// Returns the text of a categorical field, or `None` when it is absent.
    pub fn category(&self, field: CategoryField) -> Option<String> {
        match field {
            CategoryField::Id => Some(self.id.clone()),
            CategoryField::Title => self.title.clone(),
            CategoryField::Slug => self.slug.clone(),
            CategoryField::Year => self.year.map(|y| format!("{y}")),
        }
    }

    /// Sets a numeric field.
    ///
    /// `Year` and `Rank` are integral; fractional values are truncated toward zero and values
    /// outside their range clear the field.
    pub fn set(&mut self, field: Field, value: Option<f64>) {
        match field {
            Field::Rating => self.rating = value,
            Field::ClassicRating => self.classic_rating = value,
            Field::ReviewCount => self.review_count = value,
            Field::RatingCount => self.rating_count = value,
            Field::WatchCount => self.watch_count = value,
            Field::ListAppearanceCount => self.list_appearance_count = value,
            Field::LikeCount => self.like_count = value,
            Field::Runtime => self.runtime = value,
            Field::Year => {
                self.year = value
                    .filter(|v| {
                        v.is_finite() && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX)
                    })
                    .map(|v| {
                        #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
                        {
                            v as i32
                        }
                    });
            }
            Field::Rank => {
                self.rank = value
                    .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
                    .map(|v| {
                        #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
                        {
                            v as u32
                        }
                    });
            }
        }
    }

    /// Builder form of [`Record::set`] for a present value.
    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Sets the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the URL slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}
