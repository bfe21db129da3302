//! Fixed set of event kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of event, used for display and for backend filtering.
///
/// On the wire a category is its position in [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Conference,
    Meetup,
    Concert,
    Exhibition,
    Party,
    Sport,
    Education,
    Competition,
    Other,
}

impl Category {
    /// All categories in wire order.
    pub const ALL: [Category; 9] = [
        Category::Conference,
        Category::Meetup,
        Category::Concert,
        Category::Exhibition,
        Category::Party,
        Category::Sport,
        Category::Education,
        Category::Competition,
        Category::Other,
    ];

    /// Map a wire index to a category. Anything unknown is `Other`.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => Category::Conference,
            1 => Category::Meetup,
            2 => Category::Concert,
            3 => Category::Exhibition,
            4 => Category::Party,
            5 => Category::Sport,
            6 => Category::Education,
            7 => Category::Competition,
            _ => Category::Other,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Category::Conference => 0,
            Category::Meetup => 1,
            Category::Concert => 2,
            Category::Exhibition => 3,
            Category::Party => 4,
            Category::Sport => 5,
            Category::Education => 6,
            Category::Competition => 7,
            Category::Other => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Conference => "Conference",
            Category::Meetup => "Meetup",
            Category::Concert => "Concert",
            Category::Exhibition => "Exhibition",
            Category::Party => "Party",
            Category::Sport => "Sport",
            Category::Education => "Education",
            Category::Competition => "Competition",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}
