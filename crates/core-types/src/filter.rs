use crate::structs::SchoolRecord;

/// The three independent criteria of the listing page.
///
/// Every non-empty criterion must hold (logical AND), comparisons ignore case,
/// and an empty criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolFilter {
    /// Substring of the school name.
    pub search: String,
    /// Exact city.
    pub city: String,
    /// Substring of the board label.
    pub board: String,
}

impl SchoolFilter {
    pub fn new(search: impl Into<String>, city: impl Into<String>, board: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            city: city.into(),
            board: board.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        [&self.search, &self.city, &self.board]
            .iter()
            .all(|criterion| criterion.trim().is_empty())
    }

    pub fn matches(&self, school: &SchoolRecord) -> bool {
        let search = self.search.trim().to_lowercase();
        let city = self.city.trim().to_lowercase();
        let board = self.board.trim().to_lowercase();

        (search.is_empty() || school.name.to_lowercase().contains(&search))
            && (city.is_empty() || school.city.to_lowercase() == city)
            && (board.is_empty() || school.board.to_lowercase().contains(&board))
    }

    /// Returns the matching records in source order.
    pub fn apply<'a>(&self, schools: &'a [SchoolRecord]) -> Vec<&'a SchoolRecord> {
        schools.iter().filter(|school| self.matches(school)).collect()
    }
}
