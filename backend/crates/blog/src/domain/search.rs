//! Post Search Query Model
//!
//! The parameter object for the post listing. Every predicate is
//! conjunctive: blog scope AND keyword AND tag condition. Unknown enum
//! values are rejected by serde at the HTTP boundary.

use serde::Deserialize;

/// Which column the keyword matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchField {
    /// Post title
    #[default]
    Title,
    /// Blog title
    Blog,
    /// Author nickname
    Nickname,
}

/// How multiple tag filters combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagMode {
    /// Post must carry every listed tag
    And,
    /// Post must carry at least one listed tag
    #[default]
    Or,
}

/// Sort key for the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortField {
    Like,
    View,
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Post search parameters, already sanitized
#[derive(Debug, Clone)]
pub struct PostSearchQuery {
    pub page: u32,
    pub size: u32,
    pub blog_id: Option<i64>,
    pub keyword: Option<String>,
    pub search: SearchField,
    pub tags: Vec<String>,
    pub tag_mode: TagMode,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for PostSearchQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            blog_id: None,
            keyword: None,
            search: SearchField::default(),
            tags: Vec::new(),
            tag_mode: TagMode::default(),
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl PostSearchQuery {
    /// Row offset for the requested page
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    /// A keyword that is None or blank applies no filter
    pub fn effective_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Trim, drop blanks, dedup preserving first-seen order
pub fn sanitize_tags(tags: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.iter().any(|t| t == trimmed) {
            continue;
        }
        seen.push(trimmed.to_string());
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = PostSearchQuery::default();
        assert_eq!(q.page, 0);
        assert_eq!(q.size, 10);
        assert_eq!(q.search, SearchField::Title);
        assert_eq!(q.tag_mode, TagMode::Or);
        assert_eq!(q.sort, SortField::CreatedAt);
        assert_eq!(q.order, SortOrder::Desc);
    }

    #[test]
    fn test_offset_is_page_times_size() {
        let q = PostSearchQuery {
            page: 3,
            size: 20,
            ..Default::default()
        };
        assert_eq!(q.offset(), 60);
        assert_eq!(q.limit(), 20);
    }

    #[test]
    fn test_sanitize_tags_trims_and_drops_blanks() {
        let tags = vec![
            " rust ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "axum".to_string(),
        ];
        assert_eq!(sanitize_tags(&tags), vec!["rust", "axum"]);
    }

    #[test]
    fn test_sanitize_tags_dedup_preserves_order() {
        let tags = vec![
            "b".to_string(),
            "a".to_string(),
            " b".to_string(),
            "a ".to_string(),
        ];
        assert_eq!(sanitize_tags(&tags), vec!["b", "a"]);
    }

    #[test]
    fn test_blank_keyword_is_no_filter() {
        let q = PostSearchQuery {
            keyword: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(q.effective_keyword(), None);

        let q = PostSearchQuery {
            keyword: Some(" rust ".to_string()),
            ..Default::default()
        };
        assert_eq!(q.effective_keyword(), Some("rust"));
    }

    #[test]
    fn test_enum_deserialization_screaming_snake() {
        let field: SearchField = serde_json::from_str("\"NICKNAME\"").unwrap();
        assert_eq!(field, SearchField::Nickname);

        let sort: SortField = serde_json::from_str("\"CREATED_AT\"").unwrap();
        assert_eq!(sort, SortField::CreatedAt);

        let mode: Result<TagMode, _> = serde_json::from_str("\"XOR\"");
        assert!(mode.is_err());
    }
}
