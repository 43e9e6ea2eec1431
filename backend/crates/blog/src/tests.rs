//! Unit tests for the blog crate
//!
//! The search composer is asserted through the generated SQL text; no
//! database is needed.

mod search_sql_tests {
    use crate::domain::search::*;
    use crate::infra::search_sql::{build_count_query, build_search_query};

    fn query() -> PostSearchQuery {
        PostSearchQuery::default()
    }

    #[test]
    fn test_default_query_selects_joined_columns() {
        let qb = build_search_query(&query());
        let sql = qb.sql();

        assert!(sql.starts_with("SELECT p.post_id, p.title, p.content"));
        assert!(sql.contains("JOIN blogs b ON b.blog_id = p.blog_id"));
        assert!(sql.contains("JOIN users u ON u.user_id = b.user_id"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_default_order_is_created_at_desc_with_tie_break() {
        let qb = build_search_query(&query());
        assert!(
            qb.sql()
                .contains("ORDER BY p.created_at DESC, p.post_id DESC")
        );
    }

    #[test]
    fn test_paging_is_bound_after_order() {
        let qb = build_search_query(&query());
        assert!(qb.sql().ends_with("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_blog_filter() {
        let q = PostSearchQuery {
            blog_id: Some(42),
            ..query()
        };
        let qb = build_search_query(&q);
        assert!(qb.sql().contains("WHERE p.blog_id = $1"));
    }

    #[test]
    fn test_keyword_targets_the_selected_column() {
        for (field, column) in [
            (SearchField::Title, "p.title ILIKE $1"),
            (SearchField::Blog, "b.title ILIKE $1"),
            (SearchField::Nickname, "u.nickname ILIKE $1"),
        ] {
            let q = PostSearchQuery {
                keyword: Some("rust".to_string()),
                search: field,
                ..query()
            };
            let qb = build_search_query(&q);
            assert!(qb.sql().contains(column), "missing `{}`", column);
        }
    }

    #[test]
    fn test_blank_keyword_adds_no_predicate() {
        let q = PostSearchQuery {
            keyword: Some("  ".to_string()),
            ..query()
        };
        let qb = build_search_query(&q);
        assert!(!qb.sql().contains("ILIKE"));
    }

    #[test]
    fn test_and_tags_emit_one_exists_per_tag() {
        let q = PostSearchQuery {
            tags: vec!["rust".into(), "axum".into(), "sqlx".into()],
            tag_mode: TagMode::And,
            ..query()
        };
        let qb = build_search_query(&q);
        let sql = qb.sql();

        assert_eq!(sql.matches("EXISTS (SELECT 1 FROM tag_maps tm").count(), 3);
        assert!(sql.contains("t.title = $1"));
        assert!(sql.contains("t.title = $2"));
        assert!(sql.contains("t.title = $3"));
        assert!(!sql.contains("ANY("));
    }

    #[test]
    fn test_or_tags_emit_single_exists_with_any() {
        let q = PostSearchQuery {
            tags: vec!["rust".into(), "axum".into()],
            tag_mode: TagMode::Or,
            ..query()
        };
        let qb = build_search_query(&q);
        let sql = qb.sql();

        assert_eq!(sql.matches("EXISTS (SELECT 1 FROM tag_maps tm").count(), 1);
        assert!(sql.contains("t.title = ANY($1)"));
    }

    #[test]
    fn test_empty_tags_add_no_predicate() {
        let q = PostSearchQuery {
            tags: Vec::new(),
            tag_mode: TagMode::And,
            ..query()
        };
        let qb = build_search_query(&q);
        assert!(!qb.sql().contains("EXISTS"));
    }

    #[test]
    fn test_all_filters_are_conjunctive() {
        let q = PostSearchQuery {
            blog_id: Some(7),
            keyword: Some("tokio".to_string()),
            search: SearchField::Nickname,
            tags: vec!["async".into()],
            tag_mode: TagMode::Or,
            ..query()
        };
        let qb = build_search_query(&q);
        let sql = qb.sql();

        let blog_pos = sql.find("p.blog_id = $1").expect("blog filter");
        let keyword_pos = sql.find("u.nickname ILIKE $2").expect("keyword filter");
        let tag_pos = sql.find("ANY($3)").expect("tag filter");

        assert!(blog_pos < keyword_pos && keyword_pos < tag_pos);
        assert_eq!(sql.matches(" AND ").count(), 3);
    }

    #[test]
    fn test_sort_field_variants() {
        for (sort, column) in [
            (SortField::Like, "ORDER BY p.like_count"),
            (SortField::View, "ORDER BY p.view_count"),
            (SortField::CreatedAt, "ORDER BY p.created_at"),
            (SortField::UpdatedAt, "ORDER BY p.updated_at"),
        ] {
            let q = PostSearchQuery { sort, ..query() };
            let qb = build_search_query(&q);
            assert!(qb.sql().contains(column), "missing `{}`", column);
        }
    }

    #[test]
    fn test_ascending_order_keeps_descending_tie_break() {
        let q = PostSearchQuery {
            sort: SortField::View,
            order: SortOrder::Asc,
            ..query()
        };
        let qb = build_search_query(&q);
        assert!(qb.sql().contains("ORDER BY p.view_count ASC, p.post_id DESC"));
    }

    #[test]
    fn test_count_query_shares_predicate_without_paging() {
        let q = PostSearchQuery {
            blog_id: Some(7),
            keyword: Some("tokio".to_string()),
            tags: vec!["async".into()],
            ..query()
        };
        let qb = build_count_query(&q);
        let sql = qb.sql();

        assert!(sql.starts_with("SELECT COUNT(*) FROM posts p"));
        assert!(sql.contains("p.blog_id = $1"));
        assert!(sql.contains("p.title ILIKE $2"));
        assert!(sql.contains("ANY($3)"));
        assert!(!sql.contains("ORDER BY"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OFFSET"));
    }
}

mod params_tests {
    use crate::domain::search::{SearchField, SortField, SortOrder, TagMode};
    use crate::presentation::dto::PostListParams;

    #[test]
    fn test_defaults_match_the_documented_ones() {
        let params = PostListParams::default();
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 10);
        assert_eq!(params.search, SearchField::Title);
        assert_eq!(params.tag_mode, TagMode::Or);
        assert_eq!(params.sort, SortField::CreatedAt);
        assert_eq!(params.order, SortOrder::Desc);
    }

    #[test]
    fn test_into_query_sanitizes_tags() {
        let params = PostListParams {
            tag: vec![" rust ".into(), "".into(), "rust".into(), "axum".into()],
            ..Default::default()
        };
        let query = params.into_query();
        assert_eq!(query.tags, vec!["rust", "axum"]);
    }
}

mod dto_tests {
    use chrono::Utc;
    use kernel::id::{CommentId, PostId, UserId};

    use crate::domain::entity::{Author, Comment, CommentThread};
    use crate::presentation::dto::{CommentResponse, CommentThreadResponse};

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            comment_id: CommentId::from_i64(id),
            post_id: PostId::from_i64(1),
            parent_comment_id: parent.map(CommentId::from_i64),
            author: Author {
                user_id: UserId::from_i64(9),
                nickname: "writer".to_string(),
            },
            content: "hello".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_comment_response_is_camel_case() {
        let json = serde_json::to_value(CommentResponse::from(comment(3, None))).unwrap();
        assert_eq!(json["commentId"], 3);
        assert_eq!(json["author"]["userId"], 9);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_thread_response_flattens_the_parent() {
        let thread = CommentThread {
            comment: comment(1, None),
            replies: vec![comment(2, Some(1))],
        };
        let json = serde_json::to_value(CommentThreadResponse::from(thread)).unwrap();

        assert_eq!(json["commentId"], 1);
        assert_eq!(json["replies"][0]["commentId"], 2);
    }
}

mod cascade_tests {
    use crate::infra::postgres::{ACCOUNT_CASCADE, CascadeBind};

    fn position(fragment: &str) -> usize {
        ACCOUNT_CASCADE
            .iter()
            .position(|(sql, _)| sql.contains(fragment))
            .unwrap_or_else(|| panic!("no cascade step contains `{}`", fragment))
    }

    // A reply by another user under one of the user's comments must be
    // gone before the comment itself, or its parent_comment_id reference
    // fails the whole transaction
    #[test]
    fn test_replies_under_the_users_comments_go_before_the_comments() {
        let replies = position("parent_comment_id IN");
        let own_comments = ACCOUNT_CASCADE
            .iter()
            .position(|(sql, _)| *sql == "DELETE FROM comments WHERE user_id = $1")
            .unwrap();

        assert!(replies < own_comments);
    }

    #[test]
    fn test_rows_referencing_the_posts_go_before_the_posts() {
        let posts = position("DELETE FROM posts WHERE blog_id");

        assert!(position("DELETE FROM comments WHERE post_id IN") < posts);
        assert!(position("DELETE FROM likes WHERE post_id IN") < posts);
        assert!(position("DELETE FROM tag_maps WHERE post_id IN") < posts);
    }

    #[test]
    fn test_posts_then_blog_then_sessions_then_the_user_last() {
        let posts = position("DELETE FROM posts WHERE blog_id");
        let blogs = position("DELETE FROM blogs");
        let sessions = position("DELETE FROM sessions");
        let users = position("DELETE FROM users");

        assert!(posts < blogs && blogs < sessions && sessions < users);
        assert_eq!(users, ACCOUNT_CASCADE.len() - 1);
    }

    #[test]
    fn test_every_step_binds_exactly_one_parameter() {
        for (sql, _) in ACCOUNT_CASCADE {
            assert_eq!(sql.matches("$1").count(), 1, "{}", sql);
        }
    }

    #[test]
    fn test_bind_kind_matches_the_predicate_column() {
        for (sql, bind) in ACCOUNT_CASCADE {
            let expected = if sql.contains("blog_id = $1") {
                CascadeBind::Blog
            } else {
                CascadeBind::User
            };
            assert_eq!(*bind, expected, "{}", sql);
        }
    }
}
