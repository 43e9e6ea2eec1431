//! Post Search SQL Composition
//!
//! Builds the listing and count statements for `PostSearchQuery` with
//! `sqlx::QueryBuilder`. Both statements share the same predicate; the
//! count query carries no ordering or paging.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::search::{PostSearchQuery, SearchField, SortField, SortOrder, TagMode};

const SELECT_COLUMNS: &str = "SELECT p.post_id, p.title, p.content, \
     u.user_id, u.nickname, p.view_count, p.like_count, p.created_at, p.updated_at ";

const FROM_CLAUSE: &str = "FROM posts p \
     JOIN blogs b ON b.blog_id = p.blog_id \
     JOIN users u ON u.user_id = b.user_id";

const TAG_EXISTS_PREFIX: &str = "EXISTS (SELECT 1 FROM tag_maps tm \
     JOIN tags t ON t.tag_id = tm.tag_id \
     WHERE tm.post_id = p.post_id AND t.title = ";

/// Listing statement: filters, ordering, paging
pub fn build_search_query(query: &PostSearchQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_COLUMNS);
    qb.push(FROM_CLAUSE);

    push_filters(&mut qb, query);
    push_order(&mut qb, query);

    qb.push(" LIMIT ");
    qb.push_bind(query.limit());
    qb.push(" OFFSET ");
    qb.push_bind(query.offset());

    qb
}

/// Count statement: same predicate, no ordering or paging
pub fn build_count_query(query: &PostSearchQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) ");
    qb.push(FROM_CLAUSE);

    push_filters(&mut qb, query);

    qb
}

/// Append the conjunctive WHERE clause. Absent parameters contribute no
/// predicate at all.
fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, query: &PostSearchQuery) {
    let mut has_where = false;

    if let Some(blog_id) = query.blog_id {
        push_and(qb, &mut has_where);
        qb.push("p.blog_id = ");
        qb.push_bind(blog_id);
    }

    if let Some(keyword) = query.effective_keyword() {
        let column = match query.search {
            SearchField::Title => "p.title",
            SearchField::Blog => "b.title",
            SearchField::Nickname => "u.nickname",
        };
        push_and(qb, &mut has_where);
        qb.push(column);
        qb.push(" ILIKE ");
        qb.push_bind(format!("%{}%", escape_like(keyword)));
    }

    if !query.tags.is_empty() {
        match query.tag_mode {
            TagMode::And => {
                // One EXISTS per tag: the post must carry all of them
                for tag in &query.tags {
                    push_and(qb, &mut has_where);
                    qb.push(TAG_EXISTS_PREFIX);
                    qb.push_bind(tag.clone());
                    qb.push(")");
                }
            }
            TagMode::Or => {
                push_and(qb, &mut has_where);
                qb.push(TAG_EXISTS_PREFIX);
                qb.push("ANY(");
                qb.push_bind(query.tags.clone());
                qb.push("))");
            }
        }
    }
}

/// Chosen sort key, then post id descending as the stable tie-break
fn push_order(qb: &mut QueryBuilder<'static, Postgres>, query: &PostSearchQuery) {
    let column = match query.sort {
        SortField::Like => "p.like_count",
        SortField::View => "p.view_count",
        SortField::CreatedAt => "p.created_at",
        SortField::UpdatedAt => "p.updated_at",
    };
    let direction = match query.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    qb.push(" ORDER BY ");
    qb.push(column);
    qb.push(" ");
    qb.push(direction);
    qb.push(", p.post_id DESC");
}

fn push_and(qb: &mut QueryBuilder<'static, Postgres>, has_where: &mut bool) {
    if *has_where {
        qb.push(" AND ");
    } else {
        qb.push(" WHERE ");
        *has_where = true;
    }
}

/// Escape LIKE metacharacters so the keyword matches literally
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_no_filters_no_where() {
        let qb = build_search_query(&PostSearchQuery::default());
        let sql = qb.sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY p.created_at DESC, p.post_id DESC"));
        assert!(sql.ends_with("LIMIT $1 OFFSET $2"));
    }
}
