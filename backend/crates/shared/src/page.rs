//! Pagination metadata
//!
//! Shared page envelope for list endpoints.

use serde::Serialize;

/// ページング応答の共通 DTO
///
/// 一覧系エンドポイントで共通して使うページ情報付きの応答です。
///
/// ## Examples
/// ```rust
/// use kernel::page::PageResponse;
///
/// let page = PageResponse::new(vec![1, 2, 3], 0, 10, 3);
/// assert_eq!(page.page_info.total_pages, 1);
/// assert!(page.page_info.first && page.page_info.last);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_info: PageInfo,
}

/// ページング メタ情報
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 現在のページ番号（0 始まり）
    pub page: u32,
    /// ページあたりの件数
    pub size: u32,
    /// 全体の件数
    pub total_elements: u64,
    /// 全体のページ数（ceil(total_elements / size)）
    pub total_pages: u32,
    /// 先頭ページかどうか
    pub first: bool,
    /// 最終ページかどうか
    pub last: bool,
}

impl PageInfo {
    /// ページ情報を計算して作成
    ///
    /// `size` must be > 0 (validated at the request boundary).
    pub fn new(page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(size as u64) as u32
        };

        Self {
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: total_pages == 0 || page + 1 >= total_pages,
        }
    }
}

impl<T> PageResponse<T> {
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        Self {
            content,
            page_info: PageInfo::new(page, size, total_elements),
        }
    }

    /// 内容を変換しつつページ情報を保持
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_ceiling() {
        assert_eq!(PageInfo::new(0, 10, 0).total_pages, 0);
        assert_eq!(PageInfo::new(0, 10, 1).total_pages, 1);
        assert_eq!(PageInfo::new(0, 10, 10).total_pages, 1);
        assert_eq!(PageInfo::new(0, 10, 11).total_pages, 2);
        assert_eq!(PageInfo::new(0, 3, 7).total_pages, 3);
    }

    #[test]
    fn test_first_last_flags() {
        let info = PageInfo::new(0, 10, 25);
        assert!(info.first);
        assert!(!info.last);

        let info = PageInfo::new(2, 10, 25);
        assert!(!info.first);
        assert!(info.last);

        // Empty result set: the only page is both first and last
        let info = PageInfo::new(0, 10, 0);
        assert!(info.first);
        assert!(info.last);
    }

    #[test]
    fn test_map_keeps_page_info() {
        let page = PageResponse::new(vec![1, 2], 1, 2, 6);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1", "2"]);
        assert_eq!(mapped.page_info.total_pages, 3);
        assert!(!mapped.page_info.first);
    }
}
