use serde::{Deserialize, Serialize};

/// Position within a server-paginated collection.
///
/// Server responses carry a cursor, but it is rebuilt from `page`, `per_page`
/// and `total` so the flags are always consistent with the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

fn first_page() -> u32 {
    1
}

impl Pagination {
    pub fn empty(per_page: u32) -> Self {
        Self::from_counts(1, per_page, 0)
    }

    pub fn from_counts(page: u32, per_page: u32, total: u64) -> Self {
        let pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(u64::from(per_page)).min(u64::from(u32::MAX)) as u32
        };
        let page = if pages == 0 { 1 } else { page.clamp(1, pages) };

        Self {
            page,
            per_page,
            total,
            pages,
            has_next: pages > 0 && page < pages,
            has_prev: pages > 0 && page > 1,
        }
    }

    /// Recompute from what the server reported. Falls back to the server's own
    /// `pages` when it did not echo `per_page`.
    pub fn normalized(self) -> Self {
        if self.per_page > 0 {
            return Self::from_counts(self.page, self.per_page, self.total);
        }
        let page = if self.pages == 0 { 1 } else { self.page.clamp(1, self.pages) };
        Self {
            page,
            has_next: self.pages > 0 && page < self.pages,
            has_prev: self.pages > 0 && page > 1,
            ..self
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then_some(self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev.then_some(self.page - 1)
    }

    pub fn shows_controls(&self) -> bool {
        self.pages > 1
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let cursor = Pagination::from_counts(3, 20, 0);
        assert_eq!(cursor.pages, 0);
        assert_eq!(cursor.page, 1);
        assert!(!cursor.has_next);
        assert!(!cursor.has_prev);
        assert!(!cursor.shows_controls());
    }

    #[test]
    fn test_middle_page() {
        let cursor = Pagination::from_counts(2, 20, 45);
        assert_eq!(cursor.pages, 3);
        assert_eq!(cursor.next_page(), Some(3));
        assert_eq!(cursor.prev_page(), Some(1));
        assert_eq!(cursor.label(), "Page 2 of 3");
    }

    #[test]
    fn test_page_clamped_into_range() {
        let cursor = Pagination::from_counts(9, 20, 40);
        assert_eq!(cursor.page, 2);
        assert!(!cursor.has_next);
        assert!(cursor.has_prev);

        let cursor = Pagination::from_counts(0, 20, 40);
        assert_eq!(cursor.page, 1);
    }

    #[test]
    fn test_normalizes_inconsistent_server_flags() {
        let reported: Pagination = serde_json::from_str(
            r#"{"page":1,"per_page":20,"total":0,"pages":0,"has_next":true,"has_prev":true}"#,
        )
        .unwrap();
        let cursor = reported.normalized();
        assert_eq!(cursor, Pagination::empty(20));
    }

    #[test]
    fn test_normalizes_without_per_page() {
        let reported: Pagination = serde_json::from_str(r#"{"page":4,"total":61,"pages":4}"#).unwrap();
        let cursor = reported.normalized();
        assert_eq!(cursor.page, 4);
        assert!(cursor.has_prev);
        assert!(!cursor.has_next);
    }
}
