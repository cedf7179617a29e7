//! Pagination DTOs

use serde::{Deserialize, Serialize};

/// Paging information attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(total: u64, page: u32, page_size: u32) -> Self {
        Self {
            total,
            page,
            page_size,
            total_pages: Self::pages_for(total, page_size),
        }
    }

    /// Forces `total_pages == ceil(total / page_size)` when `page_size > 0`
    ///
    /// With a zero page size the backend value is kept as is.
    pub fn normalized(self) -> Self {
        if self.page_size == 0 {
            return self;
        }
        Self {
            total_pages: Self::pages_for(self.total, self.page_size),
            ..self
        }
    }

    fn pages_for(total: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        let pages = total.div_ceil(u64::from(page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// A page of items plus optional paging metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, meta: Option<PaginationMeta>) -> Self {
        Self {
            items,
            meta: meta.map(PaginationMeta::normalized),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Paginated<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Accepted wire shapes for list endpoints
///
/// Either a bare JSON array or `{ "data": [...], "meta": {...} }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped {
        data: Vec<T>,
        #[serde(default)]
        meta: Option<PaginationMeta>,
    },
}

impl<T> From<ListEnvelope<T>> for Paginated<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        match envelope {
            ListEnvelope::Bare(items) => Paginated::new(items, None),
            ListEnvelope::Wrapped { data, meta } => Paginated::new(data, meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PaginationMeta::new(0, 1, 20).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 1, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(20, 1, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(21, 1, 20).total_pages, 2);
        assert_eq!(PaginationMeta::new(101, 3, 10).total_pages, 11);
    }

    #[test]
    fn test_normalized_fixes_backend_value() {
        let meta = PaginationMeta {
            total: 45,
            page: 1,
            page_size: 10,
            total_pages: 4,
        };
        assert_eq!(meta.normalized().total_pages, 5);
    }

    #[test]
    fn test_normalized_keeps_zero_page_size() {
        let meta = PaginationMeta {
            total: 45,
            page: 1,
            page_size: 0,
            total_pages: 7,
        };
        assert_eq!(meta.normalized(), meta);
    }

    #[test]
    fn test_envelope_accepts_bare_array() {
        let envelope: ListEnvelope<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        let page = Paginated::from(envelope);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.meta.is_none());
    }

    #[test]
    fn test_envelope_accepts_empty_array() {
        let envelope: ListEnvelope<u32> = serde_json::from_str("[]").unwrap();
        assert!(Paginated::from(envelope).is_empty());
    }

    #[test]
    fn test_envelope_accepts_wrapped_with_meta() {
        let json = r#"{"data": [1, 2], "meta": {"total": 12, "page": 2, "pageSize": 5, "totalPages": 9}}"#;
        let page = Paginated::from(serde_json::from_str::<ListEnvelope<u32>>(json).unwrap());
        assert_eq!(page.len(), 2);
        assert_eq!(page.meta.unwrap().total_pages, 3);
    }
}
