use crate::client::{ApiClient, ApiResult};
use crate::model::{ContentType, MotivationalItem};
use crate::views::{Filter, contains_ci};

pub const CONTENT_PREVIEW: usize = 200;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotivationBoard {
    items: Vec<MotivationalItem>,
    pub filter: Filter<ContentType>,
    pub search: String,
}

impl MotivationBoard {
    pub fn new(items: Vec<MotivationalItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[MotivationalItem] {
        &self.items
    }

    pub fn replace(&mut self, items: Vec<MotivationalItem>) {
        self.items = items;
    }

    /// Type filter first, then search over title, content and category.
    pub fn visible(&self) -> Vec<&MotivationalItem> {
        let term = self.search.trim();
        self.filter
            .apply(&self.items, |m| m.kind)
            .into_iter()
            .filter(|m| {
                term.is_empty()
                    || contains_ci(&m.title, term)
                    || contains_ci(&m.content, term)
                    || m.category.as_deref().is_some_and(|c| contains_ci(c, term))
            })
            .collect()
    }

    pub async fn fetch(api: &ApiClient) -> ApiResult<Vec<MotivationalItem>> {
        api.motivations().active().await
    }
}
