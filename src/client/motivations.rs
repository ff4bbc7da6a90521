use crate::client::{ApiClient, ApiResult};
use crate::model::{ContentType, MotivationalItem};

pub struct Motivations<'a>(pub(crate) &'a ApiClient);

impl Motivations<'_> {
    pub async fn active(&self) -> ApiResult<Vec<MotivationalItem>> {
        self.0.get_public("/motivations/active").await
    }

    pub async fn by_type(&self, kind: ContentType) -> ApiResult<Vec<MotivationalItem>> {
        let path = ApiClient::path_with_segment("/motivations/type", kind.as_wire())?;
        self.0.get(&path).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<MotivationalItem> {
        self.0.get(&format!("/motivations/{}", id)).await
    }
}
