// Therapy sessions live under `/sessions` on the server.
use crate::client::{ApiClient, ApiResult};
use crate::model::{Booking, BookingStatus, NewBooking};

pub struct Bookings<'a>(pub(crate) &'a ApiClient);

impl Bookings<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Booking>> {
        self.0.get("/sessions").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Booking> {
        self.0.get(&format!("/sessions/{}", id)).await
    }

    pub async fn list_for_user(&self, user_id: i64) -> ApiResult<Vec<Booking>> {
        self.0.get(&format!("/sessions/user/{}", user_id)).await
    }

    pub async fn list_for_therapist(&self, therapist_id: i64) -> ApiResult<Vec<Booking>> {
        self.0
            .get(&format!("/sessions/therapist/{}", therapist_id))
            .await
    }

    pub async fn upcoming_for_user(&self, user_id: i64) -> ApiResult<Vec<Booking>> {
        self.0
            .get(&format!("/sessions/user/{}/upcoming", user_id))
            .await
    }

    pub async fn create(&self, booking: &NewBooking) -> ApiResult<Booking> {
        self.0.post("/sessions", booking).await
    }

    pub async fn update(&self, id: i64, booking: &Booking) -> ApiResult<Booking> {
        self.0.put(&format!("/sessions/{}", id), booking).await
    }

    /// The body is the bare status as a JSON string, e.g. `"COMPLETED"`.
    pub async fn update_status(&self, id: i64, status: BookingStatus) -> ApiResult<Booking> {
        self.0
            .put(&format!("/sessions/{}/status", id), &status)
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.0.delete(&format!("/sessions/{}", id)).await
    }
}
