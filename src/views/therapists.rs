// Therapist directory: search plus a specialization filter built from what was fetched.
use crate::client::{ApiClient, ApiResult};
use crate::model::Therapist;
use crate::views::contains_ci;

pub const BIO_PREVIEW: usize = 150;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TherapistDirectory {
    therapists: Vec<Therapist>,
    pub search: String,
    pub specialization: Option<String>,
}

impl TherapistDirectory {
    pub fn new(therapists: Vec<Therapist>) -> Self {
        Self {
            therapists,
            ..Self::default()
        }
    }

    pub fn therapists(&self) -> &[Therapist] {
        &self.therapists
    }

    /// Distinct, sorted, non-empty specializations.
    pub fn specializations(&self) -> Vec<String> {
        let mut specs: Vec<String> = self
            .therapists
            .iter()
            .filter_map(|t| t.specialization.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        specs.sort();
        specs.dedup();
        specs
    }

    /// None, then each specialization in order, then back to None.
    pub fn next_specialization(&mut self) {
        let specs = self.specializations();
        self.specialization = match &self.specialization {
            None => specs.first().cloned(),
            Some(current) => specs
                .iter()
                .position(|s| s == current)
                .and_then(|i| specs.get(i + 1))
                .cloned(),
        };
    }

    pub fn matches(&self, t: &Therapist) -> bool {
        let specialty = t.specialization_or_empty();
        let term = self.search.trim();
        let by_search =
            term.is_empty() || contains_ci(&t.full_name(), term) || contains_ci(specialty, term);
        let by_specialty = self
            .specialization
            .as_deref()
            .is_none_or(|wanted| contains_ci(specialty, wanted));
        by_search && by_specialty
    }

    pub fn visible(&self) -> Vec<&Therapist> {
        self.therapists.iter().filter(|t| self.matches(t)).collect()
    }

    pub async fn fetch(api: &ApiClient) -> ApiResult<Vec<Therapist>> {
        api.therapists().available().await
    }
}
