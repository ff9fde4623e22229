use crate::configuration::PaginationSettings;
use crate::repository::{PageRequest, Sort};
use crate::services::ServiceError;
use serde::Deserialize;

/// `?page=0&size=20&sort=name,desc`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl PageParams {
    pub fn into_request(self, settings: &PaginationSettings) -> Result<PageRequest, ServiceError> {
        let size = match self.size {
            None | Some(0) => settings.default_size,
            Some(size) => size.min(settings.max_size),
        };
        let request = PageRequest::of(self.page.unwrap_or(0), size);

        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(request),
            Some(sort) => sort
                .parse::<Sort>()
                .map(|sort| request.with_sort(sort))
                .map_err(|msg| ServiceError::invalid_field("sort", &msg)),
        }
    }
}
