//! Boundary validation for request payloads.
//!
//! Enforced before any store or network work: URL fields must parse as
//! absolute URLs, title 1–200 chars, description ≤500 chars, at most 10
//! tags, page ≥ 1, page size within [1, 100].

use url::Url;

use linkstash_core::{defaults, CreateLinkRequest};

use crate::error::ApiError;

/// Require a well-formed absolute URL.
pub fn validate_absolute_url(value: &str) -> Result<(), ApiError> {
    Url::parse(value).map_err(|_| ApiError::BadRequest("Invalid URL format".to_string()))?;
    Ok(())
}

/// Validate a create-bookmark payload.
pub fn validate_create_link(req: &CreateLinkRequest) -> Result<(), ApiError> {
    validate_absolute_url(&req.url)?;

    let title_len = req.title.chars().count();
    if title_len == 0 {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }
    if title_len > defaults::TITLE_MAX_CHARS {
        return Err(ApiError::BadRequest("Title too long".to_string()));
    }

    if req.description.chars().count() > defaults::DESCRIPTION_MAX_CHARS {
        return Err(ApiError::BadRequest("Description too long".to_string()));
    }

    if let Some(image) = &req.image {
        validate_absolute_url(image)?;
    }

    if req.tags.len() > defaults::MAX_TAGS {
        return Err(ApiError::BadRequest("Too many tags".to_string()));
    }

    Ok(())
}

/// Validate list pagination parameters.
pub fn validate_list_query(page: Option<i64>, page_size: Option<i64>) -> Result<(), ApiError> {
    if let Some(page) = page {
        if page < 1 {
            return Err(ApiError::BadRequest("Page must be at least 1".to_string()));
        }
    }
    if let Some(page_size) = page_size {
        if !(1..=defaults::MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ApiError::BadRequest(
                "Page size must be between 1 and 100".to_string(),
            ));
        }
    }
    Ok(())
}
