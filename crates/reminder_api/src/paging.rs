//! Query-string paging parameters for the list endpoint.

use reminder_core::{InvalidParam, ReminderEntity};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `limit` / `offset` as sent by the client.
///
/// Kept signed so that negative values reach range validation instead of
/// failing to parse.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u64,
}

impl ListParams {
    /// Applies defaults and range checks, reporting every violation.
    pub fn validate(&self) -> Result<Page, Vec<InvalidParam>> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = self.offset.unwrap_or(0);
        let mut invalid_params = Vec::new();

        if limit < 1 {
            invalid_params.push(InvalidParam::new(
                "limit",
                "must be greater than or equal to 1",
            ));
        } else if limit > MAX_LIMIT {
            invalid_params.push(InvalidParam::new(
                "limit",
                format!("must be less than or equal to {MAX_LIMIT}"),
            ));
        }
        if offset < 0 {
            invalid_params.push(InvalidParam::new(
                "offset",
                "must be greater than or equal to 0",
            ));
        }

        match (u32::try_from(limit), u64::try_from(offset)) {
            (Ok(limit), Ok(offset)) if invalid_params.is_empty() => Ok(Page { limit, offset }),
            _ => Err(invalid_params),
        }
    }
}

/// Paging echo returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub limit: u32,
    pub offset: u64,
    /// Number of results actually returned.
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderListResponse {
    pub results: Vec<ReminderEntity>,
    pub page: PageInfo,
}

impl ReminderListResponse {
    pub fn new(page: Page, results: Vec<ReminderEntity>) -> Self {
        Self {
            page: PageInfo {
                limit: page.limit,
                offset: page.offset,
                size: results.len(),
            },
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListParams, Page};

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let page = ListParams::default().validate().unwrap();
        assert_eq!(page, Page { limit: 10, offset: 0 });
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = ListParams {
            limit: Some(0),
            offset: Some(0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].name, "limit");
        assert_eq!(err[0].reason, "must be greater than or equal to 1");
    }

    #[test]
    fn all_violations_are_collected() {
        let err = ListParams {
            limit: Some(101),
            offset: Some(-1),
        }
        .validate()
        .unwrap_err();
        let names: Vec<_> = err.iter().map(|param| param.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "offset"]);
        assert_eq!(err[0].reason, "must be less than or equal to 100");
    }
}
