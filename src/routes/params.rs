use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entity::enums::{
    ApplicationStatus, AppointmentStatus, ArticleCategory, OrderStatus, PetSize, PetStatus,
    ProductCategory, Species, VolunteerStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
    pub offset: i64,
}

impl PageWindow {
    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }

    pub fn skip(&self) -> u64 {
        self.offset as u64
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page number, default 1
    pub page: Option<i64>,
    /// Items per page, default 20, max 100
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    pub fn normalize(&self) -> PageWindow {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        PageWindow {
            page,
            per_page,
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Age buckets used by the pet browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Young,
    Adult,
    Senior,
}

impl AgeGroup {
    /// Inclusive age bounds in years; `None` means unbounded.
    pub fn bounds(self) -> (Option<i32>, Option<i32>) {
        match self {
            AgeGroup::Young => (None, Some(2)),
            AgeGroup::Adult => (Some(3), Some(7)),
            AgeGroup::Senior => (Some(8), None),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PetQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Search in name and breed
    pub q: Option<String>,
    pub species: Option<Species>,
    pub size: Option<PetSize>,
    pub age_group: Option<AgeGroup>,
    /// Defaults to `available`
    pub status: Option<PetStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    pub category: Option<ProductCategory>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<ArticleCategory>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<ApplicationStatus>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VolunteerListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<VolunteerStatus>,
}

/// `ILIKE` pattern that matches `term` literally anywhere in a column.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

macro_rules! impl_pagination {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn window(&self) -> PageWindow {
                    Pagination::new(self.page, self.per_page).normalize()
                }
            }
        )*
    };
}

impl_pagination!(
    PetQuery,
    ProductQuery,
    ArticleQuery,
    ApplicationListQuery,
    OrderListQuery,
    AppointmentListQuery,
    VolunteerListQuery,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let window = Pagination::default().normalize();
        assert_eq!(
            window,
            PageWindow {
                page: 1,
                per_page: 20,
                offset: 0
            }
        );

        let window = Pagination::new(Some(0), Some(1000)).normalize();
        assert_eq!(window.page, 1);
        assert_eq!(window.per_page, 100);

        let window = Pagination::new(Some(3), Some(10)).normalize();
        assert_eq!(window.offset, 20);
        assert_eq!(window.limit(), 10);
        assert_eq!(window.skip(), 20);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let window = Pagination::new(Some(i64::MAX), Some(100)).normalize();
        assert_eq!(window.page, i64::MAX);
        assert_eq!(window.offset, i64::MAX);
    }

    #[test]
    fn age_groups_do_not_overlap() {
        assert_eq!(AgeGroup::Young.bounds(), (None, Some(2)));
        assert_eq!(AgeGroup::Adult.bounds(), (Some(3), Some(7)));
        assert_eq!(AgeGroup::Senior.bounds(), (Some(8), None));
    }

    #[test]
    fn search_wildcards_are_escaped() {
        assert_eq!(contains_pattern("lab"), "%lab%");
        assert_eq!(contains_pattern("_"), "%\\_%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn query_structs_expose_their_window() {
        let query = PetQuery {
            page: Some(2),
            per_page: Some(5),
            ..Default::default()
        };
        assert_eq!(query.window().offset, 5);
    }
}
