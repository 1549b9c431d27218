//! Listing filters shared by the web handlers and the product repository.
//!
//! Sort column and direction are closed enums so user input only ever
//! selects from a fixed set of SQL fragments; filter values are bound as
//! parameters.

use serde::Serialize;

/// Column a product listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Insertion order (newest first with [`SortOrder::Desc`]).
    #[default]
    Id,
    ProductName,
    Price,
}

impl SortField {
    /// Parse a user-supplied sort key, falling back to [`SortField::Id`].
    ///
    /// Accepts the English column names and the Korean labels used by the
    /// filter form in earlier versions of the page.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("product_name") | Some("name") | Some("상품명") => SortField::ProductName,
            Some("price") | Some("가격") => SortField::Price,
            _ => SortField::Id,
        }
    }

    /// Fully-qualified column for `ORDER BY`.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "p.id",
            SortField::ProductName => "p.product_name",
            SortField::Price => "p.price",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ProductName => "product_name",
            SortField::Price => "price",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Case-insensitive `ASC`/`DESC`, falling back to [`SortOrder::Desc`].
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
            Some("ASC") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A product listing request: optional equality filters, an optional name
/// keyword, and an ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact `promotion_type` match (`1+1`, `2+1`, `덤증정`).
    pub promotion: Option<String>,
    /// Event type display name or code.
    pub category: Option<String>,
    /// Case-insensitive substring of the product name.
    pub keyword: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl ProductFilter {
    /// Newest-first listing of everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_promotion(promotion: impl Into<String>) -> Self {
        Self {
            promotion: non_empty(promotion.into()),
            ..Self::default()
        }
    }

    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: non_empty(category.into()),
            ..Self::default()
        }
    }

    pub fn by_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: non_empty(keyword.into()),
            ..Self::default()
        }
    }

    /// `ILIKE` pattern for [`ProductFilter::keyword`], if any.
    pub fn keyword_pattern(&self) -> Option<String> {
        self.keyword.as_deref().map(like_pattern)
    }
}

/// Trim and drop empty strings (query parameters arrive as `?x=`).
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Wrap a keyword in `%…%`, escaping `LIKE` metacharacters (`\`, `%`, `_`).
///
/// # Examples
///
/// ```
/// use gs25_core::listing::like_pattern;
/// assert_eq!(like_pattern("우유"), "%우유%");
/// assert_eq!(like_pattern("100%"), "%100\\%%");
/// ```
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
