//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a 1-5 rating as filled and hollow stars.
///
/// Usage in templates: `{{ review.rating|stars }}`
pub fn stars(rating: &i16, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(star_string(*rating))
}

fn star_string(rating: i16) -> String {
    let filled = usize::try_from(rating.clamp(0, 5)).unwrap_or(0);
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_render_filled_and_hollow() {
        assert_eq!(star_string(3), "★★★☆☆");
        assert_eq!(star_string(5), "★★★★★");
        assert_eq!(star_string(0), "☆☆☆☆☆");
    }

    #[test]
    fn out_of_range_ratings_clamp() {
        assert_eq!(star_string(9), "★★★★★");
        assert_eq!(star_string(-2), "☆☆☆☆☆");
    }
}
