//! Pure validators for user-supplied values.
//!
//! 失敗時は `ValidationError` を返し、呼び出し側が再入力ループを回す。

use super::error::ValidationError;

pub const MIN_YEAR: i32 = 1800;

/// 出版年を検証する。`1800 <= year <= current_year + 1`。
pub fn validate_year(text: &str, current_year: i32) -> Result<i32, ValidationError> {
    let max = current_year + 1;
    let err = ValidationError::InvalidYear {
        min: MIN_YEAR,
        max,
    };
    let year: i32 = text.trim().parse().map_err(|_| err.clone())?;
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(err);
    }
    Ok(year)
}

/// 前後の空白を除き、空でない文字列を返す。
pub fn validate_nonempty(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

/// ページ数の文字列を整数として解析する。符号はここでは見ない。
pub fn parse_page(text: &str) -> Result<i64, ValidationError> {
    text.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber)
}

/// 解析済みの2つのページ数を検証する。どちらかが負なら `NegativePages`。
/// `current <= total` の検証は `ReadingProgress::new` が行う。
pub fn validate_pages(current: i64, total: i64) -> Result<(u32, u32), ValidationError> {
    if current < 0 || total < 0 {
        return Err(ValidationError::NegativePages);
    }
    let current = u32::try_from(current).map_err(|_| ValidationError::InvalidNumber)?;
    let total = u32::try_from(total).map_err(|_| ValidationError::InvalidNumber)?;
    Ok((current, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds_are_inclusive() {
        assert_eq!(validate_year("1800", 2024), Ok(1800));
        assert_eq!(validate_year("2025", 2024), Ok(2025));
        assert!(validate_year("1799", 2024).is_err());
        assert!(validate_year("2026", 2024).is_err());
    }

    #[test]
    fn year_rejects_non_numeric() {
        assert_eq!(
            validate_year("nineteen", 2024),
            Err(ValidationError::InvalidYear {
                min: 1800,
                max: 2025
            })
        );
        assert!(validate_year("", 2024).is_err());
    }

    #[test]
    fn nonempty_trims() {
        assert_eq!(validate_nonempty("  Dune \n"), Ok("Dune".to_string()));
        assert_eq!(validate_nonempty("   "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn parse_page_rejects_garbage_only() {
        assert_eq!(parse_page(" 42\n"), Ok(42));
        assert_eq!(parse_page("-1"), Ok(-1));
        assert_eq!(parse_page("abc"), Err(ValidationError::InvalidNumber));
        assert_eq!(parse_page("1.5"), Err(ValidationError::InvalidNumber));
        assert_eq!(parse_page(""), Err(ValidationError::InvalidNumber));
    }

    #[test]
    fn pages_reject_negative_on_either_side() {
        assert_eq!(validate_pages(5, 10), Ok((5, 10)));
        assert_eq!(validate_pages(-5, 10), Err(ValidationError::NegativePages));
        assert_eq!(validate_pages(5, -10), Err(ValidationError::NegativePages));
        assert_eq!(
            validate_pages(0, i64::from(u32::MAX) + 1),
            Err(ValidationError::InvalidNumber)
        );
    }
}
