#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid year between {min} and {max} (e.g., 1925)")]
    InvalidYear { min: i32, max: i32 },

    #[error("This field cannot be empty. Please try again.")]
    EmptyInput,

    #[error("Please enter valid numbers.")]
    InvalidNumber,

    #[error("Page numbers cannot be negative.")]
    NegativePages,

    #[error("Current page cannot be greater than total pages.")]
    PagesExceedTotal { current: u32, total: u32 },

    #[error("Total pages must be greater than zero.")]
    ZeroTotalPages,
}
