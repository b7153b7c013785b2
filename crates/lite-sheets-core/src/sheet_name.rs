//! Sheet name rules

use crate::error::{Error, Result};
use crate::MAX_SHEET_NAME_LEN;

const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Validate a sheet name against the names already used in the same workbook.
///
/// Blank names, names over 31 characters, names with any of `: \ / ? * [ ]`
/// and case-insensitive duplicates are rejected.
pub fn validate_sheet_name<'a, I>(name: &str, existing: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    if name.trim().is_empty() {
        return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name too long (max {} characters)",
            MAX_SHEET_NAME_LEN
        )));
    }

    if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name cannot contain '{}'",
            c
        )));
    }

    let name_lower = name.to_lowercase();
    if existing
        .into_iter()
        .any(|other| other.to_lowercase() == name_lower)
    {
        return Err(Error::DuplicateSheetName(name.into()));
    }

    Ok(())
}
