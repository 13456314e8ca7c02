//! Classification level resolution.

use crate::models::{CellValue, LevelSpec, LevelValues};

/// Resolves the four classification levels stamped on every detailed line.
///
/// Each level is the value of the first level-spec row whose name equals
/// the configured name for that level; an unmatched level stays null.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::resolve_levels;
/// use payroll_ledger::models::{CellValue, LevelSpec};
///
/// let specs = vec![LevelSpec { specification: "Level1".to_string(), value: CellValue::text("PAYROLL") }];
/// let names = ["Level1".to_string(), "Level2".to_string(), "Level3".to_string(), "Level4".to_string()];
///
/// let levels = resolve_levels(&specs, &names);
/// assert_eq!(levels.level1, CellValue::text("PAYROLL"));
/// assert!(levels.level2.is_null());
/// ```
pub fn resolve_levels(specs: &[LevelSpec], names: &[String; 4]) -> LevelValues {
    let lookup = |name: &String| -> CellValue {
        specs
            .iter()
            .find(|spec| spec.specification == name.trim())
            .map(|spec| spec.value.clone())
            .unwrap_or_default()
    };

    LevelValues {
        level1: lookup(&names[0]),
        level2: lookup(&names[1]),
        level3: lookup(&names[2]),
        level4: lookup(&names[3]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> [String; 4] {
        [
            "Level1".to_string(),
            "Level2 (Optional)".to_string(),
            "Level3 (Optional)".to_string(),
            "Level4 (Optional)".to_string(),
        ]
    }

    fn spec(name: &str, value: CellValue) -> LevelSpec {
        LevelSpec {
            specification: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_levels_resolved_by_name() {
        let specs = vec![
            spec("Level3 (Optional)", CellValue::from(30)),
            spec("Level1", CellValue::text("NOM")),
            spec("Other", CellValue::text("ignored")),
        ];

        let levels = resolve_levels(&specs, &names());

        assert_eq!(levels.level1, CellValue::text("NOM"));
        assert_eq!(levels.level2, CellValue::Null);
        assert_eq!(levels.level3, CellValue::from(30));
        assert_eq!(levels.level4, CellValue::Null);
    }

    #[test]
    fn test_first_matching_row_wins() {
        let specs = vec![
            spec("Level1", CellValue::text("first")),
            spec("Level1", CellValue::text("second")),
        ];
        assert_eq!(resolve_levels(&specs, &names()).level1, CellValue::text("first"));
    }

    #[test]
    fn test_empty_catalog_leaves_levels_null() {
        assert_eq!(resolve_levels(&[], &names()), LevelValues::default());
    }
}
