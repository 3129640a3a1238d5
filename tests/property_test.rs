//! Property Tests
//!
//! The schedule parser must be total and deterministic over arbitrary grids,
//! and its item extraction must respect the split rules.

use menusheet::{parse, parse_with_report, CellValue, Day, MealSlot};
use proptest::prelude::*;

/// セル値の生成（曜日名・食事区分キーワードが混ざるように重み付け）
fn cell_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        3 => Just(CellValue::Empty),
        2 => prop::sample::select(vec![
            "Monday", "tuesday", "WEDNESDAY", "Thursday", "Friday", "Saturday", "Sunday",
        ])
        .prop_map(CellValue::from),
        2 => prop::sample::select(vec![
            "Breakfast", "Lunch", "Snacks", "Midnight", "Dinner", "Menu - Lunch Week 1",
        ])
        .prop_map(CellValue::from),
        4 => "[A-Za-z ,]{0,24}".prop_map(CellValue::from),
        1 => any::<f64>().prop_map(CellValue::from),
        1 => any::<bool>().prop_map(CellValue::from),
    ]
}

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<CellValue>>> {
    prop::collection::vec(prop::collection::vec(cell_strategy(), 0..10), 0..40)
}

proptest! {
    #[test]
    fn prop_parse_is_total_and_complete(grid in grid_strategy()) {
        let schedule = parse(&grid);

        // 7曜日 × 5食事区分が常にそろい、品目は空でなくtrim済み
        for (day, menu) in schedule.iter() {
            prop_assert!(Day::ALL.contains(&day));
            for meal in MealSlot::ALL {
                for item in menu.items(meal) {
                    prop_assert!(!item.is_empty());
                    prop_assert_eq!(item.trim(), item.as_str());
                    prop_assert!(!item.contains(','));
                }
            }
        }
        prop_assert_eq!(schedule.iter().count(), 7);
    }

    #[test]
    fn prop_parse_is_deterministic(grid in grid_strategy()) {
        prop_assert_eq!(parse(&grid), parse(&grid));
    }

    #[test]
    fn prop_report_matches_schedule(grid in grid_strategy()) {
        let (schedule, report) = parse_with_report(&grid);

        prop_assert_eq!(report.rows_scanned, grid.len());
        prop_assert_eq!(report.items_extracted, schedule.item_count());
        prop_assert!(report.blank_rows + report.day_header_rows <= report.rows_scanned);
    }

    #[test]
    fn prop_no_header_means_empty(
        grid in prop::collection::vec(
            prop::collection::vec("[a-z ,]{0,12}".prop_map(CellValue::from), 0..6),
            0..20,
        )
    ) {
        // 曜日名と完全一致するセルを含むグリッドは除外
        let has_day = grid.iter().flatten().any(|cell| {
            let text = cell.to_text();
            Day::ALL.iter().any(|day| day.name().eq_ignore_ascii_case(&text))
        });
        prop_assume!(!has_day);

        prop_assert!(parse(&grid).is_empty());
    }

    #[test]
    fn prop_items_follow_comma_split(items in prop::collection::vec("[A-Za-z][A-Za-z ]{0,10}", 1..6)) {
        let cell = items.join(" , ");
        let grid = vec![
            vec![CellValue::Empty, CellValue::from("Friday")],
            vec![CellValue::from("Lunch"), CellValue::from(cell.as_str())],
        ];

        // 品目名自体に食事区分キーワードやタイトル語が含まれる場合は対象外
        let lower = cell.to_lowercase();
        prop_assume!(!["breakfast", "lunch", "snack", "midnight", "dinner", "menu"]
            .iter()
            .any(|word| lower.contains(word)));
        prop_assume!(!Day::ALL.iter().any(|day| day.name().eq_ignore_ascii_case(cell.trim())));

        let expected: Vec<String> = items.iter().map(|s| s.trim().to_string()).collect();
        let schedule = parse(&grid);
        prop_assert_eq!(schedule.items(Day::Friday, MealSlot::Lunch), expected.as_slice());
    }
}
