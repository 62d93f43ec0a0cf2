//! Weekday Bible reading plan: one Old Testament, one Psalm and one New
//! Testament passage per weekday, counted from 1 January.

use chrono::{Datelike, NaiveDate, Weekday};

/// Short form used on the page. Unknown books are returned unchanged.
pub fn book_abbreviation(book: &str) -> &str {
    match book {
        "Genesis" => "Gen.",
        "Exodus" => "Ex.",
        "Leviticus" => "Lev.",
        "Numbers" => "Num.",
        "Deuteronomy" => "Deut.",
        "Joshua" => "Josh.",
        "Judges" => "Judg.",
        "1 Samuel" => "1 Sam.",
        "2 Samuel" => "2 Sam.",
        "1 Chronicles" => "1 Chron.",
        "2 Chronicles" => "2 Chron.",
        "Nehemiah" => "Neh.",
        "Esther" => "Est.",
        "Psalms" => "Ps.",
        "Proverbs" => "Prov",
        "Ecclesiastes" => "Eccles.",
        "Song of Solomon" | "Song of Songs" => "Song",
        "Isaiah" => "Isa.",
        "Jeremiah" => "Jer.",
        "Lamentations" => "Lam.",
        "Ezekiel" => "Ezek.",
        "Daniel" => "Dan.",
        "Hosea" => "Hos.",
        "Obadiah" => "Obad.",
        "Habakkuk" => "Hab.",
        "Zephaniah" => "Zeph.",
        "Haggai" => "Hag.",
        "Zechariah" => "Zech.",
        "Malachi" => "Mal.",
        "Matthew" => "Matt.",
        "Romans" => "Rom.",
        "1 Corinthians" => "1 Cor.",
        "2 Corinthians" => "2 Cor.",
        "Galatians" => "Gal.",
        "Ephesians" => "Eph.",
        "Philippians" => "Phil.",
        "Colossians" => "Col.",
        "1 Thessalonians" => "1 Thess.",
        "2 Thessalonians" => "2 Thess.",
        "1 Timothy" => "1 Tim.",
        "2 Timothy" => "2 Tim.",
        "Philemon" => "Philem.",
        "Hebrews" => "Heb.",
        "1 Peter" => "1 Pet.",
        "2 Peter" => "2 Pet.",
        "Revelation" => "Rev",
        other => other,
    }
}

/// Readings for chapters `start..=chapters` of `book` (`start` is 1-based,
/// 0 means from the beginning). A `step` above 1 groups chapters into ranges
/// such as `Ps. 1 - 2`.
pub fn expand_book(book: &str, chapters: u32, start: u32, step: u32) -> Vec<String> {
    let short = book_abbreviation(book);
    let first = start.saturating_sub(1);
    let step = step.max(1);

    (first..chapters)
        .step_by(step as usize)
        .map(|r| {
            if step == 1 {
                format!("{short} {}", r + 1)
            } else {
                format!("{short} {} - {}", r + 1, (r + step).min(chapters))
            }
        })
        .collect()
}

fn chapters(book: &str, count: u32) -> Vec<String> {
    expand_book(book, count, 0, 1)
}

fn old_testament_plan() -> Vec<String> {
    let neh = book_abbreviation("Nehemiah");
    let mut plan = Vec::new();
    plan.extend(chapters("Genesis", 50));
    plan.extend(chapters("Exodus", 40));
    plan.extend(chapters("Joshua", 11));
    plan.extend(expand_book("Judges", 9, 6, 1));
    plan.extend(chapters("Ruth", 4));
    plan.extend(chapters("1 Samuel", 30));
    plan.extend(chapters("2 Samuel", 24));
    plan.extend(chapters("1 Kings", 22));
    plan.extend(chapters("Ezra", 10));
    plan.extend(
        ["1", "2-3", "4", "5", "6-7", "8", "9", "10", "11-13"]
            .iter()
            .map(|c| format!("{neh} {c}")),
    );
    plan.extend(chapters("Esther", 10));
    plan.extend(chapters("Isaiah", 6));
    plan.extend(expand_book("Isaiah", 66, 40, 1));
    plan.extend(chapters("Daniel", 6));
    plan.extend(chapters("Jonah", 4));
    plan
}

/// Short psalms read together with the one that follows.
const SHORT_PSALMS: [u32; 23] = [
    3, 11, 13, 23, 29, 32, 39, 43, 52, 57, 63, 69, 76, 79, 86, 92, 99, 104, 111, 116, 120, 122,
    137,
];

fn psalm_run(plan: &mut Vec<String>, from: u32, until: u32) {
    let ps = book_abbreviation("Psalms");
    let mut r = from;
    while r < until {
        if SHORT_PSALMS.contains(&r) {
            plan.push(format!("{ps} {r} - {}", r + 1));
            r += 2;
        } else {
            plan.push(format!("{ps} {r}"));
            r += 1;
        }
    }
}

fn psalms_plan() -> Vec<String> {
    let ps = book_abbreviation("Psalms");
    let mut plan = Vec::new();
    psalm_run(&mut plan, 1, 119);
    // Psalm 119 is read in four sittings.
    plan.extend(
        ["v1-32", "v33-96", "v97-144", "v145-176"]
            .iter()
            .map(|v| format!("{ps} 119 {v}")),
    );
    psalm_run(&mut plan, 120, 151);
    plan
}

fn new_testament_plan() -> Vec<String> {
    let mut plan = Vec::new();
    plan.extend(chapters("Luke", 24));
    plan.extend(chapters("Acts", 28));
    plan.extend(chapters("Romans", 16));
    plan.extend(chapters("Matthew", 28));
    plan.extend(chapters("1 Corinthians", 16));
    plan.extend(chapters("2 Corinthians", 13));
    plan.extend(chapters("Galatians", 6));
    plan.extend(chapters("Ephesians", 6));
    plan.extend(chapters("Philippians", 4));
    plan.extend(chapters("Colossians", 4));
    plan.extend(chapters("Mark", 16));
    plan.extend(chapters("1 Thessalonians", 5));
    plan.extend(chapters("2 Thessalonians", 3));
    plan.extend(chapters("1 Timothy", 6));
    plan.extend(chapters("2 Timothy", 4));
    plan.extend(chapters("Titus", 3));
    plan.push(book_abbreviation("Philemon").to_string());
    plan.extend(chapters("Hebrews", 13));
    plan.extend(chapters("John", 21));
    plan.extend(chapters("James", 5));
    plan.extend(chapters("1 Peter", 5));
    plan.extend(chapters("2 Peter", 3));
    plan.extend(chapters("1 John", 5));
    plan.extend(["2 John", "3 John", "Jude"].map(String::from));
    plan.extend(chapters("Revelation", 22));
    plan
}

fn entry(plan: &[String], index: usize) -> String {
    plan.get(index).cloned().unwrap_or_default()
}

/// Monday to Friday days in `start..end`.
pub fn count_weekdays(start: NaiveDate, end: NaiveDate) -> usize {
    start
        .iter_days()
        .take_while(|d| *d < end)
        .filter(|d| !is_weekend(*d))
        .count()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `[OT, Psalm, NT]` for `date`, or `None` at the weekend. A plan that has
/// run out contributes an empty string.
pub fn readings_for(date: NaiveDate) -> Option<Vec<String>> {
    if is_weekend(date) {
        return None;
    }

    let year_start = date.with_ordinal(1).unwrap_or(date);
    let index = count_weekdays(year_start, date);

    Some(vec![
        entry(&old_testament_plan(), index),
        entry(&psalms_plan(), index),
        entry(&new_testament_plan(), index),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    /// The date `n` weekdays after 1 January of `year`.
    fn nth_weekday(year: i32, n: usize) -> NaiveDate {
        let mut date = ymd(year, 1, 1);
        let mut seen = 0;
        loop {
            if !is_weekend(date) {
                if seen == n {
                    return date;
                }
                seen += 1;
            }
            date = date.checked_add_days(Days::new(1)).expect("in range");
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    // ────────────────────────────────────────────────────────────────────────
    // Abbreviations and expansion
    // ────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_book_abbreviations() {
        assert_eq!(book_abbreviation("Genesis"), "Gen.");
        assert_eq!(book_abbreviation("Psalms"), "Ps.");
        assert_eq!(book_abbreviation("Revelation"), "Rev");
        assert_eq!(book_abbreviation("Ruth"), "Ruth");
        assert_eq!(book_abbreviation("Unknown Book"), "Unknown Book");
    }

    #[test]
    fn test_expand_book_simple() {
        assert_eq!(expand_book("Genesis", 3, 0, 1), vec!["Gen. 1", "Gen. 2", "Gen. 3"]);
    }

    #[test]
    fn test_expand_book_with_start() {
        assert_eq!(
            expand_book("Judges", 9, 6, 1),
            vec!["Judg. 6", "Judg. 7", "Judg. 8", "Judg. 9"]
        );
    }

    #[test]
    fn test_expand_book_with_step() {
        assert_eq!(
            expand_book("Psalms", 6, 0, 2),
            vec!["Ps. 1 - 2", "Ps. 3 - 4", "Ps. 5 - 6"]
        );
        assert_eq!(expand_book("Psalms", 5, 0, 2), vec!["Ps. 1 - 2", "Ps. 3 - 4", "Ps. 5 - 5"]);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Plans
    // ────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_old_testament_plan_order() {
        let plan = old_testament_plan();
        assert_eq!(plan[0], "Gen. 1");
        assert_eq!(plan[49], "Gen. 50");
        assert_eq!(plan[50], "Ex. 1");
        assert_eq!(plan[195], "Neh. 1");
        assert_eq!(plan[196], "Neh. 2-3");
        assert_eq!(plan.last().map(String::as_str), Some("Jonah 4"));
        assert_eq!(entry(&plan, 999), "");
    }

    #[test]
    fn test_psalms_plan_groups_short_psalms() {
        let plan = psalms_plan();
        assert_eq!(plan[0], "Ps. 1");
        assert_eq!(plan[2], "Ps. 3 - 4");
        assert!(plan.contains(&"Ps. 118".to_string()));
        assert!(plan.contains(&"Ps. 137 - 138".to_string()));
        assert_eq!(plan.last().map(String::as_str), Some("Ps. 150"));
    }

    #[test]
    fn test_psalm_119_in_four_parts_then_120() {
        let plan = psalms_plan();
        let start = plan
            .iter()
            .position(|p| p == "Ps. 119 v1-32")
            .expect("psalm 119 present");
        assert_eq!(plan[start + 1], "Ps. 119 v33-96");
        assert_eq!(plan[start + 2], "Ps. 119 v97-144");
        assert_eq!(plan[start + 3], "Ps. 119 v145-176");
        assert_eq!(plan[start + 4], "Ps. 120 - 121");
    }

    #[test]
    fn test_new_testament_plan_order() {
        let plan = new_testament_plan();
        assert_eq!(plan[0], "Luke 1");
        assert_eq!(plan[23], "Luke 24");
        assert_eq!(plan[24], "Acts 1");
        assert!(plan.contains(&"Philem.".to_string()));
        assert_eq!(plan.last().map(String::as_str), Some("Rev 22"));
    }

    // ────────────────────────────────────────────────────────────────────────
    // Weekday counting and daily readings
    // ────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_count_weekdays() {
        assert_eq!(count_weekdays(ymd(2024, 1, 1), ymd(2024, 1, 2)), 1);
        assert_eq!(count_weekdays(ymd(2024, 1, 1), ymd(2024, 1, 8)), 5);
        assert_eq!(count_weekdays(ymd(2024, 1, 6), ymd(2024, 1, 8)), 0);
        assert_eq!(count_weekdays(ymd(2024, 1, 1), ymd(2024, 1, 1)), 0);
    }

    #[test]
    fn test_first_weekday_readings() {
        let readings = readings_for(ymd(2024, 1, 1)).expect("weekday");
        assert_eq!(readings, vec!["Gen. 1", "Ps. 1", "Luke 1"]);
    }

    #[test]
    fn test_second_weekday_readings() {
        let readings = readings_for(ymd(2024, 1, 2)).expect("weekday");
        assert_eq!(readings, vec!["Gen. 2", "Ps. 2", "Luke 2"]);
    }

    #[test]
    fn test_weekend_has_no_readings() {
        assert!(readings_for(ymd(2024, 1, 6)).is_none());
        assert!(readings_for(ymd(2024, 1, 7)).is_none());
    }

    #[test]
    fn test_genesis_runs_into_exodus() {
        let readings = readings_for(nth_weekday(2024, 50)).expect("weekday");
        assert_eq!(readings[0], "Ex. 1");
        let readings = readings_for(nth_weekday(2024, 49)).expect("weekday");
        assert_eq!(readings[0], "Gen. 50");
    }

    #[test]
    fn test_end_of_year_plans_have_run_out() {
        // 2024-12-31 is weekday index 261; the longest plan has 260 entries.
        let readings = readings_for(ymd(2024, 12, 31)).expect("weekday");
        assert_eq!(readings, vec!["", "", ""]);
    }
}
