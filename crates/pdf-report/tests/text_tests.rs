use pdf_report::constants::SOFT_BREAK;
use pdf_report::insert_soft_breaks;
use pdf_report::text::strip_soft_breaks;

#[test]
fn test_short_strings_unchanged() {
    assert_eq!(insert_soft_breaks("short", 20), "short");
    assert_eq!(insert_soft_breaks("", 20), "");
    let nineteen = "a".repeat(19);
    assert_eq!(insert_soft_breaks(&nineteen, 20), nineteen);
}

#[test]
fn test_exact_interval_has_no_marker() {
    let twenty = "b".repeat(20);
    assert_eq!(insert_soft_breaks(&twenty, 20), twenty);
}

#[test]
fn test_markers_at_multiples_of_interval() {
    let input: String = ('a'..='z').cycle().take(45).collect();
    let output = insert_soft_breaks(&input, 20);

    assert_eq!(output.matches(SOFT_BREAK).count(), 2);
    let positions: Vec<usize> = output
        .chars()
        .enumerate()
        .filter(|(_, c)| *c == SOFT_BREAK)
        .map(|(i, _)| i)
        .collect();
    // Original positions 20 and 40, shifted by earlier markers
    assert_eq!(positions, vec![20, 41]);
    assert_eq!(strip_soft_breaks(&output), input);
}

#[test]
fn test_counts_characters_not_bytes() {
    let input = "é".repeat(25);
    let output = insert_soft_breaks(&input, 20);
    assert_eq!(output.matches(SOFT_BREAK).count(), 1);
    assert_eq!(output.chars().nth(20), Some(SOFT_BREAK));
}

#[test]
fn test_custom_interval() {
    assert_eq!(
        insert_soft_breaks("abcdefg", 3),
        format!("abc{0}def{0}g", SOFT_BREAK)
    );
}

#[test]
fn test_zero_interval_is_noop() {
    assert_eq!(insert_soft_breaks("abcdef", 0), "abcdef");
}
