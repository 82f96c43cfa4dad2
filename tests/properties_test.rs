mod common;

use saasflow::analytics::top_n;
use saasflow::accounts::filter_users;
use saasflow::billing::limits::{is_high, usage_percentage};
use saasflow::format::{format_currency, format_date, get_initials};

#[test]
fn test_percentage_and_high_flag_agree() {
    for limit in [1.0, 3.0, 10.0, 100.0, 50_000.0] {
        for step in 0..=60 {
            let used = limit * step as f64 / 30.0;
            let pct = usage_percentage(used, limit);
            assert_eq!(pct, (100.0 * used / limit).round() as u32);
            assert_eq!(is_high(pct, 80), pct > 80);
        }
    }
}

#[test]
fn test_initials_of_every_fixture_user() {
    for user in &common::builtin().users {
        let words: Vec<&str> = user.name.split_whitespace().collect();
        let expected: String = [words[0], words[words.len() - 1]]
            .iter()
            .map(|w| w.chars().next().unwrap().to_ascii_uppercase())
            .collect();
        assert_eq!(get_initials(&user.name), expected, "{}", user.name);
    }
    assert_eq!(get_initials("Madonna"), "M");
}

#[test]
fn test_search_extremes() {
    let users = &common::builtin().users;

    let all = filter_users(users, "");
    assert_eq!(all.len(), users.len());
    assert!(all.iter().zip(users.iter()).all(|(a, b)| a.id == b.id));

    assert!(filter_users(users, "no-such-person@nowhere").is_empty());
}

#[test]
fn test_currency_whole_amounts() {
    assert_eq!(format_currency(79.0), "$79");
    assert_eq!(format_currency(29.0), "$29");
    assert_eq!(format_currency(1990.0), "$1,990");
}

#[test]
fn test_fixed_locale_date() {
    assert_eq!(format_date("2026-02-01T00:00:00Z").unwrap(), "Feb 1, 2026");
    assert_eq!(format_date("2026-02-01T00:00:00+00:00").unwrap(), "Feb 1, 2026");
}

#[test]
fn test_top_five_of_ten() {
    let items: Vec<String> = (0..10).map(|i| format!("item-{}", i)).collect();
    let first = top_n(&items, 5);
    assert_eq!(first, &items[0..5]);
}
