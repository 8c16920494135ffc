#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Lunch", 10), "Lunch");
    assert_eq!(truncate("Lunch", 5), "Lunch");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Bills & Utilities", 8), "Bills &…");
}

#[test]
fn test_truncate_edges() {
    assert_eq!(truncate("", 5), "");
    assert_eq!(truncate("rent", 0), "");
    assert_eq!(truncate("rent", 1), "…");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("café crème", 5), "café…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-30)), "-$30.00");
    assert_eq!(format_amount(dec!(-99999.01)), "-$99,999.01");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

// ── budget bars ───────────────────────────────────────────────

#[test]
fn test_fill_ratio_clamps() {
    assert_eq!(fill_ratio(dec!(0)), 0.0);
    assert_eq!(fill_ratio(dec!(50)), 0.5);
    assert_eq!(fill_ratio(dec!(100)), 1.0);
    assert_eq!(fill_ratio(dec!(125)), 1.0);
}

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
    assert_eq!(progress_bar(1.0, 4), "[████]");
    assert_eq!(progress_bar(3.0, 4), "[████]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_follows_cursor() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (1, 0);
    scroll_down(&mut index, &mut scroll, 2, 5);
    assert_eq!(index, 1);
}

#[test]
fn test_scroll_up_and_jumps() {
    let (mut index, mut scroll) = (4, 4);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (3, 3));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));

    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

// ── category colors ───────────────────────────────────────────

#[test]
fn test_category_color() {
    use super::theme::{category_color, TEXT_DIM};
    use ratatui::style::Color;

    assert_eq!(category_color("#EF4444"), Color::Rgb(0xEF, 0x44, 0x44));
    assert_eq!(category_color("#6b7280"), Color::Rgb(0x6B, 0x72, 0x80));
    assert_eq!(category_color("EF4444"), TEXT_DIM);
    assert_eq!(category_color("#EF44"), TEXT_DIM);
    assert_eq!(category_color("#ZZ4444"), TEXT_DIM);
}
