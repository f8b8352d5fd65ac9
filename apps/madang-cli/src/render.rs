//! # Text Rendering
//!
//! Draws the three views from a [`ViewState`]. Pure: no I/O, no database,
//! no clock. The order date shown in the form is passed in by the caller.
//!
//! ```text
//! ══ Customer Lookup ═══════════════════════════════
//! Name: Park Ji-sung
//! ✓ Found 3 order(s) for 'Park Ji-sung'.
//! custid | name         | bookname ...
//! -------+--------------+---------- ...
//! ══ Order Entry ═══════════════════════════════════
//! ...
//! ══ Customer Registration ═════════════════════════
//! ...
//! ```

use chrono::NaiveDate;
use madang_core::OrderHistoryRow;
use std::fmt::Write;

use crate::commands::lookup;
use crate::state::{Notice, NoticeLevel, ViewState};

const RULE_WIDTH: usize = 60;

/// Renders every view plus the last action's notice.
///
/// `today` is the date an order entered now would carry.
pub fn render(view: &ViewState, today: NaiveDate) -> String {
    let mut out = String::new();

    heading(&mut out, "Customer Lookup");
    let _ = writeln!(out, "Name: {}", view.lookup_name);
    if let Some(status) = lookup::status(view) {
        notice_line(&mut out, &status);
    }
    if !view.lookup.history().is_empty() {
        out.push_str(&history_table(view.lookup.history()));
    }

    heading(&mut out, "Order Entry");
    order_entry(&mut out, view, today);

    heading(&mut out, "Customer Registration");
    let _ = writeln!(out, "Name (required): {}", view.registration.name);
    let _ = writeln!(out, "Address:         {}", view.registration.address);
    let _ = writeln!(out, "Phone:           {}", view.registration.phone);

    if let Some(notice) = &view.notice {
        out.push('\n');
        notice_line(&mut out, notice);
    }

    out
}

fn order_entry(out: &mut String, view: &ViewState, today: NaiveDate) {
    let name = view.lookup_name.trim();

    match view.resolved_custid() {
        Some(custid) => {
            let _ = writeln!(out, "Customer id: {}", custid);
            let _ = writeln!(out, "Customer:    {}", name);
            let book = view
                .order_form
                .book
                .as_ref()
                .map(|b| b.choice_label())
                .unwrap_or_else(|| "(none)".to_string());
            let _ = writeln!(out, "Book:        {}", book);
            let _ = writeln!(out, "Price:       {}", view.order_form.price);
            let _ = writeln!(out, "Order date:  {}", today);
        }
        None if !name.is_empty() => {
            notice_line(
                out,
                &Notice {
                    level: NoticeLevel::Warning,
                    message: format!(
                        "'{}' is not in the database, so no order can be entered. Register the customer first.",
                        name
                    ),
                },
            );
        }
        None => {
            notice_line(
                out,
                &Notice::info("Look up a customer by name, or register a new customer."),
            );
        }
    }
}

/// Order history as an aligned text table.
pub fn history_table(rows: &[OrderHistoryRow]) -> String {
    let cells: Vec<[String; 5]> = rows.iter().map(OrderHistoryRow::cells).collect();

    let mut widths = OrderHistoryRow::COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    table_line(&mut out, &OrderHistoryRow::COLUMNS.map(String::from), &widths);

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", separator.join("-+-"));

    for row in &cells {
        table_line(&mut out, row, &widths);
    }

    out
}

fn table_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();

    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

fn heading(out: &mut String, title: &str) {
    let used = title.chars().count() + 4;
    let _ = writeln!(out, "══ {} {}", title, "═".repeat(RULE_WIDTH.saturating_sub(used)));
}

fn notice_line(out: &mut String, notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Success => "✓",
        NoticeLevel::Info => "·",
        NoticeLevel::Warning => "!",
        NoticeLevel::Error => "✗",
    };
    let _ = writeln!(out, "{} {}", marker, notice.message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use madang_core::CustomerLookup;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 9).unwrap()
    }

    fn row(bookname: &str, saleprice: Option<&str>) -> OrderHistoryRow {
        OrderHistoryRow {
            custid: 1,
            name: "Park Ji-sung".to_string(),
            bookname: bookname.to_string(),
            orderdate: Some("2014-07-01".to_string()),
            saleprice: saleprice.map(String::from),
        }
    }

    #[test]
    fn test_history_table_aligns_columns() {
        let table = history_table(&[
            row("History of Football", Some("6000")),
            row("Golf Bible", None),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("custid | name         | bookname"));
        assert!(lines[1].starts_with("-------+-"));
        assert!(lines[2].ends_with("2014-07-01 | 6000"));
        // Missing price renders as an empty cell
        assert!(lines[3].ends_with("2014-07-01 |"));
    }

    #[test]
    fn test_history_table_shows_dates_as_stored() {
        let mut undated = row("Golf Bible", Some("7000"));
        undated.orderdate = None;
        let mut timestamped = row("Golf Bible", Some("8000"));
        timestamped.orderdate = Some("2014-07-01 00:00:00".to_string());

        let table = history_table(&[undated, timestamped]);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[2].ends_with("Golf Bible |                     | 7000"));
        assert!(lines[3].ends_with("2014-07-01 00:00:00 | 8000"));
    }

    #[test]
    fn test_render_blank_view() {
        let text = render(&ViewState::new(), today());
        assert!(text.contains("══ Customer Lookup"));
        assert!(text.contains("Look up a customer by name"));
        assert!(text.contains("══ Customer Registration"));
    }

    #[test]
    fn test_render_resolved_customer_shows_form() {
        let mut view = ViewState::new();
        view.lookup_name = "Park Ji-sung".to_string();
        view.lookup = CustomerLookup::WithHistory {
            custid: 1,
            rows: vec![row("History of Football", Some("6000"))],
        };
        view.order_form.price = "13000".to_string();
        view.notice = Some(Notice::success("Order 11 recorded"));

        let text = render(&view, today());
        assert!(text.contains("✓ Found 1 order(s) for 'Park Ji-sung'."));
        assert!(text.contains("History of Football"));
        assert!(text.contains("Customer id: 1"));
        assert!(text.contains("Book:        (none)"));
        assert!(text.contains("Price:       13000"));
        assert!(text.contains("Order date:  2024-07-09"));
        assert!(text.trim_end().ends_with("✓ Order 11 recorded"));
    }

    #[test]
    fn test_render_unknown_customer_blocks_order_entry() {
        let mut view = ViewState::new();
        view.lookup_name = "Nobody".to_string();
        view.lookup = CustomerLookup::NotFound;

        let text = render(&view, today());
        assert!(text.contains("✗ Customer 'Nobody' does not exist."));
        assert!(text.contains("! 'Nobody' is not in the database"));
        assert!(!text.contains("Customer id:"));
    }
}
