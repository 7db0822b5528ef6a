//! Receipt text layout

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};

use crate::{
    domain::orders::models::Order,
    receipts::{Buyer, errors::RenderError, figures::ReceiptFigures, settings::ReceiptSettings},
};

/// Characters that fit across the printable width of a page.
pub(crate) const LINE_WIDTH: usize = 90;

const PRODUCT_COLUMN_WIDTH: usize = 32;

const DATE_FORMAT: &str = "%B %d, %Y %I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emphasis {
    Heading,
    Bold,
    Regular,
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextLine {
    pub(crate) text: String,
    pub(crate) emphasis: Emphasis,
}

impl TextLine {
    fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    fn regular(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Regular)
    }

    fn blank() -> Self {
        Self::regular(String::new())
    }
}

/// Lay the receipt out as a sequence of printed lines.
pub(crate) fn lay_out(
    order: &Order,
    buyer: &Buyer,
    figures: &ReceiptFigures,
    settings: &ReceiptSettings,
) -> Result<Vec<TextLine>, RenderError> {
    let currency = settings.currency;

    let order_date = order
        .order_date
        .to_zoned(settings.time_zone.clone())
        .strftime(DATE_FORMAT)
        .to_string();

    let mut lines = vec![
        TextLine::new(
            format!("{} - Order Receipt", settings.store_name),
            Emphasis::Heading,
        ),
        TextLine::blank(),
        TextLine::regular(format!("Order Number: {}", order.order_number)),
        TextLine::regular(format!("Order Date: {order_date}")),
        TextLine::regular(format!("Status: {}", order.status.label())),
        TextLine::blank(),
        TextLine::new("Bill To", Emphasis::Bold),
    ];

    push_wrapped(&mut lines, &buyer.full_name, "");

    if !buyer.email.is_empty() {
        push_wrapped(&mut lines, &buyer.email, "");
    }

    lines.push(TextLine::regular("Shipping Address:"));
    push_wrapped(&mut lines, &order.shipping_address, "  ");
    lines.push(TextLine::blank());

    let table = item_table(order, currency)?;
    let table_width = table
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    lines.extend(table.lines().map(TextLine::regular));
    lines.push(TextLine::blank());

    let summary = [
        ("Subtotal:", format_money(figures.subtotal, currency, "subtotal")?),
        ("Tax:", format_money(figures.tax, currency, "tax")?),
        ("Shipping:", format_money(figures.shipping, currency, "shipping")?),
        ("Total:", format_money(figures.total, currency, "total")?),
    ];

    let value_width = summary
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in summary {
        let text = format!("{label:>10} {value:>value_width$}");
        let text = format!("{text:>table_width$}");

        let emphasis = if label == "Total:" {
            Emphasis::Bold
        } else {
            Emphasis::Regular
        };

        lines.push(TextLine::new(text, emphasis));
    }

    lines.push(TextLine::blank());
    push_wrapped(
        &mut lines,
        &format!("Payment Method: {}", order.payment_method),
        "",
    );
    lines.push(TextLine::blank());
    lines.push(TextLine::regular("Thank you for your purchase!"));

    Ok(lines)
}

fn item_table(order: &Order, currency: &'static Currency) -> Result<String, RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Qty", "Price", "Total"]);

    for (idx, line) in order.lines.iter().enumerate() {
        let line_total = line
            .line_total()
            .ok_or(RenderError::AmountOverflow("line total"))?;

        builder.push_record([
            (idx + 1).to_string(),
            wrap(&line.product_name, PRODUCT_COLUMN_WIDTH).join("\n"),
            line.quantity.to_string(),
            format_money(line.unit_price, currency, "unit price")?,
            format_money(line_total, currency, "line total")?,
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::ascii());
    let separator = HorizontalLine::new(Some('-'), Some('+'), Some('+'), Some('+'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::first(), Alignment::right());
    table.modify(Columns::new(2..5), Alignment::right());

    Ok(table.to_string())
}

fn format_money(
    amount: u64,
    currency: &'static Currency,
    what: &'static str,
) -> Result<String, RenderError> {
    let minor = i64::try_from(amount).map_err(|_err| RenderError::AmountOverflow(what))?;

    Ok(Money::from_minor(minor, currency).to_string())
}

fn push_wrapped(lines: &mut Vec<TextLine>, text: &str, indent: &str) {
    let width = LINE_WIDTH.saturating_sub(indent.chars().count());

    lines.extend(
        wrap(text, width)
            .into_iter()
            .map(|part| TextLine::regular(format!("{indent}{part}"))),
    );
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }

            let rest = word.split_off(width);
            out.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };

        if needed > width {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }

        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || out.is_empty() {
        out.push(current);
    }

    out
}
