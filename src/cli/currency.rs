use super::ui;
use crate::core::CurrencyContext;
use crate::core::currency::{CATALOG, find_by_code};
use crate::store::Store;
use anyhow::{Result, anyhow};
use comfy_table::{Attribute, Cell, Color, Table};

/// The catalog with the current selection marked.
pub fn render_catalog<S: Store>(ctx: &CurrencyContext<S>) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("Currency"),
        ui::header_cell("Symbol"),
    ]);

    for entry in CATALOG.iter() {
        let selected = entry.code == ctx.selection().code;
        let marker = if selected {
            Cell::new("●").fg(Color::Green)
        } else {
            Cell::new("")
        };
        let mut code = Cell::new(entry.code);
        if selected {
            code = code.add_attribute(Attribute::Bold).fg(Color::Green);
        }
        table.add_row(vec![
            marker,
            code,
            Cell::new(format!("{} {}", entry.flag, entry.country)),
            Cell::new(entry.name),
            Cell::new(entry.symbol),
        ]);
    }
    table
}

pub fn list<S: Store>(ctx: &CurrencyContext<S>) {
    println!("{}", render_catalog(ctx));
}

pub fn show<S: Store>(ctx: &CurrencyContext<S>) {
    let c = ctx.selection();
    println!(
        "{} {} ({}) - {}",
        c.flag,
        ui::style_text(&c.name, ui::StyleType::Title),
        c.code,
        c.country
    );
    println!(
        "{} {}",
        ui::style_text("Sample:", ui::StyleType::Subtle),
        ctx.format(1234.5)
    );
}

pub fn select<S: Store>(ctx: &mut CurrencyContext<S>, code: &str) -> Result<()> {
    let currency = find_by_code(code).ok_or_else(|| {
        anyhow!("Unknown currency: {code}. Run `wealthwise currency list` for the supported codes")
    })?;
    ctx.select(currency)?;
    println!(
        "Amounts will now be shown in {} {}",
        ctx.selection().flag,
        ui::style_text(&ctx.selection().name, ui::StyleType::TotalLabel)
    );
    Ok(())
}

/// Prints the first-visit prompt once per session.
pub fn welcome<S: Store>(ctx: &mut CurrencyContext<S>) {
    if !ctx.show_welcome() {
        return;
    }

    println!(
        "{}",
        ui::style_text("Welcome to WealthWise!", ui::StyleType::Title)
    );
    println!(
        "Select your country to see calculations in your local currency. Until then amounts use {}.",
        ctx.selection().code
    );
    println!("{}", render_catalog(ctx));
    println!(
        "{}",
        ui::style_text(
            "Choose with `wealthwise currency select <CODE>`; you can change it anytime.",
            ui::StyleType::Subtle
        )
    );
    ui::print_separator();
    ctx.set_show_welcome(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_select_known_code() {
        let mut ctx = CurrencyContext::load(MemoryStore::new()).unwrap();
        select(&mut ctx, "kes").unwrap();
        assert_eq!(ctx.selection().code, "KES");
        assert_eq!(ctx.format(1000.0), "KSh1,000.00");
    }

    #[test]
    fn test_select_unknown_code() {
        let mut ctx = CurrencyContext::load(MemoryStore::new()).unwrap();
        let err = select(&mut ctx, "ABC").unwrap_err();
        assert!(err.to_string().contains("Unknown currency: ABC"));
        assert_eq!(ctx.selection().code, "USD");
    }

    #[test]
    fn test_welcome_shown_once_per_session() {
        let mut ctx = CurrencyContext::load(MemoryStore::new()).unwrap();
        assert!(ctx.show_welcome());
        welcome(&mut ctx);
        assert!(!ctx.show_welcome());
    }

    #[test]
    fn test_catalog_lists_every_currency() {
        let ctx = CurrencyContext::load(MemoryStore::new()).unwrap();
        let table = render_catalog(&ctx).to_string();
        for entry in CATALOG.iter() {
            assert!(table.contains(entry.code), "{} missing", entry.code);
        }
    }
}
