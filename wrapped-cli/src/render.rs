//! Plain-text views of the metrics bundles

use std::fmt::{self, Write};
use wrapped_metrics::{MetricsBundle, WrappedSlides};

pub fn dashboard_text(m: &MetricsBundle) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_dashboard(&mut out, m)?;
    Ok(out)
}

pub fn slides_text(s: &WrappedSlides) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_slides(&mut out, s)?;
    Ok(out)
}

fn write_dashboard(out: &mut String, m: &MetricsBundle) -> fmt::Result {
    writeln!(out, "# Dashboard\n")?;
    writeln!(out, "Total receipts: {}", m.receipts)?;
    writeln!(out, "Total items:    {}", m.total_items)?;
    writeln!(out, "Unique items:   {}", m.unique_items)?;
    writeln!(out, "Total spent:    ${:.2}", m.total_spent)?;

    writeln!(out, "\n## Spend by category\n")?;
    for c in &m.category_breakdown {
        writeln!(out, "- {:<14} ${:.2}", c.category.label(), c.total)?;
    }

    writeln!(out, "\n## Most purchased\n")?;
    for (i, it) in m.most_purchased.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {} | qty={} | spent=${:.2}",
            i + 1,
            it.name,
            it.qty,
            it.total_spent
        )?;
    }

    writeln!(out, "\n## Repeat purchases\n")?;
    for r in &m.repeat_purchases {
        writeln!(out, "- {} | months={} | qty={}", r.name, r.months, r.qty)?;
    }

    writeln!(out, "\n## Price increases\n")?;
    for p in &m.price_increases {
        writeln!(
            out,
            "- {} | ${:.2} → ${:.2} (+${:.2}) over {:.1} months (${:.2}/month)",
            p.name, p.min_price, p.max_price, p.increase, p.period_months, p.rate_per_month
        )?;
    }

    writeln!(out, "\n## Most expensive days\n")?;
    for d in &m.expensive_days {
        writeln!(out, "- {} | ${:.2}", d.date, d.total)?;
    }

    writeln!(out, "\n## Monthly spend\n")?;
    for (month, total) in &m.monthly {
        writeln!(out, "- {month} | ${total:.2}")?;
    }

    if let Some(warehouses) = &m.warehouse_totals {
        writeln!(out, "\n## Warehouses\n")?;
        for (label, total) in warehouses {
            writeln!(out, "- {label} | ${total:.2}")?;
        }
    }
    Ok(())
}

fn write_slides(out: &mut String, s: &WrappedSlides) -> fmt::Result {
    writeln!(out, "# Your year in receipts\n")?;
    writeln!(out, "You spent ${:.2}\n", s.total_spend)?;

    writeln!(out, "## Top categories")?;
    for (i, c) in s.top_categories.iter().enumerate() {
        writeln!(out, "{}. {} — {}", i + 1, c.category, c.count)?;
    }

    writeln!(out, "\n## Top items")?;
    for (i, it) in s.top_items.iter().enumerate() {
        writeln!(out, "{}. {} — {}", i + 1, it.name, it.qty)?;
    }

    writeln!(out, "\n## Spend by month")?;
    for (label, value) in s.monthly_labels.iter().zip(&s.monthly_values) {
        writeln!(out, "{label}: ${value:.2}")?;
    }

    writeln!(out, "\n## Most expensive day")?;
    match &s.most_expensive_day {
        Some(day) => writeln!(out, "{}: ${:.2}", day.date, day.amount)?,
        None => writeln!(out, "Unknown Date")?,
    }

    writeln!(out, "\n## Food court soulmate")?;
    writeln!(out, "{}", s.deli_favorite)?;
    Ok(())
}
