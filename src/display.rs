use sales_dashboard::{format_number, DashboardSnapshot, MonthTotal};

/// Print the metrics and top-N tables of a snapshot.
pub fn display_snapshot(snap: &DashboardSnapshot) {
    println!("\n{}", "=".repeat(72));
    println!("  Receita total: {}", snap.revenue_label.trim());
    println!("  Quantidade de vendas: {}", snap.sales_label.trim());
    println!("{}", "=".repeat(72));

    println!("\nTop estados (receita)");
    println!("{:<24} {:>22} {:>12}", "Local da compra", "Receita", "Vendas");
    println!("{}", "-".repeat(60));
    for s in &snap.top_states_by_revenue {
        println!("{:<24} {:>22} {:>12}", s.location, format_number(s.revenue, "R$").trim(), s.sales);
    }

    println!("\nTop estados (quantidade de vendas)");
    for s in &snap.top_states_by_sales {
        println!("{:<24} {:>12}", s.location, s.sales);
    }

    println!("\nTop categorias (receita)");
    for c in &snap.top_categories_by_revenue {
        println!("{:<24} {:>22}", c.category, format_number(c.revenue, "R$").trim());
    }

    println!("\nTop categorias (quantidade de vendas)");
    for c in &snap.top_categories_by_sales {
        println!("{:<24} {:>12}", c.category, c.sales);
    }

    println!("\nTop {} vendedores (receita)", snap.top_sellers_by_revenue.len());
    for s in &snap.top_sellers_by_revenue {
        println!("{:<24} {:>22}", s.seller, format_number(s.revenue, "R$").trim());
    }

    println!("\nTop {} vendedores (quantidade de vendas)", snap.top_sellers_by_sales.len());
    for s in &snap.top_sellers_by_sales {
        println!("{:<24} {:>12}", s.seller, s.sales);
    }

    display_monthly(&snap.monthly);
}

fn display_monthly(months: &[MonthTotal]) {
    if months.is_empty() {
        println!("\nSem dados mensais");
        return;
    }

    println!("\nReceita mensal");
    println!("{:<6} {:<12} {:>22} {:>10}", "Ano", "Mês", "Receita", "Vendas");
    println!("{}", "-".repeat(54));
    for m in months {
        println!(
            "{:<6} {:<12} {:>22} {:>10}",
            m.year,
            m.month_name,
            format_number(m.revenue, "R$").trim(),
            m.sales
        );
    }
    println!("{}", "=".repeat(72));
}
