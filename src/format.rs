/// Format a headline number with a unit prefix and a magnitude label.
///
/// The value is divided by 1000 while it is at least 1000; the label moves
/// from `""` to `"thousand"` and then `"million"`, which absorbs everything
/// larger. Two decimals are always shown.
///
/// ```rust
/// use sales_dashboard::format_number;
///
/// assert_eq!(format_number(500.0, ""), " 500.00 ");
/// assert_eq!(format_number(1500.0, "R$"), "R$ 1.50 thousand");
/// assert_eq!(format_number(2_300_000.0, "R$"), "R$ 2.30 million");
/// ```
pub fn format_number(value: f64, prefix: &str) -> String {
    let mut value = value;
    for unit in ["", "thousand"] {
        if value < 1000.0 {
            return format!("{} {:.2} {}", prefix, value, unit);
        }
        value /= 1000.0;
    }
    format!("{} {:.2} million", prefix, value)
}
