/// Format a signed amount with comma grouping ("12,345", "-1,000").
pub(crate) fn yen(n: i64) -> String {
    let sign = if n < 0 { "-" } else { "" };
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let formatted: String = grouped.chars().rev().collect();
    format!("{sign}{formatted}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(yen(0), "0");
        assert_eq!(yen(999), "999");
        assert_eq!(yen(1000), "1,000");
        assert_eq!(yen(1234567), "1,234,567");
    }

    #[test]
    fn keeps_the_sign_outside_the_grouping() {
        assert_eq!(yen(-1000), "-1,000");
        assert_eq!(yen(-999), "-999");
    }
}
