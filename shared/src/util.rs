/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format an amount of minor currency units as a major-unit string.
///
/// All arithmetic in the workspace stays in integer minor units; this is the
/// single conversion point to a human-readable major-unit figure.
///
/// ```
/// assert_eq!(shared::util::format_minor(28000), "280.00");
/// assert_eq!(shared::util::format_minor(-150), "-1.50");
/// ```
pub fn format_minor(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
