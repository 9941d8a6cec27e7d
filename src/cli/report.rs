use crate::core::encode::kilobytes;
use crate::core::search::SearchReport;

const RULE_WIDE: usize = 60;
const RULE_TABLE: usize = 40;

/// Final summary: stop reason, largest confirmed size, recommended size.
pub fn render_summary(report: &SearchReport) -> String {
    let mut out = String::new();

    if let Some(failure) = report.first_failure() {
        let reason = failure
            .failure
            .as_ref()
            .map(|r| r.label())
            .unwrap_or("failed");
        out.push_str(&format!(
            "\n🚫 FAILURE at {} ({:.1} KB, {})\n",
            failure.size,
            kilobytes(failure.encoded_bytes),
            reason
        ));
    }

    out.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDE)));
    out.push_str("📊 FINAL RESULTS:\n");

    match (report.max_success(), report.recommended()) {
        (Some(best), Some(recommended)) => {
            out.push_str(&format!(
                "✅ Maximum size found: {} ({} pixels)\n",
                best.size,
                group_thousands(best.size.area())
            ));
            out.push_str(&format!("📁 Maximum file size: {:.1} KB\n", kilobytes(best.encoded_bytes)));
            out.push_str(&format!("🎯 Recommended dimensions: {}\n", recommended));
        }
        _ => {
            out.push_str("❌ No size worked\n");
        }
    }

    out
}

/// Every attempted size with its outcome and encoded size.
pub fn render_table(report: &SearchReport) -> String {
    let mut out = String::new();
    out.push_str("\n📋 Summary table:\n");
    out.push_str("Size\t\tSuccess\tFile size\n");
    out.push_str(&format!("{}\n", "-".repeat(RULE_TABLE)));

    for result in &report.results {
        let status = if result.success { "✅" } else { "❌" };
        out.push_str(&format!(
            "{}\t\t{}\t{:.1} KB\n",
            result.size,
            status,
            kilobytes(result.encoded_bytes)
        ));
    }

    out
}

pub fn render(report: &SearchReport) -> String {
    format!("{}{}", render_summary(report), render_table(report))
}

pub fn print_report(report: &SearchReport) {
    print!("{}", render(report));
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
