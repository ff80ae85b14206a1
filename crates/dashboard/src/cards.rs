use analytics::KpiSummary;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One labelled, display-formatted KPI tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCard {
    pub key: String,
    pub label: String,
    pub value: String,
}

impl KpiCard {
    fn new(key: &str, label: &str, value: String) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
        }
    }
}

/// The six dashboard cards, in display order.
pub fn kpi_cards(summary: &KpiSummary) -> Vec<KpiCard> {
    vec![
        KpiCard::new(
            "revenue",
            "Revenue (period)",
            format!("${}", group_thousands(summary.total_revenue, 0)),
        ),
        KpiCard::new(
            "yoy_growth",
            "YoY growth",
            format!("{:.2}%", summary.yoy_growth_pct),
        ),
        KpiCard::new(
            "digital_share",
            "Digital revenue share",
            format!("{:.1}%", summary.digital_share_pct),
        ),
        KpiCard::new("clv", "CLV", format!("${:.1}", summary.clv)),
        KpiCard::new("nps", "NPS", format!("{:.1}", summary.nps_latest)),
        KpiCard::new(
            "inventory_turn",
            "Inventory turnover",
            format!("{:.2}", summary.inventory_turnover_avg),
        ),
    ]
}

/// Formats `value` with `decimals` places and a comma between each group of
/// three integer digits.
pub fn group_thousands(value: Decimal, decimals: u32) -> String {
    let formatted = format!("{:.*}", decimals as usize, value.round_dp(decimals));
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
