//! Duration rendering for benchmark summaries.

use serde::{Deserialize, Serialize};

/// Selects how the microsecond column is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStyle {
  /// `us = seconds * 1_000_000`
  #[default]
  Corrected,
  /// Historical report format, where the microsecond column repeats the
  /// millisecond value.
  Legacy,
}

impl UnitStyle {
  pub fn format(self, seconds: f64) -> String {
    match self {
      UnitStyle::Corrected => format_result(seconds),
      UnitStyle::Legacy => format_result_legacy(seconds),
    }
  }
}

/// Render `seconds` as `"<s>s, <ms>ms, <us>us"` with three decimals each.
pub fn format_result(seconds: f64) -> String {
  render(seconds, seconds * 1_000.0, seconds * 1_000_000.0)
}

/// Same layout as [`format_result`], reproducing the old microsecond value.
pub fn format_result_legacy(seconds: f64) -> String {
  render(seconds, seconds * 1_000.0, seconds * 1_000.0)
}

fn render(secs: f64, ms: f64, us: f64) -> String {
  format!("{:.3}s, {:.3}ms, {:.3}us", secs, ms, us)
}
