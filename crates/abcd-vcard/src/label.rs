//! Label resolution: turns a classified [`Label`] plus list position into
//! either inline `type=` parameters or an `itemN.` group with an
//! `X-ABLabel`.
//!
//! Resolution is pure. Group numbers are assigned by the card being built,
//! see `serialize::Card`.

use abcd_core::label::Label;

use crate::escape::escape;

// ─── Fragment ────────────────────────────────────────────────────────────────

/// A rendered property, before group numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
  /// A single content line.
  Plain(String),
  /// A property whose label has no standard type; emitted as
  /// `itemN.<field>` followed by `itemN.X-ABLabel:<label>`.
  Grouped {
    field: String,
    /// Already escaped.
    label: String,
  },
}

// ─── Schemes ─────────────────────────────────────────────────────────────────

/// Which labels a property kind renders as standard type parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScheme {
  /// Home and Work only (email, URL, messaging).
  Basic,
  /// Home, Work and Other (postal address).
  WithOther,
  /// The telephone table.
  Phone,
}

impl LabelScheme {
  fn type_params(self, label: &Label) -> Option<&'static str> {
    match (self, label) {
      (Self::Phone, label) => phone_type_params(label),
      (_, Label::Home) => Some(";type=HOME"),
      (_, Label::Work) => Some(";type=WORK"),
      (Self::WithOther, Label::Other) => Some(";type=OTHER"),
      _ => None,
    }
  }
}

fn phone_type_params(label: &Label) -> Option<&'static str> {
  let params = match label {
    Label::Mobile   => ";type=CELL;type=VOICE",
    Label::IPhone   => ";type=IPHONE;type=CELL;type=VOICE",
    Label::Home     => ";type=HOME;type=VOICE",
    Label::Work     => ";type=WORK;type=VOICE",
    Label::Main     => ";type=MAIN",
    Label::HomeFax  => ";type=HOME;type=FAX",
    Label::WorkFax  => ";type=WORK;type=FAX",
    Label::OtherFax => ";type=OTHER;type=FAX",
    Label::Pager    => ";type=PAGER",
    Label::Other    => ";type=OTHER;type=VOICE",
    Label::Custom(_) => return None,
  };
  Some(params)
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Compose `prefix[type params](;type=pref:|:)suffix`.
///
/// `suffix` must already be escaped. The first entry of a list is marked
/// preferred whether or not its label is standard. Any label without type
/// parameters, the empty one included, is grouped.
pub fn resolve_with(
  prefix: &str,
  label: &Label,
  is_first: bool,
  suffix: &str,
  scheme: LabelScheme,
) -> Fragment {
  let separator = if is_first { ";type=pref:" } else { ":" };
  match scheme.type_params(label) {
    Some(params) => Fragment::Plain(format!("{prefix}{params}{separator}{suffix}")),
    None => Fragment::Grouped {
      field: format!("{prefix}{separator}{suffix}"),
      label: escape(label.as_source_str()),
    },
  }
}

/// Resolve for the Home/Work kinds, also honouring Other when
/// `honor_other` is set (addresses).
pub fn resolve(
  prefix: &str,
  label: &Label,
  is_first: bool,
  suffix: &str,
  honor_other: bool,
) -> Fragment {
  let scheme = if honor_other { LabelScheme::WithOther } else { LabelScheme::Basic };
  resolve_with(prefix, label, is_first, suffix, scheme)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plain(f: Fragment) -> String {
    match f {
      Fragment::Plain(s) => s,
      other => panic!("expected plain fragment, got {other:?}"),
    }
  }

  #[test]
  fn home_email_with_and_without_pref() {
    let home = Label::Home;
    assert_eq!(
      plain(resolve("EMAIL;type=INTERNET", &home, false, "a@x", false)),
      "EMAIL;type=INTERNET;type=HOME:a@x"
    );
    assert_eq!(
      plain(resolve("EMAIL;type=INTERNET", &home, true, "a@x", false)),
      "EMAIL;type=INTERNET;type=HOME;type=pref:a@x"
    );
  }

  #[test]
  fn other_is_standard_only_when_honoured() {
    let other = Label::Other;
    assert_eq!(
      plain(resolve("ADR", &other, false, ";;x", true)),
      "ADR;type=OTHER:;;x"
    );
    assert_eq!(
      resolve("URL", &other, false, "u", false),
      Fragment::Grouped {
        field: "URL:u".to_string(),
        label: "_$!<Other>!$_".to_string(),
      }
    );
  }

  #[test]
  fn custom_label_is_grouped_and_keeps_pref() {
    let custom = Label::Custom("Sales, East".to_string());
    assert_eq!(
      resolve_with("TEL", &custom, true, "555", LabelScheme::Phone),
      Fragment::Grouped {
        field: "TEL;type=pref:555".to_string(),
        label: "Sales\\, East".to_string(),
      }
    );
  }

  #[test]
  fn phone_table() {
    let cases = [
      (Label::Mobile, "TEL;type=CELL;type=VOICE:1"),
      (Label::Home, "TEL;type=HOME;type=VOICE:1"),
      (Label::Work, "TEL;type=WORK;type=VOICE:1"),
      (Label::HomeFax, "TEL;type=HOME;type=FAX:1"),
      (Label::IPhone, "TEL;type=IPHONE;type=CELL;type=VOICE:1"),
      (Label::Main, "TEL;type=MAIN:1"),
      (Label::WorkFax, "TEL;type=WORK;type=FAX:1"),
      (Label::OtherFax, "TEL;type=OTHER;type=FAX:1"),
      (Label::Pager, "TEL;type=PAGER:1"),
      (Label::Other, "TEL;type=OTHER;type=VOICE:1"),
    ];
    for (label, expected) in cases {
      assert_eq!(
        plain(resolve_with("TEL", &label, false, "1", LabelScheme::Phone)),
        expected
      );
    }
  }

  #[test]
  fn phone_sentinels_are_custom_for_other_kinds() {
    let mobile = Label::Mobile;
    assert!(matches!(
      resolve("EMAIL;type=INTERNET", &mobile, false, "a@x", false),
      Fragment::Grouped { .. }
    ));
  }

  #[test]
  fn unlabelled_entry_is_grouped_with_empty_label() {
    let none = Label::from_source(None);
    assert_eq!(
      resolve("URL", &none, true, "u", false),
      Fragment::Grouped {
        field: "URL;type=pref:u".to_string(),
        label: String::new(),
      }
    );
    assert!(matches!(
      resolve_with("TEL", &none, false, "1", LabelScheme::Phone),
      Fragment::Grouped { .. }
    ));
  }
}
