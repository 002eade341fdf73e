//! Sentinel labels: the reserved marker strings AddressBook stores in
//! `ZLABEL` columns instead of free text.
//!
//! Source labels are classified once, when a row is read, so that rendering
//! code matches on [`Label`] variants rather than comparing raw strings.

// ─── Sentinels ───────────────────────────────────────────────────────────────

const HOME: &str = "_$!<Home>!$_";
const WORK: &str = "_$!<Work>!$_";
const OTHER: &str = "_$!<Other>!$_";
const MOBILE: &str = "_$!<Mobile>!$_";
const IPHONE: &str = "iPhone";
const MAIN: &str = "_$!<Main>!$_";
const HOME_FAX: &str = "_$!<HomeFAX>!$_";
const WORK_FAX: &str = "_$!<WorkFAX>!$_";
const OTHER_FAX: &str = "_$!<OtherFAX>!$_";
const PAGER: &str = "_$!<Pager>!$_";

// ─── Label ───────────────────────────────────────────────────────────────────

/// A classified source label.
///
/// Home, Work and Other are the canonical categories shared by every
/// labelled kind. The remaining sentinels only carry meaning for phone
/// numbers; other kinds treat them like free text. A missing label is an
/// empty [`Label::Custom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
  Home,
  Work,
  Other,
  Mobile,
  IPhone,
  Main,
  HomeFax,
  WorkFax,
  OtherFax,
  Pager,
  /// Free text entered by the user, e.g. "Sales Line".
  Custom(String),
}

impl Label {
  /// Classify a raw `ZLABEL` value.
  pub fn from_source(raw: Option<&str>) -> Self {
    match raw.unwrap_or_default() {
      HOME => Self::Home,
      WORK => Self::Work,
      OTHER => Self::Other,
      MOBILE => Self::Mobile,
      IPHONE => Self::IPhone,
      MAIN => Self::Main,
      HOME_FAX => Self::HomeFax,
      WORK_FAX => Self::WorkFax,
      OTHER_FAX => Self::OtherFax,
      PAGER => Self::Pager,
      other => Self::Custom(other.to_owned()),
    }
  }

  /// The exact text the source stored for this label.
  ///
  /// Used as the human-readable `X-ABLabel` when a label has no standard
  /// type parameter for the kind being rendered.
  pub fn as_source_str(&self) -> &str {
    match self {
      Self::Home => HOME,
      Self::Work => WORK,
      Self::Other => OTHER,
      Self::Mobile => MOBILE,
      Self::IPhone => IPHONE,
      Self::Main => MAIN,
      Self::HomeFax => HOME_FAX,
      Self::WorkFax => WORK_FAX,
      Self::OtherFax => OTHER_FAX,
      Self::Pager => PAGER,
      Self::Custom(s) => s,
    }
  }
}

impl Default for Label {
  fn default() -> Self { Self::Custom(String::new()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sentinels_are_classified() {
    assert_eq!(Label::from_source(Some("_$!<Home>!$_")), Label::Home);
    assert_eq!(Label::from_source(Some("_$!<Work>!$_")), Label::Work);
    assert_eq!(Label::from_source(Some("_$!<Other>!$_")), Label::Other);
    assert_eq!(Label::from_source(Some("iPhone")), Label::IPhone);
    assert_eq!(Label::from_source(Some("_$!<WorkFAX>!$_")), Label::WorkFax);
  }

  #[test]
  fn free_text_is_custom() {
    assert_eq!(
      Label::from_source(Some("Sales Line")),
      Label::Custom("Sales Line".to_string())
    );
    // Sentinels are case-sensitive in the source.
    assert_eq!(
      Label::from_source(Some("_$!<home>!$_")),
      Label::Custom("_$!<home>!$_".to_string())
    );
  }

  #[test]
  fn missing_or_empty_is_empty_custom() {
    assert_eq!(Label::from_source(None), Label::Custom(String::new()));
    assert_eq!(Label::from_source(Some("")), Label::Custom(String::new()));
    assert_eq!(Label::default(), Label::from_source(None));
    assert_eq!(Label::from_source(None).as_source_str(), "");
  }

  #[test]
  fn source_str_round_trips() {
    for raw in ["_$!<Mobile>!$_", "_$!<Pager>!$_", "iPhone", "Sales Line"] {
      assert_eq!(Label::from_source(Some(raw)).as_source_str(), raw);
    }
  }
}
