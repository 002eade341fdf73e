//! Text value escaping (RFC 2426 §4).

/// Escape a value for interpolation: `\`, `;`, `,` and line breaks.
///
/// CRLF is normalised to a single escaped newline.
pub fn escape(s: &str) -> String {
  s.replace('\\', "\\\\")
   .replace(';', "\\;")
   .replace(',', "\\,")
   .replace("\r\n", "\\n")
   .replace('\n', "\\n")
}

/// Inverse of [`escape`]. Unknown escape sequences are kept verbatim.
pub fn unescape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n' | 'N') => out.push('\n'),
      Some(next @ ('\\' | ';' | ',')) => out.push(next),
      Some(other) => {
        out.push('\\');
        out.push(other);
      }
      None => out.push('\\'),
    }
  }
  out
}
