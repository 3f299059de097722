//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// Values are inserted verbatim and not re-scanned for placeholders.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  'scan: while let Some(open) = rest.find('{') {
    out.push_str(&rest[..open]);
    let after = &rest[open..];
    for (k, v) in pairs {
      let needle = format!("{{{}}}", k);
      if after.starts_with(&needle) {
        out.push_str(v);
        rest = &after[needle.len()..];
        continue 'scan;
      }
    }
    out.push('{');
    rest = &after[1..];
  }
  out.push_str(rest);
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with whole questions/answers.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  match s.char_indices().nth(max_chars) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fills_known_keys_and_keeps_unknown() {
    let out = fill_template("Q: {question}\nA: {answer} {other}", &[("question", "Why?"), ("answer", "Because")]);
    assert_eq!(out, "Q: Why?\nA: Because {other}");
  }

  #[test]
  fn inserted_values_are_not_rescanned() {
    let out = fill_template("{question} / {answer}", &[("question", "{answer}"), ("answer", "x")]);
    assert_eq!(out, "{answer} / x");
  }

  #[test]
  fn repeated_keys_are_all_replaced() {
    assert_eq!(fill_template("{t} and {t}", &[("t", "Rust")]), "Rust and Rust");
  }

  #[test]
  fn truncation_is_char_safe() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert_eq!(trunc_for_log("héllo wörld", 5), "héllo… (13 bytes total)");
  }
}
