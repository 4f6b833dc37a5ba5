//! Form Decoding
//!
//! `application/x-www-form-urlencoded` bodies keyed by input name. Unlike a
//! plain map, repeated keys are kept so checkbox groups survive decoding.

/// Decoded form fields in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    /// Decode a urlencoded body or query string
    ///
    /// `+` decodes to a space; malformed percent escapes are kept verbatim.
    pub fn parse(body: &str) -> Self {
        let pairs = body
            .trim_start_matches('?')
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (k, v) = part.split_once('=').unwrap_or((part, ""));
                (decode(k), decode(v))
            })
            .collect();

        Self { pairs }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append the fields of `defaults` that this submission left out
    ///
    /// A name present here, even with a blank value, keeps its submitted
    /// value.
    pub fn or_defaults(mut self, defaults: FormFields) -> Self {
        let submitted: Vec<String> = self.pairs.iter().map(|(k, _)| k.clone()).collect();
        self.pairs
            .extend(defaults.pairs.into_iter().filter(|(k, _)| !submitted.contains(k)));
        self
    }

    /// First value for `name`, trimmed, or `None` when absent or blank
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First value for `name` exactly as submitted
    pub fn raw(&self, name: &str) -> &str {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Every non-blank value submitted under `name`
    pub fn all(&self, name: &str) -> impl Iterator<Item = &str> + '_ {
        let name = name.to_string();
        self.pairs
            .iter()
            .filter(move |(k, _)| *k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Whether a checkbox named `name` was checked
    pub fn checked(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parse the value for `name`, treating blank or unparseable input as absent
    pub fn parse_opt<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.parse().ok())
    }
}

fn decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|c| c.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys() {
        let form = FormFields::parse("symptoms=acne&date=2026-10-01&symptoms=hair-loss&notes=a+b%2C+c");

        let symptoms: Vec<&str> = form.all("symptoms").collect();
        assert_eq!(symptoms, vec!["acne", "hair-loss"]);
        assert_eq!(form.get("notes"), Some("a b, c"));
        assert_eq!(form.get("date"), Some("2026-10-01"));
    }

    #[test]
    fn test_or_defaults_keeps_submitted_values() {
        let defaults = FormFields::from_pairs([("energyLevel", "5"), ("notes", "old"), ("mood", "good")]);
        let form = FormFields::parse("notes=&painLevel=lots").or_defaults(defaults);

        assert_eq!(form.raw("painLevel"), "lots");
        assert_eq!(form.raw("notes"), "");
        assert_eq!(form.get("energyLevel"), Some("5"));
        assert_eq!(form.get("mood"), Some("good"));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let form = FormFields::parse("cycleDay=&sleepHours=abc&weight=70");

        assert_eq!(form.get("cycleDay"), None);
        assert_eq!(form.parse_opt::<f64>("sleepHours"), None);
        assert_eq!(form.parse_opt::<f64>("weight"), Some(70.0));
        assert!(!form.checked("pimples"));
    }

    #[test]
    fn test_raw_keeps_whitespace() {
        let form = FormFields::parse("password=+secret+");
        assert_eq!(form.raw("password"), " secret ");
        assert_eq!(form.raw("missing"), "");
    }
}
