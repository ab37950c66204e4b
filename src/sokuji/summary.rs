use super::Lang;

/// The rendered form of a mogi: everything a summary embed carries, and
/// everything needed to rebuild the match state from one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub description: String,
    pub author_name: Option<String>,
    pub fields: Vec<SummaryField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub name: String,
    pub value: String,
}

impl Summary {
    pub fn is_sokuji(&self) -> bool {
        Lang::ALL
            .iter()
            .any(|lang| self.title.starts_with(lang.title_marker()))
    }

    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(SummaryField {
            name: name.into(),
            value: value.into(),
        });
    }
}

/// Every (possibly negative) integer appearing in `text`, in order.
pub fn integers(text: &str) -> Vec<i64> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = if i > 0 && bytes[i - 1] == b'-' { i - 1 } else { i };
            let mut end = i;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if let Ok(value) = text[start..end].parse() {
                out.push(value);
            }
            i = end;
        } else {
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_finds_signed_numbers_in_score_lines() {
        assert_eq!(
            integers("`10 : 72(-62)`|`1,2,3,4,5,6`"),
            vec![10, 72, -62, 1, 2, 3, 4, 5, 6]
        );
        assert_eq!(integers("`-15 : 0`"), vec![-15, 0]);
        assert_eq!(integers("no digits here"), Vec::<i64>::new());
    }

    #[test]
    fn sokuji_titles_are_recognized_in_both_languages() {
        let mut summary = Summary {
            title: String::from("Sokuji 6v6\nA - B"),
            ..Summary::default()
        };
        assert!(summary.is_sokuji());
        summary.title = String::from("即時集計 6v6\nA - B");
        assert!(summary.is_sokuji());
        summary.title = String::from("Tracking output");
        assert!(!summary.is_sokuji());
    }
}
