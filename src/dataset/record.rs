use crate::dataset::error::FormatErrorKind;

/// One parsed line: a class label and its raw integer features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub label: usize,
    pub features: Vec<i64>,
    /// 1-based line number inside the source file.
    pub line: usize,
}

/// Layout of a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Leading label tokens; the first is the class index.
    pub label_fields: usize,
    pub feature_fields: usize,
    pub classes: usize,
}

impl RecordLayout {
    pub fn fields(&self) -> usize {
        self.label_fields + self.feature_fields
    }
}

/// Parses one line of comma and/or whitespace separated integers.
///
/// Tokens are consumed left to right: `label_fields` labels, then
/// `feature_fields` features. Extra label tokens beyond the first are
/// validated as integers and otherwise ignored.
pub fn parse_line(text: &str, line: usize, layout: &RecordLayout) -> Result<DatasetRecord, FormatErrorKind> {
    let expected = layout.fields();
    let mut label: Option<i64> = None;
    let mut features = Vec::with_capacity(layout.feature_fields);
    let mut found = 0usize;

    for token in tokens(text) {
        let value = parse_int(token)?;
        if found < layout.label_fields {
            if found == 0 {
                label = Some(value);
            }
        } else if found < expected {
            features.push(value);
        }
        found += 1;
    }

    if found < expected {
        return Err(FormatErrorKind::TooFewFields { found, expected });
    }
    if found > expected {
        return Err(FormatErrorKind::TooManyFields { found, expected });
    }

    let label = label.unwrap_or(0);
    if label < 0 || label as u64 >= layout.classes as u64 {
        return Err(FormatErrorKind::LabelOutOfRange { label, classes: layout.classes });
    }

    Ok(DatasetRecord {
        label: label as usize,
        features,
        line,
    })
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_int(token: &str) -> Result<i64, FormatErrorKind> {
    if let Ok(v) = token.parse::<i64>() {
        return Ok(v);
    }
    let looks_numeric = token.chars().any(|c| c.is_ascii_digit());
    if looks_numeric && token.parse::<f64>().is_ok() {
        Err(FormatErrorKind::FloatToken { token: token.to_string() })
    } else {
        Err(FormatErrorKind::NotInteger { token: token.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LAYOUT: RecordLayout = RecordLayout { label_fields: 1, feature_fields: 4, classes: 10 };

    #[test]
    fn parses_comma_separated_line() {
        let rec = parse_line("7,0,128,255,3", 1, &LAYOUT).unwrap();
        assert_eq!(rec.label, 7);
        assert_eq!(rec.features, vec![0, 128, 255, 3]);
        assert_eq!(rec.line, 1);
    }

    #[test]
    fn accepts_whitespace_and_mixed_separators() {
        let rec = parse_line("  2 \t10, 20 ,30   40 ", 4, &LAYOUT).unwrap();
        assert_eq!(rec.label, 2);
        assert_eq!(rec.features, vec![10, 20, 30, 40]);
    }

    #[test]
    fn rejects_float_token() {
        let err = parse_line("1,0,3.5,0,0", 1, &LAYOUT).unwrap_err();
        assert_eq!(err, FormatErrorKind::FloatToken { token: "3.5".into() });
    }

    #[test]
    fn rejects_word_token() {
        let err = parse_line("1,0,abc,0,0", 1, &LAYOUT).unwrap_err();
        assert_eq!(err, FormatErrorKind::NotInteger { token: "abc".into() });
    }

    #[test]
    fn counts_fields() {
        assert_eq!(
            parse_line("1,0,0", 1, &LAYOUT).unwrap_err(),
            FormatErrorKind::TooFewFields { found: 3, expected: 5 }
        );
        assert_eq!(
            parse_line("1,0,0,0,0,0", 1, &LAYOUT).unwrap_err(),
            FormatErrorKind::TooManyFields { found: 6, expected: 5 }
        );
    }

    #[test]
    fn label_must_be_a_class() {
        assert_eq!(
            parse_line("10,0,0,0,0", 1, &LAYOUT).unwrap_err(),
            FormatErrorKind::LabelOutOfRange { label: 10, classes: 10 }
        );
        assert_eq!(
            parse_line("-1,0,0,0,0", 1, &LAYOUT).unwrap_err(),
            FormatErrorKind::LabelOutOfRange { label: -1, classes: 10 }
        );
    }

    #[test]
    fn extra_label_tokens_come_before_features() {
        let layout = RecordLayout { label_fields: 2, feature_fields: 2, classes: 3 };
        let rec = parse_line("2,9,5,6", 1, &layout).unwrap();
        assert_eq!(rec.label, 2);
        assert_eq!(rec.features, vec![5, 6]);
    }

    proptest! {
        #[test]
        fn any_valid_pixel_row_parses(label in 0usize..10, px in proptest::collection::vec(0i64..=255, 4)) {
            let line = std::iter::once(label.to_string())
                .chain(px.iter().map(|p| p.to_string()))
                .collect::<Vec<_>>()
                .join(",");
            let rec = parse_line(&line, 1, &LAYOUT).unwrap();
            prop_assert_eq!(rec.label, label);
            prop_assert_eq!(rec.features, px);
        }
    }
}
