use crate::config::Normalization;
use unicode_normalization::UnicodeNormalization;

pub fn normalize(text: &str, form: Normalization) -> Vec<String> {
    let text = text.trim_start_matches('\u{feff}');
    let text: String = match form {
        Normalization::None => text.to_string(),
        Normalization::Nfc => text.nfc().collect(),
        Normalization::Nfkc => text.nfkc().collect(),
    };
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.split('\n')
        .map(|l| l.trim_end().to_string())
        .collect()
}
